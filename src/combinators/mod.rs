//! Lazy combinators over controllable producers.
//!
//! Each node owns its upstream and does work only when pulled. `close` and
//! `inject` travel upstream through every node, so a chain releases the
//! source's resources as soon as its consumer stops.
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! let mut n = 0_u64;
//! let naturals = fuse(from_fn(move || {
//!     n += 1;
//!     Ok::<_, ()>(Step::<u64, ()>::Yield(n - 1))
//! }));
//!
//! let mut seen = Vec::new();
//! naturals
//!     .skip(3)
//!     .transform(|x| x * 2)
//!     .take(5)
//!     .for_each(|x| seen.push(x))
//!     .unwrap();
//! assert_eq!(seen, vec![6, 8, 10, 12, 14]);
//! ```

mod drive;
mod skip;
mod take;
mod transform;

pub use drive::{for_each, try_for_each};
pub use skip::Skip;
pub use take::Take;
pub use transform::{Transform, TryTransform};
