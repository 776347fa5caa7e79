//! # Pullseq: Lazy Pull-Based Sequences
//!
//! Build producers that hand out values one at a time, can be terminated
//! early or have errors delivered at their suspension point, and compose
//! into lazy pipelines that release their resources deterministically.
//!
//! ## Core Traits
//!
//! - **[`Producer`]**: a source that yields [`Step`]s on demand
//! - **[`Controllable`]**: a producer that can also be closed or injected into
//! - **[`Routine`]**: the body of a [`Generator`], written as a state machine
//! - **[`IterateSelf`]**: a producer that is its own iteration source
//!
//! ## Example
//!
//! ```
//! use pullseq::prelude::*;
//!
//! let mut n = 0_u64;
//! let naturals = generator(routine(move |_: Resume<()>| {
//!     n += 1;
//!     Ok(Step::<u64, ()>::Yield(n - 1))
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
//!
//! ## Common Functions
//!
//! **Building producers:**
//! - [`generator(routine)`](generator()) - drive a resumable routine
//! - [`routine(f)`](routine()) - a routine from a closure
//! - [`from_fn(f)`](from_fn()) and [`from_iter(iter)`](from_iter()) - plain producers
//! - [`finished(value)`](finished()) - a producer that is done from the start
//! - [`fuse(producer)`](fuse()) - give a plain producer the controllable contract
//!
//! **Consuming:**
//! - [`Controllable::for_each`] - drive to the end with a callback
//! - [`iterate(source)`](iterate()) - a `for`-loop view that closes on early exit

pub mod build;
pub mod combinators;
mod error;
pub mod generator;
pub mod iterate;
pub mod prelude;
mod producer;
mod step;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod testing;

pub use build::{finished, from_fn, from_iter, fuse};
pub use error::{IllegalState, Operation, PullError};
pub use generator::{Generator, Resume, Routine, generator, routine};
pub use iterate::{Cursor, IterateSelf, iterate};
pub use producer::{Controllable, Producer, ProducerState, Pulled};
pub use step::Step;
