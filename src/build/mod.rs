//! Building producers from scratch
//!
//! Plain producers come from closures and iterators; [`fuse`] lifts any plain
//! producer into the controllable contract. Generators with real suspension
//! points are built from a [`Routine`](crate::generator::Routine) instead.

mod func;
mod fuse;

pub use func::{FromFn, FromIter, Finished, finished, from_fn, from_iter};
pub use fuse::{Fused, fuse};
