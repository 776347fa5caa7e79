//! Commonly used imports
//!
//! Use `use pullseq::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Controllable, Producer, ProducerState, PullError, Step};

// Generators
pub use crate::generator::{Generator, Resume, Routine, generator, routine};

// Plain producers
pub use crate::build::{finished, from_fn, from_iter, fuse};

// Iteration
pub use crate::iterate::{IterateSelf, iterate};
