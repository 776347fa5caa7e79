//! Failures surfaced by the pull protocol.
//!
//! Every operation on a producer returns `Result<Step<..>, PullError<E>>`,
//! where `E` is the producer's own error type. The runtime never swallows
//! an error: whatever goes wrong is handed to the immediate caller.

use std::fmt;

use thiserror::Error;

use crate::producer::ProducerState;

/// Error returned by `pull`, `close` and `inject`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PullError<E> {
    /// The producer body failed while it was running.
    #[error("producer failed: {0}")]
    Computation(E),

    /// An error delivered through `inject` escaped the producer body.
    #[error("injected error was not handled: {0}")]
    Injected(E),

    /// The operation is not valid in the producer's current state.
    #[error(transparent)]
    IllegalState(#[from] IllegalState),
}

impl<E> PullError<E> {
    /// The producer's own error, if this failure carries one.
    pub fn into_inner(self) -> Option<E> {
        match self {
            PullError::Computation(e) | PullError::Injected(e) => Some(e),
            PullError::IllegalState(_) => None,
        }
    }

    pub fn is_illegal_state(&self) -> bool {
        matches!(self, PullError::IllegalState(_))
    }
}

/// A protocol operation attempted in a state that cannot accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {operation} a producer that is {state}")]
pub struct IllegalState {
    pub operation: Operation,
    pub state: ProducerState,
}

impl IllegalState {
    pub(crate) fn new(operation: Operation, state: ProducerState) -> Self {
        Self { operation, state }
    }
}

/// The entry points of a controllable producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Pull,
    Close,
    Inject,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Pull => f.write_str("pull"),
            Operation::Close => f.write_str("close"),
            Operation::Inject => f.write_str("inject into"),
        }
    }
}
