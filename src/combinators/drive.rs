//! Terminal operations that own the pull loop.

use crate::{
    error::PullError,
    producer::{Controllable, Producer},
    step::Step,
};

/// Pull `producer` until it finishes, calling `f` on every item.
///
/// Returns the producer's final result, or the first error it raised.
pub fn for_each<P, F>(mut producer: P, mut f: F) -> Result<P::Return, PullError<P::Error>>
where
    P: Producer,
    F: FnMut(P::Item),
{
    loop {
        match producer.pull()? {
            Step::Yield(item) => f(item),
            Step::Done(value) => return Ok(value),
        }
    }
}

/// Like [`for_each`], but `f` may fail.
///
/// A failing callback stops the loop: the producer is closed with
/// `Return::default()` and the callback's error is returned as
/// [`PullError::Computation`].
pub fn try_for_each<P, F>(mut producer: P, mut f: F) -> Result<P::Return, PullError<P::Error>>
where
    P: Controllable,
    P::Return: Default,
    F: FnMut(P::Item) -> Result<(), P::Error>,
{
    loop {
        match producer.pull()? {
            Step::Yield(item) => {
                if let Err(e) = f(item) {
                    if producer.close(P::Return::default()).is_err() {
                        tracing::warn!("closing producer after a failed callback also failed");
                    }
                    return Err(PullError::Computation(e));
                }
            }
            Step::Done(value) => return Ok(value),
        }
    }
}
