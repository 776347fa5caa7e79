//! Bridging producers into Rust iteration.
//!
//! [`IterateSelf`] marks a producer as its own iteration source: looking it
//! up hands back the very same producer, never a fresh copy. [`iterate`]
//! and the [`Cursor`] it returns play the part of a `for` loop over that
//! source. A cursor dropped before the producer finished closes it, which is
//! how an early `break` releases the producer's resources.
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! let mut letters = fuse(from_iter("abc".chars()));
//! let mut seen = String::new();
//! for c in iterate(&mut letters) {
//!     seen.push(c.unwrap());
//! }
//! assert_eq!(seen, "abc");
//! ```

use std::mem;

use either::Either;

use crate::{
    error::PullError,
    producer::{Controllable, Pulled},
    step::Step,
};

/// Capability of a producer that is already an iterator over itself.
pub trait IterateSelf: Controllable {
    /// Look up the iteration source, which is the producer itself.
    fn as_producer(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self
    }
}

impl<P> IterateSelf for &mut P where P: IterateSelf + ?Sized {}

impl<P> IterateSelf for Box<P> where P: IterateSelf + ?Sized {}

impl<L, R> IterateSelf for Either<L, R>
where
    L: IterateSelf,
    R: IterateSelf<Item = L::Item, Return = L::Return, Error = L::Error>,
{
}

/// Start a loop over a self-iterating source.
pub fn iterate<S>(source: &mut S) -> Cursor<'_, S>
where
    S: IterateSelf,
    S::Return: Default,
{
    Cursor::new(source.as_producer())
}

/// A `for`-loop view of a controllable producer.
///
/// Yields `Ok(item)` until the producer reports `Done`, or a single
/// `Err(..)` if it fails. While the producer is still live, dropping the
/// cursor closes it with `Return::default()`.
pub struct Cursor<'a, P>
where
    P: Controllable,
    P::Return: Default,
{
    producer: &'a mut P,
    state: CursorState<P::Return>,
}

enum CursorState<R> {
    Active,
    Complete(R),
    Failed,
    Released,
}

impl<'a, P> Cursor<'a, P>
where
    P: Controllable,
    P::Return: Default,
{
    pub fn new(producer: &'a mut P) -> Self {
        Self {
            producer,
            state: CursorState::Active,
        }
    }

    /// Check if the producer reported `Done`.
    pub fn is_complete(&self) -> bool {
        matches!(self.state, CursorState::Complete(_))
    }

    /// Get a reference to the final result if the producer finished.
    pub fn return_value(&self) -> Option<&P::Return> {
        match &self.state {
            CursorState::Complete(ret) => Some(ret),
            _ => None,
        }
    }

    /// Consume the cursor and return the final result if complete.
    ///
    /// A cursor that is still active closes its producer on the way out.
    pub fn into_return(mut self) -> Option<P::Return> {
        match mem::replace(&mut self.state, CursorState::Released) {
            CursorState::Complete(ret) => Some(ret),
            CursorState::Active => {
                self.state = CursorState::Active;
                None
            }
            CursorState::Failed | CursorState::Released => None,
        }
    }

    /// Stop iterating and close the producer, reporting how that went.
    pub fn close(mut self) -> Pulled<P::Item, P::Return, P::Error> {
        self.state = CursorState::Released;
        self.producer.close(P::Return::default())
    }
}

impl<P> Iterator for Cursor<'_, P>
where
    P: Controllable,
    P::Return: Default,
{
    type Item = Result<P::Item, PullError<P::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if !matches!(self.state, CursorState::Active) {
            return None;
        }
        match self.producer.pull() {
            Ok(Step::Yield(item)) => Some(Ok(item)),
            Ok(Step::Done(ret)) => {
                self.state = CursorState::Complete(ret);
                None
            }
            Err(e) => {
                self.state = CursorState::Failed;
                Some(Err(e))
            }
        }
    }
}

impl<P> Drop for Cursor<'_, P>
where
    P: Controllable,
    P::Return: Default,
{
    fn drop(&mut self) {
        if !matches!(self.state, CursorState::Active) {
            return;
        }
        tracing::debug!("loop left early, closing producer");
        if self.producer.close(P::Return::default()).is_err() {
            tracing::warn!("closing an abandoned producer failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{finished, from_iter, fuse};
    use crate::combinators::{Skip, Take};
    use crate::generator::Generator;
    use crate::producer::{Producer, ProducerState};
    use crate::testing::{Naturals, TestError};

    #[test]
    fn test_lookup_returns_the_same_producer() {
        let mut naturals = Naturals::generator();

        let first: *const _ = naturals.as_producer();
        let second: *const _ = naturals.as_producer();
        assert!(std::ptr::eq(first, second));

        assert_eq!(naturals.as_producer().pull().unwrap(), Step::Yield(0));
        assert_eq!(naturals.as_producer().pull().unwrap(), Step::Yield(1));
    }

    #[test]
    fn test_two_loops_share_state() {
        let mut naturals = Naturals::generator();

        let first: Vec<u64> = iterate(&mut naturals)
            .take(3)
            .map(Result::unwrap)
            .collect();
        assert_eq!(first, vec![0, 1, 2]);

        // the first loop closed the producer when it was abandoned
        assert_eq!(naturals.state(), ProducerState::Completed);
        assert_eq!(iterate(&mut naturals).count(), 0);
    }

    #[test]
    fn test_exhausted_cursor_keeps_return_value() {
        let mut source = fuse(finished::<u8, TestError, _>(42));
        let mut cursor = iterate(&mut source);

        assert!(cursor.next().is_none());
        assert!(cursor.is_complete());
        assert_eq!(cursor.return_value(), Some(&42));
        assert_eq!(cursor.into_return(), Some(42));
    }

    #[test]
    fn test_cursor_stops_after_failure() {
        let (mut naturals, probe) = Naturals::probed();
        naturals.pull().unwrap();
        naturals.inject(TestError::Boom).unwrap_err();

        let mut cursor = iterate(&mut naturals);
        assert!(cursor.next().is_none());
        assert!(cursor.is_complete());
        drop(cursor);
        assert_eq!(probe.closes(), 0);
    }

    #[test]
    fn test_error_item_ends_the_loop() {
        let mut source = fuse(crate::build::from_fn(|| {
            Err::<Step<u8, ()>, _>(TestError::BadItem(9))
        }));
        let items: Vec<_> = iterate(&mut source).collect();

        assert_eq!(items, vec![Err(PullError::Computation(TestError::BadItem(9)))]);
    }

    #[test]
    fn test_explicit_close_reports_outcome() {
        let (mut naturals, probe) = Naturals::probed();
        let mut cursor = iterate(&mut naturals);

        assert_eq!(cursor.next(), Some(Ok(0)));
        assert_eq!(cursor.close().unwrap(), Step::Done(()));
        assert_eq!(probe.closes(), 1);
    }

    #[test]
    fn test_into_return_on_active_cursor_still_closes() {
        let (mut naturals, probe) = Naturals::probed();
        let mut cursor = iterate(&mut naturals);

        cursor.next();
        assert_eq!(cursor.into_return(), None);
        assert_eq!(probe.closes(), 1);
    }

    #[test]
    fn test_plain_iterator_source() {
        let mut words = fuse(from_iter(["red", "green"]));
        let collected: Result<Vec<_>, _> = iterate(&mut words).collect();
        assert_eq!(collected.unwrap(), vec!["red", "green"]);
    }

    #[test]
    fn test_boxed_chain_can_be_iterated() {
        let (naturals, probe) = Naturals::probed();
        let mut chain: Box<Take<Skip<Generator<Naturals>>>> = Box::new(naturals.skip(2).take(3));

        let seen: Vec<u64> = iterate(&mut chain).map(Result::unwrap).collect();
        assert_eq!(seen, vec![2, 3, 4]);
        assert_eq!(probe.closes(), 1);
    }
}
