//! The pull protocol.
//!
//! A [`Producer`] hands out one [`Step`] per [`pull`](Producer::pull). A
//! [`Controllable`] producer can also be terminated early with
//! [`close`](Controllable::close) and have an error delivered at its
//! suspension point with [`inject`](Controllable::inject). The lazy
//! combinators hang off `Controllable` so chains read left to right:
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! let digits = fuse(from_iter(0..10));
//! let picked = digits
//!     .skip(2)
//!     .transform(|n| n * 10)
//!     .take(3)
//!     .iter_collect()
//!     .unwrap();
//! assert_eq!(picked, vec![20, 30, 40]);
//! ```

use std::fmt;

use either::Either;

use crate::{
    combinators::{self, Skip, Take, Transform, TryTransform},
    error::PullError,
    step::Step,
};

/// What a pull, close or inject hands back to the caller.
pub type Pulled<T, R, E> = Result<Step<T, R>, PullError<E>>;

/// Lifecycle of a controllable producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProducerState {
    /// Created but never pulled.
    Start,
    /// Parked at a yield point.
    Suspended,
    /// Servicing a call; only observable through re-entrant misuse.
    Running,
    /// Finished; every operation reports the frozen final result.
    Completed,
}

impl fmt::Display for ProducerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProducerState::Start => f.write_str("not started"),
            ProducerState::Suspended => f.write_str("suspended"),
            ProducerState::Running => f.write_str("running"),
            ProducerState::Completed => f.write_str("completed"),
        }
    }
}

/// A source that produces values on demand.
///
/// Pulls are strictly sequential, which `&mut self` enforces.
pub trait Producer {
    /// Type of each produced value.
    type Item;
    /// Type of the final result reported with `done = true`.
    type Return;
    /// Type of failures raised by the producer body.
    type Error;

    /// Produce the next item or the final result.
    fn pull(&mut self) -> Pulled<Self::Item, Self::Return, Self::Error>;
}

/// A producer that can also be terminated early or have an error injected.
pub trait Controllable: Producer {
    /// Force the producer to finish with `value`.
    ///
    /// Cleanup tied to the current suspension point runs before this returns.
    /// On an already finished producer this is a no-op that reports the
    /// frozen final result instead of `value`.
    fn close(&mut self, value: Self::Return) -> Pulled<Self::Item, Self::Return, Self::Error>;

    /// Deliver `error` at the point where the producer is suspended.
    ///
    /// If the producer recovers it may yield again; otherwise it finishes
    /// and the error comes back as [`PullError::Injected`].
    fn inject(&mut self, error: Self::Error) -> Pulled<Self::Item, Self::Return, Self::Error>;

    /// Discard the first `n` items.
    fn skip(self, n: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, n)
    }

    /// Map every item through `f`.
    fn transform<U, F>(self, f: F) -> Transform<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U,
    {
        Transform::new(self, f)
    }

    /// Map every item through a fallible `f`; a failure closes the upstream.
    fn try_transform<U, F>(self, f: F) -> TryTransform<Self, F>
    where
        Self: Sized,
        Self::Return: Default,
        F: FnMut(Self::Item) -> Result<U, Self::Error>,
    {
        TryTransform::new(self, f)
    }

    /// Yield at most `n` items, then close the upstream.
    fn take(self, n: usize) -> Take<Self>
    where
        Self: Sized,
        Self::Return: Default,
    {
        Take::new(self, n)
    }

    /// Drive the producer to the end, handing each item to `f`.
    fn for_each<F>(self, f: F) -> Result<Self::Return, PullError<Self::Error>>
    where
        Self: Sized,
        F: FnMut(Self::Item),
    {
        combinators::for_each(self, f)
    }

    /// Drive the producer to the end with a fallible `f`; a failure closes it.
    fn try_for_each<F>(self, f: F) -> Result<Self::Return, PullError<Self::Error>>
    where
        Self: Sized,
        Self::Return: Default,
        F: FnMut(Self::Item) -> Result<(), Self::Error>,
    {
        combinators::try_for_each(self, f)
    }

    /// Drive the producer to the end, gathering every item.
    fn iter_collect(self) -> Result<Vec<Self::Item>, PullError<Self::Error>>
    where
        Self: Sized,
    {
        let mut items = Vec::new();
        combinators::for_each(self, |item| items.push(item))?;
        Ok(items)
    }

    /// Borrow the producer so a chain can be built without giving it away.
    fn by_ref(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self
    }

    fn boxed<'a>(
        self,
    ) -> Box<dyn Controllable<Item = Self::Item, Return = Self::Return, Error = Self::Error> + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

impl<P> Producer for &mut P
where
    P: Producer + ?Sized,
{
    type Item = P::Item;
    type Return = P::Return;
    type Error = P::Error;

    fn pull(&mut self) -> Pulled<Self::Item, Self::Return, Self::Error> {
        (**self).pull()
    }
}

impl<P> Controllable for &mut P
where
    P: Controllable + ?Sized,
{
    fn close(&mut self, value: Self::Return) -> Pulled<Self::Item, Self::Return, Self::Error> {
        (**self).close(value)
    }

    fn inject(&mut self, error: Self::Error) -> Pulled<Self::Item, Self::Return, Self::Error> {
        (**self).inject(error)
    }
}

impl<P> Producer for Box<P>
where
    P: Producer + ?Sized,
{
    type Item = P::Item;
    type Return = P::Return;
    type Error = P::Error;

    fn pull(&mut self) -> Pulled<Self::Item, Self::Return, Self::Error> {
        (**self).pull()
    }
}

impl<P> Controllable for Box<P>
where
    P: Controllable + ?Sized,
{
    fn close(&mut self, value: Self::Return) -> Pulled<Self::Item, Self::Return, Self::Error> {
        (**self).close(value)
    }

    fn inject(&mut self, error: Self::Error) -> Pulled<Self::Item, Self::Return, Self::Error> {
        (**self).inject(error)
    }
}

impl<L, R> Producer for Either<L, R>
where
    L: Producer,
    R: Producer<Item = L::Item, Return = L::Return, Error = L::Error>,
{
    type Item = L::Item;
    type Return = L::Return;
    type Error = L::Error;

    fn pull(&mut self) -> Pulled<Self::Item, Self::Return, Self::Error> {
        match self {
            Either::Left(l) => l.pull(),
            Either::Right(r) => r.pull(),
        }
    }
}

impl<L, R> Controllable for Either<L, R>
where
    L: Controllable,
    R: Controllable<Item = L::Item, Return = L::Return, Error = L::Error>,
{
    fn close(&mut self, value: Self::Return) -> Pulled<Self::Item, Self::Return, Self::Error> {
        match self {
            Either::Left(l) => l.close(value),
            Either::Right(r) => r.close(value),
        }
    }

    fn inject(&mut self, error: Self::Error) -> Pulled<Self::Item, Self::Return, Self::Error> {
        match self {
            Either::Left(l) => l.inject(error),
            Either::Right(r) => r.inject(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{from_iter, fuse};
    use crate::testing::Naturals;

    #[test]
    fn test_by_ref_leaves_the_rest_for_later() {
        let mut digits = fuse(from_iter(0..6));

        let head = digits.by_ref().take(2).iter_collect().unwrap();
        assert_eq!(head, vec![0, 1]);
        // take closed the borrowed producer, so nothing is left
        assert_eq!(digits.pull().unwrap(), Step::Done(()));
    }

    #[test]
    fn test_by_ref_without_closing() {
        let mut digits = fuse(from_iter(0..6));

        let mut head = digits.by_ref().skip(1).transform(|n| n + 100);
        assert_eq!(head.pull().unwrap(), Step::Yield(101));
        assert_eq!(digits.pull().unwrap(), Step::Yield(2));
    }

    #[test]
    fn test_boxed_chain_forwards_close() {
        let (naturals, probe) = Naturals::probed();
        let mut chain = naturals.skip(1).boxed();

        assert_eq!(chain.pull().unwrap(), Step::Yield(1));
        assert_eq!(chain.close(()).unwrap(), Step::Done(()));
        assert_eq!(probe.closes(), 1);
    }

    #[test]
    fn test_either_dispatches_to_active_side() {
        let pick = |short: bool| {
            if short {
                Either::Left(fuse(from_iter(0..2)))
            } else {
                Either::Right(fuse(from_iter(10..13)))
            }
        };

        assert_eq!(pick(true).iter_collect().unwrap(), vec![0, 1]);
        assert_eq!(pick(false).iter_collect().unwrap(), vec![10, 11, 12]);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ProducerState::Start.to_string(), "not started");
        assert_eq!(ProducerState::Completed.to_string(), "completed");
    }
}
