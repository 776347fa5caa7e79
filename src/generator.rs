//! Resumable producers driven by an explicit state machine.
//!
//! A [`Routine`] is the body of a generator written as a state machine: each
//! call to [`resume`](Routine::resume) runs from the current suspension point
//! to the next yield or to completion. [`Generator`] owns a routine and
//! enforces the lifecycle around it:
//!
//! ```text
//! Start     --pull-->      Suspended | Completed
//! Suspended --pull-->      Suspended | Completed
//! Suspended --close(v)-->  Completed            (cleanup runs first)
//! Suspended --inject(e)--> Suspended | Completed
//! Completed --any-->       frozen result (inject is rejected)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! struct Countdown(u32);
//!
//! impl Routine for Countdown {
//!     type Item = u32;
//!     type Return = &'static str;
//!     type Error = std::convert::Infallible;
//!
//!     fn resume(&mut self, _: Resume<Self::Error>) -> Result<Step<u32, &'static str>, Self::Error> {
//!         if self.0 == 0 {
//!             return Ok(Step::Done("liftoff"));
//!         }
//!         self.0 -= 1;
//!         Ok(Step::Yield(self.0 + 1))
//!     }
//! }
//!
//! let mut seq = generator(Countdown(2));
//! assert_eq!(seq.pull().unwrap(), Step::Yield(2));
//! assert_eq!(seq.pull().unwrap(), Step::Yield(1));
//! assert_eq!(seq.pull().unwrap(), Step::Done("liftoff"));
//! assert_eq!(seq.pull().unwrap(), Step::Done("liftoff"));
//! ```

use std::{marker::PhantomData, mem};

use crate::{
    error::{IllegalState, Operation, PullError},
    iterate::{Cursor, IterateSelf},
    producer::{Controllable, Producer, ProducerState, Pulled},
    step::Step,
};

/// What woke a suspended routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resume<E> {
    /// An ordinary pull.
    Pull,
    /// An error raised at the suspension point.
    ///
    /// Returning `Err` propagates it; returning `Ok` means it was handled.
    Inject(E),
}

/// The body of a generator.
pub trait Routine {
    type Item;
    type Return;
    type Error;

    /// Run until the next yield or until the body finishes.
    ///
    /// The first call, made from the `Start` state, is always
    /// [`Resume::Pull`].
    fn resume(
        &mut self,
        resume: Resume<Self::Error>,
    ) -> Result<Step<Self::Item, Self::Return>, Self::Error>;

    /// Release whatever the current suspension point holds.
    ///
    /// Only called when the generator is closed while suspended. A body that
    /// finishes on its own is expected to clean up inside `resume`.
    fn cleanup(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Run `f` after this routine's own cleanup when the generator is closed.
    fn on_close<F>(self, f: F) -> OnClose<Self, F>
    where
        Self: Sized,
        F: FnMut() -> Result<(), Self::Error>,
    {
        OnClose { routine: self, f }
    }
}

/// Routine with an extra close handler, created by [`Routine::on_close`].
pub struct OnClose<B, F> {
    routine: B,
    f: F,
}

impl<B, F> Routine for OnClose<B, F>
where
    B: Routine,
    F: FnMut() -> Result<(), B::Error>,
{
    type Item = B::Item;
    type Return = B::Return;
    type Error = B::Error;

    fn resume(
        &mut self,
        resume: Resume<Self::Error>,
    ) -> Result<Step<Self::Item, Self::Return>, Self::Error> {
        self.routine.resume(resume)
    }

    fn cleanup(&mut self) -> Result<(), Self::Error> {
        self.routine.cleanup()?;
        (self.f)()
    }
}

enum Phase<R> {
    Start,
    Suspended,
    Running,
    Completed(R),
}

impl<R> Phase<R> {
    fn state(&self) -> ProducerState {
        match self {
            Phase::Start => ProducerState::Start,
            Phase::Suspended => ProducerState::Suspended,
            Phase::Running => ProducerState::Running,
            Phase::Completed(_) => ProducerState::Completed,
        }
    }
}

/// A controllable producer driving a [`Routine`].
///
/// Dropping a generator does not run its cleanup; only [`close`] does.
///
/// [`close`]: Controllable::close
pub struct Generator<B: Routine> {
    routine: B,
    phase: Phase<B::Return>,
}

/// Wrap `routine` in a generator that has not started yet.
pub fn generator<B: Routine>(routine: B) -> Generator<B> {
    Generator::new(routine)
}

impl<B: Routine> Generator<B> {
    pub fn new(routine: B) -> Self {
        Self {
            routine,
            phase: Phase::Start,
        }
    }

    pub fn state(&self) -> ProducerState {
        self.phase.state()
    }

    pub fn routine(&self) -> &B {
        &self.routine
    }

    /// Borrow the generator as an iterator over its items.
    pub fn iter(&mut self) -> Cursor<'_, Self>
    where
        B::Return: Clone + Default,
    {
        Cursor::new(self)
    }

    fn enter(&mut self) {
        let from = mem::replace(&mut self.phase, Phase::Running).state();
        tracing::trace!(%from, "generator resumed");
    }

    fn settle(&mut self, phase: Phase<B::Return>) {
        tracing::trace!(to = %phase.state(), "generator parked");
        self.phase = phase;
    }
}

impl<B> Generator<B>
where
    B: Routine,
    B::Return: Clone + Default,
{
    fn finish(&mut self, value: B::Return) -> Step<B::Item, B::Return> {
        self.settle(Phase::Completed(value.clone()));
        Step::Done(value)
    }

    fn fail(&mut self, err: PullError<B::Error>) -> PullError<B::Error> {
        self.settle(Phase::Completed(B::Return::default()));
        err
    }

    fn land(
        &mut self,
        outcome: Result<Step<B::Item, B::Return>, B::Error>,
        raised: fn(B::Error) -> PullError<B::Error>,
    ) -> Pulled<B::Item, B::Return, B::Error> {
        match outcome {
            Ok(Step::Yield(item)) => {
                self.settle(Phase::Suspended);
                Ok(Step::Yield(item))
            }
            Ok(Step::Done(value)) => Ok(self.finish(value)),
            Err(e) => Err(self.fail(raised(e))),
        }
    }
}

impl<B> Producer for Generator<B>
where
    B: Routine,
    B::Return: Clone + Default,
{
    type Item = B::Item;
    type Return = B::Return;
    type Error = B::Error;

    fn pull(&mut self) -> Pulled<Self::Item, Self::Return, Self::Error> {
        match &self.phase {
            Phase::Completed(value) => return Ok(Step::Done(value.clone())),
            Phase::Running => {
                return Err(IllegalState::new(Operation::Pull, ProducerState::Running).into());
            }
            Phase::Start | Phase::Suspended => {}
        }

        self.enter();
        let outcome = self.routine.resume(Resume::Pull);
        self.land(outcome, PullError::Computation)
    }
}

impl<B> Controllable for Generator<B>
where
    B: Routine,
    B::Return: Clone + Default,
{
    fn close(&mut self, value: Self::Return) -> Pulled<Self::Item, Self::Return, Self::Error> {
        match &self.phase {
            Phase::Completed(frozen) => Ok(Step::Done(frozen.clone())),
            Phase::Running => {
                Err(IllegalState::new(Operation::Close, ProducerState::Running).into())
            }
            Phase::Start => {
                // the body never ran, so there is nothing to clean up
                Ok(self.finish(value))
            }
            Phase::Suspended => {
                self.enter();
                match self.routine.cleanup() {
                    Ok(()) => Ok(self.finish(value)),
                    Err(e) => Err(self.fail(PullError::Computation(e))),
                }
            }
        }
    }

    fn inject(&mut self, error: Self::Error) -> Pulled<Self::Item, Self::Return, Self::Error> {
        match &self.phase {
            Phase::Suspended => {
                self.enter();
                let outcome = self.routine.resume(Resume::Inject(error));
                self.land(outcome, PullError::Injected)
            }
            Phase::Start => {
                // nothing to deliver the error to; the generator is spent
                let err = IllegalState::new(Operation::Inject, ProducerState::Start);
                Err(self.fail(err.into()))
            }
            phase => Err(IllegalState::new(Operation::Inject, phase.state()).into()),
        }
    }
}

impl<B> IterateSelf for Generator<B>
where
    B: Routine,
    B::Return: Clone + Default,
{
}

impl<'a, B> IntoIterator for &'a mut Generator<B>
where
    B: Routine,
    B::Return: Clone + Default,
{
    type Item = Result<B::Item, PullError<B::Error>>;
    type IntoIter = Cursor<'a, Generator<B>>;

    fn into_iter(self) -> Self::IntoIter {
        Cursor::new(self)
    }
}

/// Routine built from a closure, created by [`routine`].
pub struct FnRoutine<F, T, R, E> {
    f: F,
    _phantom: PhantomData<fn(Resume<E>) -> (T, R)>,
}

/// Create a routine from a closure that is called on every resume.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut n = 0;
/// let mut evens = generator(routine(move |_: Resume<()>| {
///     n += 2;
///     Ok::<_, ()>(if n <= 4 { Step::Yield(n) } else { Step::Done(()) })
/// }));
/// assert_eq!(evens.pull().unwrap(), Step::Yield(2));
/// assert_eq!(evens.pull().unwrap(), Step::Yield(4));
/// assert!(evens.pull().unwrap().is_done());
/// ```
pub fn routine<T, R, E, F>(f: F) -> FnRoutine<F, T, R, E>
where
    F: FnMut(Resume<E>) -> Result<Step<T, R>, E>,
{
    FnRoutine {
        f,
        _phantom: PhantomData,
    }
}

impl<T, R, E, F> Routine for FnRoutine<F, T, R, E>
where
    F: FnMut(Resume<E>) -> Result<Step<T, R>, E>,
{
    type Item = T;
    type Return = R;
    type Error = E;

    fn resume(&mut self, resume: Resume<E>) -> Result<Step<T, R>, E> {
        (self.f)(resume)
    }
}
