use crate::{
    error::{IllegalState, Operation, PullError},
    iterate::{Cursor, IterateSelf},
    producer::{Controllable, Producer, ProducerState, Pulled},
    step::Step,
};

/// Adapter giving a plain producer the controllable contract.
///
/// Created by [`fuse`]. It tracks the lifecycle the plain producer lacks:
/// once finished it reports the frozen result forever, `close` freezes the
/// given value, and `inject` has no handler to deliver to, so the error
/// finishes the producer and comes straight back.
pub struct Fused<P: Producer> {
    producer: P,
    state: FuseState<P::Return>,
}

enum FuseState<R> {
    Start,
    Suspended,
    Completed(R),
}

/// Adapt a plain producer so it can be closed, injected into and iterated.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut pair = fuse(from_iter([1, 2]));
/// assert_eq!(pair.pull().unwrap(), Step::Yield(1));
/// assert_eq!(pair.close(()).unwrap(), Step::Done(()));
/// assert_eq!(pair.pull().unwrap(), Step::Done(()));
/// ```
pub fn fuse<P: Producer>(producer: P) -> Fused<P> {
    Fused {
        producer,
        state: FuseState::Start,
    }
}

impl<P: Producer> Fused<P> {
    pub fn state(&self) -> ProducerState {
        match self.state {
            FuseState::Start => ProducerState::Start,
            FuseState::Suspended => ProducerState::Suspended,
            FuseState::Completed(_) => ProducerState::Completed,
        }
    }

    pub fn into_inner(self) -> P {
        self.producer
    }
}

impl<P> Producer for Fused<P>
where
    P: Producer,
    P::Return: Clone + Default,
{
    type Item = P::Item;
    type Return = P::Return;
    type Error = P::Error;

    fn pull(&mut self) -> Pulled<Self::Item, Self::Return, Self::Error> {
        if let FuseState::Completed(frozen) = &self.state {
            return Ok(Step::Done(frozen.clone()));
        }
        match self.producer.pull() {
            Ok(Step::Yield(item)) => {
                self.state = FuseState::Suspended;
                Ok(Step::Yield(item))
            }
            Ok(Step::Done(value)) => {
                self.state = FuseState::Completed(value.clone());
                Ok(Step::Done(value))
            }
            Err(e) => {
                self.state = FuseState::Completed(P::Return::default());
                Err(e)
            }
        }
    }
}

impl<P> Controllable for Fused<P>
where
    P: Producer,
    P::Return: Clone + Default,
{
    fn close(&mut self, value: Self::Return) -> Pulled<Self::Item, Self::Return, Self::Error> {
        if let FuseState::Completed(frozen) = &self.state {
            return Ok(Step::Done(frozen.clone()));
        }
        self.state = FuseState::Completed(value.clone());
        Ok(Step::Done(value))
    }

    fn inject(&mut self, error: Self::Error) -> Pulled<Self::Item, Self::Return, Self::Error> {
        let state = self.state();
        match state {
            ProducerState::Suspended => {
                self.state = FuseState::Completed(P::Return::default());
                Err(PullError::Injected(error))
            }
            ProducerState::Start => {
                self.state = FuseState::Completed(P::Return::default());
                Err(IllegalState::new(Operation::Inject, state).into())
            }
            _ => Err(IllegalState::new(Operation::Inject, state).into()),
        }
    }
}

impl<P> IterateSelf for Fused<P>
where
    P: Producer,
    P::Return: Clone + Default,
{
}

impl<'a, P> IntoIterator for &'a mut Fused<P>
where
    P: Producer,
    P::Return: Clone + Default,
{
    type Item = Result<P::Item, PullError<P::Error>>;
    type IntoIter = Cursor<'a, Fused<P>>;

    fn into_iter(self) -> Self::IntoIter {
        Cursor::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{finished, from_fn, from_iter};
    use crate::testing::TestError;

    #[test]
    fn test_frozen_after_natural_end() {
        let mut one = fuse(from_iter([7]));

        assert_eq!(one.state(), ProducerState::Start);
        assert_eq!(one.pull().unwrap(), Step::Yield(7));
        assert_eq!(one.state(), ProducerState::Suspended);
        assert_eq!(one.pull().unwrap(), Step::Done(()));
        assert_eq!(one.state(), ProducerState::Completed);
        assert_eq!(one.pull().unwrap(), Step::Done(()));
    }

    #[test]
    fn test_inner_producer_is_not_pulled_after_done() {
        let mut pulls = 0;
        let mut source = fuse(from_fn(|| {
            pulls += 1;
            Ok::<_, TestError>(Step::<u8, u8>::Done(pulls))
        }));

        assert_eq!(source.pull().unwrap(), Step::Done(1));
        assert_eq!(source.pull().unwrap(), Step::Done(1));
        drop(source);
        assert_eq!(pulls, 1);
    }

    #[test]
    fn test_close_freezes_first_value_only() {
        let mut source = fuse(finished::<(), TestError, _>(5_u32));

        assert_eq!(source.close(9).unwrap(), Step::Done(9));
        assert_eq!(source.close(11).unwrap(), Step::Done(9));
        assert_eq!(source.pull().unwrap(), Step::Done(9));
    }

    #[test]
    fn test_inject_has_no_handler() {
        let mut source = fuse(from_fn(|| Ok::<_, TestError>(Step::<u8, ()>::Yield(1))));

        source.pull().unwrap();
        assert_eq!(
            source.inject(TestError::Boom).unwrap_err(),
            PullError::Injected(TestError::Boom)
        );
        assert_eq!(source.state(), ProducerState::Completed);
        assert!(
            source
                .inject(TestError::Boom)
                .unwrap_err()
                .is_illegal_state()
        );
    }

    #[test]
    fn test_inject_before_start_is_illegal() {
        let mut source = fuse(from_fn(|| Ok::<_, TestError>(Step::<u8, ()>::Yield(1))));

        let err = source.inject(TestError::Boom).unwrap_err();
        assert_eq!(
            err,
            PullError::IllegalState(IllegalState::new(Operation::Inject, ProducerState::Start))
        );
        assert_eq!(source.pull().unwrap(), Step::Done(()));
    }

    #[test]
    fn test_failure_freezes_default() {
        let mut first = true;
        let mut source = fuse(from_fn(move || {
            if first {
                first = false;
                Err(TestError::Boom)
            } else {
                Ok(Step::<u8, u8>::Yield(1))
            }
        }));

        assert_eq!(
            source.pull().unwrap_err(),
            PullError::Computation(TestError::Boom)
        );
        assert_eq!(source.pull().unwrap(), Step::Done(0));
    }
}
