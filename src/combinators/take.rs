use crate::{
    error::{IllegalState, Operation, PullError},
    iterate::{Cursor, IterateSelf},
    producer::{Controllable, Producer, ProducerState, Pulled},
    step::Step,
};

/// Yields at most `n` items of its upstream, created by
/// [`Controllable::take`].
///
/// Once the quota is used up the next pull closes the upstream with
/// `Return::default()` instead of pulling it, so an infinite source is
/// released as soon as enough values were seen.
pub struct Take<P> {
    upstream: P,
    remaining: usize,
    truncated: bool,
}

impl<P> Take<P> {
    pub(crate) fn new(upstream: P, n: usize) -> Self {
        Self {
            upstream,
            remaining: n,
            truncated: false,
        }
    }

    pub fn into_inner(self) -> P {
        self.upstream
    }

    /// Items that may still be passed through.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<P> Take<P>
where
    P: Controllable,
    P::Return: Default,
{
    fn truncate(&mut self) -> Pulled<P::Item, P::Return, P::Error> {
        if self.truncated {
            return self.upstream.pull();
        }
        self.truncated = true;
        tracing::debug!("take quota reached, closing upstream");
        self.upstream.close(P::Return::default())
    }

    fn count(&mut self, step: Step<P::Item, P::Return>) -> Step<P::Item, P::Return> {
        if step.is_yield() {
            self.remaining -= 1;
        }
        step
    }
}

impl<P> Producer for Take<P>
where
    P: Controllable,
    P::Return: Default,
{
    type Item = P::Item;
    type Return = P::Return;
    type Error = P::Error;

    fn pull(&mut self) -> Pulled<Self::Item, Self::Return, Self::Error> {
        if self.remaining == 0 {
            return self.truncate();
        }
        let step = self.upstream.pull()?;
        Ok(self.count(step))
    }
}

impl<P> Controllable for Take<P>
where
    P: Controllable,
    P::Return: Default,
{
    fn close(&mut self, value: Self::Return) -> Pulled<Self::Item, Self::Return, Self::Error> {
        self.upstream.close(value)
    }

    fn inject(&mut self, error: Self::Error) -> Pulled<Self::Item, Self::Return, Self::Error> {
        if self.remaining == 0 {
            self.truncate()?;
            return Err(IllegalState::new(Operation::Inject, ProducerState::Completed).into());
        }
        let step = self.upstream.inject(error)?;
        Ok(self.count(step))
    }
}

impl<P> IterateSelf for Take<P>
where
    P: Controllable,
    P::Return: Default,
{
}

impl<'a, P> IntoIterator for &'a mut Take<P>
where
    P: Controllable,
    P::Return: Default,
{
    type Item = Result<P::Item, PullError<P::Error>>;
    type IntoIter = Cursor<'a, Take<P>>;

    fn into_iter(self) -> Self::IntoIter {
        Cursor::new(self)
    }
}
