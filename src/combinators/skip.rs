use crate::{
    error::PullError,
    iterate::{Cursor, IterateSelf},
    producer::{Controllable, Producer, Pulled},
    step::Step,
};

/// Discards the first `n` items of its upstream, created by
/// [`Controllable::skip`].
pub struct Skip<P> {
    upstream: P,
    remaining: usize,
}

impl<P> Skip<P> {
    pub(crate) fn new(upstream: P, n: usize) -> Self {
        Self {
            upstream,
            remaining: n,
        }
    }

    pub fn into_inner(self) -> P {
        self.upstream
    }

    /// Items still to be discarded before values pass through.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn discard(&mut self) -> Pulled<P::Item, P::Return, P::Error>
    where
        P: Producer,
    {
        while self.remaining > 0 {
            match self.upstream.pull()? {
                Step::Yield(_) => self.remaining -= 1,
                Step::Done(value) => return Ok(Step::Done(value)),
            }
        }
        self.upstream.pull()
    }
}

impl<P: Controllable> Producer for Skip<P> {
    type Item = P::Item;
    type Return = P::Return;
    type Error = P::Error;

    fn pull(&mut self) -> Pulled<Self::Item, Self::Return, Self::Error> {
        self.discard()
    }
}

impl<P: Controllable> Controllable for Skip<P> {
    fn close(&mut self, value: Self::Return) -> Pulled<Self::Item, Self::Return, Self::Error> {
        self.upstream.close(value)
    }

    fn inject(&mut self, error: Self::Error) -> Pulled<Self::Item, Self::Return, Self::Error> {
        match self.upstream.inject(error)? {
            // a value produced by recovery still counts toward the skip
            Step::Yield(_) if self.remaining > 0 => {
                self.remaining -= 1;
                self.discard()
            }
            step => Ok(step),
        }
    }
}

impl<P> IterateSelf for Skip<P>
where
    P: Controllable,
    P::Return: Default,
{
}

impl<'a, P> IntoIterator for &'a mut Skip<P>
where
    P: Controllable,
    P::Return: Default,
{
    type Item = Result<P::Item, PullError<P::Error>>;
    type IntoIter = Cursor<'a, Skip<P>>;

    fn into_iter(self) -> Self::IntoIter {
        Cursor::new(self)
    }
}
