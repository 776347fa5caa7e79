use crate::{
    error::PullError,
    iterate::{Cursor, IterateSelf},
    producer::{Controllable, Producer, Pulled},
    step::Step,
};

/// Maps each item of its upstream, created by [`Controllable::transform`].
///
/// The final result passes through untouched.
pub struct Transform<P, F> {
    upstream: P,
    f: F,
}

impl<P, F> Transform<P, F> {
    pub(crate) fn new(upstream: P, f: F) -> Self {
        Self { upstream, f }
    }

    pub fn into_inner(self) -> P {
        self.upstream
    }
}

impl<P, F, U> Producer for Transform<P, F>
where
    P: Controllable,
    F: FnMut(P::Item) -> U,
{
    type Item = U;
    type Return = P::Return;
    type Error = P::Error;

    fn pull(&mut self) -> Pulled<U, P::Return, P::Error> {
        Ok(self.upstream.pull()?.map_yield(&mut self.f))
    }
}

impl<P, F, U> Controllable for Transform<P, F>
where
    P: Controllable,
    F: FnMut(P::Item) -> U,
{
    fn close(&mut self, value: P::Return) -> Pulled<U, P::Return, P::Error> {
        Ok(self.upstream.close(value)?.map_yield(&mut self.f))
    }

    fn inject(&mut self, error: P::Error) -> Pulled<U, P::Return, P::Error> {
        Ok(self.upstream.inject(error)?.map_yield(&mut self.f))
    }
}

impl<P, F, U> IterateSelf for Transform<P, F>
where
    P: Controllable,
    P::Return: Default,
    F: FnMut(P::Item) -> U,
{
}

impl<'a, P, F, U> IntoIterator for &'a mut Transform<P, F>
where
    P: Controllable,
    P::Return: Default,
    F: FnMut(P::Item) -> U,
{
    type Item = Result<U, PullError<P::Error>>;
    type IntoIter = Cursor<'a, Transform<P, F>>;

    fn into_iter(self) -> Self::IntoIter {
        Cursor::new(self)
    }
}

/// Maps each item through a fallible closure, created by
/// [`Controllable::try_transform`].
///
/// When the closure fails the upstream is closed with `Return::default()`
/// and the closure's error is returned as [`PullError::Computation`].
pub struct TryTransform<P, F> {
    upstream: P,
    f: F,
}

impl<P, F> TryTransform<P, F> {
    pub(crate) fn new(upstream: P, f: F) -> Self {
        Self { upstream, f }
    }

    pub fn into_inner(self) -> P {
        self.upstream
    }
}

impl<P, F, U> TryTransform<P, F>
where
    P: Controllable,
    P::Return: Default,
    F: FnMut(P::Item) -> Result<U, P::Error>,
{
    fn apply(&mut self, step: Step<P::Item, P::Return>) -> Pulled<U, P::Return, P::Error> {
        let item = match step {
            Step::Yield(item) => item,
            Step::Done(value) => return Ok(Step::Done(value)),
        };
        match (self.f)(item) {
            Ok(mapped) => Ok(Step::Yield(mapped)),
            Err(e) => {
                if self.upstream.close(P::Return::default()).is_err() {
                    tracing::warn!("closing upstream after a failed transform also failed");
                }
                Err(PullError::Computation(e))
            }
        }
    }
}

impl<P, F, U> Producer for TryTransform<P, F>
where
    P: Controllable,
    P::Return: Default,
    F: FnMut(P::Item) -> Result<U, P::Error>,
{
    type Item = U;
    type Return = P::Return;
    type Error = P::Error;

    fn pull(&mut self) -> Pulled<U, P::Return, P::Error> {
        let step = self.upstream.pull()?;
        self.apply(step)
    }
}

impl<P, F, U> Controllable for TryTransform<P, F>
where
    P: Controllable,
    P::Return: Default,
    F: FnMut(P::Item) -> Result<U, P::Error>,
{
    fn close(&mut self, value: P::Return) -> Pulled<U, P::Return, P::Error> {
        let step = self.upstream.close(value)?;
        self.apply(step)
    }

    fn inject(&mut self, error: P::Error) -> Pulled<U, P::Return, P::Error> {
        let step = self.upstream.inject(error)?;
        self.apply(step)
    }
}

impl<P, F, U> IterateSelf for TryTransform<P, F>
where
    P: Controllable,
    P::Return: Default,
    F: FnMut(P::Item) -> Result<U, P::Error>,
{
}

impl<'a, P, F, U> IntoIterator for &'a mut TryTransform<P, F>
where
    P: Controllable,
    P::Return: Default,
    F: FnMut(P::Item) -> Result<U, P::Error>,
{
    type Item = Result<U, PullError<P::Error>>;
    type IntoIter = Cursor<'a, TryTransform<P, F>>;

    fn into_iter(self) -> Self::IntoIter {
        Cursor::new(self)
    }
}
