use std::{convert::Infallible, marker::PhantomData};

use crate::{
    error::PullError,
    producer::{Producer, Pulled},
    step::Step,
};

/// Plain producer built from a closure, created by [`from_fn`].
pub struct FromFn<F>(F);

/// Create a plain producer from a closure called on every pull.
///
/// An `Err` from the closure surfaces as [`PullError::Computation`]. The
/// closure is not protected against being called again after it reported
/// `Done`; wrap it with [`fuse`](crate::build::fuse) for that.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut current = 0;
/// let mut naturals = from_fn(move || {
///     current += 1;
///     Ok::<_, ()>(Step::<u32, ()>::Yield(current - 1))
/// });
/// assert_eq!(naturals.pull().unwrap(), Step::Yield(0));
/// assert_eq!(naturals.pull().unwrap(), Step::Yield(1));
/// ```
pub fn from_fn<T, R, E, F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Result<Step<T, R>, E>,
{
    FromFn(f)
}

impl<T, R, E, F> Producer for FromFn<F>
where
    F: FnMut() -> Result<Step<T, R>, E>,
{
    type Item = T;
    type Return = R;
    type Error = E;

    fn pull(&mut self) -> Pulled<T, R, E> {
        (self.0)().map_err(PullError::Computation)
    }
}

/// Plain producer over a standard iterator, created by [`from_iter`].
pub struct FromIter<I>(I);

/// Produce the items of `iter`, then finish with `()`.
pub fn from_iter<I: IntoIterator>(iter: I) -> FromIter<I::IntoIter> {
    FromIter(iter.into_iter())
}

impl<I: Iterator> Producer for FromIter<I> {
    type Item = I::Item;
    type Return = ();
    type Error = Infallible;

    fn pull(&mut self) -> Pulled<I::Item, (), Infallible> {
        Ok(match self.0.next() {
            Some(item) => Step::Yield(item),
            None => Step::Done(()),
        })
    }
}

/// Plain producer that is finished from the start, created by [`finished`].
pub struct Finished<T, E, R> {
    value: R,
    _phantom: PhantomData<fn() -> (T, E)>,
}

/// A producer that reports `Done(value)` on every pull and never yields.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut answer = finished::<(), (), _>(42);
/// assert_eq!(answer.pull().unwrap(), Step::Done(42));
/// assert_eq!(answer.pull().unwrap(), Step::Done(42));
/// ```
pub fn finished<T, E, R>(value: R) -> Finished<T, E, R> {
    Finished {
        value,
        _phantom: PhantomData,
    }
}

impl<T, E, R: Clone> Producer for Finished<T, E, R> {
    type Item = T;
    type Return = R;
    type Error = E;

    fn pull(&mut self) -> Pulled<T, R, E> {
        Ok(Step::Done(self.value.clone()))
    }
}
