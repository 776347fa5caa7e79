use either::Either;

/// Outcome of a single pull: either a produced item or the final result.
///
/// `Step` is the Rust shape of the `{ done, value }` pair. `Yield` means the
/// producer is still live (`done = false`), `Done` means it has finished and
/// carries the final payload (`done = true`).
///
/// # Examples
///
/// ```rust
/// use pullseq::Step;
///
/// let live: Step<u32, &str> = Step::Yield(7);
/// let over: Step<u32, &str> = Step::Done("bye");
///
/// assert!(!live.is_done());
/// assert!(over.is_done());
/// assert_eq!(live.map_yield(|n| n * 2), Step::Yield(14));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<T, R> {
    /// A produced item; the producer can be pulled again.
    Yield(T),
    /// The final result; every later pull reports the same value.
    Done(R),
}

impl<T, R> Step<T, R> {
    /// Returns `true` if this step carries a produced item.
    #[inline]
    pub const fn is_yield(&self) -> bool {
        matches!(self, Step::Yield(_))
    }

    /// The `done` flag of the step.
    ///
    /// ```rust
    /// use pullseq::Step;
    ///
    /// assert!(Step::<(), u8>::Done(1).is_done());
    /// assert!(!Step::<u8, ()>::Yield(1).is_done());
    /// ```
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    /// Converts into the produced item, discarding a final result.
    #[inline]
    pub fn yielded(self) -> Option<T> {
        match self {
            Step::Yield(t) => Some(t),
            Step::Done(_) => None,
        }
    }

    /// Converts into the final result, discarding a produced item.
    #[inline]
    pub fn done_value(self) -> Option<R> {
        match self {
            Step::Yield(_) => None,
            Step::Done(r) => Some(r),
        }
    }

    /// Maps the produced item, leaving a final result untouched.
    ///
    /// ```rust
    /// use pullseq::Step;
    ///
    /// let s: Step<i32, &str> = Step::Done("end");
    /// assert_eq!(s.map_yield(|n| n + 1), Step::Done("end"));
    /// ```
    #[inline]
    pub fn map_yield<U, F>(self, f: F) -> Step<U, R>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Step::Yield(t) => Step::Yield(f(t)),
            Step::Done(r) => Step::Done(r),
        }
    }

    /// Maps the final result, leaving a produced item untouched.
    #[inline]
    pub fn map_done<S, F>(self, f: F) -> Step<T, S>
    where
        F: FnOnce(R) -> S,
    {
        match self {
            Step::Yield(t) => Step::Yield(t),
            Step::Done(r) => Step::Done(f(r)),
        }
    }

    /// Borrows the payload of the step.
    #[inline]
    pub const fn as_ref(&self) -> Step<&T, &R> {
        match self {
            Step::Yield(t) => Step::Yield(t),
            Step::Done(r) => Step::Done(r),
        }
    }

    /// Produced items on the left, final results on the right.
    ///
    /// ```rust
    /// use either::Either;
    /// use pullseq::Step;
    ///
    /// assert_eq!(Step::<u8, &str>::Yield(3).into_either(), Either::Left(3));
    /// assert_eq!(Step::<u8, &str>::Done("x").into_either(), Either::Right("x"));
    /// ```
    #[inline]
    pub fn into_either(self) -> Either<T, R> {
        match self {
            Step::Yield(t) => Either::Left(t),
            Step::Done(r) => Either::Right(r),
        }
    }

    /// Returns the produced item.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the step is `Done`.
    #[inline]
    pub fn expect_yield(self, msg: &str) -> T {
        match self {
            Step::Yield(t) => t,
            Step::Done(_) => panic!("{}", msg),
        }
    }

    /// Returns the final result.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the step is `Yield`.
    #[inline]
    pub fn expect_done(self, msg: &str) -> R {
        match self {
            Step::Yield(_) => panic!("{}", msg),
            Step::Done(r) => r,
        }
    }

    /// Returns the produced item.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Done`.
    ///
    /// ```should_panic
    /// use pullseq::Step;
    ///
    /// Step::<u8, ()>::Done(()).unwrap_yield();
    /// ```
    #[inline]
    pub fn unwrap_yield(self) -> T {
        match self {
            Step::Yield(t) => t,
            Step::Done(_) => panic!("called `Step::unwrap_yield()` on a `Done` value"),
        }
    }

    /// Returns the final result.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Yield`.
    #[inline]
    pub fn unwrap_done(self) -> R {
        match self {
            Step::Yield(_) => panic!("called `Step::unwrap_done()` on a `Yield` value"),
            Step::Done(r) => r,
        }
    }
}

impl<T, R> From<Either<T, R>> for Step<T, R> {
    fn from(value: Either<T, R>) -> Self {
        match value {
            Either::Left(t) => Step::Yield(t),
            Either::Right(r) => Step::Done(r),
        }
    }
}
