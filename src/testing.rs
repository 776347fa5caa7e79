//! Fixtures shared by the unit tests.

use std::{cell::Cell, rc::Rc};

use thiserror::Error;

use crate::{
    generator::{Generator, Resume, Routine, generator},
    step::Step,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    #[error("boom")]
    Boom,
    #[error("recoverable hiccup")]
    Recoverable,
    #[error("bad item {0}")]
    BadItem(u64),
}

/// Counters observing a [`Naturals`] routine from the outside.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    resumes: Rc<Cell<usize>>,
    closes: Rc<Cell<usize>>,
}

impl Probe {
    /// How many times the routine body was entered.
    pub fn resumes(&self) -> usize {
        self.resumes.get()
    }

    /// How many times the close handler ran.
    pub fn closes(&self) -> usize {
        self.closes.get()
    }
}

/// Counts up from zero forever, with no handler for injected errors.
pub struct Naturals {
    current: u64,
    probe: Probe,
}

impl Naturals {
    pub fn probed_routine() -> (Self, Probe) {
        let probe = Probe::default();
        let routine = Naturals {
            current: 0,
            probe: probe.clone(),
        };
        (routine, probe)
    }

    pub fn probed() -> (Generator<Self>, Probe) {
        let (routine, probe) = Self::probed_routine();
        (generator(routine), probe)
    }

    pub fn generator() -> Generator<Self> {
        Self::probed().0
    }
}

impl Routine for Naturals {
    type Item = u64;
    type Return = ();
    type Error = TestError;

    fn resume(&mut self, resume: Resume<TestError>) -> Result<Step<u64, ()>, TestError> {
        self.probe.resumes.set(self.probe.resumes.get() + 1);
        match resume {
            Resume::Pull => {
                self.current += 1;
                Ok(Step::Yield(self.current - 1))
            }
            Resume::Inject(e) => Err(e),
        }
    }

    fn cleanup(&mut self) -> Result<(), TestError> {
        self.probe.closes.set(self.probe.closes.get() + 1);
        Ok(())
    }
}
