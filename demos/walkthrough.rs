//! A tour of the pull protocol.
//!
//! Run with `RUST_LOG=pullseq=debug cargo run --example walkthrough` to see
//! when take and early loop exits close their upstream.

use pullseq::prelude::*;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum DemoError {
    #[error("boom")]
    Boom,
}

/// Counts up from zero and announces when it is closed.
struct Counter {
    next: u64,
}

impl Routine for Counter {
    type Item = u64;
    type Return = ();
    type Error = DemoError;

    fn resume(&mut self, resume: Resume<DemoError>) -> Result<Step<u64, ()>, DemoError> {
        match resume {
            Resume::Pull => {
                self.next += 1;
                Ok(Step::Yield(self.next - 1))
            }
            Resume::Inject(e) => Err(e),
        }
    }

    fn cleanup(&mut self) -> Result<(), DemoError> {
        println!("  counter closed after handing out {} values", self.next);
        Ok(())
    }
}

fn counter() -> Generator<Counter> {
    generator(Counter { next: 0 })
}

/// Yields 1 and 2, then finishes with the number of values it produced.
struct Shape {
    yielded: u32,
}

impl Routine for Shape {
    type Item = u32;
    type Return = u32;
    type Error = DemoError;

    fn resume(&mut self, resume: Resume<DemoError>) -> Result<Step<u32, u32>, DemoError> {
        if let Resume::Inject(e) = resume {
            return Err(e);
        }
        if self.yielded == 2 {
            return Ok(Step::Done(self.yielded));
        }
        self.yielded += 1;
        Ok(Step::Yield(self.yielded))
    }
}

fn main() -> Result<(), PullError<DemoError>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("a producer that is done from the start:");
    let mut answer = fuse(finished::<(), DemoError, _>(42));
    println!("  {:?}", answer.pull()?);

    println!("pulling by hand:");
    let mut naturals = counter();
    for _ in 0..3 {
        println!("  {:?}", naturals.pull()?);
    }
    naturals.close(())?;

    println!("iterating with an early break:");
    let mut naturals = counter();
    for n in &mut naturals {
        let n = n?;
        println!("  {n}");
        if n == 2 {
            break;
        }
    }

    println!("the generator shape:");
    let mut shape = generator(Shape { yielded: 0 });
    println!("  pull      -> {:?}", shape.pull()?);
    println!("  close(3)  -> {:?}", shape.close(3)?);
    println!("  pull      -> {:?}", shape.pull()?);
    let mut shape = generator(Shape { yielded: 0 });
    shape.pull()?;
    match shape.inject(DemoError::Boom) {
        Ok(step) => println!("  inject    -> {step:?}"),
        Err(e) => println!("  inject    -> error: {e}"),
    }
    println!("  state     -> {}", shape.state());

    println!("skip(3).transform(x2).take(5):");
    counter()
        .skip(3)
        .transform(|x| x * 2)
        .take(5)
        .for_each(|x| println!("  {x}"))?;

    Ok(())
}
