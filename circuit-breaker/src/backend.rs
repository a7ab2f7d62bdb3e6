//! Counter implementation families

use crate::counter::{
    AtomicCounter, AtomicFailures, Counter, FailureCounter, SimpleCounter, SimpleFailures,
};
use crate::state::{AtomicState, SimpleState, StateCell};

/// Binds together the storage a breaker is built on.
pub trait Backend {
    type Failures: FailureCounter + Default;
    type Successes: Counter + Default;
    type State: StateCell + Default;
}

/// Single-threaded storage. Breakers using it are not `Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simple;

impl Backend for Simple {
    type Failures = SimpleFailures;
    type Successes = SimpleCounter;
    type State = SimpleState;
}

/// Atomic storage, safe to share between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSafe;

impl Backend for ThreadSafe {
    type Failures = AtomicFailures;
    type Successes = AtomicCounter;
    type State = AtomicState;
}
