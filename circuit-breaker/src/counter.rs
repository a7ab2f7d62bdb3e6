//! Failure and success counters
//!
//! Two families: `Cell`-based counters for single-threaded breakers and
//! atomic counters that may be shared between threads. The breaker only
//! sees the [`Counter`] and [`FailureCounter`] traits.

use parking_lot::Mutex;
use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// Non-negative accumulator.
pub trait Counter {
    fn increment_by(&self, by: u32);

    fn reset(&self);

    /// Releases the counter. In-process counters simply reset.
    fn destroy(&self) {
        self.reset();
    }

    fn value(&self) -> u32;

    fn increment(&self) {
        self.increment_by(1);
    }
}

/// Counter that also remembers when it was last bumped.
///
/// `value` and `last_failure_time` are read independently; there is no
/// combined snapshot.
pub trait FailureCounter: Counter {
    fn last_failure_time(&self) -> Option<Instant>;

    /// Zeroes the count but keeps the last failure time.
    fn reset_count(&self);

    fn mark_failure_at(&self, at: Instant);
}

/// Unsynchronized counter.
#[derive(Debug, Default)]
pub struct SimpleCounter {
    value: Cell<u32>,
}

impl Counter for SimpleCounter {
    fn increment_by(&self, by: u32) {
        self.value.set(self.value.get().saturating_add(by));
    }

    fn reset(&self) {
        self.value.set(0);
    }

    fn value(&self) -> u32 {
        self.value.get()
    }
}

/// Unsynchronized failure counter.
#[derive(Debug, Default)]
pub struct SimpleFailures {
    count: SimpleCounter,
    last_failure: Cell<Option<Instant>>,
}

impl Counter for SimpleFailures {
    fn increment_by(&self, by: u32) {
        self.count.increment_by(by);
    }

    fn reset(&self) {
        self.count.reset();
        self.last_failure.set(None);
    }

    fn value(&self) -> u32 {
        self.count.value()
    }
}

impl FailureCounter for SimpleFailures {
    fn last_failure_time(&self) -> Option<Instant> {
        self.last_failure.get()
    }

    fn reset_count(&self) {
        self.count.reset();
    }

    fn mark_failure_at(&self, at: Instant) {
        self.last_failure.set(Some(at));
    }
}

/// Lock-free counter.
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicU32,
}

impl Counter for AtomicCounter {
    fn increment_by(&self, by: u32) {
        // fetch_update so the value saturates instead of wrapping to zero.
        // The closure always returns Some, so the Err arm is unreachable.
        self.value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                Some(v.saturating_add(by))
            })
            .unwrap_or_else(|current| current);
    }

    fn reset(&self) {
        self.value.store(0, Ordering::Release);
    }

    fn value(&self) -> u32 {
        self.value.load(Ordering::Acquire)
    }
}

/// Thread-safe failure counter.
#[derive(Debug, Default)]
pub struct AtomicFailures {
    count: AtomicCounter,
    last_failure: Mutex<Option<Instant>>,
}

impl Counter for AtomicFailures {
    fn increment_by(&self, by: u32) {
        self.count.increment_by(by);
    }

    fn reset(&self) {
        let mut last = self.last_failure.lock();
        self.count.reset();
        *last = None;
    }

    fn value(&self) -> u32 {
        self.count.value()
    }
}

impl FailureCounter for AtomicFailures {
    fn last_failure_time(&self) -> Option<Instant> {
        *self.last_failure.lock()
    }

    fn reset_count(&self) {
        self.count.reset();
    }

    fn mark_failure_at(&self, at: Instant) {
        *self.last_failure.lock() = Some(at);
    }
}
