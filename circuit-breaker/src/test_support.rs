//! Shared helpers for unit tests

use crate::time::Clock;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct TestClock {
    now: Arc<Mutex<Instant>>,
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

impl TestClock {
    pub const TICK: Duration = Duration::from_millis(1);

    pub fn new(start: Instant) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn tick(&self) {
        self.advance(Self::TICK);
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn timed_out() -> Result<u32, io::Error> {
    Err(io::Error::new(io::ErrorKind::TimedOut, "upstream timed out"))
}

pub fn refused() -> Result<u32, io::Error> {
    Err(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"))
}

pub fn not_found() -> Result<u32, io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "no such record"))
}
