//! State cell
//!
//! Holds the current [`CircuitState`]. Transition rules live in the breaker.

use crate::cb::CircuitState;
use std::cell::Cell;
use std::sync::atomic::{AtomicU8, Ordering};

pub trait StateCell {
    fn value(&self) -> CircuitState;

    fn set(&self, state: CircuitState);

    fn destroy(&self) {
        self.set(CircuitState::Closed);
    }

    fn close(&self) {
        self.set(CircuitState::Closed);
    }

    fn open(&self) {
        self.set(CircuitState::Open);
    }

    fn half_open(&self) {
        self.set(CircuitState::HalfOpen);
    }

    fn is_closed(&self) -> bool {
        self.value() == CircuitState::Closed
    }

    fn is_open(&self) -> bool {
        self.value() == CircuitState::Open
    }

    fn is_half_open(&self) -> bool {
        self.value() == CircuitState::HalfOpen
    }
}

#[derive(Debug)]
pub struct SimpleState {
    value: Cell<CircuitState>,
}

impl Default for SimpleState {
    fn default() -> Self {
        SimpleState {
            value: Cell::new(CircuitState::Closed),
        }
    }
}

impl StateCell for SimpleState {
    fn value(&self) -> CircuitState {
        self.value.get()
    }

    fn set(&self, state: CircuitState) {
        self.value.set(state);
    }
}

#[derive(Debug)]
pub struct AtomicState {
    value: AtomicU8,
}

const CLOSED: u8 = 0;
const OPEN: u8 = 1;
const HALF_OPEN: u8 = 2;

impl Default for AtomicState {
    fn default() -> Self {
        AtomicState {
            value: AtomicU8::new(CLOSED),
        }
    }
}

impl StateCell for AtomicState {
    fn value(&self) -> CircuitState {
        match self.value.load(Ordering::Acquire) {
            OPEN => CircuitState::Open,
            HALF_OPEN => CircuitState::HalfOpen,
            _ => CircuitState::Closed,
        }
    }

    fn set(&self, state: CircuitState) {
        let raw = match state {
            CircuitState::Closed => CLOSED,
            CircuitState::Open => OPEN,
            CircuitState::HalfOpen => HALF_OPEN,
        };
        self.value.store(raw, Ordering::Release);
    }
}
