//! Circuit Breaker core types and transition function

use std::fmt;

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts required to trip open and to fully close again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub success: u32,
    pub error: u32,
}

/// Something the breaker observed, with counter values already updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A monitored failure was recorded; `errors` is the count after it.
    Failure { errors: u32 },
    /// A success was recorded while half-open; `successes` is the count after it.
    Success { successes: u32 },
    /// An admission attempt saw the error timeout expire.
    TimeoutExpired,
    /// Administrative reset.
    Reset,
}

/// What happens to the failure counter on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReset {
    Keep,
    /// Zero the count but leave the last failure time alone.
    Count,
    /// Zero the count and forget the last failure time.
    Full,
}

/// Result of feeding an [`Event`] to [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: CircuitState,
    pub reset_errors: ErrorReset,
    pub reset_successes: bool,
}

impl Transition {
    fn stay(state: CircuitState) -> Self {
        Transition {
            to: state,
            reset_errors: ErrorReset::Keep,
            reset_successes: false,
        }
    }

    fn clean(state: CircuitState) -> Self {
        Transition {
            to: state,
            reset_errors: ErrorReset::Full,
            reset_successes: true,
        }
    }
}

/// Pure state machine step. Performs no logging and reads no clock.
pub fn transition(state: CircuitState, event: Event, thresholds: Thresholds) -> Transition {
    match (state, event) {
        (_, Event::Reset) => Transition::clean(CircuitState::Closed),

        (CircuitState::Closed, Event::Failure { errors }) => {
            if errors >= thresholds.error {
                Transition::stay(CircuitState::Open)
            } else {
                Transition::stay(CircuitState::Closed)
            }
        }
        // One failed trial is enough; counters are cleared on the next half-open entry.
        (CircuitState::HalfOpen, Event::Failure { .. }) => Transition::stay(CircuitState::Open),
        (CircuitState::Open, Event::Failure { .. }) => Transition::stay(CircuitState::Open),

        (CircuitState::HalfOpen, Event::Success { successes }) => {
            if successes >= thresholds.success {
                Transition::clean(CircuitState::Closed)
            } else {
                // A concurrent failure may have reopened the circuit since the
                // state was read; keep its timestamp so the cooldown can expire.
                Transition {
                    to: CircuitState::HalfOpen,
                    reset_errors: ErrorReset::Count,
                    reset_successes: false,
                }
            }
        }
        (state, Event::Success { .. }) => Transition::stay(state),

        (CircuitState::Open, Event::TimeoutExpired) => Transition::clean(CircuitState::HalfOpen),
        (state, Event::TimeoutExpired) => Transition::stay(state),
    }
}
