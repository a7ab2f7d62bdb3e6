//! Circuit breaker
//!
//! Guards an operation and fails fast once too many monitored failures have
//! been seen.
//!
//! # State Transitions
//! ```text
//! Closed   -> Open:     error count reaches the error threshold
//! Open     -> HalfOpen: next acquire after error_timeout has elapsed
//! HalfOpen -> Closed:   success count reaches the success threshold
//! HalfOpen -> Open:     any monitored failure
//! ```
//!
//! There is no background timer: leaving Open only happens inside
//! [`CircuitBreaker::acquire`]. The read-check-run-update sequence is not
//! serialized across callers, so several threads may be admitted while the
//! breaker flips from Open to HalfOpen. Only the individual counters and the
//! state cell are atomic.

use crate::backend::{Backend, ThreadSafe};
use crate::cb::{transition, CircuitState, ErrorReset, Event};
use crate::config::BreakerConfig;
use crate::counter::{Counter, FailureCounter};
use crate::error::{Classify, Error, OpenCircuitError};
use crate::state::StateCell;
use crate::time::{self, Clock, RealClock};
use std::fmt;
use std::hash::Hash;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct CircuitBreaker<K, B: Backend = ThreadSafe, C: Clock = RealClock> {
    config: BreakerConfig<K>,
    errors: B::Failures,
    successes: B::Successes,
    state: B::State,
    clock: C,
}

impl<K: Eq + Hash + fmt::Debug> CircuitBreaker<K> {
    /// Thread-safe breaker on the system clock.
    pub fn new(config: BreakerConfig<K>) -> Self {
        Self::with_clock(config, RealClock)
    }
}

impl<K, B, C> CircuitBreaker<K, B, C>
where
    K: Eq + Hash + fmt::Debug,
    B: Backend,
    C: Clock,
{
    pub fn with_clock(config: BreakerConfig<K>, clock: C) -> Self {
        debug_assert!(config.success_threshold() > 0);
        debug_assert!(config.error_threshold() > 0);

        CircuitBreaker {
            config,
            errors: B::Failures::default(),
            successes: B::Successes::default(),
            state: B::State::default(),
            clock,
        }
    }

    /// Runs `operation` if the circuit admits it and records the outcome.
    ///
    /// Monitored failures are counted and handed back unchanged in
    /// [`Error::Operation`]; other failures pass straight through. When the
    /// circuit is open the operation is skipped and [`Error::Open`] is
    /// returned, unless the breaker is in dryrun mode.
    pub fn acquire<T, E, F>(&self, operation: F) -> Result<T, Error<E>>
    where
        F: FnOnce() -> Result<T, E>,
        E: Classify<Kind = K> + fmt::Display,
    {
        if self.state.is_open() && self.error_timeout_expired() {
            self.half_open();
        }

        if !self.request_allowed() {
            if !self.config.dryrun() {
                debug!(breaker = %self.config.name(), "rejecting call, circuit is open");
                return Err(OpenCircuitError::new(self.config.name()).into());
            }
            warn!(
                breaker = %self.config.name(),
                "dryrun: circuit is open, call would have been rejected"
            );
        }

        match operation() {
            Ok(value) => {
                if !self.state.is_open() {
                    self.mark_success();
                }
                Ok(value)
            }
            Err(error) => {
                if self.config.monitors(&error.kind()) {
                    if self.state.is_open() {
                        // Already tripped: only push the cooldown forward.
                        self.log_failure(&error);
                        self.errors.mark_failure_at(self.clock.now());
                    } else {
                        self.mark_failed(&error);
                    }
                }
                Err(Error::Operation(error))
            }
        }
    }

    pub fn request_allowed(&self) -> bool {
        match self.state.value() {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            // Will move to half-open on the next acquire.
            CircuitState::Open => self.error_timeout_expired(),
        }
    }

    /// Records a monitored failure and trips the circuit if warranted.
    pub fn mark_failed<E>(&self, error: &E)
    where
        E: Classify<Kind = K> + fmt::Display,
    {
        self.log_failure(error);
        self.errors.increment();
        self.errors.mark_failure_at(self.clock.now());
        self.apply(Event::Failure {
            errors: self.errors.value(),
        });
    }

    /// Records a success. Only has an effect while half-open.
    pub fn mark_success(&self) {
        if !self.state.is_half_open() {
            return;
        }
        self.successes.increment();
        self.apply(Event::Success {
            successes: self.successes.value(),
        });
    }

    /// Forces the breaker back to closed with both counters cleared.
    pub fn reset(&self) {
        self.apply(Event::Reset);
    }

    /// Releases counters and state. The breaker cannot be used afterwards.
    pub fn destroy(self) {
        self.errors.destroy();
        self.successes.destroy();
        self.state.destroy();
    }

    pub fn error_timeout_expired(&self) -> bool {
        match self.errors.last_failure_time() {
            Some(at) => time::expired(at, self.config.error_timeout(), self.clock.now()),
            None => false,
        }
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }

    pub fn config(&self) -> &BreakerConfig<K> {
        &self.config
    }

    pub fn state(&self) -> CircuitState {
        self.state.value()
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_half_open(&self) -> bool {
        self.state.is_half_open()
    }

    pub fn error_count(&self) -> u32 {
        self.errors.value()
    }

    pub fn success_count(&self) -> u32 {
        self.successes.value()
    }

    pub fn last_error_time(&self) -> Option<Instant> {
        self.errors.last_failure_time()
    }

    fn half_open(&self) {
        self.apply(Event::TimeoutExpired);
    }

    fn apply(&self, event: Event) {
        self.apply_from(self.state.value(), event);
    }

    /// `from` may already be stale when another caller moved the state.
    fn apply_from(&self, from: CircuitState, event: Event) {
        let step = transition(from, event, self.config.thresholds());

        if step.to != from {
            self.log_state_transition(from, step.to);
            self.state.set(step.to);
        }
        match step.reset_errors {
            ErrorReset::Keep => {}
            ErrorReset::Count => self.errors.reset_count(),
            ErrorReset::Full => self.errors.reset(),
        }
        if step.reset_successes {
            self.successes.reset();
        }
    }

    fn log_failure<E>(&self, error: &E)
    where
        E: Classify<Kind = K> + fmt::Display,
    {
        info!(
            breaker = %self.config.name(),
            kind = ?error.kind(),
            error = %error,
            "recorded failure"
        );
    }

    fn log_state_transition(&self, from: CircuitState, to: CircuitState) {
        let since_last_error = self
            .errors
            .last_failure_time()
            .map(|at| self.clock.now().saturating_duration_since(at));

        info!(
            breaker = %self.config.name(),
            %from,
            %to,
            success_count = self.successes.value(),
            error_count = self.errors.value(),
            success_count_threshold = self.config.success_threshold(),
            error_count_threshold = self.config.error_threshold(),
            error_timeout = ?self.config.error_timeout(),
            since_last_error = ?since_last_error,
            "state transition"
        );
    }
}

impl<K, B: Backend, C: Clock> fmt::Debug for CircuitBreaker<K, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.config.name())
            .field("state", &self.state.value())
            .field("errors", &self.errors.value())
            .field("successes", &self.successes.value())
            .finish()
    }
}
