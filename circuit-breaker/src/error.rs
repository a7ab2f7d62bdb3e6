//! Error types and failure classification

use std::fmt;
use std::hash::Hash;
use std::io;

/// Raised by [`CircuitBreaker::acquire`](crate::CircuitBreaker::acquire)
/// when it refuses to run the operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("circuit `{name}` is open")]
pub struct OpenCircuitError {
    name: String,
}

impl OpenCircuitError {
    pub fn new(name: impl Into<String>) -> Self {
        OpenCircuitError { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of a guarded call that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The breaker rejected the call; the operation never ran.
    #[error(transparent)]
    Open(#[from] OpenCircuitError),
    /// The operation ran and failed. The error is passed through untouched.
    #[error(transparent)]
    Operation(E),
}

impl<E> Error<E> {
    pub fn is_open(&self) -> bool {
        matches!(self, Error::Open(_))
    }

    pub fn into_operation(self) -> Option<E> {
        match self {
            Error::Operation(e) => Some(e),
            Error::Open(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("breaker name must not be empty")]
    EmptyName,
    #[error("success threshold must be at least 1")]
    ZeroSuccessThreshold,
    #[error("error threshold must be at least 1")]
    ZeroErrorThreshold,
    #[error("error timeout must be a finite, non-negative number of seconds, got {0}")]
    InvalidErrorTimeout(f64),
}

/// Maps an operation error to the kind the breaker monitors.
pub trait Classify {
    type Kind: Eq + Hash + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

impl Classify for io::Error {
    type Kind = io::ErrorKind;

    fn kind(&self) -> io::ErrorKind {
        io::Error::kind(self)
    }
}
