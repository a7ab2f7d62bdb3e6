//! Circuit Breaker Library
//!
//! A guard that counts monitored failures of an operation, stops calling it
//! for a cooldown once a threshold is crossed, and lets trial calls through
//! afterwards to decide whether to close again.

pub mod backend;
pub mod breaker;
pub mod cb;
pub mod config;
pub mod counter;
pub mod error;
pub mod sim;
pub mod state;
pub mod time;

#[cfg(test)]
mod test_support;

pub use backend::*;
pub use breaker::*;
pub use cb::*;
pub use config::*;
pub use counter::*;
pub use error::*;
pub use state::*;
pub use time::*;
