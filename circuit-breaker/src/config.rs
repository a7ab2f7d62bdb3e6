//! Breaker configuration.
//!
//! [`BreakerConfig`] is immutable once built. [`BreakerSettings`] is the
//! plain, deserializable form a host application can keep in its own config
//! files; the monitored failure kinds are supplied in code when converting.

use crate::cb::Thresholds;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BreakerConfig<K> {
    name: String,
    exceptions: HashSet<K>,
    thresholds: Thresholds,
    error_timeout: Duration,
    dryrun: bool,
}

impl<K: Eq + Hash> BreakerConfig<K> {
    pub fn builder(name: impl Into<String>) -> BreakerConfigBuilder<K> {
        BreakerConfigBuilder {
            name: name.into(),
            exceptions: HashSet::new(),
            success_threshold: 1,
            error_threshold: 1,
            error_timeout: Duration::ZERO,
            dryrun: false,
        }
    }

    /// Whether failures of `kind` count toward the error threshold.
    pub fn monitors(&self, kind: &K) -> bool {
        self.exceptions.contains(kind)
    }
}

impl<K> BreakerConfig<K> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exceptions(&self) -> &HashSet<K> {
        &self.exceptions
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn success_threshold(&self) -> u32 {
        self.thresholds.success
    }

    pub fn error_threshold(&self) -> u32 {
        self.thresholds.error
    }

    pub fn error_timeout(&self) -> Duration {
        self.error_timeout
    }

    pub fn dryrun(&self) -> bool {
        self.dryrun
    }
}

#[derive(Debug, Clone)]
pub struct BreakerConfigBuilder<K> {
    name: String,
    exceptions: HashSet<K>,
    success_threshold: u32,
    error_threshold: u32,
    error_timeout: Duration,
    dryrun: bool,
}

impl<K: Eq + Hash> BreakerConfigBuilder<K> {
    /// Adds one monitored failure kind.
    pub fn monitor(mut self, kind: K) -> Self {
        self.exceptions.insert(kind);
        self
    }

    pub fn exceptions(mut self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.exceptions.extend(kinds);
        self
    }

    pub fn success_threshold(mut self, threshold: u32) -> Self {
        self.success_threshold = threshold;
        self
    }

    pub fn error_threshold(mut self, threshold: u32) -> Self {
        self.error_threshold = threshold;
        self
    }

    pub fn error_timeout(mut self, timeout: Duration) -> Self {
        self.error_timeout = timeout;
        self
    }

    pub fn dryrun(mut self, dryrun: bool) -> Self {
        self.dryrun = dryrun;
        self
    }

    pub fn build(self) -> Result<BreakerConfig<K>, ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.success_threshold == 0 {
            return Err(ConfigError::ZeroSuccessThreshold);
        }
        if self.error_threshold == 0 {
            return Err(ConfigError::ZeroErrorThreshold);
        }

        Ok(BreakerConfig {
            name: self.name,
            exceptions: self.exceptions,
            thresholds: Thresholds {
                success: self.success_threshold,
                error: self.error_threshold,
            },
            error_timeout: self.error_timeout,
            dryrun: self.dryrun,
        })
    }
}

/// Serializable breaker settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BreakerSettings {
    pub name: String,
    pub success_threshold: u32,
    pub error_threshold: u32,
    /// Cooldown in seconds; fractions allowed.
    pub error_timeout: f64,
    #[serde(default)]
    pub dryrun: bool,
}

impl BreakerSettings {
    pub fn into_config<K: Eq + Hash>(
        self,
        exceptions: impl IntoIterator<Item = K>,
    ) -> Result<BreakerConfig<K>, ConfigError> {
        let error_timeout = Duration::try_from_secs_f64(self.error_timeout)
            .map_err(|_| ConfigError::InvalidErrorTimeout(self.error_timeout))?;

        BreakerConfig::builder(self.name)
            .exceptions(exceptions)
            .success_threshold(self.success_threshold)
            .error_threshold(self.error_threshold)
            .error_timeout(error_timeout)
            .dryrun(self.dryrun)
            .build()
    }
}
