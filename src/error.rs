//! Error types for kindle.
//!
//! Simulation itself never fails: emitter exhaustion is a status and the
//! particle cap silently drops requests. The only errors come from
//! constructors that would otherwise build a policy that can never make
//! progress or has nothing to draw.

use std::fmt;

/// Errors that can occur while configuring emitters and artists.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A repeating burst was given a period that is zero, negative or not finite.
    NonPositivePeriod(f32),
    /// A fade artist was given an empty tint list.
    NoTints,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositivePeriod(period) => write!(
                f,
                "Burst period must be a positive, finite number of seconds (got {})",
                period
            ),
            ConfigError::NoTints => write!(f, "Fade artist needs at least one tint color"),
        }
    }
}

impl std::error::Error for ConfigError {}
