//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lifetime applied when a Set requests no explicit duration and
    /// endless lifetime is disabled
    pub default_expiration: Duration,
    /// Interval between reclamation sweeps
    pub cleanup_interval: Duration,
    /// Whether a zero-duration Set produces an entry that never expires
    pub endless_lifetime: bool,
    /// Minimum tenure before a promotion request is forwarded
    pub promotion_interval: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_EXPIRATION` - Default lifetime in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `ENDLESS_LIFETIME` - Allow endless entries, `true`/`false` (default: false)
    /// - `PROMOTION_INTERVAL` - Promotion tenure in seconds (default: 86400)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_expiration: env_secs("DEFAULT_EXPIRATION")
                .unwrap_or(defaults.default_expiration),
            cleanup_interval: env_secs("CLEANUP_INTERVAL")
                .filter(|interval| !interval.is_zero())
                .unwrap_or(defaults.cleanup_interval),
            endless_lifetime: env::var("ENDLESS_LIFETIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.endless_lifetime),
            promotion_interval: env_secs("PROMOTION_INTERVAL")
                .unwrap_or(defaults.promotion_interval),
        }
    }

    pub fn with_default_expiration(mut self, expiration: Duration) -> Self {
        self.default_expiration = expiration;
        self
    }

    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    pub fn with_endless_lifetime(mut self, enabled: bool) -> Self {
        self.endless_lifetime = enabled;
        self
    }

    pub fn with_promotion_interval(mut self, interval: Duration) -> Self {
        self.promotion_interval = interval;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_expiration: Duration::from_secs(300),
            cleanup_interval: Duration::from_secs(1),
            endless_lifetime: false,
            promotion_interval: Duration::from_secs(86_400),
        }
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
}
