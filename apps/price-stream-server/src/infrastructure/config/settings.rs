//! Server Configuration Settings
//!
//! Configuration types for the price stream server, loaded from environment
//! variables. Unparseable values fall back to defaults; values that would
//! stall the server (zero capacities or intervals) or push prices to zero are
//! rejected.

use std::time::Duration;

use crate::application::services::streaming::{
    DEFAULT_POLL_INTERVAL, DEFAULT_SESSION_QUEUE_CAPACITY,
};
use crate::application::services::{DEFAULT_CACHE_TTL, SimulationConfig};
use crate::domain::subscription::DEFAULT_SUBSCRIBER_CAPACITY;
use crate::infrastructure::cache::DEFAULT_MAX_ENTRIES;

/// A move of this size or more could take a price to zero.
const MAX_CHANGE_PERCENT_LIMIT: f64 = 100.0;

/// Server port settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// gRPC server port.
    pub grpc_port: u16,
    /// Health check HTTP port.
    pub health_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            grpc_port: 50051,
            health_port: 8082,
        }
    }
}

/// Fan-out and session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingSettings {
    /// Queue capacity of each subscription.
    pub subscriber_capacity: usize,
    /// Sleep between drain passes of a polling session.
    pub poll_interval: Duration,
    /// Outbound queue capacity of a bidirectional session.
    pub session_queue_capacity: usize,
}

impl Default for StreamingSettings {
    fn default() -> Self {
        Self {
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            session_queue_capacity: DEFAULT_SESSION_QUEUE_CAPACITY,
        }
    }
}

/// Latest-price cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Lifetime of a cached price.
    pub ttl: Duration,
    /// Maximum number of cached symbols.
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerConfig {
    /// Server port settings.
    pub server: ServerSettings,
    /// Price simulation settings.
    pub simulation: SimulationConfig,
    /// Fan-out and session settings.
    pub streaming: StreamingSettings,
    /// Latest-price cache settings.
    pub cache: CacheSettings,
}

impl ServerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a value parses but is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a value parses but is out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup };
        let server_defaults = ServerSettings::default();
        let simulation_defaults = SimulationConfig::default();
        let streaming_defaults = StreamingSettings::default();
        let cache_defaults = CacheSettings::default();

        let config = Self {
            server: ServerSettings {
                grpc_port: env.parse("PRICE_STREAM_GRPC_PORT", server_defaults.grpc_port),
                health_port: env.parse("PRICE_STREAM_HEALTH_PORT", server_defaults.health_port),
            },
            simulation: SimulationConfig {
                tick_interval: env.millis(
                    "PRICE_STREAM_TICK_INTERVAL_MS",
                    simulation_defaults.tick_interval,
                ),
                max_change_percent: env.parse(
                    "PRICE_STREAM_MAX_CHANGE_PERCENT",
                    simulation_defaults.max_change_percent,
                ),
                max_volume: env.parse("PRICE_STREAM_MAX_VOLUME", simulation_defaults.max_volume),
            },
            streaming: StreamingSettings {
                subscriber_capacity: env.parse(
                    "PRICE_STREAM_SUBSCRIBER_CAPACITY",
                    streaming_defaults.subscriber_capacity,
                ),
                poll_interval: env.millis(
                    "PRICE_STREAM_POLL_INTERVAL_MS",
                    streaming_defaults.poll_interval,
                ),
                session_queue_capacity: env.parse(
                    "PRICE_STREAM_SESSION_QUEUE_CAPACITY",
                    streaming_defaults.session_queue_capacity,
                ),
            },
            cache: CacheSettings {
                ttl: env.secs("PRICE_STREAM_CACHE_TTL_SECS", cache_defaults.ttl),
                max_entries: env.parse(
                    "PRICE_STREAM_CACHE_MAX_ENTRIES",
                    cache_defaults.max_entries,
                ),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every value can drive a running server.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.tick_interval.is_zero() {
            return Err(ConfigError::invalid(
                "PRICE_STREAM_TICK_INTERVAL_MS",
                "must be positive",
            ));
        }
        let change = self.simulation.max_change_percent;
        if !change.is_finite() || !(0.0..MAX_CHANGE_PERCENT_LIMIT).contains(&change) {
            return Err(ConfigError::invalid(
                "PRICE_STREAM_MAX_CHANGE_PERCENT",
                "must be at least 0 and below 100",
            ));
        }
        let volume = self.simulation.max_volume;
        if !volume.is_finite() || volume < 0.0 {
            return Err(ConfigError::invalid(
                "PRICE_STREAM_MAX_VOLUME",
                "must be a finite non-negative number",
            ));
        }
        if self.streaming.subscriber_capacity == 0 {
            return Err(ConfigError::invalid(
                "PRICE_STREAM_SUBSCRIBER_CAPACITY",
                "must be positive",
            ));
        }
        if self.streaming.poll_interval.is_zero() {
            return Err(ConfigError::invalid(
                "PRICE_STREAM_POLL_INTERVAL_MS",
                "must be positive",
            ));
        }
        if self.streaming.session_queue_capacity == 0 {
            return Err(ConfigError::invalid(
                "PRICE_STREAM_SESSION_QUEUE_CAPACITY",
                "must be positive",
            ));
        }
        if self.cache.ttl.is_zero() {
            return Err(ConfigError::invalid(
                "PRICE_STREAM_CACHE_TTL_SECS",
                "must be positive",
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::invalid(
                "PRICE_STREAM_CACHE_MAX_ENTRIES",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable parsed but is out of range.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Environment variable name.
        key: String,
        /// Error details.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, message: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn parse<T: std::str::FromStr>(&self, key: &str, default: T) -> T {
        (self.lookup)(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn millis(&self, key: &str, default: Duration) -> Duration {
        (self.lookup)(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(default, Duration::from_millis)
    }

    fn secs(&self, key: &str, default: Duration) -> Duration {
        (self.lookup)(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(default, Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.server.grpc_port, 50051);
        assert_eq!(config.server.health_port, 8082);
        assert_eq!(config.simulation.tick_interval, Duration::from_secs(2));
        assert_eq!(config.streaming.subscriber_capacity, 100);
        assert_eq!(config.streaming.poll_interval, Duration::from_millis(100));
        assert_eq!(config.cache.ttl, Duration::from_secs(600));
        assert_eq!(config.cache.max_entries, 10_000);
    }

    #[test]
    fn values_are_read_from_environment() {
        let config = load(&[
            ("PRICE_STREAM_GRPC_PORT", "6000"),
            ("PRICE_STREAM_TICK_INTERVAL_MS", "250"),
            ("PRICE_STREAM_MAX_CHANGE_PERCENT", "0.5"),
            ("PRICE_STREAM_MAX_VOLUME", "1000"),
            ("PRICE_STREAM_SUBSCRIBER_CAPACITY", "8"),
            ("PRICE_STREAM_POLL_INTERVAL_MS", "20"),
            ("PRICE_STREAM_SESSION_QUEUE_CAPACITY", "32"),
            ("PRICE_STREAM_CACHE_TTL_SECS", "60"),
            ("PRICE_STREAM_CACHE_MAX_ENTRIES", "50"),
        ])
        .unwrap();

        assert_eq!(config.server.grpc_port, 6000);
        assert_eq!(config.simulation.tick_interval, Duration::from_millis(250));
        assert!((config.simulation.max_change_percent - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.simulation.max_volume, 1000.0);
        assert_eq!(config.streaming.subscriber_capacity, 8);
        assert_eq!(config.streaming.poll_interval, Duration::from_millis(20));
        assert_eq!(config.streaming.session_queue_capacity, 32);
        assert_eq!(config.cache.ttl, Duration::from_secs(60));
        assert_eq!(config.cache.max_entries, 50);
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = load(&[
            ("PRICE_STREAM_GRPC_PORT", "not-a-port"),
            ("PRICE_STREAM_SUBSCRIBER_CAPACITY", "-3"),
            ("PRICE_STREAM_TICK_INTERVAL_MS", "soon"),
        ])
        .unwrap();

        assert_eq!(config.server.grpc_port, 50051);
        assert_eq!(config.streaming.subscriber_capacity, 100);
        assert_eq!(config.simulation.tick_interval, Duration::from_secs(2));
    }

    #[test]
    fn zero_subscriber_capacity_is_rejected() {
        let err = load(&[("PRICE_STREAM_SUBSCRIBER_CAPACITY", "0")]).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "PRICE_STREAM_SUBSCRIBER_CAPACITY"
        ));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        assert!(load(&[("PRICE_STREAM_TICK_INTERVAL_MS", "0")]).is_err());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(load(&[("PRICE_STREAM_POLL_INTERVAL_MS", "0")]).is_err());
    }

    #[test]
    fn negative_change_percent_is_rejected() {
        assert!(load(&[("PRICE_STREAM_MAX_CHANGE_PERCENT", "-1.0")]).is_err());
    }

    #[test]
    fn full_price_wipeout_is_rejected() {
        let err = load(&[("PRICE_STREAM_MAX_CHANGE_PERCENT", "100")]).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "PRICE_STREAM_MAX_CHANGE_PERCENT"
        ));
        assert!(load(&[("PRICE_STREAM_MAX_CHANGE_PERCENT", "150")]).is_err());
        assert!(load(&[("PRICE_STREAM_MAX_CHANGE_PERCENT", "99.5")]).is_ok());
    }

    #[test]
    fn error_message_names_key() {
        let err = load(&[("PRICE_STREAM_CACHE_MAX_ENTRIES", "0")]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid value for PRICE_STREAM_CACHE_MAX_ENTRIES: must be positive"
        );
    }
}
