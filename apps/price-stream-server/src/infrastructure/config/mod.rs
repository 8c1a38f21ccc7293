//! Configuration Module
//!
//! Environment-driven configuration for the price stream server.

mod settings;

pub use settings::{CacheSettings, ConfigError, ServerConfig, ServerSettings, StreamingSettings};
