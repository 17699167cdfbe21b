//! Configuration management for the AGV path planner
//!
//! This crate provides a validated configuration system with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Config validation with helpful error messages
//! - Config merging (file + environment)
//! - Type-safe configuration structs
//!
//! # Example
//!
//! ```no_run
//! use planner_config::Config;
//!
//! // Load from default location (.planner.{toml,yml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("config/dev/planner.toml")?;
//!
//! let broker = &config.mqtt.broker;
//! let frame = &config.planner.frame;
//! # Ok::<(), planner_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::ConfigBuilder;
pub use types::*;

/// Trait for config validation
pub use validation::Validate;
