//! Configuration type definitions
//!
//! Each section is self-contained with validation and sensible defaults.

pub mod mqtt;
pub mod planner;

pub use mqtt::{MqttConfig, TopicsConfig};
pub use planner::PlannerConfig;

use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Broker connection and topic routing for the message bridge
    #[serde(default)]
    pub mqtt: MqttConfig,

    /// Planner settings (frame label, POI map location)
    #[serde(default)]
    pub planner: PlannerConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.mqtt.validate()?;
        self.planner.validate()?;
        Ok(())
    }
}
