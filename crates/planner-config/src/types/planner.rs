//! Planner configuration (frame label, POI map)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Coordinate frame label stamped on every produced path
    #[serde(default = "default_frame")]
    pub frame: String,

    /// POI document loaded once at bridge startup
    #[serde(default = "default_map_file")]
    pub map_file: PathBuf,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            frame: default_frame(),
            map_file: default_map_file(),
        }
    }
}

impl crate::validation::Validate for PlannerConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_non_empty;

        validate_non_empty("planner.frame", &self.frame)?;

        if self.map_file.as_os_str().is_empty() {
            return Err(ConfigError::validation(
                "planner.map_file",
                "Map file path cannot be empty",
            ));
        }

        Ok(())
    }
}

fn default_frame() -> String {
    "map".to_string()
}

fn default_map_file() -> PathBuf {
    PathBuf::from("data/poi/store_A_poi.json")
}
