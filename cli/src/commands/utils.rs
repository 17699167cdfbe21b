use anyhow::{anyhow, Result};
use planner_config::{Config, ErrorFormatter};
use std::path::Path;

/// Load the layered config, from `path` when given or the default file names otherwise.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    };
    loaded.map_err(|e| anyhow!(ErrorFormatter::new(e).format()))
}

/// Pick the frame label: explicit flag, then the map document, then config.
pub fn resolve_frame(explicit: Option<&str>, from_map: Option<&str>, configured: &str) -> String {
    explicit.or(from_map).unwrap_or(configured).to_string()
}
