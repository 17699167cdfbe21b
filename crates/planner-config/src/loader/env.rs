//! Environment variable configuration overlay
//!
//! Supports environment variables in the format:
//! `PLANNER_<section>_<field>=value`
//!
//! Examples:
//! - `PLANNER_MQTT_BROKER=10.0.0.5`
//! - `PLANNER_MQTT_QOS=0`
//! - `PLANNER_MQTT_ITEMS_TOPIC=store_a/items`
//! - `PLANNER_PLANNER_FRAME=store_a`

use crate::{error::ConfigError, types::*, Config, Result};
use std::env;
use std::path::PathBuf;

const PREFIX: &str = "PLANNER_";

/// Parse configuration from environment variables alone
///
/// Returns `None` when no `PLANNER_` variable is set.
pub fn from_env() -> Result<Option<Config>> {
    let mut config = Config::default();
    match apply(&mut config) {
        0 => Ok(None),
        _ => Ok(Some(config)),
    }
}

/// Overwrite fields of `config` with every `PLANNER_` variable that is set
///
/// A variable always wins over what `config` already holds, even when its
/// value equals the built-in default. Variables that fail to parse are
/// logged and skipped. Returns the number of `PLANNER_` variables seen.
pub fn apply(config: &mut Config) -> usize {
    let env_vars: Vec<(String, String)> = env::vars()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .collect();

    for (key, value) in &env_vars {
        if let Err(e) = apply_env_var(config, key, value) {
            tracing::warn!("ignoring {}: {}", key, e);
        }
    }

    env_vars.len()
}

/// Apply a single environment variable to config
fn apply_env_var(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let key = key.strip_prefix(PREFIX).unwrap_or(key);

    let parts: Vec<&str> = key.split('_').collect();
    if parts.len() < 2 {
        return Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: "Expected format: PLANNER_<section>_<field>".to_string(),
        });
    }

    let section = parts[0].to_lowercase();
    let field = parts[1..].join("_").to_lowercase();

    match section.as_str() {
        "mqtt" => apply_mqtt_var(&mut config.mqtt, &field, value),
        "planner" => apply_planner_var(&mut config.planner, &field, value),
        _ => Err(ConfigError::invalid_enum(
            format!("{}{}", PREFIX, key),
            section,
            &["mqtt", "planner"],
        )),
    }
}

fn apply_mqtt_var(config: &mut MqttConfig, field: &str, value: &str) -> Result<()> {
    let var = format!("{}MQTT_{}", PREFIX, field.to_uppercase());
    let invalid_integer = |v: &str| ConfigError::EnvVarError {
        var: var.clone(),
        message: format!("Invalid integer: {}", v),
    };

    match field {
        "broker" => config.broker = value.to_string(),
        "port" => config.port = value.parse().map_err(|_| invalid_integer(value))?,
        "keepalive" | "keepalive_secs" => {
            config.keepalive_secs = value.parse().map_err(|_| invalid_integer(value))?
        }
        "client_id" => config.client_id = value.to_string(),
        "username" => config.username = Some(value.to_string()),
        "password" => config.password = Some(value.to_string()),
        "qos" => config.qos = value.parse().map_err(|_| invalid_integer(value))?,
        "items_topic" => config.topics.items = value.to_string(),
        "global_path_topic" => config.topics.global_path = value.to_string(),
        _ => {
            return Err(ConfigError::EnvVarError {
                var: var.clone(),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

fn apply_planner_var(config: &mut PlannerConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "frame" => config.frame = value.to_string(),
        "map_file" => config.map_file = PathBuf::from(value),
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("{}PLANNER_{}", PREFIX, field.to_uppercase()),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleanup_planner_env_vars, ENV_LOCK};
    use std::env;

    #[test]
    fn test_mqtt_broker_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_planner_env_vars();
        env::set_var("PLANNER_MQTT_BROKER", "10.0.0.5");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.mqtt.broker, "10.0.0.5");
        cleanup_planner_env_vars();
    }

    #[test]
    fn test_topic_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_planner_env_vars();
        env::set_var("PLANNER_MQTT_ITEMS_TOPIC", "store_a/items");
        env::set_var("PLANNER_MQTT_GLOBAL_PATH_TOPIC", "store_a/path");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.mqtt.topics.items, "store_a/items");
        assert_eq!(config.mqtt.topics.global_path, "store_a/path");
        cleanup_planner_env_vars();
    }

    #[test]
    fn test_planner_section_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_planner_env_vars();
        env::set_var("PLANNER_PLANNER_MAP_FILE", "maps/store_b.json");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.planner.map_file, PathBuf::from("maps/store_b.json"));
        cleanup_planner_env_vars();
    }

    #[test]
    fn test_bad_integer_is_skipped() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_planner_env_vars();
        env::set_var("PLANNER_MQTT_PORT", "eighteen");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.mqtt.port, 1883);
        cleanup_planner_env_vars();
    }

    #[test]
    fn test_unknown_section_suggests() {
        let mut config = Config::default();
        let err = apply_env_var(&mut config, "PLANNER_MQT_BROKER", "x").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'mqtt'?"));
    }

    #[test]
    fn test_no_env_vars() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_planner_env_vars();
        assert!(from_env().unwrap().is_none());
    }
}
