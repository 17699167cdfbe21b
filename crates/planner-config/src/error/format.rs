//! Operator-facing rendering of config errors
//!
//! Each message names the offending field and, where one exists, the
//! `PLANNER_*` variable or file that can fix it. Colour is used on a terminal
//! unless `NO_COLOR` is set.

use crate::error::ConfigError;
use crate::loader::DEFAULT_CONFIG_PATHS;
use std::fmt;
use yansi::Paint;

pub struct ErrorFormatter {
    error: ConfigError,
    use_colors: bool,
}

impl ErrorFormatter {
    pub fn new(error: ConfigError) -> Self {
        Self {
            error,
            use_colors: supports_color(),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn format(&self) -> String {
        let mut out = self.headline();
        if let Some(hint) = self.hint() {
            let label = if self.use_colors {
                Paint::new("Hint").bold().to_string()
            } else {
                "Hint".to_string()
            };
            out.push_str(&format!("\n  {}: {}", label, hint));
        }
        out
    }

    fn headline(&self) -> String {
        if !self.use_colors {
            return self.error.to_string();
        }

        let mark = Paint::red("✗").bold();
        match &self.error {
            ConfigError::FileNotFound { path } => {
                let path_str = path.display().to_string();
                format!(
                    "{} Configuration file not found: {}",
                    mark,
                    Paint::yellow(&path_str)
                )
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => format!(
                "{} {} must be between {} and {}, got {}",
                mark,
                Paint::cyan(field),
                Paint::green(min),
                Paint::green(max),
                Paint::red(value)
            ),
            ConfigError::InvalidInteger { field, value, min } => format!(
                "{} {} must be greater than {}, got {}",
                mark,
                Paint::cyan(field),
                Paint::green(min),
                Paint::red(value)
            ),
            ConfigError::ValidationError { field, message } => {
                format!("{} {}: {}", mark, Paint::cyan(field), message)
            }
            ConfigError::EnvVarError { var, message } => {
                format!("{} {}: {}", mark, Paint::yellow(var), message)
            }
            ConfigError::InvalidEnum {
                field,
                value,
                options,
                ..
            } => {
                let value_str = format!("'{}'", value);
                format!(
                    "{} Invalid value {} for {} (valid: {})",
                    mark,
                    Paint::yellow(&value_str),
                    Paint::cyan(field),
                    options
                )
            }
            other => format!("{} {}", mark, other),
        }
    }

    fn hint(&self) -> Option<String> {
        match &self.error {
            ConfigError::FileNotFound { .. } => Some(format!(
                "pass --config FILE, or create one of {}",
                DEFAULT_CONFIG_PATHS.join(", ")
            )),
            ConfigError::OutOfRange { field, .. } if field == "mqtt.qos" => {
                Some("MQTT QoS is 0, 1 or 2".to_string())
            }
            ConfigError::ValidationError { field, .. } if field == "mqtt.password" => Some(
                "set mqtt.username (or PLANNER_MQTT_USERNAME) alongside the password".to_string(),
            ),
            ConfigError::OutOfRange { field, .. }
            | ConfigError::InvalidInteger { field, .. }
            | ConfigError::ValidationError { field, .. } => {
                env_var_for(field).map(|var| format!("can be overridden with {}", var))
            }
            _ => None,
        }
    }
}

/// Environment variable that sets a dotted config field.
///
/// `mqtt.topics.items` maps to `PLANNER_MQTT_ITEMS_TOPIC`.
fn env_var_for(field: &str) -> Option<String> {
    let (section, rest) = field.split_once('.')?;
    let name = match rest.strip_prefix("topics.") {
        Some(topic) => format!("{}_topic", topic),
        None => rest.to_string(),
    };
    Some(format!("PLANNER_{}_{}", section, name).to_uppercase())
}

fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    atty::is(atty::Stream::Stderr)
}

impl fmt::Display for ErrorFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_env_var_for_fields() {
        assert_eq!(env_var_for("mqtt.port").as_deref(), Some("PLANNER_MQTT_PORT"));
        assert_eq!(
            env_var_for("mqtt.topics.global_path").as_deref(),
            Some("PLANNER_MQTT_GLOBAL_PATH_TOPIC")
        );
        assert_eq!(
            env_var_for("planner.map_file").as_deref(),
            Some("PLANNER_PLANNER_MAP_FILE")
        );
        assert_eq!(env_var_for("frame"), None);
    }

    #[test]
    fn test_missing_file_lists_default_names() {
        let error = ConfigError::FileNotFound {
            path: PathBuf::from("site.toml"),
        };
        let output = ErrorFormatter::new(error).with_colors(false).format();
        assert!(output.starts_with("Configuration file not found: site.toml"));
        assert!(output.contains("--config FILE"));
        assert!(output.contains(".planner.toml"));
    }

    #[test]
    fn test_qos_hint() {
        let error = ConfigError::OutOfRange {
            field: "mqtt.qos".to_string(),
            value: 3.0,
            min: 0.0,
            max: 2.0,
        };
        let output = ErrorFormatter::new(error).with_colors(false).format();
        assert!(output.contains("QoS is 0, 1 or 2"));
    }

    #[test]
    fn test_validation_hint_names_env_var() {
        let error = ConfigError::validation("planner.frame", "Value cannot be empty");
        let output = ErrorFormatter::new(error).with_colors(false).to_string();
        assert!(output.contains("PLANNER_PLANNER_FRAME"));
    }

    #[test]
    fn test_invalid_enum_has_no_extra_hint() {
        let error = ConfigError::invalid_enum("env.section", "mqt", &["mqtt", "planner"]);
        let expected = error.to_string();
        let output = ErrorFormatter::new(error).with_colors(false).format();
        assert_eq!(output, expected);
    }

    #[test]
    fn test_colored_output_keeps_field() {
        let error = ConfigError::validation("mqtt.broker", "Broker cannot be empty");
        let output = ErrorFormatter::new(error).with_colors(true).format();
        assert!(output.contains("mqtt.broker"));
        assert!(output.contains("PLANNER_MQTT_BROKER"));
    }
}
