//! MQTT bridge configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the MQTT broker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MqttConfig {
    /// Broker host name or address
    #[serde(default = "default_broker")]
    pub broker: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Keep-alive interval negotiated with the broker
    #[serde(default = "default_keepalive_secs", alias = "keepalive")]
    pub keepalive_secs: u64,

    /// Base client id; the bridge appends `_planner`
    #[serde(default = "default_client_id")]
    pub client_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Quality of service used for both subscribe and publish (0, 1 or 2)
    #[serde(default = "default_qos")]
    pub qos: u8,

    #[serde(default)]
    pub topics: TopicsConfig,
}

/// Topic routing for the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicsConfig {
    /// Inbound item-list payloads
    #[serde(default = "default_items_topic")]
    pub items: String,

    /// Outbound path payloads
    #[serde(default = "default_global_path_topic")]
    pub global_path: String,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker: default_broker(),
            port: default_port(),
            keepalive_secs: default_keepalive_secs(),
            client_id: default_client_id(),
            username: None,
            password: None,
            qos: default_qos(),
            topics: TopicsConfig::default(),
        }
    }
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            items: default_items_topic(),
            global_path: default_global_path_topic(),
        }
    }
}

impl crate::validation::Validate for MqttConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::{validate_non_empty, validate_positive, validate_range};

        validate_non_empty("mqtt.broker", &self.broker)?;
        validate_positive("mqtt.port", u64::from(self.port), 0)?;
        validate_positive("mqtt.keepalive_secs", self.keepalive_secs, 0)?;
        validate_non_empty("mqtt.client_id", &self.client_id)?;
        validate_range("mqtt.qos", f64::from(self.qos), 0.0, 2.0)?;

        if self.password.is_some() && self.username.is_none() {
            return Err(ConfigError::validation(
                "mqtt.password",
                "password is set but username is missing",
            ));
        }

        self.topics.validate()
    }
}

impl crate::validation::Validate for TopicsConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_non_empty;

        validate_non_empty("mqtt.topics.items", &self.items)?;
        validate_non_empty("mqtt.topics.global_path", &self.global_path)?;

        // Wildcards are only legal in subscriptions.
        if self.global_path.contains(['+', '#']) {
            return Err(ConfigError::validation(
                "mqtt.topics.global_path",
                format!(
                    "publish topic cannot contain wildcards, got: {}",
                    self.global_path
                ),
            ));
        }

        Ok(())
    }
}

fn default_broker() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1883
}

fn default_keepalive_secs() -> u64 {
    60
}

fn default_client_id() -> String {
    "agv_dev".to_string()
}

fn default_qos() -> u8 {
    1
}

fn default_items_topic() -> String {
    "agv/ai/items".to_string()
}

fn default_global_path_topic() -> String {
    "agv/planner/global_path".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        assert!(MqttConfig::default().validate().is_ok());
    }

    #[test]
    fn test_qos_out_of_range() {
        let config = MqttConfig {
            qos: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_invalid() {
        let config = MqttConfig {
            port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_password_without_username_invalid() {
        let config = MqttConfig {
            password: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_publish_topic_invalid() {
        let config = MqttConfig {
            topics: TopicsConfig {
                global_path: "agv/planner/#".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_subscribe_topic_allowed() {
        let config = MqttConfig {
            topics: TopicsConfig {
                items: "agv/+/items".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_keepalive_alias() {
        let config: MqttConfig = serde_json::from_str(r#"{"keepalive": 30}"#).unwrap();
        assert_eq!(config.keepalive_secs, 30);
        assert_eq!(config.broker, "localhost");
    }
}
