//! Configuration merging logic
//!
//! Merges configurations from multiple sources with proper precedence.

use crate::{types::*, Config};

/// Merge two configurations, with `overlay` taking precedence
///
/// Non-default values from `overlay` override values in `base`.
pub fn merge(mut base: Config, overlay: Config) -> Config {
    base.mqtt = merge_mqtt(base.mqtt, overlay.mqtt);
    base.planner = merge_planner(base.planner, overlay.planner);
    base
}

fn pick<T: PartialEq>(base: T, overlay: T, default: T) -> T {
    if overlay != default {
        overlay
    } else {
        base
    }
}

fn merge_mqtt(base: MqttConfig, overlay: MqttConfig) -> MqttConfig {
    let default = MqttConfig::default();
    MqttConfig {
        broker: pick(base.broker, overlay.broker, default.broker),
        port: pick(base.port, overlay.port, default.port),
        keepalive_secs: pick(
            base.keepalive_secs,
            overlay.keepalive_secs,
            default.keepalive_secs,
        ),
        client_id: pick(base.client_id, overlay.client_id, default.client_id),
        username: overlay.username.or(base.username),
        password: overlay.password.or(base.password),
        qos: pick(base.qos, overlay.qos, default.qos),
        topics: TopicsConfig {
            items: pick(base.topics.items, overlay.topics.items, default.topics.items),
            global_path: pick(
                base.topics.global_path,
                overlay.topics.global_path,
                default.topics.global_path,
            ),
        },
    }
}

fn merge_planner(base: PlannerConfig, overlay: PlannerConfig) -> PlannerConfig {
    let default = PlannerConfig::default();
    PlannerConfig {
        frame: pick(base.frame, overlay.frame, default.frame),
        map_file: pick(base.map_file, overlay.map_file, default.map_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_mqtt_overlay_wins() {
        let base = MqttConfig {
            broker: "base.local".to_string(),
            qos: 0,
            ..Default::default()
        };
        let overlay = MqttConfig {
            broker: "overlay.local".to_string(),
            username: Some("agv".to_string()),
            ..Default::default()
        };
        let merged = merge_mqtt(base, overlay);
        assert_eq!(merged.broker, "overlay.local");
        assert_eq!(merged.qos, 0);
        assert_eq!(merged.username.as_deref(), Some("agv"));
    }

    #[test]
    fn test_merge_default_overlay_ignored() {
        let base = PlannerConfig {
            frame: "store_a".to_string(),
            ..Default::default()
        };
        let merged = merge_planner(base.clone(), PlannerConfig::default());
        assert_eq!(merged, base);
    }
}
