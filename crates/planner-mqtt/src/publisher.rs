use crate::error::{BridgeError, Result};
use async_trait::async_trait;
use rumqttc::{AsyncClient, QoS};

/// Outbound side of the bridge.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()>;
}

/// Publishes through a live `rumqttc` client, never retained.
#[derive(Clone)]
pub struct MqttPublisher {
    client: AsyncClient,
    qos: QoS,
}

impl MqttPublisher {
    pub fn new(client: AsyncClient, qos: QoS) -> Self {
        Self { client, qos }
    }
}

#[async_trait]
impl Publisher for MqttPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
        self.client.publish(topic, self.qos, false, payload).await?;
        Ok(())
    }
}

/// Map a numeric MQTT QoS level to the client enum.
pub fn qos_from_level(level: u8) -> Result<QoS> {
    match level {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        other => Err(BridgeError::Settings(format!(
            "qos must be 0, 1 or 2, got {}",
            other
        ))),
    }
}
