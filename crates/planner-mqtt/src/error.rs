use planner_core::PlanError;
use planner_io::LoadError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Inbound payload could not be parsed, or the path could not be rendered
    #[error(transparent)]
    Payload(#[from] LoadError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("MQTT client error: {0}")]
    Client(#[from] rumqttc::ClientError),

    /// The first connection attempt failed
    #[error("MQTT connection failed: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error("Subscribe to {topic} failed: {reason}")]
    Subscribe { topic: String, reason: String },

    #[error("Invalid MQTT settings: {0}")]
    Settings(String),
}
