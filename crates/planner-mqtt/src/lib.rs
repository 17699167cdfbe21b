//! MQTT bridge: item lists in, global paths out.
//!
//! The bridge subscribes to the configured items topic, plans a path for every
//! inbound payload and publishes the result to the global-path topic. Messages
//! that fail to parse or plan are logged and dropped; the loop keeps running
//! until the shutdown channel flips, the optional timeout elapses, or (in
//! `once` mode) the first path has been published.

pub mod bridge;
pub mod error;
pub mod handler;
pub mod publisher;

pub use bridge::{serve, Bridge, Inbound, RunOptions, RunSummary};
pub use error::{BridgeError, Result};
pub use handler::PathHandler;
pub use publisher::{qos_from_level, MqttPublisher, Publisher};
