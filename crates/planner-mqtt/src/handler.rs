use crate::error::Result;
use crate::publisher::Publisher;
use planner_core::{Path, PathBuilder};
use planner_io::{parse_items, path_to_payload};
use tracing::{debug, info};

/// Turns one items payload into one published path.
///
/// The builder (and therefore the POI map) is fixed for the lifetime of the
/// handler.
pub struct PathHandler<P> {
    builder: PathBuilder,
    publisher: P,
    path_topic: String,
}

impl<P: Publisher> PathHandler<P> {
    pub fn new(builder: PathBuilder, publisher: P, path_topic: impl Into<String>) -> Self {
        Self {
            builder,
            publisher,
            path_topic: path_topic.into(),
        }
    }

    pub fn path_topic(&self) -> &str {
        &self.path_topic
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Parse, plan and publish. Nothing is published when any step fails.
    pub async fn handle(&self, payload: &[u8]) -> Result<Path> {
        let message = parse_items(payload)?;
        if let Some(sent_ms) = message.timestamp_ms {
            debug!(sent_ms, items = message.items.len(), "received item list");
        }

        let path = self.builder.build(&message.items)?;
        let out = path_to_payload(&path)?;
        self.publisher.publish(&self.path_topic, out).await?;

        info!(
            topic = %self.path_topic,
            waypoints = path.waypoints.len(),
            total_cost = path.total_cost,
            "published global_path"
        );
        Ok(path)
    }
}
