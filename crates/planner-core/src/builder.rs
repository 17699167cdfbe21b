//! Visiting-order path construction.
//!
//! Items are visited strictly in list order; no reordering or shortest-path
//! search is attempted. The path starts at the `entrance` POI (or the origin
//! when the map has none) and ends at `checkout` when the map has one.

use crate::clock::unix_ms;
use crate::error::{PlanError, Result};
use crate::index::PoiIndex;
use crate::models::{Item, Path, Poi, Waypoint};
use tracing::debug;

pub const ENTRANCE_ID: &str = "entrance";
pub const CHECKOUT_ID: &str = "checkout";

/// Builds paths against a fixed POI map.
///
/// The index is built once and reused for every call to [`PathBuilder::build`],
/// which suits long-running callers that receive many item lists for the same
/// map. `PathBuilder` holds no mutable state, so a shared reference can be used
/// from several threads.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    index: PoiIndex,
    frame: String,
}

impl PathBuilder {
    pub fn new(pois: &[Poi], frame: impl Into<String>) -> Self {
        Self::from_index(PoiIndex::from_pois(pois), frame)
    }

    pub fn from_index(index: PoiIndex, frame: impl Into<String>) -> Self {
        Self {
            index,
            frame: frame.into(),
        }
    }

    pub fn index(&self) -> &PoiIndex {
        &self.index
    }

    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Build a path visiting each item's POI in order.
    ///
    /// Fails with [`PlanError::PoiNotFound`] on the first item whose name has
    /// no POI; nothing is returned in that case.
    pub fn build(&self, items: &[Item]) -> Result<Path> {
        let created_ms = unix_ms();

        let mut current = self
            .index
            .get(ENTRANCE_ID)
            .map(Poi::position)
            .unwrap_or(Waypoint::ORIGIN);

        let mut waypoints = Vec::with_capacity(items.len() + 2);
        waypoints.push(current);
        let mut total_cost = 0.0;

        for item in items {
            let target = self
                .index
                .get(&item.name)
                .ok_or_else(|| PlanError::PoiNotFound {
                    name: item.name.clone(),
                })?
                .position();
            total_cost += current.distance_to(&target);
            waypoints.push(target);
            current = target;
        }

        if let Some(checkout) = self.index.get(CHECKOUT_ID) {
            let target = checkout.position();
            total_cost += current.distance_to(&target);
            waypoints.push(target);
        }

        debug!(
            items = items.len(),
            waypoints = waypoints.len(),
            total_cost,
            "built path"
        );

        Ok(Path {
            frame: self.frame.clone(),
            waypoints,
            total_cost,
            created_ms,
        })
    }
}

/// One-shot form of [`PathBuilder`]: index `pois`, then build.
pub fn build_path(items: &[Item], pois: &[Poi], frame: &str) -> Result<Path> {
    PathBuilder::new(pois, frame).build(items)
}
