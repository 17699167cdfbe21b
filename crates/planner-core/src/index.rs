use crate::models::Poi;
use std::collections::HashMap;
use tracing::warn;

/// Lookup from POI id to POI, built once per planning call.
///
/// Duplicate ids resolve last-write-wins. Every overwrite is logged and the
/// affected ids are kept in [`PoiIndex::duplicates`] so callers can flag
/// suspicious maps.
#[derive(Debug, Clone, Default)]
pub struct PoiIndex {
    by_id: HashMap<String, Poi>,
    duplicates: Vec<String>,
}

impl PoiIndex {
    pub fn from_pois<'a, I>(pois: I) -> Self
    where
        I: IntoIterator<Item = &'a Poi>,
    {
        let mut index = Self::default();
        for poi in pois {
            index.insert(poi.clone());
        }
        index
    }

    fn insert(&mut self, poi: Poi) {
        if let Some(previous) = self.by_id.get(&poi.id) {
            warn!(
                "duplicate POI id '{}': ({}, {}) replaced by ({}, {})",
                poi.id, previous.x, previous.y, poi.x, poi.y
            );
            if !self.duplicates.contains(&poi.id) {
                self.duplicates.push(poi.id.clone());
            }
        }
        self.by_id.insert(poi.id.clone(), poi);
    }

    pub fn get(&self, id: &str) -> Option<&Poi> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Ids that appeared more than once in the source sequence, in first-seen order.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}
