//! Item-list and POI-map documents.
//!
//! Accepted shapes:
//!
//! ```json
//! {"items": [{"name": "coke", "qty": 1}], "timestamp_ms": 1700000000000}
//! [{"name": "coke", "qty": 1}]
//!
//! {"frame": "map", "poi": [{"id": "entrance", "x": 0.0, "y": 0.0}]}
//! [{"id": "entrance", "x": 0.0, "y": 0.0}]
//! ```
//!
//! Unknown fields are ignored.

use crate::error::{LoadError, Result};
use planner_core::{Item, Poi};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A parsed item-list payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemsMessage {
    pub items: Vec<Item>,
    /// Producer timestamp, when the sender included one
    pub timestamp_ms: Option<i64>,
}

/// A parsed POI map.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiMap {
    pub pois: Vec<Poi>,
    /// Frame declared by the map document itself
    pub frame: Option<String>,
}

pub fn parse_items(bytes: &[u8]) -> Result<ItemsMessage> {
    let doc: Value = serde_json::from_slice(bytes).map_err(LoadError::json)?;

    let (list, timestamp_ms) = match doc {
        Value::Array(list) => (Value::Array(list), None),
        Value::Object(mut map) => {
            let list = map
                .remove("items")
                .ok_or_else(|| LoadError::invalid("items", "missing `items` array"))?;
            (list, optional_i64(&map, "timestamp_ms")?)
        }
        other => {
            return Err(LoadError::invalid(
                "items document",
                format!("expected an object or array, got {}", kind(&other)),
            ))
        }
    };

    let items: Vec<Item> = serde_json::from_value(list).map_err(LoadError::json)?;
    validate_items(&items)?;
    debug!(count = items.len(), "parsed items");

    Ok(ItemsMessage {
        items,
        timestamp_ms,
    })
}

pub fn parse_pois(bytes: &[u8]) -> Result<PoiMap> {
    let doc: Value = serde_json::from_slice(bytes).map_err(LoadError::json)?;

    let (list, frame) = match doc {
        Value::Array(list) => (Value::Array(list), None),
        Value::Object(mut map) => {
            let list = map
                .remove("poi")
                .or_else(|| map.remove("pois"))
                .ok_or_else(|| LoadError::invalid("poi", "missing `poi` array"))?;
            (list, optional_str(&map, "frame")?)
        }
        other => {
            return Err(LoadError::invalid(
                "poi document",
                format!("expected an object or array, got {}", kind(&other)),
            ))
        }
    };

    let pois: Vec<Poi> = serde_json::from_value(list).map_err(LoadError::json)?;
    validate_pois(&pois)?;
    debug!(count = pois.len(), "parsed POIs");

    Ok(PoiMap { pois, frame })
}

pub fn load_items<P: AsRef<Path>>(path: P) -> Result<ItemsMessage> {
    let path = path.as_ref();
    let bytes = read(path)?;
    parse_items(&bytes).map_err(|e| e.in_source(&path.display().to_string()))
}

pub fn load_pois<P: AsRef<Path>>(path: P) -> Result<PoiMap> {
    let path = path.as_ref();
    let bytes = read(path)?;
    parse_pois(&bytes).map_err(|e| e.in_source(&path.display().to_string()))
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_items(items: &[Item]) -> Result<()> {
    if items.is_empty() {
        return Err(LoadError::Empty {
            what: "items",
            location: String::new(),
        });
    }

    for (i, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(LoadError::invalid(
                format!("items[{}].name", i),
                "name cannot be empty",
            ));
        }
        if item.qty < 0 {
            return Err(LoadError::invalid(
                format!("items[{}].qty", i),
                format!("qty cannot be negative, got {}", item.qty),
            ));
        }
    }

    Ok(())
}

fn validate_pois(pois: &[Poi]) -> Result<()> {
    if pois.is_empty() {
        return Err(LoadError::Empty {
            what: "POIs",
            location: String::new(),
        });
    }

    for (i, poi) in pois.iter().enumerate() {
        if poi.id.trim().is_empty() {
            return Err(LoadError::invalid(
                format!("poi[{}].id", i),
                "id cannot be empty",
            ));
        }
        if !poi.x.is_finite() || !poi.y.is_finite() {
            return Err(LoadError::invalid(
                format!("poi[{}]", i),
                format!("coordinates of '{}' must be finite", poi.id),
            ));
        }
    }

    Ok(())
}

fn optional_i64(map: &Map<String, Value>, key: &str) -> Result<Option<i64>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| LoadError::invalid(key, format!("expected an integer, got {}", value))),
    }
}

fn optional_str(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.clone())),
        Some(value) => Err(LoadError::invalid(
            key,
            format!("expected a non-empty string, got {}", value),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
