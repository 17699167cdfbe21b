//! Path documents.
//!
//! The document has exactly four keys in this order:
//! `frame`, `waypoints` (list of `{x, y}`), `total_cost`, `created_ms`.

use crate::error::{LoadError, Result};
use planner_core::Path;

/// Pretty-printed document for terminals and files.
pub fn path_to_json(path: &Path) -> Result<String> {
    let mut out = serde_json::to_string_pretty(path)?;
    out.push('\n');
    Ok(out)
}

/// Compact document for message payloads.
pub fn path_to_payload(path: &Path) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(path)?)
}

pub fn parse_path(bytes: &[u8]) -> Result<Path> {
    serde_json::from_slice(bytes).map_err(LoadError::json)
}
