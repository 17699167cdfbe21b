//! Reading item lists and POI maps, and writing paths, as JSON.
//!
//! Inputs are parsed with `serde_json` and then validated against a typed
//! schema (non-empty names/ids, `qty >= 0`, finite coordinates, non-empty
//! lists). Output is the four-key path document consumed by the drive stack.

pub mod error;
pub mod input;
pub mod output;

pub use error::{LoadError, Result};
pub use input::{load_items, load_pois, parse_items, parse_pois, ItemsMessage, PoiMap};
pub use output::{parse_path, path_to_json, path_to_payload};
