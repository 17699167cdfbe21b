pub mod builder;
pub mod clock;
pub mod error;
pub mod index;
pub mod models;

pub use builder::{build_path, PathBuilder, CHECKOUT_ID, ENTRANCE_ID};
pub use error::{PlanError, Result};
pub use index::PoiIndex;
pub use models::{Item, Path, Poi, Waypoint};
