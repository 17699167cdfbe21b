use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// An item names a POI id that is not on the map
    #[error("POI not found: {name}")]
    PoiNotFound { name: String },
}
