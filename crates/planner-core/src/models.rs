use serde::{Deserialize, Serialize};

/// A requested shopping-list entry.
///
/// `qty` is carried through to consumers but never affects pathing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub qty: i64,
}

impl Item {
    pub fn new(name: impl Into<String>, qty: i64) -> Self {
        Self {
            name: name.into(),
            qty,
        }
    }
}

/// A named location on the store map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl Poi {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self { id: id.into(), x, y }
    }

    pub fn position(&self) -> Waypoint {
        Waypoint::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
}

impl Waypoint {
    pub const ORIGIN: Waypoint = Waypoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Waypoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A computed visiting order.
///
/// Field order is the wire order: `frame`, `waypoints`, `total_cost`,
/// `created_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub frame: String,
    pub waypoints: Vec<Waypoint>,
    pub total_cost: f64,
    /// Wall-clock Unix epoch milliseconds at which the build began
    pub created_ms: i64,
}

impl Path {
    /// Sum of consecutive Euclidean distances along `waypoints`.
    ///
    /// For a freshly built path this equals `total_cost`.
    pub fn length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}
