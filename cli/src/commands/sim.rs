use anyhow::Result;
use planner_core::clock::unix_ms;
use planner_core::{Path, Waypoint};
use planner_io::path_to_json;

pub fn handle_sim() -> Result<()> {
    print!("{}", path_to_json(&demo_path())?);
    Ok(())
}

/// Fixed path for checking the drive-stack wiring without a map.
pub fn demo_path() -> Path {
    Path {
        frame: "map".to_string(),
        waypoints: vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(1.0, 1.0),
            Waypoint::new(2.0, 1.5),
            Waypoint::new(3.0, 2.0),
        ],
        total_cost: 3.5,
        created_ms: unix_ms(),
    }
}
