use super::utils::resolve_frame;
use anyhow::{Context, Result};
use planner_config::Config;
use planner_core::build_path;
use planner_io::{load_items, load_pois, path_to_json};
use std::path::Path;
use tracing::{debug, info};

pub fn handle_plan(
    config: &Config,
    items_file: &Path,
    poi_file: &Path,
    frame: Option<&str>,
) -> Result<()> {
    let path = plan_from_files(items_file, poi_file, frame, &config.planner.frame)?;
    print!("{}", path_to_json(&path).context("rendering path")?);
    Ok(())
}

/// Load both documents and build the path.
pub fn plan_from_files(
    items_file: &Path,
    poi_file: &Path,
    frame: Option<&str>,
    configured_frame: &str,
) -> Result<planner_core::Path> {
    let message = load_items(items_file)
        .with_context(|| format!("loading item list {}", items_file.display()))?;
    let map = load_pois(poi_file)
        .with_context(|| format!("loading POI map {}", poi_file.display()))?;
    debug!(
        items = message.items.len(),
        pois = map.pois.len(),
        "loaded plan inputs"
    );

    let frame = resolve_frame(frame, map.frame.as_deref(), configured_frame);
    let path = build_path(&message.items, &map.pois, &frame).context("building path")?;
    info!(
        "planned {} waypoints in frame {} (cost {:.3})",
        path.waypoints.len(),
        path.frame,
        path.total_cost
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{PlanError, Waypoint};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn workspace_data(rel: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../data")
            .join(rel)
    }

    #[test]
    fn test_plan_sample_files() {
        let path = plan_from_files(
            &workspace_data("samples/items_example.json"),
            &workspace_data("poi/store_A_poi.json"),
            None,
            "ignored",
        )
        .unwrap();

        // The map document names its own frame.
        assert_eq!(path.frame, "map");
        assert_eq!(
            path.waypoints,
            vec![
                Waypoint::new(0.0, 0.0),
                Waypoint::new(2.5, 1.0),
                Waypoint::new(6.0, 1.5),
                Waypoint::new(7.5, 3.5),
                Waypoint::new(1.0, 6.0),
            ]
        );
        assert!((path.total_cost - path.length()).abs() < 1e-9);
    }

    #[test]
    fn test_frame_flag_wins() {
        let path = plan_from_files(
            &workspace_data("samples/items_example.json"),
            &workspace_data("poi/store_A_poi.json"),
            Some("odom"),
            "map",
        )
        .unwrap();
        assert_eq!(path.frame, "odom");
    }

    #[test]
    fn test_missing_items_file() {
        let err = plan_from_files(
            Path::new("/nonexistent/items.json"),
            &workspace_data("poi/store_A_poi.json"),
            None,
            "map",
        )
        .unwrap_err();
        assert!(err.to_string().contains("items.json"));
        assert!(format!("{:#}", err).starts_with("loading item list"));
    }

    #[test]
    fn test_bad_map_is_reported_with_context() {
        let dir = tempdir().unwrap();
        let poi = dir.path().join("poi.json");
        std::fs::write(&poi, r#"{"poi": []}"#).unwrap();

        let err = plan_from_files(&workspace_data("samples/items_example.json"), &poi, None, "map")
            .unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("loading POI map"));
        assert!(chain.contains("No POIs parsed"));
    }

    #[test]
    fn test_unknown_item_is_reported() {
        let dir = tempdir().unwrap();
        let items = dir.path().join("items.json");
        std::fs::write(&items, r#"[{"name": "durian", "qty": 1}]"#).unwrap();

        let err = plan_from_files(&items, &workspace_data("poi/store_A_poi.json"), None, "map")
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<PlanError>(),
            Some(&PlanError::PoiNotFound {
                name: "durian".to_string()
            })
        );
    }
}
