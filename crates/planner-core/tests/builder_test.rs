use anyhow::Result;
use planner_core::{build_path, Item, Path, PlanError, Poi, PoiIndex, Waypoint};

const EPS: f64 = 1e-9;

fn store_a() -> Vec<Poi> {
    vec![
        Poi::new("entrance", 0.0, 0.0),
        Poi::new("coke", 5.0, 1.0),
        Poi::new("ramen", 8.0, 4.0),
        Poi::new("checkout", 2.0, 6.0),
    ]
}

fn recomputed_cost(path: &Path) -> f64 {
    path.waypoints
        .windows(2)
        .map(|w| ((w[1].x - w[0].x).powi(2) + (w[1].y - w[0].y).powi(2)).sqrt())
        .sum()
}

#[test]
fn test_shopping_scenario() -> Result<()> {
    let items = vec![Item::new("coke", 1), Item::new("ramen", 2)];
    let path = build_path(&items, &store_a(), "map")?;

    assert_eq!(
        path.waypoints,
        vec![
            Waypoint::new(0.0, 0.0),
            Waypoint::new(5.0, 1.0),
            Waypoint::new(8.0, 4.0),
            Waypoint::new(2.0, 6.0),
        ]
    );

    let expected = 26f64.sqrt() + 18f64.sqrt() + 40f64.sqrt();
    assert!((path.total_cost - expected).abs() < EPS);
    assert_eq!(path.frame, "map");
    Ok(())
}

#[test]
fn test_empty_items_with_entrance() -> Result<()> {
    let pois = vec![Poi::new("entrance", 3.0, -2.0), Poi::new("coke", 5.0, 1.0)];
    let path = build_path(&[], &pois, "map")?;
    assert_eq!(path.waypoints, vec![Waypoint::new(3.0, -2.0)]);
    assert_eq!(path.total_cost, 0.0);
    Ok(())
}

#[test]
fn test_empty_items_with_checkout() -> Result<()> {
    let path = build_path(&[], &store_a(), "map")?;
    assert_eq!(
        path.waypoints,
        vec![Waypoint::new(0.0, 0.0), Waypoint::new(2.0, 6.0)]
    );
    assert!((path.total_cost - 40f64.sqrt()).abs() < EPS);
    Ok(())
}

#[test]
fn test_no_entrance_starts_at_origin() -> Result<()> {
    let pois = vec![Poi::new("coke", 5.0, 1.0), Poi::new("checkout", 2.0, 6.0)];
    let path = build_path(&[Item::new("coke", 1)], &pois, "map")?;
    assert_eq!(path.waypoints[0], Waypoint::new(0.0, 0.0));
    assert!((path.total_cost - (26f64.sqrt() + 34f64.sqrt())).abs() < EPS);
    Ok(())
}

#[test]
fn test_empty_map_and_items() -> Result<()> {
    let path = build_path(&[], &[], "map")?;
    assert_eq!(path.waypoints, vec![Waypoint::ORIGIN]);
    assert_eq!(path.total_cost, 0.0);
    Ok(())
}

#[test]
fn test_without_checkout_ends_at_last_item() -> Result<()> {
    let pois = vec![
        Poi::new("entrance", 0.0, 0.0),
        Poi::new("coke", 5.0, 1.0),
        Poi::new("ramen", 8.0, 4.0),
    ];
    let items = vec![Item::new("ramen", 1), Item::new("coke", 1)];
    let path = build_path(&items, &pois, "map")?;
    assert_eq!(path.waypoints.last(), Some(&Waypoint::new(5.0, 1.0)));
    assert_eq!(path.waypoints.len(), 3);
    Ok(())
}

#[test]
fn test_waypoint_count_and_cost_invariants() -> Result<()> {
    let with_checkout = store_a();
    let without_checkout: Vec<Poi> = store_a()
        .into_iter()
        .filter(|p| p.id != "checkout")
        .collect();

    let lists = vec![
        vec![],
        vec![Item::new("coke", 1)],
        vec![Item::new("ramen", 1), Item::new("coke", 2), Item::new("ramen", 1)],
    ];

    for items in &lists {
        for (pois, checkout) in [(&with_checkout, 1), (&without_checkout, 0)] {
            let path = build_path(items, pois, "map")?;
            assert_eq!(path.waypoints.len(), 1 + items.len() + checkout);
            assert!((path.total_cost - recomputed_cost(&path)).abs() < EPS);
            assert!((path.total_cost - path.length()).abs() < EPS);
        }
    }
    Ok(())
}

#[test]
fn test_unknown_item_fails_with_name() {
    let items = vec![Item::new("coke", 1), Item::new("shampoo", 1)];
    match build_path(&items, &store_a(), "map") {
        Err(PlanError::PoiNotFound { name }) => assert_eq!(name, "shampoo"),
        Ok(path) => panic!("expected failure, got {:?}", path),
    }
}

#[test]
fn test_error_message_names_poi() {
    let err = build_path(&[Item::new("tofu", 1)], &store_a(), "map").unwrap_err();
    assert_eq!(err.to_string(), "POI not found: tofu");
}

#[test]
fn test_duplicate_ids_last_write_wins() -> Result<()> {
    let pois = vec![Poi::new("a", 0.0, 0.0), Poi::new("a", 10.0, 10.0)];

    let index = PoiIndex::from_pois(&pois);
    let a = index.get("a").expect("a is indexed");
    assert_eq!((a.x, a.y), (10.0, 10.0));

    let path = build_path(&[Item::new("a", 1)], &pois, "map")?;
    assert_eq!(path.waypoints[1], Waypoint::new(10.0, 10.0));
    Ok(())
}

#[test]
fn test_duplicate_entrance_uses_last() -> Result<()> {
    let pois = vec![
        Poi::new("entrance", 1.0, 1.0),
        Poi::new("entrance", -1.0, -1.0),
    ];
    let path = build_path(&[], &pois, "map")?;
    assert_eq!(path.waypoints, vec![Waypoint::new(-1.0, -1.0)]);
    Ok(())
}

#[test]
fn test_created_ms_is_wall_clock() -> Result<()> {
    let before = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_millis() as i64;
    let path = build_path(&[], &store_a(), "map")?;
    let after = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_millis() as i64;
    assert!(path.created_ms >= before && path.created_ms <= after);
    Ok(())
}
