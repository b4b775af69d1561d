use serde_json::json;
use storefinder_core::LocationRecord;

use super::*;

const SAN_DIEGO: Coordinate = Coordinate::new(32.7157, -117.1611);
const LOS_ANGELES: Coordinate = Coordinate::new(34.0522, -118.2437);

fn record(id: &str, c: Coordinate) -> LocationRecord {
    LocationRecord {
        latitude: Some(json!(c.lat)),
        longitude: Some(json!(c.lng)),
        id: Some(json!(id)),
        postal_code: None,
        description: None,
    }
}

fn store(points: &[(&str, Coordinate)]) -> FeatureStore {
    let records: Vec<LocationRecord> = points.iter().map(|(id, c)| record(id, *c)).collect();
    FeatureStore::build(&records).0
}

fn ids(features: &[Feature]) -> Vec<&str> {
    features.iter().map(|f| f.id.as_str()).collect()
}

// -----------------------------------------------------------------------
// haversine_km
// -----------------------------------------------------------------------

#[test]
fn distance_to_self_is_zero() {
    for c in [
        SAN_DIEGO,
        LOS_ANGELES,
        Coordinate::new(0.0, 0.0),
        Coordinate::new(-89.9, 179.9),
    ] {
        assert!(haversine_km(c, c).abs() < 1e-9, "non-zero self distance at {c}");
    }
}

#[test]
fn san_diego_to_los_angeles_is_about_179_km() {
    let d = haversine_km(SAN_DIEGO, LOS_ANGELES);
    assert!((d - 179.4).abs() < 1.0, "got {d}");
}

#[test]
fn distance_is_symmetric() {
    let ab = haversine_km(SAN_DIEGO, LOS_ANGELES);
    let ba = haversine_km(LOS_ANGELES, SAN_DIEGO);
    assert!((ab - ba).abs() < 1e-9);
}

#[test]
fn antipodal_points_are_half_circumference() {
    let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
    assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
}

#[test]
fn near_antipodal_pair_has_finite_distance() {
    let a = Coordinate::new(-79.84, -179.0);
    let b = Coordinate::new(79.84, 1.0);
    let d = haversine_km(a, b);
    assert!(d.is_finite(), "got {d}");
    assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0, "got {d}");
}

#[test]
fn near_antipodal_point_is_kept_inside_a_wide_radius() {
    let origin = Coordinate::new(-79.84, -179.0);
    let s = store(&[("far", Coordinate::new(79.84, 1.0))]);
    assert_eq!(ids(&filter(origin, 13_000.0, &s)), vec!["far"]);
}

#[test]
fn miles_convert_with_fixed_factor() {
    assert!((miles_to_km(50.0) - 80.467).abs() < 1e-9);
}

// -----------------------------------------------------------------------
// filter / rank
// -----------------------------------------------------------------------

#[test]
fn fifty_miles_from_san_diego_keeps_only_san_diego() {
    let s = store(&[("A", SAN_DIEGO), ("B", LOS_ANGELES)]);
    assert_eq!(ids(&filter(SAN_DIEGO, 50.0, &s)), vec!["A"]);
}

#[test]
fn one_fifty_miles_keeps_both_nearest_first() {
    let s = store(&[("B", LOS_ANGELES), ("A", SAN_DIEGO)]);
    assert_eq!(ids(&filter(SAN_DIEGO, 150.0, &s)), vec!["A", "B"]);
}

#[test]
fn zero_radius_keeps_coincident_points_inclusively() {
    // distance 0 <= radius 0: the boundary itself is inside.
    let s = store(&[("A", SAN_DIEGO), ("A2", SAN_DIEGO), ("B", LOS_ANGELES)]);
    assert_eq!(ids(&filter(SAN_DIEGO, 0.0, &s)), vec!["A", "A2"]);
}

#[test]
fn equal_distances_keep_page_order() {
    // Two points mirrored across the origin's meridian are equidistant.
    let origin = Coordinate::new(10.0, 0.0);
    let s = store(&[
        ("east", Coordinate::new(10.0, 1.0)),
        ("west", Coordinate::new(10.0, -1.0)),
    ]);
    assert_eq!(ids(&filter(origin, 500.0, &s)), vec!["east", "west"]);
}

#[test]
fn nothing_in_range_is_empty_not_error() {
    let s = store(&[("B", LOS_ANGELES)]);
    assert!(filter(SAN_DIEGO, 1.0, &s).is_empty());
}

#[test]
fn negative_or_nan_radius_matches_nothing() {
    let s = store(&[("A", SAN_DIEGO)]);
    assert!(filter(SAN_DIEGO, -1.0, &s).is_empty());
    assert!(filter(SAN_DIEGO, f64::NAN, &s).is_empty());
}

#[test]
fn result_matches_brute_force_for_many_radii() {
    let points = [
        ("A", SAN_DIEGO),
        ("B", LOS_ANGELES),
        ("C", Coordinate::new(33.1959, -117.3795)),
        ("D", Coordinate::new(36.1699, -115.1398)),
        ("E", Coordinate::new(32.5149, -117.0382)),
    ];
    let s = store(&points);
    for radius in [0.0, 5.0, 25.0, 60.0, 120.0, 300.0, 1000.0] {
        let ranked = rank(SAN_DIEGO, radius, &s);
        let expected = s
            .iter()
            .filter(|f| haversine_km(SAN_DIEGO, f.coordinate) <= radius * KM_PER_MILE)
            .count();
        assert_eq!(ranked.len(), expected, "radius {radius}");
        assert!(
            ranked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km),
            "radius {radius} not sorted"
        );
    }
}

#[test]
fn filter_leaves_master_set_untouched() {
    let s = store(&[("A", SAN_DIEGO), ("B", LOS_ANGELES)]);
    let before: Vec<Feature> = s.features().to_vec();
    let _ = filter(SAN_DIEGO, 10.0, &s);
    assert_eq!(s.features(), before.as_slice());
}
