//! Tests for geo_utils module

use fieldtrace::geo_utils::*;
use fieldtrace::{Bounds, GeoPoint};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_haversine_distance_same_point() {
    let p = GeoPoint::new(41.3251, -89.3048);
    assert_eq!(haversine_distance(&p, &p), 0.0);
}

#[test]
fn test_haversine_distance_symmetric() {
    let a = GeoPoint::new(41.3251, -89.3048);
    let b = GeoPoint::new(41.326, -89.304);
    assert_eq!(haversine_distance(&a, &b), haversine_distance(&b, &a));
}

#[test]
fn test_haversine_distance_known_value() {
    // London to Paris is approximately 344 km
    let london = GeoPoint::new(51.5074, -0.1278);
    let paris = GeoPoint::new(48.8566, 2.3522);
    let dist = haversine_distance(&london, &paris);
    assert!(approx_eq(dist, 343_560.0, 5000.0)); // Within 5km
}

#[test]
fn test_offset_point_round_trip() {
    let origin = GeoPoint::new(41.3251, -89.3048);
    let moved = offset_point(&origin, 100.0, 0.0);
    let dist = haversine_distance(&origin, &moved);
    assert!(approx_eq(dist, 100.0, 0.5));

    let moved_east = offset_point(&origin, 0.0, 75.0);
    let dist_east = haversine_distance(&origin, &moved_east);
    assert!(approx_eq(dist_east, 75.0, 0.5));
}

#[test]
fn test_compute_center() {
    let points = vec![GeoPoint::new(41.32, -89.31), GeoPoint::new(41.34, -89.29)];
    let center = compute_center(&points);
    assert!(approx_eq(center.latitude, 41.33, 0.001));
    assert!(approx_eq(center.longitude, -89.30, 0.001));
}

#[test]
fn test_compute_center_empty() {
    let empty: Vec<GeoPoint> = vec![];
    let center = compute_center(&empty);
    assert_eq!(center.latitude, 0.0);
    assert_eq!(center.longitude, 0.0);
}

#[test]
fn test_bounds_from_points() {
    let points = vec![
        GeoPoint::new(41.3245, -89.306),
        GeoPoint::new(41.3265, -89.3035),
        GeoPoint::new(41.3251, -89.3048),
    ];
    let bounds = Bounds::from_points(&points).unwrap();
    assert_eq!(bounds.min_lat, 41.3245);
    assert_eq!(bounds.max_lat, 41.3265);
    assert_eq!(bounds.min_lng, -89.306);
    assert_eq!(bounds.max_lng, -89.3035);

    assert!(bounds.contains(&GeoPoint::new(41.3251, -89.3048)));
    assert!(!bounds.contains(&GeoPoint::new(41.33, -89.3048)));
}

#[test]
fn test_bounds_from_points_empty() {
    assert!(Bounds::from_points(&[]).is_none());
}
