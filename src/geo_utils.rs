//! Geographic utilities: great-circle distance, centers, meter offsets.

use crate::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per degree of latitude (approximately constant).
pub const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Calculate the great-circle distance between two points in meters using
/// the haversine formula.
///
/// Pure and deterministic; inputs are plain decimal degrees with no datum
/// conversion. Callers are responsible for not passing NaN coordinates.
///
/// # Example
/// ```
/// use fieldtrace::geo_utils::haversine_distance;
/// use fieldtrace::GeoPoint;
///
/// let a = GeoPoint::new(41.3251, -89.3048);
/// let dist = haversine_distance(&a, &a);
/// assert_eq!(dist, 0.0);
/// ```
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Compute the centroid of a set of points.
///
/// Returns (0, 0) for an empty slice.
pub fn compute_center(points: &[GeoPoint]) -> GeoPoint {
    if points.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }
    let lat_sum: f64 = points.iter().map(|p| p.latitude).sum();
    let lng_sum: f64 = points.iter().map(|p| p.longitude).sum();
    GeoPoint::new(lat_sum / points.len() as f64, lng_sum / points.len() as f64)
}

/// Offset a point by the given distances in meters (north and east).
///
/// Uses the local flat-earth approximation, which is accurate to well under
/// a meter at site scale (a few kilometers).
pub fn offset_point(origin: &GeoPoint, north_meters: f64, east_meters: f64) -> GeoPoint {
    let dlat = north_meters / METERS_PER_DEG_LAT;
    let dlng = east_meters / (METERS_PER_DEG_LAT * origin.latitude.to_radians().cos());
    GeoPoint::new(origin.latitude + dlat, origin.longitude + dlng)
}
