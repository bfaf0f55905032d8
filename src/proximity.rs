//! Proximity matching between the current GPS fix and the planned catalogue.
//!
//! A pure query re-run on every position update. The catalogue is small
//! (single digits to low tens of locations), so a linear scan over it is
//! cheaper than maintaining any index here.

use crate::geo_utils::haversine_distance;
use crate::{GpsFix, LocationMatch, PlannedLocation, ProximityConfig};

/// Find all planned locations within the configured radius of the current
/// fix, sorted by ascending distance.
///
/// A missing fix yields an empty result, never an error: the UI simply has
/// nothing to show until the first fix arrives. A low-quality fix (large
/// reported accuracy) is used as-is.
///
/// # Example
/// ```
/// use fieldtrace::proximity::find_nearby;
/// use fieldtrace::synthetic::demo_site;
/// use fieldtrace::{GpsFix, ProximityConfig};
///
/// let (_, locations) = demo_site();
/// let fix = GpsFix::new(41.3251, -89.3048);
/// let nearby = find_nearby(Some(&fix), &locations, &ProximityConfig::default());
/// assert_eq!(nearby[0].location.id, "DPU-SW-001");
///
/// let none = find_nearby(None, &locations, &ProximityConfig::default());
/// assert!(none.is_empty());
/// ```
pub fn find_nearby(
    fix: Option<&GpsFix>,
    catalogue: &[PlannedLocation],
    config: &ProximityConfig,
) -> Vec<LocationMatch> {
    let fix = match fix {
        Some(f) => f,
        None => return Vec::new(),
    };

    let mut matches: Vec<LocationMatch> = catalogue
        .iter()
        .filter_map(|location| {
            let distance = haversine_distance(&fix.point, &location.coordinate);
            if distance <= config.radius_meters {
                Some(LocationMatch {
                    location: location.clone(),
                    distance_meters: distance,
                })
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    matches
}

/// Find the closest in-radius planned location, if any.
pub fn nearest(
    fix: Option<&GpsFix>,
    catalogue: &[PlannedLocation],
    config: &ProximityConfig,
) -> Option<LocationMatch> {
    find_nearby(fix, catalogue, config).into_iter().next()
}
