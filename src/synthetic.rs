//! Synthetic fix streams and demo seed data.
//!
//! Generates deterministic (seeded) GPS fix streams for demos, tests, and
//! the CLI simulation, plus the demo site catalogue. Noise uses the same
//! Box-Muller Gaussian technique as real receiver jitter models.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::geo_utils::METERS_PER_DEG_LAT;
use crate::{
    ContaminantClass, GeoPoint, GpsFix, MatrixType, PlannedLocation, Priority, ProjectInfo,
    ProjectStatus,
};

fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    meters / (METERS_PER_DEG_LAT * latitude.to_radians().cos())
}

/// Box-Muller transform for Gaussian noise.
fn gaussian(rng: &mut StdRng, sigma: f64) -> f64 {
    let u1: f64 = rng.gen_range(0.0001..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos() * sigma
}

/// A random-walk fix stream around an origin.
///
/// # Example
///
/// ```rust
/// use fieldtrace::synthetic::FixStreamScenario;
/// use fieldtrace::GeoPoint;
///
/// let scenario = FixStreamScenario {
///     origin: GeoPoint::new(41.3251, -89.3048),
///     fix_count: 50,
///     step_meters: 5.0,
///     gps_noise_sigma_meters: 3.0,
///     accuracy_meters: 4.5,
///     start_timestamp_ms: 1_738_400_000_000,
///     seed: 42,
/// };
///
/// let fixes = scenario.generate();
/// assert_eq!(fixes.len(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct FixStreamScenario {
    /// Walk starting point.
    pub origin: GeoPoint,
    /// Number of fixes to generate.
    pub fix_count: usize,
    /// Distance covered between consecutive fixes in meters.
    pub step_meters: f64,
    /// GPS noise standard deviation in meters.
    pub gps_noise_sigma_meters: f64,
    /// Accuracy reported on every fix.
    pub accuracy_meters: f64,
    /// Capture time of the first fix (Unix milliseconds); fixes are 1 s apart.
    pub start_timestamp_ms: i64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl FixStreamScenario {
    /// Generate the fix stream. Deterministic for a fixed seed.
    pub fn generate(&self) -> Vec<GpsFix> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut fixes = Vec::with_capacity(self.fix_count);

        let mut current = self.origin;
        let mut heading: f64 = rng.gen_range(0.0..2.0 * PI);

        for i in 0..self.fix_count {
            heading += rng.gen_range(-0.3..0.3);

            let noisy = GeoPoint::new(
                current.latitude + meters_to_deg_lat(gaussian(&mut rng, self.gps_noise_sigma_meters)),
                current.longitude
                    + meters_to_deg_lng(
                        gaussian(&mut rng, self.gps_noise_sigma_meters),
                        current.latitude,
                    ),
            );

            fixes.push(GpsFix {
                point: noisy,
                accuracy: Some(self.accuracy_meters),
                timestamp_ms: Some(self.start_timestamp_ms + (i as i64) * 1000),
            });

            current.latitude += meters_to_deg_lat(self.step_meters * heading.sin());
            current.longitude += meters_to_deg_lng(self.step_meters * heading.cos(), current.latitude);
        }

        fixes
    }

    /// Short technician walk at the demo site. Baseline demo scenario.
    pub fn site_walk() -> Self {
        Self {
            origin: DEPUE,
            fix_count: 120,
            step_meters: 1.5,
            gps_noise_sigma_meters: 3.0,
            accuracy_meters: 4.5,
            start_timestamp_ms: 1_738_400_000_000,
            seed: 42,
        }
    }
}

/// Generate a fix stream that walks the catalogue locations in sequence,
/// with `steps_between` fixes interpolated on each leg. The stream starts
/// at the first location and ends at the last; fixes are 1 s apart.
///
/// Deterministic for a fixed seed. Returns an empty stream for an empty
/// catalogue.
pub fn tour_fixes(
    locations: &[PlannedLocation],
    steps_between: usize,
    noise_sigma_meters: f64,
    start_timestamp_ms: i64,
    seed: u64,
) -> Vec<GpsFix> {
    if locations.is_empty() {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let waypoints: Vec<GeoPoint> = locations.iter().map(|l| l.coordinate).collect();
    let mut fixes = Vec::new();
    let mut timestamp = start_timestamp_ms;

    let push_fix = |point: GeoPoint, rng: &mut StdRng, timestamp: &mut i64, out: &mut Vec<GpsFix>| {
        let noisy = GeoPoint::new(
            point.latitude + meters_to_deg_lat(gaussian(rng, noise_sigma_meters)),
            point.longitude + meters_to_deg_lng(gaussian(rng, noise_sigma_meters), point.latitude),
        );
        out.push(GpsFix {
            point: noisy,
            accuracy: Some(4.5),
            timestamp_ms: Some(*timestamp),
        });
        *timestamp += 1000;
    };

    push_fix(waypoints[0], &mut rng, &mut timestamp, &mut fixes);

    for leg in waypoints.windows(2) {
        for step in 1..=steps_between {
            let t = step as f64 / steps_between as f64;
            let point = GeoPoint::new(
                leg[0].latitude + t * (leg[1].latitude - leg[0].latitude),
                leg[0].longitude + t * (leg[1].longitude - leg[0].longitude),
            );
            push_fix(point, &mut rng, &mut timestamp, &mut fixes);
        }
    }

    fixes
}

// ============================================================================
// Demo Seed Data
// ============================================================================

/// Former smelter site at DePue, Illinois, used as the demo assessment site.
const DEPUE: GeoPoint = GeoPoint {
    latitude: 41.3251,
    longitude: -89.3048,
};

/// The demo site: a Phase II assessment project with its six planned
/// sampling locations around the former smelter property.
pub fn demo_site() -> (ProjectInfo, Vec<PlannedLocation>) {
    let project = ProjectInfo {
        id: "epa-depue-2025-001".to_string(),
        name: "DePue Site Environmental Assessment".to_string(),
        client: "US EPA Region 5".to_string(),
        site: "DePue, Bureau County, Illinois".to_string(),
        start_date: "2025-02-01".to_string(),
        status: ProjectStatus::Active,
    };

    let locations = vec![
        PlannedLocation {
            id: "DPU-SW-001".to_string(),
            description: "Former smelter building foundation area".to_string(),
            coordinate: GeoPoint::new(41.3251, -89.3048),
            matrix: MatrixType::Soil,
            priority: Priority::High,
            contaminants: vec![ContaminantClass::HeavyMetals, ContaminantClass::Pcbs],
        },
        PlannedLocation {
            id: "DPU-SW-002".to_string(),
            description: "Waste storage area - northeast quadrant".to_string(),
            coordinate: GeoPoint::new(41.3255, -89.3045),
            matrix: MatrixType::Soil,
            priority: Priority::High,
            contaminants: vec![ContaminantClass::HeavyMetals, ContaminantClass::Vocs],
        },
        PlannedLocation {
            id: "DPU-GW-001".to_string(),
            description: "Upgradient monitoring well".to_string(),
            coordinate: GeoPoint::new(41.324, -89.3055),
            matrix: MatrixType::Water,
            priority: Priority::High,
            contaminants: vec![ContaminantClass::HeavyMetals, ContaminantClass::Vocs],
        },
        PlannedLocation {
            id: "DPU-GW-002".to_string(),
            description: "Downgradient monitoring well - Illinois River direction".to_string(),
            coordinate: GeoPoint::new(41.326, -89.304),
            matrix: MatrixType::Water,
            priority: Priority::High,
            contaminants: vec![ContaminantClass::HeavyMetals, ContaminantClass::Vocs],
        },
        PlannedLocation {
            id: "DPU-SED-001".to_string(),
            description: "Illinois River sediment - adjacent to site".to_string(),
            coordinate: GeoPoint::new(41.3265, -89.3035),
            matrix: MatrixType::Sediment,
            priority: Priority::Medium,
            contaminants: vec![ContaminantClass::HeavyMetals, ContaminantClass::Pcbs],
        },
        PlannedLocation {
            id: "DPU-AIR-001".to_string(),
            description: "Ambient air monitoring - residential area".to_string(),
            coordinate: GeoPoint::new(41.3245, -89.306),
            matrix: MatrixType::Air,
            priority: Priority::Medium,
            contaminants: vec![ContaminantClass::Vocs, ContaminantClass::Particulates],
        },
    ];

    (project, locations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_stream_deterministic() {
        let scenario = FixStreamScenario::site_walk();
        let a = scenario.generate();
        let b = scenario.generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tour_visits_every_location() {
        use crate::geo_utils::haversine_distance;

        let (_, locations) = demo_site();
        let fixes = tour_fixes(&locations, 10, 2.0, 1_738_400_000_000, 7);

        for location in &locations {
            let closest = fixes
                .iter()
                .map(|f| haversine_distance(&f.point, &location.coordinate))
                .fold(f64::INFINITY, f64::min);
            assert!(
                closest < 20.0,
                "tour never came within 20m of {}",
                location.id
            );
        }
    }
}
