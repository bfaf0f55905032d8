//! # fieldtrace
//!
//! GPS proximity matching and validation core for environmental field sampling.
//!
//! This library provides:
//! - Proximity matching between the device's GPS fix and a catalogue of
//!   planned sampling locations
//! - Protocol validation of draft field samples (matrix-specific rules)
//! - An append-only per-project sample store with a small lifecycle
//!   state machine (pending → validated → uploaded)
//! - Spatial (viewport) queries over the catalogue for map display
//! - Export of collected samples as KML, CSV, and JSON reports
//! - A synthetic fix-stream generator for demos and tests
//!
//! All computation is synchronous and single-threaded: the caller feeds in
//! position updates and form edits, and reads back the recomputed state.
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldtrace::engine::{FieldSession, LocationCatalogue};
//! use fieldtrace::synthetic::demo_site;
//! use fieldtrace::{GpsFix, MatrixType, ValidationStatus};
//!
//! let (project, locations) = demo_site();
//! let mut session = FieldSession::new(project, LocationCatalogue::from_locations(locations));
//!
//! // A fix arrives at a planned sampling location
//! session.update_fix(GpsFix::new(41.3251, -89.3048).with_timestamp(1_738_400_000_000));
//! assert_eq!(session.nearby()[0].location.id, "DPU-SW-001");
//!
//! // Fill in the draft until it passes validation, then save
//! session.set_matrix(Some(MatrixType::Water));
//! session.set_description("clear, slight sheen on surface");
//! session.set_ph(Some(7.0));
//! assert_eq!(session.validation_status(), ValidationStatus::Valid);
//! let sample = session.save_sample("J. Alvarez").unwrap();
//! assert_eq!(sample.planned_location_id.as_deref(), Some("DPU-SW-001"));
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{FieldTraceError, OptionExt, Result};

// Geographic utilities (distance, bounds, offset calculations)
pub mod geo_utils;

// Proximity matching between the current fix and the planned catalogue
pub mod proximity;
pub use proximity::{find_nearby, nearest};

// Draft-sample validation rules
pub mod validation;
pub use validation::{check_draft, validate_draft, RuleViolation};

// Session engine with catalogue, sample store and spatial index
pub mod engine;
pub use engine::{CatalogueIndex, FieldSession, LocationCatalogue, SampleStore};

// Report generation (KML / CSV / JSON)
pub mod export;
pub use export::{project_kml, samples_csv, session_report_json};

// Synthetic fix streams and demo catalogue
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A latitude/longitude pair in decimal degrees.
///
/// # Example
/// ```
/// use fieldtrace::GeoPoint;
/// let point = GeoPoint::new(41.3251, -89.3048); // DePue, Illinois
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A positioning fix delivered by the device's location stream.
///
/// Accuracy and capture time are reported by the positioning source when
/// available; the core never filters on accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub point: GeoPoint,
    /// Reported horizontal accuracy in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Capture time as Unix milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<i64>,
}

impl GpsFix {
    /// Create a fix without accuracy or capture time.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            point: GeoPoint::new(latitude, longitude),
            accuracy: None,
            timestamp_ms: None,
        }
    }

    /// Attach a reported accuracy in meters.
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }

    /// Attach a capture time in Unix milliseconds.
    pub fn with_timestamp(mut self, unix_ms: i64) -> Self {
        self.timestamp_ms = Some(unix_ms);
        self
    }

    /// Check if the fix has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.point.is_valid()
    }
}

/// Bounding box over a set of points (map viewport, catalogue extent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from points. Returns `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Check whether a point lies inside the bounds (edges inclusive).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
    }
}

/// The physical medium a sample is drawn from.
///
/// `Water` covers groundwater sampling; monitoring wells are the only water
/// matrix in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixType {
    Soil,
    Water,
    Air,
    Sediment,
}

impl std::fmt::Display for MatrixType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MatrixType::Soil => "soil",
            MatrixType::Water => "water",
            MatrixType::Air => "air",
            MatrixType::Sediment => "sediment",
        };
        write!(f, "{}", label)
    }
}

/// Sampling priority assigned at project setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

/// Target contaminant category for a planned location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContaminantClass {
    HeavyMetals,
    Pcbs,
    Vocs,
    Particulates,
}

/// A pre-defined sampling point, seeded once at project setup and never
/// mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedLocation {
    /// Location identifier (e.g., "DPU-SW-001")
    pub id: String,
    /// Human-readable description of the sampling point
    pub description: String,
    pub coordinate: GeoPoint,
    pub matrix: MatrixType,
    pub priority: Priority,
    /// Target contaminant categories
    pub contaminants: Vec<ContaminantClass>,
}

/// Field measurements taken with a sample. All optional; units are implicit
/// (°C, pH units, µS/cm, NTU, mg/L).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conductivity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissolved_oxygen: Option<f64>,
}

/// The in-progress sample record, mutable until saved.
///
/// Drafts are built field-by-field by the UI layer; the validator decides
/// when a draft is complete enough to save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<MatrixType>,
    /// Free-text depth range (e.g., "0-2 ft", "Surface")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub measurements: Measurements,
    #[serde(default)]
    pub notes: String,
    /// Planned location explicitly selected by the technician; when absent
    /// the nearest in-range location is captured at save time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_location_id: Option<String>,
}

/// Lifecycle status of a saved sample.
///
/// `Validated` and `Uploaded` are set by a later sync process; the core only
/// ever produces `Pending` samples and enforces the legal transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleStatus {
    Pending,
    Validated,
    Uploaded,
}

impl SampleStatus {
    /// Check whether a single-step transition to `next` is legal.
    ///
    /// Pending → Validated → Uploaded; Uploaded is terminal; no rollback.
    pub fn can_advance_to(self, next: SampleStatus) -> bool {
        matches!(
            (self, next),
            (SampleStatus::Pending, SampleStatus::Validated)
                | (SampleStatus::Validated, SampleStatus::Uploaded)
        )
    }
}

/// A collected sample, immutable once appended to the project's sample list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    /// Identifier generated at save time from project id + capture time
    pub id: String,
    pub project_id: String,
    pub matrix: MatrixType,
    /// The GPS fix captured with the sample
    pub location: GpsFix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,
    pub description: String,
    pub measurements: Measurements,
    pub notes: String,
    /// Capture time as Unix milliseconds, taken from the fix when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<i64>,
    pub technician: String,
    pub status: SampleStatus,
    /// Planned location this sample was collected against, if any was in range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_location_id: Option<String>,
}

/// Tri-state validity of the current draft.
///
/// `Pending` means no edit or fix event has been processed yet; after the
/// first event the status is always `Valid` or `Invalid`. An `Invalid`
/// result is a normal outcome used to gate the Save action, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pending,
    Valid,
    Invalid,
}

/// A planned location within range of the current fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatch {
    pub location: PlannedLocation,
    /// Great-circle distance from the current fix in meters
    pub distance_meters: f64,
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Active,
    Completed,
    OnHold,
}

/// Project metadata. The sample list and catalogue live in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    pub client: String,
    /// Site description (e.g., "DePue, Bureau County, Illinois")
    pub site: String,
    /// ISO 8601 date
    pub start_date: String,
    pub status: ProjectStatus,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the proximity matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityConfig {
    /// Radius within which a planned location counts as "nearby".
    /// Default: 100.0 meters
    pub radius_meters: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            radius_meters: 100.0,
        }
    }
}

/// Configuration for the sample validator.
///
/// The defaults mirror the field protocol in use at the demo site; none of
/// the bounds carry a regulatory citation, so they are all adjustable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Lowest acceptable soil temperature in °C (inclusive).
    /// Default: -5.0
    pub soil_temp_min: f64,

    /// Highest acceptable soil temperature in °C (inclusive).
    /// Default: 40.0
    pub soil_temp_max: f64,

    /// Lowest acceptable pH for water samples (inclusive).
    /// Default: 0.0
    pub ph_min: f64,

    /// Highest acceptable pH for water samples (inclusive).
    /// Default: 14.0
    pub ph_max: f64,

    /// Terms an air-sample description must mention (case-insensitive
    /// substring match, any term suffices).
    /// Default: ["wind"]
    pub wind_terms: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            soil_temp_min: -5.0,
            soil_temp_max: 40.0,
            ph_min: 0.0,
            ph_max: 14.0,
            wind_terms: vec!["wind".to_string()],
        }
    }
}
