//! # Field Session Engine
//!
//! Session orchestration for a single field-collection run, composed of
//! focused subcomponents:
//! - `LocationCatalogue` - read-only planned-location seed data
//! - `SampleStore` - append-only saved samples with lifecycle transitions
//! - `CatalogueIndex` - R-tree for map-viewport queries
//!
//! The session owns the current GPS fix and the in-progress draft, and
//! recomputes nearby locations and draft validity on every event. All
//! recomputation is explicit and synchronous: one position update or form
//! edit is handled to completion before the next.

pub mod catalogue;
pub mod sample_store;
pub mod spatial_index;

pub use catalogue::LocationCatalogue;
pub use sample_store::SampleStore;
pub use spatial_index::{CatalogueIndex, LocationEntry};

use log::{debug, info};

use crate::error::{OptionExt, Result};
use crate::{
    proximity, validation, Bounds, FieldSample, FieldTraceError, GpsFix, LocationMatch,
    MatrixType, Measurements, PlannedLocation, ProjectInfo, ProximityConfig, RuleViolation,
    SampleDraft, SampleStatus, ValidationConfig, ValidationStatus,
};

/// A field-collection session for one project.
///
/// Owns the draft, the current fix, and the project's sample list, with the
/// proximity matcher and validator applied as pure functions over that
/// state. Created once per collection run; nothing is persisted.
pub struct FieldSession {
    project: ProjectInfo,
    catalogue: LocationCatalogue,
    samples: SampleStore,
    spatial: CatalogueIndex,

    proximity_config: ProximityConfig,
    validation_config: ValidationConfig,

    current_fix: Option<GpsFix>,
    draft: SampleDraft,

    // Recomputed on every fix/edit event
    nearby: Vec<LocationMatch>,
    validation: ValidationStatus,
}

impl FieldSession {
    /// Create a session with default configuration.
    pub fn new(project: ProjectInfo, catalogue: LocationCatalogue) -> Self {
        Self::with_config(
            project,
            catalogue,
            ProximityConfig::default(),
            ValidationConfig::default(),
        )
    }

    /// Create a session with custom matcher/validator configuration.
    pub fn with_config(
        project: ProjectInfo,
        catalogue: LocationCatalogue,
        proximity_config: ProximityConfig,
        validation_config: ValidationConfig,
    ) -> Self {
        let spatial = CatalogueIndex::build(&catalogue);
        info!(
            "session for project {} ({} planned locations)",
            project.id,
            catalogue.len()
        );
        Self {
            project,
            catalogue,
            samples: SampleStore::new(),
            spatial,
            proximity_config,
            validation_config,
            current_fix: None,
            draft: SampleDraft::default(),
            nearby: Vec::new(),
            validation: ValidationStatus::Pending,
        }
    }

    // ========================================================================
    // Event handling
    // ========================================================================

    /// Process a position update: recompute nearby locations and revalidate
    /// the draft against the new fix.
    pub fn update_fix(&mut self, fix: GpsFix) {
        debug!(
            "fix update: {:.6}, {:.6} (accuracy {:?})",
            fix.point.latitude, fix.point.longitude, fix.accuracy
        );
        self.current_fix = Some(fix);
        self.nearby = proximity::find_nearby(
            Some(&fix),
            self.catalogue.locations(),
            &self.proximity_config,
        );
        self.revalidate();
    }

    /// Select the draft's matrix type.
    pub fn set_matrix(&mut self, matrix: Option<MatrixType>) {
        self.draft.matrix = matrix;
        self.revalidate();
    }

    /// Set the draft's free-text description.
    pub fn set_description(&mut self, description: &str) {
        self.draft.description = description.to_string();
        self.revalidate();
    }

    /// Set the draft's depth range.
    pub fn set_depth(&mut self, depth: Option<String>) {
        self.draft.depth = depth;
        self.revalidate();
    }

    /// Set the draft's notes.
    pub fn set_notes(&mut self, notes: &str) {
        self.draft.notes = notes.to_string();
        self.revalidate();
    }

    /// Replace the draft's measurements wholesale.
    pub fn set_measurements(&mut self, measurements: Measurements) {
        self.draft.measurements = measurements;
        self.revalidate();
    }

    /// Set the draft's temperature measurement.
    pub fn set_temperature(&mut self, celsius: Option<f64>) {
        self.draft.measurements.temperature = celsius;
        self.revalidate();
    }

    /// Set the draft's pH measurement.
    pub fn set_ph(&mut self, ph: Option<f64>) {
        self.draft.measurements.ph = ph;
        self.revalidate();
    }

    /// Explicitly select the planned location this sample is collected
    /// against, overriding the nearest-match default at save time.
    ///
    /// The id must exist in the catalogue.
    pub fn select_planned_location(&mut self, location_id: Option<&str>) -> Result<()> {
        match location_id {
            Some(id) => {
                self.catalogue.get(id).ok_or_unknown_location(id)?;
                self.draft.planned_location_id = Some(id.to_string());
            }
            None => self.draft.planned_location_id = None,
        }
        self.revalidate();
        Ok(())
    }

    /// Discard the in-progress draft.
    pub fn clear_draft(&mut self) {
        self.draft = SampleDraft::default();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.validation = validation::validate_draft(
            &self.draft,
            self.current_fix.as_ref(),
            &self.validation_config,
        );
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The most recent GPS fix, if any has arrived.
    pub fn current_fix(&self) -> Option<GpsFix> {
        self.current_fix
    }

    /// Planned locations within range of the current fix, nearest first.
    pub fn nearby(&self) -> &[LocationMatch] {
        &self.nearby
    }

    /// The draft's validity as of the last event.
    pub fn validation_status(&self) -> ValidationStatus {
        self.validation
    }

    /// The failed rules for the current draft, for display.
    pub fn violations(&self) -> Vec<RuleViolation> {
        validation::check_draft(
            &self.draft,
            self.current_fix.as_ref(),
            &self.validation_config,
        )
    }

    /// Whether the Save action is currently enabled.
    pub fn can_save(&self) -> bool {
        self.validation == ValidationStatus::Valid
    }

    /// The in-progress draft.
    pub fn draft(&self) -> &SampleDraft {
        &self.draft
    }

    /// Project metadata.
    pub fn project(&self) -> &ProjectInfo {
        &self.project
    }

    /// The planned-location catalogue.
    pub fn catalogue(&self) -> &LocationCatalogue {
        &self.catalogue
    }

    /// The saved samples.
    pub fn samples(&self) -> &SampleStore {
        &self.samples
    }

    /// Planned locations inside a map viewport.
    pub fn locations_in_view(&self, bounds: &Bounds) -> Vec<&PlannedLocation> {
        self.spatial
            .query_viewport(bounds)
            .into_iter()
            .filter_map(|id| self.catalogue.get(&id))
            .collect()
    }

    // ========================================================================
    // Save
    // ========================================================================

    /// Save the current draft as an immutable sample.
    ///
    /// Fails with `DraftRejected` unless the validator has accepted the
    /// draft. On success the sample is appended to the project list with
    /// status `Pending`, the nearest in-range planned location (or the
    /// technician's explicit selection) is captured as the location
    /// reference, and the draft is reset.
    pub fn save_sample(&mut self, technician: &str) -> Result<FieldSample> {
        if self.validation != ValidationStatus::Valid {
            return Err(FieldTraceError::DraftRejected {
                status: self.validation,
            });
        }

        // Valid implies both are present
        let (matrix, fix) = match (self.draft.matrix, self.current_fix) {
            (Some(matrix), Some(fix)) => (matrix, fix),
            _ => {
                return Err(FieldTraceError::DraftRejected {
                    status: ValidationStatus::Invalid,
                })
            }
        };

        let id = match fix.timestamp_ms {
            Some(ts) => format!("{}_{}", self.project.id, ts),
            None => format!("{}_{:04}", self.project.id, self.samples.len() + 1),
        };

        let planned_location_id = self
            .draft
            .planned_location_id
            .clone()
            .or_else(|| self.nearby.first().map(|m| m.location.id.clone()));

        let sample = FieldSample {
            id: id.clone(),
            project_id: self.project.id.clone(),
            matrix,
            location: fix,
            depth: self.draft.depth.clone(),
            description: self.draft.description.clone(),
            measurements: self.draft.measurements,
            notes: self.draft.notes.clone(),
            timestamp_ms: fix.timestamp_ms,
            technician: technician.to_string(),
            status: SampleStatus::Pending,
            planned_location_id,
        };

        self.samples.append(sample.clone())?;
        info!(
            "saved sample {} ({}, planned location {:?})",
            id, sample.matrix, sample.planned_location_id
        );

        self.draft = SampleDraft::default();
        self.revalidate();

        Ok(sample)
    }

    /// Advance a saved sample's lifecycle status (driven by the sync layer).
    pub fn advance_sample_status(&mut self, id: &str, to: SampleStatus) -> Result<()> {
        self.samples.advance_status(id, to)
    }
}
