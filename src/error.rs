//! Unified error handling for fieldtrace.
//!
//! An `Invalid` validation result is a normal outcome, not an error; the
//! variants here cover misuse of the API (saving a rejected draft, unknown
//! identifiers, illegal lifecycle transitions) and report serialization.

use thiserror::Error;

use crate::{SampleStatus, ValidationStatus};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FieldTraceError>;

/// Errors that can occur in the fieldtrace core.
#[derive(Debug, Error)]
pub enum FieldTraceError {
    /// Save was attempted while the draft had not passed validation.
    #[error("cannot save: draft validation status is {status:?}")]
    DraftRejected { status: ValidationStatus },

    /// An operation required a GPS fix but none has arrived yet.
    #[error("no GPS fix available")]
    MissingFix,

    /// A planned-location id was referenced that is not in the catalogue.
    #[error("unknown planned location '{location_id}'")]
    UnknownLocation { location_id: String },

    /// A sample id was referenced that is not in the store.
    #[error("unknown sample '{sample_id}'")]
    UnknownSample { sample_id: String },

    /// A sample with the same id was already saved.
    #[error("sample '{sample_id}' already exists")]
    DuplicateSample { sample_id: String },

    /// A lifecycle transition outside pending → validated → uploaded.
    #[error("illegal status transition for sample '{sample_id}': {from:?} -> {to:?}")]
    IllegalTransition {
        sample_id: String,
        from: SampleStatus,
        to: SampleStatus,
    },

    /// Report serialization failed.
    #[error("report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Extension trait for converting `Option` into fieldtrace errors.
pub trait OptionExt<T> {
    /// Convert `None` into a `MissingFix` error.
    fn ok_or_missing_fix(self) -> Result<T>;

    /// Convert `None` into an `UnknownLocation` error.
    fn ok_or_unknown_location(self, location_id: &str) -> Result<T>;

    /// Convert `None` into an `UnknownSample` error.
    fn ok_or_unknown_sample(self, sample_id: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing_fix(self) -> Result<T> {
        self.ok_or(FieldTraceError::MissingFix)
    }

    fn ok_or_unknown_location(self, location_id: &str) -> Result<T> {
        self.ok_or_else(|| FieldTraceError::UnknownLocation {
            location_id: location_id.to_string(),
        })
    }

    fn ok_or_unknown_sample(self, sample_id: &str) -> Result<T> {
        self.ok_or_else(|| FieldTraceError::UnknownSample {
            sample_id: sample_id.to_string(),
        })
    }
}
