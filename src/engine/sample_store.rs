//! Append-only storage for saved field samples.
//!
//! Samples are immutable once appended; the only permitted mutation is the
//! lifecycle status transition driven by an external sync layer.

use std::collections::HashMap;

use log::info;

use crate::error::{OptionExt, Result};
use crate::{FieldSample, FieldTraceError, MatrixType, SampleStatus};

/// The project's saved samples, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: Vec<FieldSample>,
    by_id: HashMap<String, usize>,
}

impl SampleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Append a saved sample.
    ///
    /// Ids must be unique; a duplicate is rejected rather than overwritten.
    pub fn append(&mut self, sample: FieldSample) -> Result<()> {
        if self.by_id.contains_key(&sample.id) {
            return Err(FieldTraceError::DuplicateSample {
                sample_id: sample.id,
            });
        }
        self.by_id.insert(sample.id.clone(), self.samples.len());
        self.samples.push(sample);
        Ok(())
    }

    /// Get a sample by id.
    pub fn get(&self, id: &str) -> Option<&FieldSample> {
        self.by_id.get(id).map(|&i| &self.samples[i])
    }

    /// All samples in insertion order.
    pub fn samples(&self) -> &[FieldSample] {
        &self.samples
    }

    /// Iterate over samples in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSample> {
        self.samples.iter()
    }

    /// Samples of a given matrix type.
    pub fn by_matrix(&self, matrix: MatrixType) -> Vec<&FieldSample> {
        self.samples.iter().filter(|s| s.matrix == matrix).collect()
    }

    /// Samples collected against a given planned location.
    pub fn for_planned_location(&self, location_id: &str) -> Vec<&FieldSample> {
        self.samples
            .iter()
            .filter(|s| s.planned_location_id.as_deref() == Some(location_id))
            .collect()
    }

    /// Count samples in a given lifecycle status.
    pub fn count_by_status(&self, status: SampleStatus) -> usize {
        self.samples.iter().filter(|s| s.status == status).count()
    }

    /// Advance a sample's lifecycle status.
    ///
    /// Only single steps along pending → validated → uploaded are legal;
    /// anything else is an `IllegalTransition` error.
    pub fn advance_status(&mut self, id: &str, to: SampleStatus) -> Result<()> {
        let index = self.by_id.get(id).copied().ok_or_unknown_sample(id)?;
        let sample = &mut self.samples[index];

        if !sample.status.can_advance_to(to) {
            return Err(FieldTraceError::IllegalTransition {
                sample_id: id.to_string(),
                from: sample.status,
                to,
            });
        }

        info!("sample {} status: {:?} -> {:?}", id, sample.status, to);
        sample.status = to;
        Ok(())
    }

    /// Get the number of saved samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
