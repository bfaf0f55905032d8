//! Planned-location catalogue.
//!
//! Static configuration data seeded once per project: the catalogue is
//! read-only after construction and iterates in seed order.

use std::collections::HashMap;

use log::warn;

use crate::{Bounds, GeoPoint, PlannedLocation};

/// The project's planned sampling locations.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalogue {
    locations: Vec<PlannedLocation>,
    by_id: HashMap<String, usize>,
}

impl LocationCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self {
            locations: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Build a catalogue from seed data.
    ///
    /// Later entries with a duplicate id are dropped with a warning; the
    /// first occurrence wins.
    pub fn from_locations(locations: Vec<PlannedLocation>) -> Self {
        let mut catalogue = Self::new();
        for location in locations {
            if catalogue.by_id.contains_key(&location.id) {
                warn!("duplicate planned location '{}' ignored", location.id);
                continue;
            }
            catalogue
                .by_id
                .insert(location.id.clone(), catalogue.locations.len());
            catalogue.locations.push(location);
        }
        catalogue
    }

    /// Get a planned location by id.
    pub fn get(&self, id: &str) -> Option<&PlannedLocation> {
        self.by_id.get(id).map(|&i| &self.locations[i])
    }

    /// Check if a planned location exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All planned locations in seed order.
    pub fn locations(&self) -> &[PlannedLocation] {
        &self.locations
    }

    /// All location ids in seed order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|l| l.id.as_str())
    }

    /// Bounding box over all planned locations (for map display).
    pub fn bounds(&self) -> Option<Bounds> {
        let points: Vec<GeoPoint> = self.locations.iter().map(|l| l.coordinate).collect();
        Bounds::from_points(&points)
    }

    /// Get the number of planned locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Check if the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
