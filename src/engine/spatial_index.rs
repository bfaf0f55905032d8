//! Spatial indexing for map-viewport queries over the catalogue.
//!
//! Uses an R-tree of planned-location coordinates. The proximity matcher
//! does not use this index (a linear scan is cheaper at catalogue scale);
//! it exists for viewport filtering when rendering the site map.

use rstar::{RTree, RTreeObject, AABB};

use crate::Bounds;

use super::catalogue::LocationCatalogue;

/// Planned-location point wrapper for R-tree indexing.
#[derive(Debug, Clone)]
pub struct LocationEntry {
    pub location_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl RTreeObject for LocationEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.longitude, self.latitude])
    }
}

/// Spatial index over the planned-location catalogue.
///
/// The catalogue never mutates at runtime, so the index is built once from
/// the seeded catalogue.
#[derive(Debug)]
pub struct CatalogueIndex {
    tree: RTree<LocationEntry>,
}

impl CatalogueIndex {
    /// Build the index from a catalogue.
    pub fn build(catalogue: &LocationCatalogue) -> Self {
        let entries: Vec<LocationEntry> = catalogue
            .locations()
            .iter()
            .map(|location| LocationEntry {
                location_id: location.id.clone(),
                latitude: location.coordinate.latitude,
                longitude: location.coordinate.longitude,
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Query planned locations within a viewport.
    pub fn query_viewport(&self, bounds: &Bounds) -> Vec<String> {
        let search_bounds = AABB::from_corners(
            [bounds.min_lng, bounds.min_lat],
            [bounds.max_lng, bounds.max_lat],
        );

        self.tree
            .locate_in_envelope(&search_bounds)
            .map(|entry| entry.location_id.clone())
            .collect()
    }

    /// Query planned locations within raw coordinate bounds.
    pub fn query_viewport_raw(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lng: f64,
        max_lng: f64,
    ) -> Vec<String> {
        self.query_viewport(&Bounds {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Find planned locations near a point, in degrees.
    pub fn find_nearby(&self, lat: f64, lng: f64, radius_degrees: f64) -> Vec<String> {
        self.query_viewport_raw(
            lat - radius_degrees,
            lat + radius_degrees,
            lng - radius_degrees,
            lng + radius_degrees,
        )
    }

    /// Get the number of indexed locations.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
