//! Tests for the catalogue spatial index

use fieldtrace::engine::{CatalogueIndex, LocationCatalogue};
use fieldtrace::synthetic::demo_site;
use fieldtrace::Bounds;

fn demo_index() -> (LocationCatalogue, CatalogueIndex) {
    let (_, locations) = demo_site();
    let catalogue = LocationCatalogue::from_locations(locations);
    let index = CatalogueIndex::build(&catalogue);
    (catalogue, index)
}

#[test]
fn test_index_size() {
    let (catalogue, index) = demo_index();
    assert_eq!(index.len(), catalogue.len());
    assert!(!index.is_empty());
}

#[test]
fn test_empty_catalogue() {
    let index = CatalogueIndex::build(&LocationCatalogue::new());
    assert!(index.is_empty());
    assert!(index
        .query_viewport_raw(41.0, 42.0, -90.0, -89.0)
        .is_empty());
}

#[test]
fn test_viewport_covering_site() {
    let (_, index) = demo_index();
    let ids = index.query_viewport(&Bounds {
        min_lat: 41.32,
        max_lat: 41.33,
        min_lng: -89.31,
        max_lng: -89.30,
    });
    assert_eq!(ids.len(), 6);
}

#[test]
fn test_viewport_exact_membership() {
    let (catalogue, index) = demo_index();

    // Southern half of the site
    let viewport = Bounds {
        min_lat: 41.32,
        max_lat: 41.3252,
        min_lng: -89.31,
        max_lng: -89.30,
    };
    let ids = index.query_viewport(&viewport);

    for location in catalogue.locations() {
        let inside = viewport.contains(&location.coordinate);
        assert_eq!(
            ids.contains(&location.id),
            inside,
            "membership mismatch for {}",
            location.id
        );
    }
}

#[test]
fn test_find_nearby_degrees() {
    let (_, index) = demo_index();

    // ~0.0002 degrees around DPU-SW-001 catches only that point
    let ids = index.find_nearby(41.3251, -89.3048, 0.0002);
    assert_eq!(ids, vec!["DPU-SW-001".to_string()]);

    // A wide radius catches the whole site
    let ids = index.find_nearby(41.3251, -89.3048, 0.01);
    assert_eq!(ids.len(), 6);
}
