//! Tests for the sample store and lifecycle state machine

use fieldtrace::engine::SampleStore;
use fieldtrace::{
    FieldSample, FieldTraceError, GpsFix, MatrixType, Measurements, SampleStatus,
};

fn sample(id: &str, matrix: MatrixType, planned: Option<&str>) -> FieldSample {
    FieldSample {
        id: id.to_string(),
        project_id: "proj-1".to_string(),
        matrix,
        location: GpsFix::new(41.3251, -89.3048).with_accuracy(5.0),
        depth: None,
        description: "test sample".to_string(),
        measurements: Measurements::default(),
        notes: String::new(),
        timestamp_ms: Some(1_738_400_000_000),
        technician: "Field Technician".to_string(),
        status: SampleStatus::Pending,
        planned_location_id: planned.map(String::from),
    }
}

#[test]
fn test_append_and_get() {
    let mut store = SampleStore::new();
    store.append(sample("s-1", MatrixType::Soil, None)).unwrap();
    store
        .append(sample("s-2", MatrixType::Water, Some("DPU-GW-001")))
        .unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("s-1").unwrap().matrix, MatrixType::Soil);
    assert!(store.get("s-3").is_none());
}

#[test]
fn test_insertion_order_preserved() {
    let mut store = SampleStore::new();
    for i in 0..5 {
        store
            .append(sample(&format!("s-{}", i), MatrixType::Soil, None))
            .unwrap();
    }
    let ids: Vec<&str> = store.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s-0", "s-1", "s-2", "s-3", "s-4"]);
}

#[test]
fn test_duplicate_id_rejected() {
    let mut store = SampleStore::new();
    store.append(sample("s-1", MatrixType::Soil, None)).unwrap();

    let err = store
        .append(sample("s-1", MatrixType::Water, None))
        .unwrap_err();
    assert!(matches!(
        err,
        FieldTraceError::DuplicateSample { sample_id } if sample_id == "s-1"
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_advance_status_legal_chain() {
    let mut store = SampleStore::new();
    store.append(sample("s-1", MatrixType::Soil, None)).unwrap();

    store
        .advance_status("s-1", SampleStatus::Validated)
        .unwrap();
    assert_eq!(store.get("s-1").unwrap().status, SampleStatus::Validated);

    store.advance_status("s-1", SampleStatus::Uploaded).unwrap();
    assert_eq!(store.get("s-1").unwrap().status, SampleStatus::Uploaded);
}

#[test]
fn test_advance_status_illegal_transitions() {
    let mut store = SampleStore::new();
    store.append(sample("s-1", MatrixType::Soil, None)).unwrap();

    // Skipping validated is not allowed
    let err = store
        .advance_status("s-1", SampleStatus::Uploaded)
        .unwrap_err();
    assert!(matches!(err, FieldTraceError::IllegalTransition { .. }));

    // Uploaded is terminal
    store
        .advance_status("s-1", SampleStatus::Validated)
        .unwrap();
    store.advance_status("s-1", SampleStatus::Uploaded).unwrap();
    for to in [SampleStatus::Pending, SampleStatus::Validated] {
        assert!(store.advance_status("s-1", to).is_err());
    }
}

#[test]
fn test_advance_status_unknown_sample() {
    let mut store = SampleStore::new();
    let err = store
        .advance_status("missing", SampleStatus::Validated)
        .unwrap_err();
    assert!(matches!(
        err,
        FieldTraceError::UnknownSample { sample_id } if sample_id == "missing"
    ));
}

#[test]
fn test_queries() {
    let mut store = SampleStore::new();
    store
        .append(sample("s-1", MatrixType::Soil, Some("DPU-SW-001")))
        .unwrap();
    store
        .append(sample("s-2", MatrixType::Water, Some("DPU-GW-001")))
        .unwrap();
    store
        .append(sample("s-3", MatrixType::Soil, Some("DPU-SW-001")))
        .unwrap();

    assert_eq!(store.by_matrix(MatrixType::Soil).len(), 2);
    assert_eq!(store.by_matrix(MatrixType::Air).len(), 0);
    assert_eq!(store.for_planned_location("DPU-SW-001").len(), 2);
    assert_eq!(store.count_by_status(SampleStatus::Pending), 3);

    store
        .advance_status("s-2", SampleStatus::Validated)
        .unwrap();
    assert_eq!(store.count_by_status(SampleStatus::Pending), 2);
    assert_eq!(store.count_by_status(SampleStatus::Validated), 1);
}
