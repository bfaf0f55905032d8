//! Tests for report generation

use fieldtrace::engine::{FieldSession, LocationCatalogue};
use fieldtrace::synthetic::demo_site;
use fieldtrace::{export, GpsFix, MatrixType};

/// A session with one saved water sample and one saved soil sample.
fn session_with_samples() -> FieldSession {
    let (project, locations) = demo_site();
    let mut session = FieldSession::new(project, LocationCatalogue::from_locations(locations));

    session.update_fix(
        GpsFix::new(41.3251, -89.3048)
            .with_accuracy(4.2)
            .with_timestamp(1_738_400_000_000),
    );
    session.set_matrix(Some(MatrixType::Water));
    session.set_description("clear, low turbidity");
    session.set_ph(Some(7.2));
    session.save_sample("Field Technician").unwrap();

    session.update_fix(
        GpsFix::new(41.3255, -89.3045)
            .with_accuracy(5.1)
            .with_timestamp(1_738_400_060_000),
    );
    session.set_matrix(Some(MatrixType::Soil));
    session.set_description("dark fill, slag fragments, moderate odor");
    session.set_depth(Some("0-2 ft".to_string()));
    session.save_sample("Field Technician").unwrap();

    session
}

#[test]
fn test_kml_structure() {
    let session = session_with_samples();
    let kml = export::project_kml(
        session.project(),
        session.catalogue(),
        session.samples().samples(),
    );

    assert!(kml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(kml.contains("<kml xmlns=\"http://www.opengis.net/kml/2.2\">"));

    // One placemark per planned location plus one per sample
    assert_eq!(kml.matches("<Placemark>").count(), 6 + 2);

    // KML coordinates are lng,lat order
    assert!(kml.contains("<coordinates>-89.3048,41.3251,0</coordinates>"));

    // Sample placemark carries the planned-location reference
    assert!(kml.contains("epa-depue-2025-001_1738400000000"));
    assert!(kml.contains("<b>Planned Location:</b> DPU-SW-001"));
    assert!(kml.contains("pH: 7.2"));
}

#[test]
fn test_csv_rows_and_header() {
    let session = session_with_samples();
    let csv = export::samples_csv(session.samples().samples());

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3); // header + 2 samples
    assert!(lines[0].starts_with("id,matrix,latitude,longitude"));
    assert!(lines[1].contains("water"));
    assert!(lines[1].contains("7.2"));
    assert!(lines[2].contains("soil"));
}

#[test]
fn test_csv_quotes_fields_with_commas() {
    let session = session_with_samples();
    let csv = export::samples_csv(session.samples().samples());

    // The soil description contains commas and must be quoted
    assert!(csv.contains("\"dark fill, slag fragments, moderate odor\""));
}

#[test]
fn test_csv_escapes_embedded_quotes() {
    let (project, locations) = demo_site();
    let mut session = FieldSession::new(project, LocationCatalogue::from_locations(locations));
    session.update_fix(GpsFix::new(41.3251, -89.3048).with_timestamp(1));
    session.set_matrix(Some(MatrixType::Soil));
    session.set_description("sample from \"hot spot\" area");
    session.save_sample("Field Technician").unwrap();

    let csv = export::samples_csv(session.samples().samples());
    assert!(csv.contains("\"sample from \"\"hot spot\"\" area\""));
}

#[test]
fn test_json_report_round_trips() {
    let session = session_with_samples();
    let json =
        export::session_report_json(session.project(), session.samples().samples()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["sample_count"], 2);
    assert_eq!(value["project"]["id"], "epa-depue-2025-001");
    assert_eq!(value["samples"][0]["matrix"], "water");
    assert_eq!(value["samples"][0]["planned_location_id"], "DPU-SW-001");
    assert_eq!(value["samples"][1]["status"], "pending");
}
