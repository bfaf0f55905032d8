//! Tests for error module

use fieldtrace::error::{FieldTraceError, OptionExt};
use fieldtrace::ValidationStatus;

#[test]
fn test_error_display() {
    let err = FieldTraceError::DraftRejected {
        status: ValidationStatus::Invalid,
    };
    assert!(err.to_string().contains("Invalid"));

    let err = FieldTraceError::UnknownLocation {
        location_id: "DPU-XX-999".to_string(),
    };
    assert!(err.to_string().contains("DPU-XX-999"));
}

#[test]
fn test_option_ext() {
    let none: Option<i32> = None;
    assert!(matches!(
        none.ok_or_missing_fix(),
        Err(FieldTraceError::MissingFix)
    ));

    let none: Option<i32> = None;
    assert!(matches!(
        none.ok_or_unknown_location("DPU-SW-001"),
        Err(FieldTraceError::UnknownLocation { .. })
    ));

    let none: Option<i32> = None;
    assert!(matches!(
        none.ok_or_unknown_sample("s-1"),
        Err(FieldTraceError::UnknownSample { .. })
    ));

    assert_eq!(Some(7).ok_or_missing_fix().unwrap(), 7);
}
