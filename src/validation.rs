//! Draft-sample validation rules.
//!
//! A fixed set of conjunctive checks mirroring the sampling protocol:
//! required fields first, then matrix-specific measurement rules. All checks
//! are independent predicates, so evaluation order does not matter; every
//! rule is evaluated so that callers can surface the full violation list.

use crate::{GpsFix, MatrixType, SampleDraft, ValidationConfig, ValidationStatus};

/// A single failed validation rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleViolation {
    /// No matrix type selected
    MissingMatrix,
    /// Description is empty or whitespace
    MissingDescription,
    /// No GPS fix has arrived yet
    MissingFix,
    /// Soil temperature outside the acceptable range
    SoilTemperatureOutOfRange { value: f64 },
    /// Water samples require a pH measurement
    MissingPh,
    /// pH outside the acceptable range
    PhOutOfRange { value: f64 },
    /// Air samples require a temperature measurement
    MissingAirTemperature,
    /// Air-sample descriptions must record wind conditions
    MissingWindConditions,
}

/// Evaluate every validation rule against a draft and return the violations.
///
/// An empty result means the draft may be saved. Bounds are inclusive: a
/// soil temperature of exactly -5 or 40 °C passes, as does a pH of exactly
/// 0 or 14.
pub fn check_draft(
    draft: &SampleDraft,
    fix: Option<&GpsFix>,
    config: &ValidationConfig,
) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    if draft.matrix.is_none() {
        violations.push(RuleViolation::MissingMatrix);
    }
    if draft.description.trim().is_empty() {
        violations.push(RuleViolation::MissingDescription);
    }
    if fix.is_none() {
        violations.push(RuleViolation::MissingFix);
    }

    let measurements = &draft.measurements;
    match draft.matrix {
        Some(MatrixType::Soil) => {
            // Temperature is optional for soil; the range only applies when recorded
            if let Some(temp) = measurements.temperature {
                if temp < config.soil_temp_min || temp > config.soil_temp_max {
                    violations.push(RuleViolation::SoilTemperatureOutOfRange { value: temp });
                }
            }
        }
        Some(MatrixType::Water) => match measurements.ph {
            None => violations.push(RuleViolation::MissingPh),
            Some(ph) if ph < config.ph_min || ph > config.ph_max => {
                violations.push(RuleViolation::PhOutOfRange { value: ph });
            }
            Some(_) => {}
        },
        Some(MatrixType::Air) => {
            if measurements.temperature.is_none() {
                violations.push(RuleViolation::MissingAirTemperature);
            }
            if !mentions_wind(&draft.description, config) {
                violations.push(RuleViolation::MissingWindConditions);
            }
        }
        Some(MatrixType::Sediment) | None => {}
    }

    violations
}

/// Decide whether a draft is valid enough to save.
///
/// Returns `Valid` or `Invalid`; the session layer reports `Pending` until
/// the first edit or fix event has been processed.
pub fn validate_draft(
    draft: &SampleDraft,
    fix: Option<&GpsFix>,
    config: &ValidationConfig,
) -> ValidationStatus {
    if check_draft(draft, fix, config).is_empty() {
        ValidationStatus::Valid
    } else {
        ValidationStatus::Invalid
    }
}

/// Case-insensitive substring search for any configured wind term.
fn mentions_wind(description: &str, config: &ValidationConfig) -> bool {
    let lower = description.to_lowercase();
    config
        .wind_terms
        .iter()
        .any(|term| lower.contains(&term.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationConfig;

    fn draft_with_description(description: &str) -> SampleDraft {
        SampleDraft {
            description: description.to_string(),
            ..SampleDraft::default()
        }
    }

    #[test]
    fn test_mentions_wind_case_insensitive() {
        let config = ValidationConfig::default();
        assert!(mentions_wind("Wind from the northwest", &config));
        assert!(mentions_wind("very WINDY conditions", &config));
        assert!(!mentions_wind("sunny day", &config));
    }

    #[test]
    fn test_mentions_wind_custom_terms() {
        let config = ValidationConfig {
            wind_terms: vec!["breeze".to_string(), "gust".to_string()],
            ..ValidationConfig::default()
        };
        assert!(mentions_wind("light breeze from the south", &config));
        assert!(mentions_wind("gusting to 30 km/h", &config));
        // "wind" is no longer in the configured terms
        assert!(!mentions_wind("windy", &config));
    }

    #[test]
    fn test_whitespace_description_is_missing() {
        let violations = check_draft(
            &draft_with_description("   "),
            None,
            &ValidationConfig::default(),
        );
        assert!(violations.contains(&RuleViolation::MissingDescription));
    }
}
