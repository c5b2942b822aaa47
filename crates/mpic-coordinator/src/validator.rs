use mpic_types::{MpicRequestValidationError, OrchestrationParameters, RequestValidationIssue};

fn is_requested_perspective_count_valid(count: u32, available_perspectives: usize) -> bool {
    (2..=available_perspectives as u32).contains(&count)
}

/// Validate `quorum_count` against an already-valid `perspective_count`, per
/// the exact boundary the reference implementation enforces:
///
/// `perspective_count − 1 ≤ quorum_count ≤ perspective_count ≤ 5`, OR
/// `4 ≤ perspective_count − 2 ≤ quorum_count ≤ perspective_count`.
fn is_quorum_count_valid(quorum_count: u32, perspective_count: u32) -> bool {
    let low_regime = perspective_count <= 5
        && perspective_count.saturating_sub(1) <= quorum_count
        && quorum_count <= perspective_count;
    let high_regime = perspective_count >= 6
        && perspective_count.saturating_sub(2) <= quorum_count
        && quorum_count <= perspective_count;
    low_regime || high_regime
}

/// Pure structural validation of an `MpicRequest`'s orchestration
/// parameters, independent of check-type-specific fields.
pub fn validate_orchestration_parameters(
    params: &OrchestrationParameters,
    available_perspectives: usize,
) -> std::result::Result<(), MpicRequestValidationError> {
    let mut issues = Vec::new();

    let perspective_count_valid = match params.perspective_count {
        Some(count) => {
            let valid = is_requested_perspective_count_valid(count, available_perspectives);
            if !valid {
                issues.push(RequestValidationIssue::new(
                    "invalid_perspective_count",
                    format!(
                        "perspective_count {count} must be between 2 and {available_perspectives}"
                    ),
                ));
            }
            valid
        }
        None => true,
    };

    if let (Some(quorum_count), Some(perspective_count)) =
        (params.quorum_count, params.perspective_count)
    {
        if perspective_count_valid && !is_quorum_count_valid(quorum_count, perspective_count) {
            issues.push(RequestValidationIssue::new(
                "invalid_quorum_count",
                format!("quorum_count {quorum_count} is not valid for perspective_count {perspective_count}"),
            ));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(MpicRequestValidationError::new(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // UNIT TESTS
    // ---------------------------------------------------------------

    #[test]
    fn accepts_absent_orchestration_parameters() {
        let params = OrchestrationParameters::default();
        assert!(validate_orchestration_parameters(&params, 10).is_ok());
    }

    #[test]
    fn rejects_perspective_count_below_two() {
        let params = OrchestrationParameters {
            perspective_count: Some(1),
            ..Default::default()
        };
        assert!(validate_orchestration_parameters(&params, 10).is_err());
    }

    #[test]
    fn rejects_perspective_count_above_available() {
        let params = OrchestrationParameters {
            perspective_count: Some(11),
            ..Default::default()
        };
        assert!(validate_orchestration_parameters(&params, 10).is_err());
    }

    #[test]
    fn accepts_quorum_count_one_below_small_perspective_count() {
        let params = OrchestrationParameters {
            perspective_count: Some(3),
            quorum_count: Some(2),
            ..Default::default()
        };
        assert!(validate_orchestration_parameters(&params, 10).is_ok());
    }

    #[test]
    fn rejects_quorum_count_two_below_small_perspective_count() {
        let params = OrchestrationParameters {
            perspective_count: Some(3),
            quorum_count: Some(1),
            ..Default::default()
        };
        assert!(validate_orchestration_parameters(&params, 10).is_err());
    }

    #[test]
    fn accepts_quorum_count_two_below_large_perspective_count() {
        let params = OrchestrationParameters {
            perspective_count: Some(6),
            quorum_count: Some(4),
            ..Default::default()
        };
        assert!(validate_orchestration_parameters(&params, 10).is_ok());
    }

    #[test]
    fn rejects_quorum_count_three_below_large_perspective_count() {
        let params = OrchestrationParameters {
            perspective_count: Some(6),
            quorum_count: Some(3),
            ..Default::default()
        };
        assert!(validate_orchestration_parameters(&params, 10).is_err());
    }

    #[test]
    fn rejects_quorum_count_exceeding_perspective_count() {
        let params = OrchestrationParameters {
            perspective_count: Some(5),
            quorum_count: Some(10),
            ..Default::default()
        };
        assert!(validate_orchestration_parameters(&params, 10).is_err());
    }
}
