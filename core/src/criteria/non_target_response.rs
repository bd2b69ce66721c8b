use super::common::generate_response;
use crate::types::{Measurement, MeasurementContext, RuleResult};
use log::debug;

/// Non-targets at baseline must be assessed as "present"
///
/// Both the timepoint type and the response compare case-insensitively.
/// Non-targets at any other timepoint are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NonTargetResponseCriterion;

impl NonTargetResponseCriterion {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, data: &MeasurementContext) -> RuleResult {
        let violations: Vec<Measurement> = data
            .non_targets
            .iter()
            .filter(|entry| entry.timepoint.is_baseline())
            .filter(|entry| {
                !entry
                    .measurement
                    .response
                    .as_deref()
                    .is_some_and(|response| response.eq_ignore_ascii_case("present"))
            })
            .map(|entry| entry.measurement.clone())
            .collect();

        debug!("NonTargetResponse: {} violation(s)", violations.len());

        let message = (!violations.is_empty())
            .then(|| "Non-targets can only be assessed as \"present\"".to_string());
        generate_response(message, violations)
    }
}
