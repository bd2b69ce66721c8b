use super::common::{deserialize_count, generate_response};
use crate::types::{Measurement, MeasurementContext, RuleResult};
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

/// Options of [`MaxTargetPerOrganCriterion`]
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxTargetPerOrganOptions {
    #[serde(deserialize_with = "deserialize_count")]
    pub limit: usize,
}

/// Legacy per-organ target limit
///
/// Every target is counted, split lesions included, and the message is
/// fixed. Each target seen while its organ is over the limit is reported,
/// so a measurement number repeated past the limit is listed once per entry.
/// Superseded by [`MaxTargetsPerOrganCriterion`](super::MaxTargetsPerOrganCriterion).
#[derive(Debug, Clone, PartialEq)]
pub struct MaxTargetPerOrganCriterion {
    options: MaxTargetPerOrganOptions,
}

impl MaxTargetPerOrganCriterion {
    pub fn new(options: MaxTargetPerOrganOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MaxTargetPerOrganOptions {
        &self.options
    }

    pub fn evaluate(&self, data: &MeasurementContext) -> RuleResult {
        let limit = self.options.limit;
        let mut organs: HashMap<&str, BTreeSet<u32>> = HashMap::new();
        let mut violations: Vec<Measurement> = Vec::new();

        for entry in &data.targets {
            let numbers = organs.entry(entry.measurement.location.as_str()).or_default();
            numbers.insert(entry.measurement.measurement_number);

            if numbers.len() > limit {
                violations.push(entry.measurement.clone());
            }
        }

        debug!(
            "MaxTargetPerOrgan: {} organ(s), {} violation(s)",
            organs.len(),
            violations.len()
        );

        let message = (!violations.is_empty())
            .then(|| format!("Each organ should not have more than {} targets.", limit));

        generate_response(message, violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::common::fixtures::*;

    fn criterion(limit: usize) -> MaxTargetPerOrganCriterion {
        MaxTargetPerOrganCriterion::new(MaxTargetPerOrganOptions { limit })
    }

    #[test]
    fn test_third_liver_target_violates() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(baseline(2, "liver"))
            .with_target(baseline(3, "liver"));

        let result = criterion(2).evaluate(&data);
        assert!(!result.passed);
        assert!(!result.is_global);
        assert_eq!(result.measurement_numbers(), vec![3]);
        assert_eq!(
            result.message.as_deref(),
            Some("Each organ should not have more than 2 targets.")
        );
    }

    #[test]
    fn test_organs_counted_independently() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(baseline(2, "liver"))
            .with_target(baseline(3, "lung"))
            .with_target(baseline(4, "lung"));
        assert!(criterion(2).evaluate(&data).passed);
    }

    #[test]
    fn test_same_number_counts_once_per_organ() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(followup(1, "liver"));
        assert!(criterion(1).evaluate(&data).passed);
    }

    #[test]
    fn test_every_entry_past_limit_is_listed() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(baseline(2, "liver"))
            .with_target(followup(2, "liver"))
            .with_target(baseline(3, "liver"));

        let result = criterion(1).evaluate(&data);
        assert_eq!(result.measurement_numbers(), vec![2, 2, 3]);
    }

    #[test]
    fn test_split_lesions_are_counted() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(split(baseline(2, "liver")));
        assert!(!criterion(1).evaluate(&data).passed);
    }
}
