use super::common::{deserialize_count, generate_response, new_target_numbers};
use crate::types::{Measurement, MeasurementContext, RuleResult};
use log::debug;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};

/// Options of [`MaxTargetsPerOrganCriterion`]
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxTargetsPerOrganOptions {
    #[serde(deserialize_with = "deserialize_count")]
    pub limit: usize,
    #[serde(default)]
    pub new_target: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Limits the number of targets per organ
///
/// Split lesions never count. With `newTarget`, targets already present at
/// baseline are left out of the organ count, but once the organ's new
/// targets exceed the limit every later target of that organ is reported,
/// existing ones included.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxTargetsPerOrganCriterion {
    options: MaxTargetsPerOrganOptions,
}

impl MaxTargetsPerOrganCriterion {
    pub fn new(options: MaxTargetsPerOrganOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MaxTargetsPerOrganOptions {
        &self.options
    }

    pub fn evaluate(&self, data: &MeasurementContext) -> RuleResult {
        let options = &self.options;
        let new_targets = new_target_numbers(data, options.new_target);
        let mut organs: HashMap<&str, BTreeSet<u32>> = HashMap::new();
        let mut violations: Vec<Measurement> = Vec::new();

        for entry in data.targets.iter().filter(|e| !e.measurement.is_split_lesion) {
            let number = entry.measurement.measurement_number;
            let numbers = organs.entry(entry.measurement.location.as_str()).or_default();
            if !options.new_target || new_targets.contains(&number) {
                numbers.insert(number);
            }

            if numbers.len() > options.limit {
                violations.push(entry.measurement.clone());
            }
        }

        debug!(
            "MaxTargetsPerOrgan: {} organ(s), {} violation(s)",
            organs.len(),
            violations.len()
        );

        let message = (!violations.is_empty()).then(|| {
            options.message.clone().filter(|m| !m.is_empty()).unwrap_or_else(|| {
                let new = if options.new_target { " new" } else { "" };
                format!(
                    "Each organ should not have more than {}{} targets.",
                    options.limit, new
                )
            })
        });

        generate_response(message, violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::common::fixtures::*;

    fn criterion(limit: usize, new_target: bool) -> MaxTargetsPerOrganCriterion {
        MaxTargetsPerOrganCriterion::new(MaxTargetsPerOrganOptions {
            limit,
            new_target,
            message: None,
        })
    }

    #[test]
    fn test_third_liver_target_violates() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(baseline(2, "liver"))
            .with_target(baseline(3, "liver"));

        let result = criterion(2, false).evaluate(&data);
        assert!(!result.passed);
        assert!(!result.is_global);
        assert_eq!(result.measurement_numbers(), vec![3]);
        assert_eq!(
            result.message.as_deref(),
            Some("Each organ should not have more than 2 targets.")
        );
    }

    #[test]
    fn test_split_lesions_never_count() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(split(baseline(2, "liver")))
            .with_target(split(baseline(3, "liver")));
        assert!(criterion(1, false).evaluate(&data).passed);
    }

    #[test]
    fn test_existing_targets_do_not_count_for_new_target_limit() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(followup(1, "liver"))
            .with_target(followup(2, "liver"));

        assert!(criterion(1, true).evaluate(&data).passed);
        assert!(!criterion(1, false).evaluate(&data).passed);
    }

    #[test]
    fn test_new_targets_alone_breach_limit() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(followup(1, "liver"))
            .with_target(followup(2, "liver"))
            .with_target(followup(3, "liver"));

        let result = criterion(1, true).evaluate(&data);
        assert!(!result.passed);
        assert_eq!(result.measurement_numbers(), vec![3]);
        assert_eq!(
            result.message.as_deref(),
            Some("Each organ should not have more than 1 new targets.")
        );
    }

    #[test]
    fn test_existing_target_reported_once_organ_overflows() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(followup(2, "liver"))
            .with_target(followup(3, "liver"))
            .with_target(followup(1, "liver"));

        let result = criterion(1, true).evaluate(&data);
        assert!(!result.passed);
        assert_eq!(result.measurement_numbers(), vec![3, 1]);
    }

    #[test]
    fn test_existing_target_before_overflow_not_reported() {
        let data = MeasurementContext::new()
            .with_target(baseline(1, "liver"))
            .with_target(followup(1, "liver"))
            .with_target(followup(2, "liver"))
            .with_target(followup(3, "liver"));

        assert_eq!(criterion(1, true).evaluate(&data).measurement_numbers(), vec![3]);
    }

    #[test]
    fn test_empty_message_falls_back_to_default() {
        let criterion = MaxTargetsPerOrganCriterion::new(MaxTargetsPerOrganOptions {
            limit: 1,
            new_target: false,
            message: Some(String::new()),
        });
        let data = MeasurementContext::new()
            .with_target(baseline(1, "lung"))
            .with_target(baseline(2, "lung"));

        let result = criterion.evaluate(&data);
        assert!(!result.passed);
        assert_eq!(
            result.message.as_deref(),
            Some("Each organ should not have more than 1 targets.")
        );
    }

    #[test]
    fn test_message_override() {
        let criterion = MaxTargetsPerOrganCriterion::new(MaxTargetsPerOrganOptions {
            limit: 1,
            new_target: false,
            message: Some("Only one target per organ".to_string()),
        });
        let data = MeasurementContext::new()
            .with_target(baseline(1, "lung"))
            .with_target(baseline(2, "lung"));

        let result = criterion.evaluate(&data);
        assert_eq!(result.message.as_deref(), Some("Only one target per organ"));
        assert_eq!(result.measurement_numbers(), vec![2]);
    }
}
