use super::common::{
    deserialize_count, generate_response, new_target_numbers, passes_exclusion, passes_inclusion,
};
use crate::types::{MeasurementContext, RuleResult};
use log::debug;
use serde::Deserialize;

/// Options of [`MaxTargetsCriterion`]
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxTargetsOptions {
    #[serde(deserialize_with = "deserialize_count")]
    pub limit: usize,
    #[serde(default)]
    pub new_target: bool,
    #[serde(default)]
    pub location_in: Option<Vec<String>>,
    #[serde(default)]
    pub location_not_in: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Limits the number of targets in the study
///
/// Split lesions never count. With `newTarget` only targets first seen at
/// follow-up count; the location lists narrow the count further. Each
/// counted entry adds one, so a lesion measured at several timepoints
/// counts once per timepoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxTargetsCriterion {
    options: MaxTargetsOptions,
}

impl MaxTargetsCriterion {
    pub fn new(options: MaxTargetsOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MaxTargetsOptions {
        &self.options
    }

    pub fn evaluate(&self, data: &MeasurementContext) -> RuleResult {
        let options = &self.options;
        let new_targets = new_target_numbers(data, options.new_target);

        let counted: Vec<u32> = data
            .targets
            .iter()
            .filter(|entry| !entry.measurement.is_split_lesion)
            .filter(|entry| {
                !options.new_target || new_targets.contains(&entry.measurement.measurement_number)
            })
            .filter(|entry| passes_inclusion(options.location_in.as_ref(), &entry.measurement.location))
            .filter(|entry| {
                passes_exclusion(options.location_not_in.as_ref(), &entry.measurement.location)
            })
            .map(|entry| entry.measurement.measurement_number)
            .collect();

        debug!(
            "MaxTargets: {} counted target(s), limit {}",
            counted.len(),
            options.limit
        );

        let message = (counted.len() > options.limit).then(|| {
            options
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| default_message(options.limit, options.new_target))
        });

        generate_response(message, Vec::new())
    }
}

fn default_message(limit: usize, new_target: bool) -> String {
    let amount = if limit == 0 {
        String::new()
    } else {
        format!(" more than {}", limit)
    };
    let new = if new_target { " new" } else { "" };
    let plural = if limit == 1 { "" } else { "s" };

    format!("The study should not have{}{} target{}.", amount, new, plural)
}
