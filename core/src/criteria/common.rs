//! Helpers shared by every criterion

use crate::types::{Measurement, MeasurementContext, RuleResult};
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Number;
use std::collections::BTreeSet;

/// Builds a rule result from an optional violation message
///
/// The rule fails exactly when a non-empty message is supplied; it is global
/// when no measurement is implicated.
pub fn generate_response(message: Option<String>, measurements: Vec<Measurement>) -> RuleResult {
    let message = message.filter(|m| !m.is_empty());

    RuleResult {
        passed: message.is_none(),
        is_global: measurements.is_empty(),
        message,
        measurements,
    }
}

/// Measurement numbers of targets that first appear at follow-up
///
/// Returns an empty set unless `new_target` is requested, so callers must
/// only consult it when their options ask for new targets.
pub fn new_target_numbers(data: &MeasurementContext, new_target: bool) -> BTreeSet<u32> {
    if !new_target {
        return BTreeSet::new();
    }

    let baseline: BTreeSet<u32> = data
        .targets
        .iter()
        .filter(|entry| entry.timepoint.is_baseline())
        .map(|entry| entry.measurement.measurement_number)
        .collect();

    data.targets
        .iter()
        .filter(|entry| entry.timepoint.is_followup())
        .map(|entry| entry.measurement.measurement_number)
        .filter(|number| !baseline.contains(number))
        .collect()
}

/// Membership test of an optional inclusion list
pub(crate) fn passes_inclusion(list: Option<&Vec<String>>, value: &str) -> bool {
    list.map_or(true, |values| values.iter().any(|v| v == value))
}

/// Membership test of an optional exclusion list
pub(crate) fn passes_exclusion(list: Option<&Vec<String>>, value: &str) -> bool {
    list.map_or(true, |values| !values.iter().any(|v| v == value))
}

/// Deserializes a count option, accepting whole numbers written as floats
pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u64::MAX as f64)
                .map(|n| n as u64)
        })
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| de::Error::custom(format!("expected a non-negative integer, got {}", number)))
}

/// Case-insensitive membership of a modality code
pub(crate) fn contains_modality(modalities: &[String], modality: &str) -> bool {
    modalities.iter().any(|m| m.eq_ignore_ascii_case(modality))
}
