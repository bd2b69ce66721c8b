use super::enums::TimepointKind;
use super::result::RuleOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate of the rule outcomes of one evaluation run
///
/// Outcomes keep configuration order; the order carries no meaning beyond
/// presentation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConformanceReport {
    /// Name of the criteria set the rules came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<String>,

    /// Timepoint the criteria set was selected for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timepoint: Option<TimepointKind>,

    pub outcomes: Vec<RuleOutcome>,
}

impl ConformanceReport {
    pub fn new(outcomes: Vec<RuleOutcome>) -> Self {
        Self {
            criteria: None,
            timepoint: None,
            outcomes,
        }
    }

    /// Builder: Label the report with its criteria set
    pub fn with_criteria(mut self, name: impl Into<String>, timepoint: TimepointKind) -> Self {
        self.criteria = Some(name.into());
        self.timepoint = Some(timepoint);
        self
    }

    /// True when every retained rule passed
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(RuleOutcome::passed)
    }

    /// Outcomes of rules that did not pass
    pub fn nonconformities(&self) -> Vec<&RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.passed()).collect()
    }

    /// Failed outcomes that implicate the study as a whole
    pub fn global_nonconformities(&self) -> Vec<&RuleOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed() && o.result.is_global)
            .collect()
    }

    /// Messages implicating each measurement, keyed by measurement number
    ///
    /// A message is listed once per measurement even when the rule
    /// implicated the same measurement more than once.
    pub fn nonconformities_by_measurement(&self) -> BTreeMap<u32, Vec<String>> {
        let mut grouped: BTreeMap<u32, Vec<String>> = BTreeMap::new();

        for outcome in self.nonconformities() {
            let message = outcome.result.message.clone().unwrap_or_default();
            for measurement in &outcome.result.measurements {
                let messages = grouped.entry(measurement.measurement_number).or_default();
                if !messages.contains(&message) {
                    messages.push(message.clone());
                }
            }
        }

        grouped
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
