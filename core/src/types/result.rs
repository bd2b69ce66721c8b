use super::context::Measurement;
use super::enums::CriterionType;
use serde::{Deserialize, Serialize};

/// Outcome of evaluating one criterion
///
/// `passed` holds exactly when there is no message, and `is_global` exactly
/// when no specific measurement is implicated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub passed: bool,
    pub is_global: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl RuleResult {
    /// Numbers of the implicated measurements, in violation order
    pub fn measurement_numbers(&self) -> Vec<u32> {
        self.measurements
            .iter()
            .map(|m| m.measurement_number)
            .collect()
    }
}

/// A rule result tagged with the criterion that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub criterion: CriterionType,
    pub result: RuleResult,
}

impl RuleOutcome {
    pub fn new(criterion: CriterionType, result: RuleResult) -> Self {
        Self { criterion, result }
    }

    pub fn passed(&self) -> bool {
        self.result.passed
    }
}
