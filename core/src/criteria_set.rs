use crate::criteria::Criterion;
use crate::error::{ConformanceError, Result};
use crate::evaluator::CriteriaEvaluator;
use crate::types::{
    ConformanceReport, EvaluatorConfig, MeasurementContext, RuleConfiguration, TimepointKind,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const RECIST_JSON: &str = include_str!("../presets/recist.json");
const IRRC_JSON: &str = include_str!("../presets/irrc.json");

/// Criteria sets shipped with the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinCriteria {
    /// RECIST 1.1
    Recist,
    /// Immune-related response criteria
    Irrc,
}

impl BuiltinCriteria {
    pub fn simple_name(&self) -> &'static str {
        match self {
            BuiltinCriteria::Recist => "recist",
            BuiltinCriteria::Irrc => "irrc",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            BuiltinCriteria::Recist => RECIST_JSON,
            BuiltinCriteria::Irrc => IRRC_JSON,
        }
    }
}

impl fmt::Display for BuiltinCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Named group of rule configurations per timepoint
///
/// Rules in `both` apply at every timepoint and run before the rules of the
/// timepoint's own section.
///
/// # Example
///
/// ```
/// use conformance_core::{BuiltinCriteria, CriteriaSet, TimepointKind};
///
/// let recist = CriteriaSet::builtin(BuiltinCriteria::Recist).unwrap();
/// assert_eq!(recist.name, "RECIST 1.1");
///
/// let baseline = recist.configurations_for(TimepointKind::Baseline);
/// assert_eq!(baseline.len(), recist.both.len() + recist.baseline.len());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CriteriaSet {
    pub name: String,
    #[serde(default)]
    pub both: Vec<RuleConfiguration>,
    #[serde(default)]
    pub baseline: Vec<RuleConfiguration>,
    #[serde(default)]
    pub followup: Vec<RuleConfiguration>,
}

impl CriteriaSet {
    /// Parses a criteria set document
    ///
    /// Parsing does not validate rule options; see [`CriteriaSet::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a criteria set document from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads one of the built-in criteria sets
    pub fn builtin(builtin: BuiltinCriteria) -> Result<Self> {
        Self::from_json(builtin.source())
    }

    /// Rule configurations evaluated at a timepoint
    pub fn configurations_for(&self, timepoint: TimepointKind) -> Vec<RuleConfiguration> {
        let section = match timepoint {
            TimepointKind::Baseline => &self.baseline,
            TimepointKind::Followup => &self.followup,
        };
        self.both.iter().chain(section).cloned().collect()
    }

    /// Builds a validated evaluator for a timepoint
    ///
    /// Error indices refer to the combined list of `both` and the
    /// timepoint's section.
    pub fn evaluator_for(
        &self,
        timepoint: TimepointKind,
        config: EvaluatorConfig,
    ) -> Result<CriteriaEvaluator> {
        debug!("Building '{}' evaluator for {}", self.name, timepoint);
        CriteriaEvaluator::with_config(self.configurations_for(timepoint), config)
    }

    /// Evaluates the rules of a timepoint and labels the report with the set
    pub fn evaluate(
        &self,
        timepoint: TimepointKind,
        data: &MeasurementContext,
        config: EvaluatorConfig,
    ) -> Result<ConformanceReport> {
        let report = self.evaluator_for(timepoint, config)?.evaluate(data)?;
        Ok(report.with_criteria(self.name.clone(), timepoint))
    }

    /// Validates every configuration of every section
    ///
    /// Configuration errors name the section, e.g. `baseline.MaxTargets`,
    /// with the index inside that section.
    pub fn validate(&self) -> Result<()> {
        let sections = [
            ("both", &self.both),
            ("baseline", &self.baseline),
            ("followup", &self.followup),
        ];

        for (section, configurations) in sections {
            for (index, configuration) in configurations.iter().enumerate() {
                Criterion::from_configuration(configuration, index).map_err(|e| match e {
                    ConformanceError::Configuration {
                        criterion,
                        index,
                        reason,
                    } => ConformanceError::Configuration {
                        criterion: format!("{}.{}", section, criterion),
                        index,
                        reason,
                    },
                    other => other,
                })?;
            }
        }

        Ok(())
    }

    /// Total number of configured rules across sections
    pub fn len(&self) -> usize {
        self.both.len() + self.baseline.len() + self.followup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::common::fixtures::*;
    use crate::types::CriterionType;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    #[case(BuiltinCriteria::Recist, "RECIST 1.1")]
    #[case(BuiltinCriteria::Irrc, "irRC")]
    fn test_builtins_are_valid(#[case] builtin: BuiltinCriteria, #[case] name: &str) {
        let set = CriteriaSet::builtin(builtin).unwrap();
        assert_eq!(set.name, name);
        assert!(!set.is_empty());
        set.validate().unwrap();
        set.evaluator_for(TimepointKind::Baseline, EvaluatorConfig::default())
            .unwrap();
        set.evaluator_for(TimepointKind::Followup, EvaluatorConfig::default())
            .unwrap();
    }

    #[test]
    fn test_both_section_runs_first() {
        let set = CriteriaSet::from_json(
            r#"{
                "name": "test",
                "both": [ { "type": "NonTargetResponse" } ],
                "baseline": [ { "type": "MaxTargets", "options": { "limit": 1 } } ],
                "followup": [ { "type": "Modality", "options": { "method": "deny", "modalities": ["US"] } } ]
            }"#,
        )
        .unwrap();

        let followup: Vec<String> = set
            .configurations_for(TimepointKind::Followup)
            .into_iter()
            .map(|c| c.criterion_type)
            .collect();
        assert_eq!(followup, vec!["NonTargetResponse", "Modality"]);
    }

    #[test]
    fn test_validate_names_section() {
        let set = CriteriaSet::from_json(
            r#"{ "name": "broken", "followup": [ { "type": "MaxTargets", "options": {} } ] }"#,
        )
        .unwrap();

        let err = set.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Invalid configuration for followup.MaxTargets (rule 0): "limit" is a required property"#
        );
    }

    #[test]
    fn test_validate_unknown_type() {
        let set = CriteriaSet::from_json(
            r#"{ "name": "broken", "both": [ { "type": "Volume", "options": {} } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            set.validate(),
            Err(ConformanceError::UnknownCriterion(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "name": "file set", "baseline": [ { "type": "NonTargetResponse" } ] }"#)
            .unwrap();

        let set = CriteriaSet::from_file(file.path()).unwrap();
        assert_eq!(set.name, "file set");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            CriteriaSet::from_json("{ not json"),
            Err(ConformanceError::JsonError(_))
        ));
    }

    #[test]
    fn test_recist_baseline_report() {
        let recist = CriteriaSet::builtin(BuiltinCriteria::Recist).unwrap();
        let data = MeasurementContext::new()
            .with_target(with_modality(baseline(1, "Liver"), "CT"))
            .with_target(with_modality(baseline(2, "Liver"), "CT"))
            .with_target(with_modality(baseline(3, "Liver"), "CT"))
            .with_non_target(with_modality(baseline(4, "Bone"), "US"));

        let report = recist
            .evaluate(TimepointKind::Baseline, &data, EvaluatorConfig::default())
            .unwrap();

        assert_eq!(report.criteria.as_deref(), Some("RECIST 1.1"));
        assert_eq!(report.timepoint, Some(TimepointKind::Baseline));

        let failed: Vec<CriterionType> =
            report.nonconformities().iter().map(|o| o.criterion).collect();
        assert_eq!(
            failed,
            vec![
                CriterionType::Modality,
                CriterionType::MaxTargetsPerOrgan,
                CriterionType::NonTargetResponse,
            ]
        );

        let by_measurement = report.nonconformities_by_measurement();
        assert_eq!(by_measurement[&4].len(), 2);
        assert_eq!(by_measurement[&3].len(), 1);
    }

    #[test]
    fn test_recist_followup_rejects_new_targets() {
        let recist = CriteriaSet::builtin(BuiltinCriteria::Recist).unwrap();
        let data = MeasurementContext::new()
            .with_target(with_modality(baseline(1, "Liver"), "CT"))
            .with_target(with_modality(followup(1, "Liver"), "CT"))
            .with_target(with_modality(followup(2, "Lung"), "CT"));

        let report = recist
            .evaluate(TimepointKind::Followup, &data, EvaluatorConfig::default())
            .unwrap();
        let failed = report.global_nonconformities();
        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed[0].result.message.as_deref(),
            Some("New lesions must be recorded as non-targets at follow-up")
        );
    }
}
