use serde::{Deserialize, Serialize};
use std::fmt;

/// Conformance criterion variants
///
/// `MaxTargetPerOrgan` is the legacy per-organ rule kept for existing
/// configurations; `MaxTargetsPerOrgan` is its successor with new-target
/// filtering and message override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub enum CriterionType {
    MaxTargets,
    MaxTargetPerOrgan,
    MaxTargetsPerOrgan,
    MeasurementsLength,
    Modality,
    NonTargetResponse,
}

impl CriterionType {
    /// All criterion variants in registry order
    pub const ALL: [CriterionType; 6] = [
        CriterionType::MaxTargets,
        CriterionType::MaxTargetPerOrgan,
        CriterionType::MaxTargetsPerOrgan,
        CriterionType::MeasurementsLength,
        CriterionType::Modality,
        CriterionType::NonTargetResponse,
    ];

    /// Configuration name of the criterion
    pub fn simple_name(&self) -> &'static str {
        match self {
            CriterionType::MaxTargets => "MaxTargets",
            CriterionType::MaxTargetPerOrgan => "MaxTargetPerOrgan",
            CriterionType::MaxTargetsPerOrgan => "MaxTargetsPerOrgan",
            CriterionType::MeasurementsLength => "MeasurementsLength",
            CriterionType::Modality => "Modality",
            CriterionType::NonTargetResponse => "NonTargetResponse",
        }
    }

    /// Parses a configuration type name
    ///
    /// Accepts both "MaxTargets" and "MaxTargetsCriterion". Matching is
    /// exact otherwise, since the legacy and current per-organ names differ
    /// by a single letter.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let name = s.trim();
        let name = name.strip_suffix("Criterion").unwrap_or(name);
        Self::ALL.into_iter().find(|t| t.simple_name() == name)
    }
}

impl fmt::Display for CriterionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Measurement collections of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasurementKind {
    Targets,
    NonTargets,
}

impl MeasurementKind {
    pub fn simple_name(&self) -> &'static str {
        match self {
            MeasurementKind::Targets => "targets",
            MeasurementKind::NonTargets => "nonTargets",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Timepoint a criteria set is evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimepointKind {
    #[default]
    Baseline,
    Followup,
}

impl TimepointKind {
    pub fn simple_name(&self) -> &'static str {
        match self {
            TimepointKind::Baseline => "baseline",
            TimepointKind::Followup => "followup",
        }
    }
}

impl fmt::Display for TimepointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// How a modality rule treats its listed modalities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalityMethod {
    /// Only the listed modalities may be measured on
    Allow,
    /// The listed modalities may not be measured on
    Deny,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("MaxTargets", CriterionType::MaxTargets)]
    #[case("MaxTargetsCriterion", CriterionType::MaxTargets)]
    #[case("MaxTargetPerOrgan", CriterionType::MaxTargetPerOrgan)]
    #[case("MaxTargetPerOrganCriterion", CriterionType::MaxTargetPerOrgan)]
    #[case("MaxTargetsPerOrgan", CriterionType::MaxTargetsPerOrgan)]
    #[case("MeasurementsLength", CriterionType::MeasurementsLength)]
    #[case("Modality", CriterionType::Modality)]
    #[case(" NonTargetResponse ", CriterionType::NonTargetResponse)]
    fn test_criterion_type_from_str(#[case] name: &str, #[case] expected: CriterionType) {
        assert_eq!(CriterionType::from_str(name), Some(expected));
    }

    #[test]
    fn test_criterion_type_unknown() {
        assert_eq!(CriterionType::from_str("maxtargets"), None);
        assert_eq!(CriterionType::from_str("Criterion"), None);
        assert_eq!(CriterionType::from_str(""), None);
    }

    #[test]
    fn test_criterion_type_display_round_trips() {
        for criterion in CriterionType::ALL {
            assert_eq!(
                CriterionType::from_str(&criterion.to_string()),
                Some(criterion)
            );
        }
    }

    #[test]
    fn test_measurement_kind_serde_names() {
        let kinds: Vec<MeasurementKind> =
            serde_json::from_str(r#"["targets", "nonTargets"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![MeasurementKind::Targets, MeasurementKind::NonTargets]
        );
        assert!(serde_json::from_str::<MeasurementKind>(r#""lesions""#).is_err());
    }

    #[test]
    fn test_timepoint_kind_default() {
        assert_eq!(TimepointKind::default(), TimepointKind::Baseline);
        assert_eq!(TimepointKind::Followup.to_string(), "followup");
    }
}
