//! Conformance criteria
//!
//! Each criterion checks one business rule over a [`MeasurementContext`] and
//! returns a [`RuleResult`]. [`Criterion`] dispatches over the variants and
//! builds them from validated [`RuleConfiguration`]s.

pub mod common;
mod max_target_per_organ;
mod max_targets;
mod max_targets_per_organ;
mod measurements_length;
mod modality;
mod non_target_response;
pub mod schema;

pub use common::{generate_response, new_target_numbers};
pub use max_target_per_organ::{MaxTargetPerOrganCriterion, MaxTargetPerOrganOptions};
pub use max_targets::{MaxTargetsCriterion, MaxTargetsOptions};
pub use max_targets_per_organ::{MaxTargetsPerOrganCriterion, MaxTargetsPerOrganOptions};
pub use measurements_length::{MeasurementsLengthCriterion, MeasurementsLengthOptions};
pub use modality::{ModalityCriterion, ModalityOptions};
pub use non_target_response::NonTargetResponseCriterion;

use crate::error::{ConformanceError, Result};
use crate::types::{CriterionType, MeasurementContext, RuleConfiguration, RuleResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A configured conformance rule
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    MaxTargets(MaxTargetsCriterion),
    MaxTargetPerOrgan(MaxTargetPerOrganCriterion),
    MaxTargetsPerOrgan(MaxTargetsPerOrganCriterion),
    MeasurementsLength(MeasurementsLengthCriterion),
    Modality(ModalityCriterion),
    NonTargetResponse(NonTargetResponseCriterion),
}

impl Criterion {
    /// Builds a criterion from a rule configuration
    ///
    /// The options are validated against the type's schema first; `index`
    /// is the position of the rule in its configuration list and is only
    /// used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::UnknownCriterion`] for an unknown type
    /// name and [`ConformanceError::Configuration`] for options the schema
    /// rejects.
    ///
    /// # Example
    ///
    /// ```
    /// use conformance_core::{Criterion, CriterionType, RuleConfiguration};
    /// use serde_json::json;
    ///
    /// let config = RuleConfiguration::new("MaxTargetsPerOrgan", json!({ "limit": 2 }));
    /// let criterion = Criterion::from_configuration(&config, 0).unwrap();
    /// assert_eq!(criterion.criterion_type(), CriterionType::MaxTargetsPerOrgan);
    ///
    /// let invalid = RuleConfiguration::new("MaxTargetsPerOrgan", json!({ "limit": 0 }));
    /// assert!(Criterion::from_configuration(&invalid, 1).is_err());
    /// ```
    pub fn from_configuration(config: &RuleConfiguration, index: usize) -> Result<Self> {
        let criterion_type = CriterionType::from_str(&config.criterion_type)
            .ok_or_else(|| ConformanceError::UnknownCriterion(config.criterion_type.clone()))?;

        Self::build(criterion_type, &config.options, index)
    }

    /// Builds a criterion of a known type from its options
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::Configuration`] for options the schema rejects
    pub fn build(
        criterion_type: CriterionType,
        options: &Map<String, Value>,
        index: usize,
    ) -> Result<Self> {
        schema::validate_options(&schema::schema(criterion_type), options)
            .map_err(|reason| ConformanceError::configuration(criterion_type.simple_name(), index, reason))?;

        let criterion = match criterion_type {
            CriterionType::MaxTargets => {
                Criterion::MaxTargets(MaxTargetsCriterion::new(parse(criterion_type, options, index)?))
            }
            CriterionType::MaxTargetPerOrgan => Criterion::MaxTargetPerOrgan(
                MaxTargetPerOrganCriterion::new(parse(criterion_type, options, index)?),
            ),
            CriterionType::MaxTargetsPerOrgan => Criterion::MaxTargetsPerOrgan(
                MaxTargetsPerOrganCriterion::new(parse(criterion_type, options, index)?),
            ),
            CriterionType::MeasurementsLength => Criterion::MeasurementsLength(
                MeasurementsLengthCriterion::new(parse(criterion_type, options, index)?),
            ),
            CriterionType::Modality => {
                Criterion::Modality(ModalityCriterion::new(parse(criterion_type, options, index)?))
            }
            CriterionType::NonTargetResponse => {
                Criterion::NonTargetResponse(NonTargetResponseCriterion::new())
            }
        };

        Ok(criterion)
    }

    pub fn criterion_type(&self) -> CriterionType {
        match self {
            Criterion::MaxTargets(_) => CriterionType::MaxTargets,
            Criterion::MaxTargetPerOrgan(_) => CriterionType::MaxTargetPerOrgan,
            Criterion::MaxTargetsPerOrgan(_) => CriterionType::MaxTargetsPerOrgan,
            Criterion::MeasurementsLength(_) => CriterionType::MeasurementsLength,
            Criterion::Modality(_) => CriterionType::Modality,
            Criterion::NonTargetResponse(_) => CriterionType::NonTargetResponse,
        }
    }

    /// Evaluates the rule; a pure function of the options and `data`
    pub fn evaluate(&self, data: &MeasurementContext) -> RuleResult {
        match self {
            Criterion::MaxTargets(c) => c.evaluate(data),
            Criterion::MaxTargetPerOrgan(c) => c.evaluate(data),
            Criterion::MaxTargetsPerOrgan(c) => c.evaluate(data),
            Criterion::MeasurementsLength(c) => c.evaluate(data),
            Criterion::Modality(c) => c.evaluate(data),
            Criterion::NonTargetResponse(c) => c.evaluate(data),
        }
    }
}

fn parse<T: DeserializeOwned>(
    criterion_type: CriterionType,
    options: &Map<String, Value>,
    index: usize,
) -> Result<T> {
    serde_json::from_value(Value::Object(options.clone())).map_err(|e| {
        ConformanceError::configuration(criterion_type.simple_name(), index, e.to_string())
    })
}
