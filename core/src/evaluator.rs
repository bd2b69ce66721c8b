use crate::criteria::Criterion;
use crate::error::{ConformanceError, Result};
use crate::types::{
    ConformanceReport, EvaluatorConfig, MeasurementContext, RuleConfiguration, RuleOutcome,
};
use log::{debug, info};

/// Runs a list of configured conformance rules over measurement contexts
///
/// All configurations are validated when the evaluator is built, so a
/// constructed evaluator never meets invalid options at evaluation time.
///
/// # Example
///
/// ```
/// use conformance_core::{
///     CriteriaEvaluator, Measurement, MeasurementContext, MeasurementEntry, RuleConfiguration,
///     Timepoint,
/// };
/// use serde_json::json;
///
/// let evaluator = CriteriaEvaluator::new(vec![
///     RuleConfiguration::new("MaxTargetsPerOrgan", json!({ "limit": 2 })),
///     RuleConfiguration::new("NonTargetResponse", json!({})),
/// ])
/// .unwrap();
///
/// let context = (1..=3).fold(MeasurementContext::new(), |context, number| {
///     context.with_target(MeasurementEntry::new(
///         Measurement::new(number, "liver"),
///         Timepoint::baseline(),
///     ))
/// });
///
/// let report = evaluator.evaluate(&context).unwrap();
/// assert!(!report.passed());
/// assert_eq!(report.nonconformities().len(), 1);
/// assert_eq!(report.outcomes[0].result.measurement_numbers(), vec![3]);
/// ```
#[derive(Debug, Clone)]
pub struct CriteriaEvaluator {
    criteria: Vec<Criterion>,
    config: EvaluatorConfig,
}

impl CriteriaEvaluator {
    /// Builds an evaluator with the default configuration
    ///
    /// # Errors
    ///
    /// Returns the error of the first configuration that names an unknown
    /// criterion or fails its schema
    pub fn new(configurations: Vec<RuleConfiguration>) -> Result<Self> {
        Self::with_config(configurations, EvaluatorConfig::default())
    }

    /// Builds an evaluator with an explicit configuration
    pub fn with_config(
        configurations: Vec<RuleConfiguration>,
        config: EvaluatorConfig,
    ) -> Result<Self> {
        let criteria = configurations
            .iter()
            .enumerate()
            .map(|(index, configuration)| Criterion::from_configuration(configuration, index))
            .collect::<Result<Vec<_>>>()?;

        debug!("Built evaluator with {} criteria", criteria.len());

        Ok(Self { criteria, config })
    }

    /// Builds an evaluator from already constructed criteria
    pub fn from_criteria(criteria: Vec<Criterion>, config: EvaluatorConfig) -> Self {
        Self { criteria, config }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates every criterion against `data`, in configuration order
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceError::ContextTooLarge`] when the context holds
    /// more entries than the configured bound. Failing rules are not errors.
    pub fn evaluate(&self, data: &MeasurementContext) -> Result<ConformanceReport> {
        if let Some(limit) = self.config.max_entries {
            if data.len() > limit {
                return Err(ConformanceError::ContextTooLarge {
                    entries: data.len(),
                    limit,
                });
            }
        }

        let outcomes: Vec<RuleOutcome> = self
            .criteria
            .iter()
            .map(|criterion| RuleOutcome::new(criterion.criterion_type(), criterion.evaluate(data)))
            .filter(|outcome| self.config.include_passed || !outcome.passed())
            .collect();

        let report = ConformanceReport::new(outcomes);
        info!(
            "Evaluated {} criteria over {} targets and {} non-targets: {} nonconformities",
            self.criteria.len(),
            data.targets.len(),
            data.non_targets.len(),
            report.nonconformities().len()
        );

        Ok(report)
    }
}
