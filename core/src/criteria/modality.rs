use super::common::{contains_modality, generate_response};
use crate::types::{Measurement, MeasurementContext, MeasurementKind, ModalityMethod, RuleResult};
use log::{debug, warn};
use serde::Deserialize;

fn default_measurement_types() -> Vec<MeasurementKind> {
    vec![MeasurementKind::Targets]
}

/// Options of [`ModalityCriterion`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalityOptions {
    pub method: ModalityMethod,
    pub modalities: Vec<String>,
    #[serde(default = "default_measurement_types")]
    pub measurement_types: Vec<MeasurementKind>,
}

impl ModalityOptions {
    /// Options checking targets only
    pub fn new(method: ModalityMethod, modalities: Vec<String>) -> Self {
        Self {
            method,
            modalities,
            measurement_types: default_measurement_types(),
        }
    }

    /// Builder: Set the measurement collections to check
    pub fn with_measurement_types(mut self, kinds: Vec<MeasurementKind>) -> Self {
        self.measurement_types = kinds;
        self
    }
}

/// Allow or deny list of the modalities measurements may be taken on
///
/// The modality of an entry is the upper-cased Modality tag of its image,
/// or an empty string when the tag is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalityCriterion {
    options: ModalityOptions,
}

impl ModalityCriterion {
    pub fn new(options: ModalityOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ModalityOptions {
        &self.options
    }

    pub fn evaluate(&self, data: &MeasurementContext) -> RuleResult {
        let options = &self.options;
        let mut violations: Vec<Measurement> = Vec::new();
        let mut invalid_modalities: Vec<String> = Vec::new();

        for kind in &options.measurement_types {
            for entry in data.entries(*kind) {
                let modality = entry.modality();
                if modality.is_empty() {
                    warn!(
                        "Measurement {} in {} has no modality",
                        entry.measurement.measurement_number, kind
                    );
                }

                let listed = contains_modality(&options.modalities, &modality);
                let violates = match options.method {
                    ModalityMethod::Allow => !listed,
                    ModalityMethod::Deny => listed,
                };

                if violates {
                    violations.push(entry.measurement.clone());
                    if !invalid_modalities.contains(&modality) {
                        invalid_modalities.push(modality);
                    }
                }
            }
        }

        debug!(
            "Modality: {} violation(s), invalid modalities {:?}",
            violations.len(),
            invalid_modalities
        );

        let message = (!invalid_modalities.is_empty()).then(|| {
            let noun = if invalid_modalities.len() > 1 {
                "modalities"
            } else {
                "modality"
            };
            format!(
                "The {} {} should not be used as a method of measurement",
                noun,
                invalid_modalities.join(", ")
            )
        });

        generate_response(message, violations)
    }
}
