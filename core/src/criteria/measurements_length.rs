use super::common::{contains_modality, generate_response, passes_exclusion, passes_inclusion};
use crate::types::{Measurement, MeasurementContext, MeasurementEntry, RuleResult};
use log::debug;
use serde::Deserialize;

/// Options of [`MeasurementsLengthCriterion`]
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementsLengthOptions {
    pub message: String,
    #[serde(default)]
    pub long_axis: Option<f64>,
    #[serde(default)]
    pub short_axis: Option<f64>,
    #[serde(default)]
    pub long_axis_slice_thickness_multiplier: Option<f64>,
    #[serde(default)]
    pub short_axis_slice_thickness_multiplier: Option<f64>,
    #[serde(default)]
    pub modality_in: Option<Vec<String>>,
    #[serde(default)]
    pub modality_not_in: Option<Vec<String>>,
    #[serde(default)]
    pub location_in: Option<Vec<String>>,
    #[serde(default)]
    pub location_not_in: Option<Vec<String>>,
}

/// Minimum lesion size of targets
///
/// Targets filtered out by the modality or location lists are neither passed
/// nor failed. A surviving target fails when any configured threshold is
/// strictly greater than its axis; missing axes and missing slice thickness
/// never fail.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementsLengthCriterion {
    options: MeasurementsLengthOptions,
}

impl MeasurementsLengthCriterion {
    pub fn new(options: MeasurementsLengthOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MeasurementsLengthOptions {
        &self.options
    }

    pub fn evaluate(&self, data: &MeasurementContext) -> RuleResult {
        let violations: Vec<Measurement> = data
            .targets
            .iter()
            .filter(|entry| self.applies_to(entry))
            .filter(|entry| self.is_too_small(entry))
            .map(|entry| entry.measurement.clone())
            .collect();

        debug!("MeasurementsLength: {} violation(s)", violations.len());

        let message = (!violations.is_empty()).then(|| self.options.message.clone());
        generate_response(message, violations)
    }

    fn applies_to(&self, entry: &MeasurementEntry) -> bool {
        let options = &self.options;
        let location = entry.measurement.location.as_str();
        let modality = entry.modality();

        passes_inclusion(options.location_in.as_ref(), location)
            && passes_exclusion(options.location_not_in.as_ref(), location)
            && options
                .modality_in
                .as_ref()
                .map_or(true, |modalities| contains_modality(modalities, &modality))
            && !options
                .modality_not_in
                .as_ref()
                .is_some_and(|modalities| contains_modality(modalities, &modality))
    }

    fn is_too_small(&self, entry: &MeasurementEntry) -> bool {
        let options = &self.options;
        let long = entry.measurement.longest_diameter;
        let short = entry.measurement.shortest_diameter;
        let thickness = entry.metadata.slice_thickness();

        below(long, options.long_axis)
            || below(short, options.short_axis)
            || below(
                long,
                scaled(options.long_axis_slice_thickness_multiplier, thickness),
            )
            || below(
                short,
                scaled(options.short_axis_slice_thickness_multiplier, thickness),
            )
    }
}

/// `value < threshold`, false when either side is missing or NaN
fn below(value: Option<f64>, threshold: Option<f64>) -> bool {
    matches!((value, threshold), (Some(v), Some(t)) if v < t)
}

fn scaled(multiplier: Option<f64>, thickness: Option<f64>) -> Option<f64> {
    multiplier.zip(thickness).map(|(m, t)| m * t)
}
