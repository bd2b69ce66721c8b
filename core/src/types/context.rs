use super::enums::MeasurementKind;
use crate::metadata::InstanceMetadata;
use serde::{Deserialize, Serialize};

/// Clinical measurement record of a target or non-target lesion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Identifies the logical lesion across timepoints
    pub measurement_number: u32,

    /// Anatomical organ/site
    #[serde(default)]
    pub location: String,

    /// Long axis in millimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longest_diameter: Option<f64>,

    /// Short axis in millimetres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortest_diameter: Option<f64>,

    /// Lesion administratively split into sub-measurements
    #[serde(default)]
    pub is_split_lesion: bool,

    /// Assessed response, e.g. "present" / "absent"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl Measurement {
    /// Creates a measurement with a number and location
    pub fn new(measurement_number: u32, location: impl Into<String>) -> Self {
        Self {
            measurement_number,
            location: location.into(),
            ..Self::default()
        }
    }

    /// Builder: Set the long axis
    pub fn with_longest_diameter(mut self, mm: f64) -> Self {
        self.longest_diameter = Some(mm);
        self
    }

    /// Builder: Set the short axis
    pub fn with_shortest_diameter(mut self, mm: f64) -> Self {
        self.shortest_diameter = Some(mm);
        self
    }

    /// Builder: Mark as split lesion
    pub fn split_lesion(mut self, split: bool) -> Self {
        self.is_split_lesion = split;
        self
    }

    /// Builder: Set the response
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }
}

/// Visit/exam a measurement was taken at
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timepoint {
    /// "baseline", "followup" or another study-defined type
    pub timepoint_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timepoint_id: Option<String>,
}

impl Timepoint {
    /// Creates a timepoint of the given type
    pub fn new(timepoint_type: impl Into<String>) -> Self {
        Self {
            timepoint_type: timepoint_type.into(),
            timepoint_id: None,
        }
    }

    pub fn baseline() -> Self {
        Self::new("baseline")
    }

    pub fn followup() -> Self {
        Self::new("followup")
    }

    /// Case-insensitive check for the baseline type
    pub fn is_baseline(&self) -> bool {
        self.timepoint_type.trim().eq_ignore_ascii_case("baseline")
    }

    /// Case-insensitive check for the follow-up type
    pub fn is_followup(&self) -> bool {
        self.timepoint_type.trim().eq_ignore_ascii_case("followup")
    }
}

/// A measurement together with its timepoint and source image metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub measurement: Measurement,
    pub timepoint: Timepoint,
    #[serde(default)]
    pub metadata: InstanceMetadata,
}

impl MeasurementEntry {
    /// Creates an entry with empty metadata
    pub fn new(measurement: Measurement, timepoint: Timepoint) -> Self {
        Self {
            measurement,
            timepoint,
            metadata: InstanceMetadata::default(),
        }
    }

    /// Builder: Set the instance metadata
    pub fn with_metadata(mut self, metadata: InstanceMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Upper-cased modality of the source image ("" when unknown)
    pub fn modality(&self) -> String {
        self.metadata.modality()
    }
}

/// Read-only input of every criterion evaluation
///
/// # Example
///
/// ```
/// use conformance_core::{Measurement, MeasurementContext, MeasurementEntry, Timepoint};
///
/// let context = MeasurementContext::new()
///     .with_target(MeasurementEntry::new(Measurement::new(1, "liver"), Timepoint::baseline()))
///     .with_non_target(MeasurementEntry::new(
///         Measurement::new(2, "lung").with_response("present"),
///         Timepoint::baseline(),
///     ));
///
/// assert_eq!(context.targets.len(), 1);
/// assert_eq!(context.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementContext {
    #[serde(default)]
    pub targets: Vec<MeasurementEntry>,
    #[serde(default)]
    pub non_targets: Vec<MeasurementEntry>,
}

impl MeasurementContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Append a target entry
    pub fn with_target(mut self, entry: MeasurementEntry) -> Self {
        self.targets.push(entry);
        self
    }

    /// Builder: Append a non-target entry
    pub fn with_non_target(mut self, entry: MeasurementEntry) -> Self {
        self.non_targets.push(entry);
        self
    }

    /// Entries of the given kind
    pub fn entries(&self, kind: MeasurementKind) -> &[MeasurementEntry] {
        match kind {
            MeasurementKind::Targets => &self.targets,
            MeasurementKind::NonTargets => &self.non_targets,
        }
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.targets.len() + self.non_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
