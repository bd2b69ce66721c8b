use super::tags::{
    get_float_value, get_string_value, parse_decimal, parse_tag, tag_key, CAPTURED_TAGS, MODALITY,
    SLICE_THICKNESS,
};
use crate::error::ConformanceError;
use dicom_core::Tag;
use dicom_object::InMemDicomObject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// DICOM instance attributes of the image a measurement was taken on
///
/// Exposes the slice thickness and a raw lookup of any captured tag. In JSON
/// the accessor is written as:
///
/// ```json
/// { "sliceThickness": 2.5, "tags": { "x00080060": "CT" } }
/// ```
///
/// # Example
///
/// ```
/// use conformance_core::InstanceMetadata;
///
/// let metadata = InstanceMetadata::new()
///     .with_raw_value("x00080060", "ct")
///     .unwrap()
///     .with_slice_thickness(2.5);
///
/// assert_eq!(metadata.get_raw_value("x00080060"), Some("ct"));
/// assert_eq!(metadata.modality(), "CT");
/// assert_eq!(metadata.slice_thickness(), Some(2.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "MetadataRepr", into = "MetadataRepr")]
pub struct InstanceMetadata {
    slice_thickness: Option<f64>,
    values: BTreeMap<Tag, String>,
}

impl InstanceMetadata {
    /// Creates an empty accessor
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the conformance-relevant attributes of a DICOM object
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        let values = CAPTURED_TAGS
            .iter()
            .filter_map(|tag| get_string_value(dcm, *tag).map(|v| (*tag, v)))
            .collect();

        Self {
            slice_thickness: get_float_value(dcm, SLICE_THICKNESS),
            values,
        }
    }

    /// Builder: Set the slice thickness in millimetres
    pub fn with_slice_thickness(mut self, thickness: f64) -> Self {
        self.slice_thickness = Some(thickness);
        self
    }

    /// Builder: Set a raw tag value
    pub fn with_value(mut self, tag: Tag, value: impl Into<String>) -> Self {
        self.values.insert(tag, value.into());
        self
    }

    /// Builder: Set a raw tag value from a tag key such as "x00080060"
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid tag
    pub fn with_raw_value(
        self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<Self, ConformanceError> {
        Ok(self.with_value(parse_tag(key)?, value))
    }

    /// Overlays `overrides` on top of these values
    pub fn merged_with(mut self, overrides: InstanceMetadata) -> Self {
        if overrides.slice_thickness.is_some() {
            self.slice_thickness = overrides.slice_thickness;
        }
        self.values.extend(overrides.values);
        self
    }

    /// Slice thickness in millimetres
    ///
    /// Falls back to the SliceThickness tag value; `None` when neither
    /// holds a number.
    pub fn slice_thickness(&self) -> Option<f64> {
        self.slice_thickness
            .filter(|t| !t.is_nan())
            .or_else(|| self.value(SLICE_THICKNESS).and_then(parse_decimal))
    }

    /// Raw value of a tag
    pub fn value(&self, tag: Tag) -> Option<&str> {
        self.values.get(&tag).map(String::as_str)
    }

    /// Raw value by tag key ("x00080060" and the other accepted key forms)
    ///
    /// Unparsable keys yield `None`.
    pub fn get_raw_value(&self, key: &str) -> Option<&str> {
        parse_tag(key).ok().and_then(|tag| self.value(tag))
    }

    /// Upper-cased modality, or an empty string when absent
    pub fn modality(&self) -> String {
        self.value(MODALITY)
            .map(|m| m.trim().to_uppercase())
            .unwrap_or_default()
    }
}

/// Serialized form keyed by tag strings
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slice_thickness: Option<f64>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

impl TryFrom<MetadataRepr> for InstanceMetadata {
    type Error = ConformanceError;

    fn try_from(repr: MetadataRepr) -> Result<Self, Self::Error> {
        let values = repr
            .tags
            .into_iter()
            .map(|(key, value)| parse_tag(&key).map(|tag| (tag, value)))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            slice_thickness: repr.slice_thickness,
            values,
        })
    }
}

impl From<InstanceMetadata> for MetadataRepr {
    fn from(metadata: InstanceMetadata) -> Self {
        Self {
            slice_thickness: metadata.slice_thickness,
            tags: metadata
                .values
                .into_iter()
                .map(|(tag, value)| (tag_key(tag), value))
                .collect(),
        }
    }
}
