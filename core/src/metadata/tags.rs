use crate::error::{ConformanceError, Result};
use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::InMemDicomObject;
use regex::Regex;
use std::sync::OnceLock;

// Instance tags read by the conformance criteria
pub const MODALITY: Tag = tags::MODALITY;
pub const SLICE_THICKNESS: Tag = tags::SLICE_THICKNESS;

/// Tags copied from a DICOM object into an instance metadata accessor
pub const CAPTURED_TAGS: [Tag; 2] = [MODALITY, SLICE_THICKNESS];

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get a decimal value from DICOM tag
///
/// Decimal strings are parsed from their text form; returns `None` when the
/// tag is missing, empty or not a number.
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    get_string_value(dcm, tag).and_then(|s| parse_decimal(&s))
}

/// Parses the first value of a (possibly multi-valued) decimal string
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.split('\\')
        .next()
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

/// Parses a tag key as used in measurement metadata
///
/// Accepts:
/// - "x00080060"
/// - "00080060"
/// - "0008,0060"
/// - "(0008,0060)"
///
/// # Errors
///
/// Returns [`ConformanceError::InvalidTag`] if the key matches none of them
pub fn parse_tag(key: &str) -> Result<Tag> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"^\(?[xX]?([0-9A-Fa-f]{4}),?([0-9A-Fa-f]{4})\)?$")
            .expect("Failed to compile regex")
    });

    let caps = re
        .captures(key.trim())
        .ok_or_else(|| ConformanceError::InvalidTag(key.to_string()))?;
    let group = u16::from_str_radix(&caps[1], 16)
        .map_err(|_| ConformanceError::InvalidTag(key.to_string()))?;
    let element = u16::from_str_radix(&caps[2], 16)
        .map_err(|_| ConformanceError::InvalidTag(key.to_string()))?;

    Ok(Tag(group, element))
}

/// Formats a tag in the "x00080060" key form
pub fn tag_key(tag: Tag) -> String {
    format!("x{:04X}{:04X}", tag.0, tag.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};
    use rstest::rstest;

    #[test]
    fn test_tag_values() {
        assert_eq!(MODALITY, Tag(0x0008, 0x0060));
        assert_eq!(SLICE_THICKNESS, Tag(0x0018, 0x0050));
        assert_eq!(CAPTURED_TAGS, [MODALITY, SLICE_THICKNESS]);
    }

    #[rstest]
    #[case("x00080060")]
    #[case("X00080060")]
    #[case("00080060")]
    #[case("0008,0060")]
    #[case("(0008,0060)")]
    #[case(" x00080060 ")]
    fn test_parse_tag_forms(#[case] key: &str) {
        assert_eq!(parse_tag(key).unwrap(), MODALITY);
    }

    #[rstest]
    #[case("")]
    #[case("modality")]
    #[case("x0008006")]
    #[case("x000800600")]
    #[case("(0008;0060)")]
    fn test_parse_tag_rejects(#[case] key: &str) {
        assert!(matches!(parse_tag(key), Err(ConformanceError::InvalidTag(_))));
    }

    #[test]
    fn test_parse_tag_hex_digits() {
        assert_eq!(parse_tag("x0020000d").unwrap(), tags::STUDY_INSTANCE_UID);
        assert_eq!(tag_key(tags::STUDY_INSTANCE_UID), "x0020000D");
        assert_eq!(tag_key(MODALITY), "x00080060");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("2.5"), Some(2.5));
        assert_eq!(parse_decimal(" 1.25 \\3.0"), Some(1.25));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_get_values_from_dicom() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("CT ")));
        dcm.put(DataElement::new(
            SLICE_THICKNESS,
            VR::DS,
            PrimitiveValue::from("5.0"),
        ));

        assert_eq!(get_string_value(&dcm, MODALITY), Some("CT".to_string()));
        assert_eq!(get_float_value(&dcm, SLICE_THICKNESS), Some(5.0));
        assert_eq!(get_string_value(&dcm, tags::BODY_PART_EXAMINED), None);
        assert_eq!(get_float_value(&dcm, tags::BODY_PART_EXAMINED), None);
    }
}
