//! Option schemas of the criteria
//!
//! Descriptors are JSON Schema documents checked with `jsonschema`.
//! Unknown option keys are accepted.

use crate::types::CriterionType;
use jsonschema::{Draft, ValidationError};
use serde_json::{json, Map, Value};

/// Returns the option schema of a criterion type
pub fn schema(criterion: CriterionType) -> Value {
    match criterion {
        CriterionType::MaxTargets => json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 0 },
                "newTarget": { "type": "boolean" },
                "locationIn": string_list(),
                "locationNotIn": string_list(),
                "message": { "type": "string" }
            },
            "required": ["limit"]
        }),
        CriterionType::MaxTargetPerOrgan => json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 0 }
            },
            "required": ["limit"]
        }),
        CriterionType::MaxTargetsPerOrgan => json!({
            "type": "object",
            "properties": {
                "limit": { "type": "integer", "minimum": 1 },
                "newTarget": { "type": "boolean" },
                "message": { "type": "string" }
            },
            "required": ["limit"]
        }),
        CriterionType::MeasurementsLength => json!({
            "type": "object",
            "properties": {
                "longAxis": { "type": "number" },
                "shortAxis": { "type": "number" },
                "longAxisSliceThicknessMultiplier": { "type": "number" },
                "shortAxisSliceThicknessMultiplier": { "type": "number" },
                "modalityIn": string_list(),
                "modalityNotIn": string_list(),
                "locationIn": string_list(),
                "locationNotIn": string_list(),
                "message": { "type": "string", "minLength": 1 }
            },
            "required": ["message"],
            "anyOf": [
                { "required": ["longAxis"] },
                { "required": ["shortAxis"] },
                { "required": ["longAxisSliceThicknessMultiplier"] },
                { "required": ["shortAxisSliceThicknessMultiplier"] }
            ]
        }),
        CriterionType::Modality => json!({
            "type": "object",
            "properties": {
                "method": { "type": "string", "enum": ["allow", "deny"] },
                "modalities": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1
                },
                "measurementTypes": {
                    "type": "array",
                    "items": { "type": "string", "enum": ["targets", "nonTargets"] }
                }
            },
            "required": ["method", "modalities"]
        }),
        CriterionType::NonTargetResponse => json!({
            "type": "object",
            "properties": {}
        }),
    }
}

fn string_list() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

/// Validates rule options against a schema descriptor
///
/// The descriptor is compiled as a JSON Schema (draft 2020-12). Violations
/// below the top level name the offending option, e.g.
/// `option 'limit': "5" is not of type "integer"`.
///
/// # Errors
///
/// Returns a description of the first violation found
pub fn validate_options(schema: &Value, options: &Map<String, Value>) -> Result<(), String> {
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|e| format!("invalid option schema: {}", e))?;

    let instance = Value::Object(options.clone());
    validator.validate(&instance).map_err(|e| describe(&e))
}

fn describe(error: &ValidationError<'_>) -> String {
    let path = error.instance_path().to_string();
    match path.trim_start_matches('/') {
        "" => error.to_string(),
        option => format!("option '{}': {}", option, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("options must be an object"),
        }
    }

    fn check(criterion: CriterionType, value: Value) -> Result<(), String> {
        validate_options(&schema(criterion), &options(value))
    }

    #[test]
    fn test_schemas_compile() {
        for criterion in CriterionType::ALL {
            let schema = schema(criterion);
            assert_eq!(schema["type"], "object");
            assert!(jsonschema::options()
                .with_draft(Draft::Draft202012)
                .build(&schema)
                .is_ok());
        }
    }

    #[rstest]
    #[case(CriterionType::MaxTargets, json!({ "limit": 0 }))]
    #[case(CriterionType::MaxTargets, json!({ "limit": 2.0 }))]
    #[case(CriterionType::MaxTargets, json!({ "limit": 5, "newTarget": true, "locationIn": ["liver"], "message": "x" }))]
    #[case(CriterionType::MaxTargetPerOrgan, json!({ "limit": 2 }))]
    #[case(CriterionType::MaxTargetsPerOrgan, json!({ "limit": 1, "newTarget": false }))]
    #[case(CriterionType::MeasurementsLength, json!({ "message": "m", "longAxis": 10 }))]
    #[case(CriterionType::MeasurementsLength, json!({ "message": "m", "shortAxisSliceThicknessMultiplier": 2.5 }))]
    #[case(CriterionType::Modality, json!({ "method": "deny", "modalities": ["US"], "measurementTypes": ["targets", "nonTargets"] }))]
    #[case(CriterionType::NonTargetResponse, json!({}))]
    #[case(CriterionType::NonTargetResponse, json!({ "unused": 1 }))]
    fn test_valid_options(#[case] criterion: CriterionType, #[case] value: Value) {
        assert_eq!(check(criterion, value), Ok(()));
    }

    #[rstest]
    #[case(CriterionType::MaxTargets, json!({}), "", "required")]
    #[case(CriterionType::MaxTargets, json!({ "limit": null }), "option 'limit'", "integer")]
    #[case(CriterionType::MaxTargets, json!({ "limit": "5" }), "option 'limit'", "integer")]
    #[case(CriterionType::MaxTargets, json!({ "limit": 2.5 }), "option 'limit'", "integer")]
    #[case(CriterionType::MaxTargets, json!({ "limit": -1 }), "option 'limit'", "minimum")]
    #[case(CriterionType::MaxTargets, json!({ "limit": 1, "locationIn": "liver" }), "option 'locationIn'", "array")]
    #[case(CriterionType::MaxTargets, json!({ "limit": 1, "locationIn": ["liver", 3] }), "option 'locationIn/1'", "string")]
    #[case(CriterionType::MaxTargetsPerOrgan, json!({ "limit": 0 }), "option 'limit'", "minimum")]
    #[case(CriterionType::MaxTargetsPerOrgan, json!({ "limit": 2, "newTarget": "yes" }), "option 'newTarget'", "boolean")]
    #[case(CriterionType::MeasurementsLength, json!({ "longAxis": 10 }), "", "required")]
    #[case(CriterionType::MeasurementsLength, json!({ "message": "", "longAxis": 10 }), "option 'message'", "shorter")]
    #[case(CriterionType::Modality, json!({ "method": "allow", "modalities": [] }), "option 'modalities'", "less than 1 item")]
    #[case(CriterionType::Modality, json!({ "modalities": ["CT"] }), "", "required")]
    fn test_invalid_options(
        #[case] criterion: CriterionType,
        #[case] value: Value,
        #[case] prefix: &str,
        #[case] keyword: &str,
    ) {
        let reason = check(criterion, value).unwrap_err();
        assert!(reason.starts_with(prefix), "{}", reason);
        assert!(reason.contains(keyword), "{}", reason);
    }

    #[test]
    fn test_required_names_option() {
        let reason = check(CriterionType::MaxTargets, json!({})).unwrap_err();
        assert_eq!(reason, r#""limit" is a required property"#);
    }

    #[test]
    fn test_measurements_length_any_of() {
        let reason = check(CriterionType::MeasurementsLength, json!({ "message": "m" })).unwrap_err();
        assert!(reason.contains("anyOf"), "{}", reason);
    }

    #[test]
    fn test_modality_enum_values() {
        let reason = check(
            CriterionType::Modality,
            json!({ "method": "permit", "modalities": ["CT"] }),
        )
        .unwrap_err();
        assert!(reason.starts_with("option 'method'"), "{}", reason);
        assert!(reason.contains("is not one of"), "{}", reason);

        let reason = check(
            CriterionType::Modality,
            json!({ "method": "allow", "modalities": ["CT"], "measurementTypes": ["lesions"] }),
        )
        .unwrap_err();
        assert!(reason.starts_with("option 'measurementTypes/0'"), "{}", reason);
    }
}
