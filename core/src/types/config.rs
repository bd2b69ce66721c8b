use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default bound on the number of entries of an evaluated context
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// One configured rule: a criterion type name and its options
///
/// # Example
///
/// ```
/// use conformance_core::RuleConfiguration;
/// use serde_json::json;
///
/// let config: RuleConfiguration =
///     serde_json::from_value(json!({ "type": "MaxTargets", "options": { "limit": 5 } })).unwrap();
/// assert_eq!(config.criterion_type, "MaxTargets");
/// assert_eq!(config.options["limit"], 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfiguration {
    #[serde(rename = "type")]
    pub criterion_type: String,

    #[serde(default)]
    pub options: Map<String, Value>,
}

impl RuleConfiguration {
    /// Creates a configuration from a type name and an options object
    ///
    /// Non-object `options` values are kept as an empty object.
    pub fn new(criterion_type: impl Into<String>, options: Value) -> Self {
        let options = match options {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            criterion_type: criterion_type.into(),
            options,
        }
    }
}

/// Configuration of an evaluation run
///
/// # Example
///
/// ```
/// use conformance_core::EvaluatorConfig;
///
/// let config = EvaluatorConfig::default()
///     .with_max_entries(Some(500))
///     .include_passed(false);
///
/// assert_eq!(config.max_entries, Some(500));
/// assert!(!config.include_passed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorConfig {
    /// Largest accepted number of targets plus non-targets; `None` disables the bound
    pub max_entries: Option<usize>,

    /// Keep passing rules in the report (otherwise only nonconformities)
    pub include_passed: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_entries: Some(DEFAULT_MAX_ENTRIES),
            include_passed: true,
        }
    }
}

impl EvaluatorConfig {
    /// Creates a config without a context size bound
    ///
    /// # Example
    ///
    /// ```
    /// use conformance_core::EvaluatorConfig;
    ///
    /// let permissive = EvaluatorConfig::permissive();
    /// assert!(permissive.max_entries.is_none());
    /// ```
    pub fn permissive() -> Self {
        Self {
            max_entries: None,
            include_passed: true,
        }
    }

    /// Builder: Set the context size bound
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Builder: Keep or drop passing rules in the report
    pub fn include_passed(mut self, include: bool) -> Self {
        self.include_passed = include;
        self
    }
}
