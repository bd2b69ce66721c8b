use thiserror::Error;

/// Result type for conformance operations
pub type Result<T> = std::result::Result<T, ConformanceError>;

/// Error types for conformance operations
///
/// A rule that does not pass is not an error: it is reported through a
/// [`RuleResult`](crate::types::RuleResult) with `passed == false`.
#[derive(Error, Debug)]
pub enum ConformanceError {
    /// Rule options rejected by the criterion's schema
    #[error("Invalid configuration for {criterion} (rule {index}): {reason}")]
    Configuration {
        criterion: String,
        index: usize,
        reason: String,
    },

    /// Configuration names a criterion type that does not exist
    #[error("Unknown criterion type: {0}")]
    UnknownCriterion(String),

    /// Measurement context exceeds the configured evaluation bound
    #[error("Measurement context has {entries} entries, limit is {limit}")]
    ContextTooLarge { entries: usize, limit: usize },

    /// Metadata tag key that cannot be parsed
    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConformanceError {
    /// Builds a configuration error for the rule at `index`
    pub fn configuration(
        criterion: impl Into<String>,
        index: usize,
        reason: impl Into<String>,
    ) -> Self {
        ConformanceError::Configuration {
            criterion: criterion.into(),
            index,
            reason: reason.into(),
        }
    }

    /// Whether this error was raised while loading rule configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ConformanceError::Configuration { .. } | ConformanceError::UnknownCriterion(_)
        )
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for ConformanceError {
    fn from(e: dicom_object::ReadError) -> Self {
        ConformanceError::DicomError(format!("{}", e))
    }
}
