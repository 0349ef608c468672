use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Failed to load {artifact} artifact from '{path}': {reason}")]
    MissingArtifact {
        artifact: String,
        path: String,
        reason: String,
    },

    #[error("Unknown category for {attribute}: '{value}' has no indicator column")]
    UnknownCategory { attribute: String, value: String },

    #[error("Column mismatch in {context}: expected {expected} columns, got {actual}")]
    ColumnMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Artifact,
    Input,
    Integrity,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EstimatorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EstimatorError::MissingArtifact { .. } | EstimatorError::SerializationError(_) => {
                ErrorCategory::Artifact
            }
            EstimatorError::UnknownCategory { .. } | EstimatorError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            EstimatorError::ColumnMismatch { .. } => ErrorCategory::Integrity,
            EstimatorError::ConfigError { .. }
            | EstimatorError::ConfigValidationError { .. }
            | EstimatorError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EstimatorError::CsvError(_) | EstimatorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Artifact | ErrorCategory::Integrity | ErrorCategory::System => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EstimatorError::MissingArtifact { .. } => {
                "Check the [artifacts] paths and re-export the model files from the training environment"
            }
            EstimatorError::SerializationError(_) => {
                "Make sure the artifact files are valid JSON in the expected format"
            }
            EstimatorError::UnknownCategory { .. } => {
                "Pick a value listed by the catalog command, or use --unknown-category zero"
            }
            EstimatorError::ColumnMismatch { .. } => {
                "The model, scaler and reference columns come from different training runs; export them together"
            }
            EstimatorError::ValidationError { .. } => "Correct the input values and try again",
            EstimatorError::ConfigError { .. }
            | EstimatorError::ConfigValidationError { .. }
            | EstimatorError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
            EstimatorError::CsvError(_) => "Check that the reference dataset is a readable CSV file",
            EstimatorError::IoError(_) => "Check file permissions and paths",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EstimatorError::MissingArtifact { artifact, path, .. } => {
                format!("Could not load the {} from {}", artifact, path)
            }
            EstimatorError::UnknownCategory { attribute, value } => {
                format!("'{}' is not a {} the model was trained on", value, attribute)
            }
            EstimatorError::ColumnMismatch { .. } => {
                "The model files are inconsistent with each other".to_string()
            }
            EstimatorError::ValidationError { message } => format!("Invalid input: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let err = EstimatorError::MissingArtifact {
            artifact: "estimator".to_string(),
            path: "models/model.json".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Artifact);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = EstimatorError::UnknownCategory {
            attribute: "Brand".to_string(),
            value: "Zeta".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("Zeta"));
    }
}
