//! Error types for the object model transform

use thiserror::Error;

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;

/// Transform errors
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Invalid schema: singleParam and multiParam both set on field `{field}`")]
    ConflictingConstruction { field: String },

    #[error("Invalid schema: included node at depth {depth} has no field")]
    MissingField { depth: usize },

    #[error("Recursion depth {depth} exceeds the configured limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    #[error("Unknown hook: {0}")]
    UnknownHook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl TransformError {
    /// Whether this error reports a malformed schema rather than an environment failure
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            TransformError::ConflictingConstruction { .. }
                | TransformError::MissingField { .. }
                | TransformError::UnknownHook(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_construction_message() {
        let err = TransformError::ConflictingConstruction { field: "pet".to_string() };
        assert_eq!(
            err.to_string(),
            "Invalid schema: singleParam and multiParam both set on field `pet`"
        );
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_depth_error_is_not_schema_error() {
        let err = TransformError::DepthExceeded { depth: 5, limit: 4 };
        assert!(!err.is_schema_error());
    }
}
