//! Error types for the Gradus application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Gradus application.
///
/// Every failure is terminal for the action that triggered it but never
/// fatal for the process: callers convert the variant into a user-visible
/// message and abort the current action without touching session state.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum GradusError {
    /// The secret configuration file does not exist.
    #[error("Configuration file not found at: {path}")]
    ConfigMissing { path: String },

    /// The secret configuration file exists but could not be parsed.
    #[error("Configuration file is malformed: {message}")]
    ConfigMalformed { message: String },

    /// The configuration parsed but carries no usable API key.
    #[error("No Groq API key configured (expected \"groqApiKey\" in secret.json or GROQ_API_KEY)")]
    ApiKeyMissing,

    /// The completion service could not be reached or answered with an
    /// error status. Timeouts land here as well.
    #[error("Completion service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The completion service answered, but the body was not a valid
    /// chat-completion response.
    #[error("Completion service returned a malformed response: {0}")]
    MalformedResponse(String),

    /// The completion service answered successfully with no content.
    #[error("Completion service returned an empty response")]
    EmptyResponse,

    /// No submission could be read for evaluation.
    #[error("No submission found at: {path}")]
    NoSubmission { path: String },

    /// The workspace root does not exist or is not a directory.
    #[error("Workspace folder unavailable: {path}")]
    WorkspaceUnavailable { path: String },

    /// Writing the playground artifact failed.
    #[error("Failed to write {path}: {message}")]
    FileWrite { path: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GradusError {
    /// Creates a ConfigMissing error
    pub fn config_missing(path: impl Into<String>) -> Self {
        Self::ConfigMissing { path: path.into() }
    }

    /// Creates a ConfigMalformed error
    pub fn config_malformed(message: impl Into<String>) -> Self {
        Self::ConfigMalformed {
            message: message.into(),
        }
    }

    /// Creates a ServiceUnavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Creates a FileWrite error
    pub fn file_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is one of the three startup configuration failures.
    ///
    /// When any of these is returned during startup, the session-initializing
    /// commands must not become usable.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigMissing { .. } | Self::ConfigMalformed { .. } | Self::ApiKeyMissing
        )
    }

    /// Check if this is a completion-service failure (unreachable, malformed
    /// body, or empty content).
    pub fn is_service(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_) | Self::MalformedResponse(_) | Self::EmptyResponse
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GradusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GradusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GradusError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for GradusError {
    fn from(err: minijinja::Error) -> Self {
        Self::Internal(format!("Template rendering failed: {err}"))
    }
}

/// A type alias for `Result<T, GradusError>`.
pub type Result<T> = std::result::Result<T, GradusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_classification() {
        assert!(GradusError::config_missing("/tmp/secret.json").is_config());
        assert!(GradusError::config_malformed("bad json").is_config());
        assert!(GradusError::ApiKeyMissing.is_config());
        assert!(!GradusError::EmptyResponse.is_config());
    }

    #[test]
    fn test_service_classification() {
        assert!(GradusError::service_unavailable("timed out").is_service());
        assert!(GradusError::MalformedResponse("truncated".into()).is_service());
        assert!(GradusError::EmptyResponse.is_service());
        assert!(!GradusError::ApiKeyMissing.is_service());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GradusError = io_err.into();
        assert!(matches!(err, GradusError::Io { .. }));
    }
}
