//! Secret configuration file storage.
//!
//! Provides read-only loading of the API key from
//! `~/.config/gradus/secret.json`. The three startup failures — missing
//! file, unreadable file, malformed JSON — stay distinct so each can get
//! its own user-facing message, and a parsed file without a usable key is
//! a fourth, separate failure.

use crate::paths::GradusPaths;
use gradus_core::GradusError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Configuration file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine config directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

impl From<SecretStorageError> for GradusError {
    fn from(e: SecretStorageError) -> Self {
        match e {
            SecretStorageError::NotFound(path) => {
                GradusError::config_missing(path.display().to_string())
            }
            SecretStorageError::IoError(err) => GradusError::config_malformed(err.to_string()),
            SecretStorageError::ParseError(err) => GradusError::config_malformed(err.to_string()),
            SecretStorageError::ConfigDirNotFound => {
                GradusError::config_missing("<no config directory>")
            }
        }
    }
}

/// The secret configuration file shape.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretConfig {
    /// Groq API key, under the `groqApiKey` JSON key.
    #[serde(rename = "groqApiKey")]
    pub groq_api_key: Option<String>,
}

/// Storage for the secret configuration file (secret.json).
///
/// Responsibilities:
/// - Load secret.json from ~/.config/gradus/
/// - Parse JSON into the SecretConfig model
/// - Keep missing / unreadable / malformed failures distinct
///
/// Does NOT:
/// - Write or modify secret files (read-only)
/// - Validate the key against the provider
///
/// # Security Note
///
/// This storage reads plaintext JSON files. The secret.json file should
/// have appropriate file permissions (e.g., 600) to prevent unauthorized
/// access.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a new SecretStorage with the default path
    /// (~/.config/gradus/secret.json).
    pub fn new() -> Result<Self, SecretStorageError> {
        let path =
            GradusPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a new SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    ///
    /// # Returns
    ///
    /// - `Ok(SecretConfig)`: Successfully loaded and parsed
    /// - `Err(SecretStorageError::NotFound)`: File doesn't exist
    /// - `Err(SecretStorageError::IoError)`: Failed to read file
    /// - `Err(SecretStorageError::ParseError)`: Invalid JSON format
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Loads the configuration and extracts a usable API key.
    ///
    /// Falls back to the `GROQ_API_KEY` environment variable when the file
    /// exists but carries no key, or when the file itself is absent. A
    /// blank key counts as missing.
    pub fn api_key(&self) -> Result<String, GradusError> {
        let file_key = match self.load() {
            Ok(config) => config.groq_api_key,
            Err(SecretStorageError::NotFound(path)) => {
                if let Some(key) = env_key() {
                    return Ok(key);
                }
                return Err(GradusError::config_missing(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        match file_key {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => env_key().ok_or(GradusError::ApiKeyMissing),
        }
    }

    /// Returns the path to the secret file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

fn env_key() -> Option<String> {
    std::env::var("GROQ_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        let result = storage.load();
        match result {
            Err(SecretStorageError::NotFound(path)) => {
                assert_eq!(path, file_path);
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        let json_content = r#"{ "groqApiKey": "gsk-test-123" }"#;
        fs::write(&file_path, json_content).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let config = storage.load().unwrap();

        assert_eq!(config.groq_api_key, Some("gsk-test-123".to_string()));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        fs::write(&file_path, r#"{ invalid json"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let result = storage.load();

        assert!(matches!(result, Err(SecretStorageError::ParseError(_))));
    }

    #[test]
    fn test_api_key_missing_from_valid_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        fs::write(&file_path, r#"{}"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        // The file parses, but without a key (and without the env fallback
        // set in this test environment) the distinct ApiKeyMissing surfaces.
        if std::env::var("GROQ_API_KEY").is_err() {
            assert!(matches!(storage.api_key(), Err(GradusError::ApiKeyMissing)));
        }
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        fs::write(&file_path, r#"{ "groqApiKey": "   " }"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        if std::env::var("GROQ_API_KEY").is_err() {
            assert!(matches!(storage.api_key(), Err(GradusError::ApiKeyMissing)));
        }
    }

    #[test]
    fn test_errors_convert_to_config_taxonomy() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path);

        let err: GradusError = storage.load().unwrap_err().into();
        assert!(err.is_config());
        assert!(matches!(err, GradusError::ConfigMissing { .. }));
    }
}
