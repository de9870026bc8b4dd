//! Unified path management for gradus configuration files.
//!
//! All gradus configuration lives under the platform config directory
//! (`~/.config/gradus/` on Linux/macOS).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for gradus.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/gradus/            # Config directory
/// ├── secret.json              # API key ({"groqApiKey": "..."})
/// └── config.toml              # Optional model/sampling overrides
/// ```
pub struct GradusPaths;

impl GradusPaths {
    /// Returns the gradus configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("gradus"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to secret.json: `~/.config/gradus/secret.json`.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to config.toml: `~/.config/gradus/config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
