//! File-system adapters for gradus: config paths, secret/config storage and
//! the workspace playground sink.

pub mod paths;
pub mod playground;
pub mod storage;

pub use paths::GradusPaths;
pub use playground::WorkspacePlayground;
pub use storage::{AppConfig, ConfigStorage, SecretConfig, SecretStorage};
