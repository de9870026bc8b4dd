//! File-based configuration storage.

pub mod config_storage;
pub mod secret_storage;

pub use config_storage::{AppConfig, ConfigStorage, ConfigStorageError};
pub use secret_storage::{SecretConfig, SecretStorage, SecretStorageError};
