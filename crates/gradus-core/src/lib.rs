//! Gradus domain layer.
//!
//! Everything stateful lives here: the [`session::Session`] value, the
//! [`engine::ProgressionEngine`] state machine that mutates it, and the
//! seams ([`completion::CompletionService`], [`artifact::PlaygroundSink`])
//! the infrastructure and interaction crates implement.

pub mod artifact;
pub mod completion;
pub mod engine;
pub mod error;
pub mod language;
pub mod prompt;
pub mod session;

// Re-export common error type
pub use error::{GradusError, Result};
