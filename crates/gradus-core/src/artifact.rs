//! The workspace file sink seam.

use crate::error::Result;
use std::path::PathBuf;

/// An external collaborator owning the single playground artifact.
///
/// Exactly one artifact exists per session at any time: writing milestone N
/// replaces the artifact for milestone N-1 (overwrite-by-replace, never
/// append).
pub trait PlaygroundSink: Send + Sync {
    /// Deletes any prior playground artifact and writes `content` under
    /// `file_name`. Returns the full path of the written artifact.
    fn replace_artifact(&self, file_name: &str, content: &str) -> Result<PathBuf>;

    /// Reads back the user's edited artifact as the submission to evaluate.
    ///
    /// Fails with [`GradusError::NoSubmission`](crate::GradusError::NoSubmission)
    /// when no artifact exists.
    fn read_submission(&self, file_name: &str) -> Result<String>;
}
