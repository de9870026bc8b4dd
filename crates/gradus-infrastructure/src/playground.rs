//! Workspace file sink: the single playground artifact.

use gradus_core::artifact::PlaygroundSink;
use gradus_core::{GradusError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A [`PlaygroundSink`] backed by a workspace directory.
///
/// At most one `playground.*` file exists in the workspace at any time:
/// writing a new artifact first removes every prior `playground.*`,
/// including one with a different extension left over from an earlier
/// session in another language.
pub struct WorkspacePlayground {
    root: PathBuf,
}

impl WorkspacePlayground {
    /// Creates a sink rooted at the workspace directory.
    ///
    /// Fails with [`GradusError::WorkspaceUnavailable`] when the root does
    /// not exist or is not a directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(GradusError::WorkspaceUnavailable {
                path: root.display().to_string(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn remove_prior_artifacts(&self) -> Result<()> {
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file()
                && path
                    .file_stem()
                    .is_some_and(|stem| stem == "playground")
            {
                fs::remove_file(&path).map_err(|e| {
                    GradusError::file_write(path.display().to_string(), e.to_string())
                })?;
                tracing::debug!(path = %path.display(), "removed prior playground artifact");
            }
        }
        Ok(())
    }
}

impl PlaygroundSink for WorkspacePlayground {
    fn replace_artifact(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        self.remove_prior_artifacts()?;

        let path = self.root.join(file_name);
        fs::write(&path, content)
            .map_err(|e| GradusError::file_write(path.display().to_string(), e.to_string()))?;
        Ok(path)
    }

    fn read_submission(&self, file_name: &str) -> Result<String> {
        let path = self.root.join(file_name);
        if !path.exists() {
            return Err(GradusError::NoSubmission {
                path: path.display().to_string(),
            });
        }
        Ok(fs::read_to_string(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_workspace_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let result = WorkspacePlayground::new(missing);
        assert!(matches!(
            result,
            Err(GradusError::WorkspaceUnavailable { .. })
        ));
    }

    #[test]
    fn test_write_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let sink = WorkspacePlayground::new(temp_dir.path()).unwrap();

        let path = sink.replace_artifact("playground.py", "# milestone 1\n").unwrap();
        assert_eq!(path, temp_dir.path().join("playground.py"));

        let content = sink.read_submission("playground.py").unwrap();
        assert_eq!(content, "# milestone 1\n");
    }

    #[test]
    fn test_replace_removes_prior_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let sink = WorkspacePlayground::new(temp_dir.path()).unwrap();

        sink.replace_artifact("playground.py", "# old\n").unwrap();
        sink.replace_artifact("playground.py", "# new\n").unwrap();

        assert_eq!(sink.read_submission("playground.py").unwrap(), "# new\n");
    }

    #[test]
    fn test_replace_removes_artifact_with_other_extension() {
        let temp_dir = TempDir::new().unwrap();
        let sink = WorkspacePlayground::new(temp_dir.path()).unwrap();

        sink.replace_artifact("playground.py", "# python\n").unwrap();
        sink.replace_artifact("playground.rs", "// rust\n").unwrap();

        assert!(!temp_dir.path().join("playground.py").exists());
        assert!(temp_dir.path().join("playground.rs").exists());
    }

    #[test]
    fn test_other_files_are_untouched() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "keep me").unwrap();
        let sink = WorkspacePlayground::new(temp_dir.path()).unwrap();

        sink.replace_artifact("playground.go", "// go\n").unwrap();

        assert!(temp_dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_missing_submission() {
        let temp_dir = TempDir::new().unwrap();
        let sink = WorkspacePlayground::new(temp_dir.path()).unwrap();

        let result = sink.read_submission("playground.py");
        assert!(matches!(result, Err(GradusError::NoSubmission { .. })));
    }
}
