//! Unity editor version of a project checkout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Editor version information read from a project's `ProjectVersion.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnityVersion {
    /// Canonical path of the Unity project root.
    pub project_path: PathBuf,

    /// Editor version string (e.g., "2021.3.4f1").
    pub version: String,

    /// Editor changeset, only present in newer descriptor files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changeset: Option<String>,
}

impl UnityVersion {
    /// Creates a version record without a changeset.
    pub fn new(project_path: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            version: version.into(),
            changeset: None,
        }
    }

    /// Sets the editor changeset.
    pub fn with_changeset(mut self, changeset: impl Into<String>) -> Self {
        self.changeset = Some(changeset.into());
        self
    }

    /// Path of the project's `Library` cache folder.
    pub fn library_path(&self) -> PathBuf {
        self.project_path.join("Library")
    }
}

impl fmt::Display for UnityVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.changeset {
            Some(changeset) => write!(f, "{} ({})", self.version, changeset),
            None => write!(f, "{}", self.version),
        }
    }
}
