//! Error types for the probe pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while probing a Unity project.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// A required input is missing or invalid.
    #[error("{0}")]
    Configuration(String),

    /// The descriptor search did not find exactly one file.
    #[error("Found {} matches for ProjectVersion.txt. Need exactly 1", .candidates.len())]
    AmbiguousVersionFile {
        /// Every file the search matched.
        candidates: Vec<PathBuf>,
    },

    /// The descriptor file has neither editor version line.
    #[error("Failed to find editor version in: '{}'", .path.display())]
    VersionNotFound { path: PathBuf },

    /// Registry request failed (transport, status or body).
    #[error("Registry request failed: {0}")]
    Network(String),

    /// Filesystem access failed.
    #[error("Failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an output failed.
    #[error("Failed to write output '{name}': {reason}")]
    Output { name: String, reason: String },
}

impl ProbeError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ProbeError::Configuration(message.into())
    }

    /// Creates an IO error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProbeError::Io {
            path: path.into(),
            source,
        }
    }

    /// Candidate paths to report individually before the failure message.
    pub fn candidates(&self) -> &[PathBuf] {
        match self {
            ProbeError::AmbiguousVersionFile { candidates } => candidates,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        ProbeError::Network(e.to_string())
    }
}

impl From<url::ParseError> for ProbeError {
    fn from(e: url::ParseError) -> Self {
        ProbeError::Configuration(format!("Invalid registry API URL: {}", e))
    }
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
