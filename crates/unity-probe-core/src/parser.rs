//! Editor version extraction from `ProjectVersion.txt`.
//!
//! Newer editors write both lines:
//! ```text
//! m_EditorVersion: 2021.3.4f1
//! m_EditorVersionWithRevision: 2021.3.4f1 (abc1234def5)
//! ```
//! Older editors only write `m_EditorVersion`. The revision line is looked for
//! first so the changeset is kept whenever the file has one.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use tracing::info;
use unity_probe_models::UnityVersion;

use crate::error::{ProbeError, Result};
use crate::locator::project_root;

/// `m_EditorVersionWithRevision: <version> (<changeset>)`
static REVISION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^m_EditorVersionWithRevision: ([^ ]*) \(([^)]*)\)$")
        .expect("Invalid revision regex")
});

/// `m_EditorVersion: <version>`
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^m_EditorVersion: (.*)$").expect("Invalid version regex"));

/// Version and changeset found in descriptor text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVersion {
    pub version: String,
    pub changeset: Option<String>,
}

/// Parses descriptor text.
///
/// Returns `None` when neither version line is present.
pub fn parse_project_version(contents: &str) -> Option<ParsedVersion> {
    let lines: Vec<&str> = contents.split('\n').map(str::trim_end).collect();

    let with_revision = lines.iter().find_map(|line| {
        REVISION_REGEX.captures(line).map(|caps| ParsedVersion {
            version: caps[1].to_string(),
            changeset: Some(caps[2].to_string()),
        })
    });
    if with_revision.is_some() {
        return with_revision;
    }

    lines.iter().find_map(|line| {
        VERSION_REGEX.captures(line).map(|caps| ParsedVersion {
            version: caps[1].to_string(),
            changeset: None,
        })
    })
}

/// Reads a descriptor file and builds the project's [`UnityVersion`].
///
/// # Errors
/// Returns [`ProbeError::Io`] if the file or project root cannot be read, and
/// [`ProbeError::VersionNotFound`] if the file has no version line.
pub fn read_unity_version(version_file: &Path) -> Result<UnityVersion> {
    let project_path = project_root(version_file)?;
    let bytes = fs::read(version_file).map_err(|e| ProbeError::io(version_file, e))?;
    let contents = String::from_utf8_lossy(&bytes);

    let parsed = parse_project_version(&contents).ok_or_else(|| ProbeError::VersionNotFound {
        path: version_file.to_path_buf(),
    })?;

    let mut unity_version = UnityVersion::new(project_path, parsed.version);
    match parsed.changeset {
        Some(changeset) => {
            info!(
                version = %unity_version.version,
                changeset = %changeset,
                "Found Unity version (with changeset)"
            );
            unity_version = unity_version.with_changeset(changeset);
        }
        None => info!(version = %unity_version.version, "Found Unity version"),
    }

    Ok(unity_version)
}
