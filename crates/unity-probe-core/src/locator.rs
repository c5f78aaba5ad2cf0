//! Locating a project's `ProjectSettings/ProjectVersion.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error};
use walkdir::{DirEntry, WalkDir};

use crate::error::{ProbeError, Result};
use crate::inputs::Inputs;

/// Directory holding the descriptor inside a Unity project.
pub const SETTINGS_DIR: &str = "ProjectSettings";

/// Descriptor file name.
pub const VERSION_FILE: &str = "ProjectVersion.txt";

/// Returns the descriptor path for the given inputs.
///
/// An explicit `project-version` wins; otherwise `path` is searched.
///
/// # Errors
/// Returns [`ProbeError::AmbiguousVersionFile`] when the search does not
/// find exactly one descriptor.
pub fn find_project_version(inputs: &Inputs) -> Result<PathBuf> {
    if let Some(explicit) = &inputs.project_version {
        debug!(path = %explicit.display(), "Using explicit project-version");
        return Ok(explicit.clone());
    }

    let mut candidates = search(&inputs.path);
    if candidates.len() != 1 {
        for candidate in &candidates {
            error!(path = %candidate.display(), "Candidate ProjectVersion.txt");
        }
        return Err(ProbeError::AmbiguousVersionFile { candidates });
    }

    Ok(candidates.remove(0))
}

/// Finds every `**/ProjectSettings/ProjectVersion.txt` below `root`.
///
/// Hidden directories below the root are skipped and directory symlinks are
/// not followed. Results are sorted.
pub fn search(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| is_file_or_link_to_file(entry) && is_version_file(entry.path()))
        .map(DirEntry::into_path)
        .collect();
    found.sort();
    found
}

/// Canonical project root for a descriptor path.
///
/// The descriptor's directory is resolved first, then its parent, so symlinks
/// anywhere along the way are reflected in the result.
///
/// # Errors
/// Returns [`ProbeError::Io`] if either path cannot be resolved.
pub fn project_root(version_file: &Path) -> Result<PathBuf> {
    let real = fs::canonicalize(version_file).map_err(|e| ProbeError::io(version_file, e))?;
    let settings_dir = real.parent().unwrap_or(Path::new("/"));
    let parent = settings_dir.join("..");
    fs::canonicalize(&parent).map_err(|e| ProbeError::io(parent, e))
}

fn is_version_file(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == VERSION_FILE)
        && path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name == SETTINGS_DIR)
}

fn is_file_or_link_to_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}
