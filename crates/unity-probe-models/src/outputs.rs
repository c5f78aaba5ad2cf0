//! Step outputs reported to the pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::version::UnityVersion;

/// Output name for the canonical project root.
pub const PROJECT_PATH: &str = "project-path";
/// Output name for the editor version.
pub const UNITY_VERSION: &str = "unity-version";
/// Output name for the editor changeset (empty when unknown).
pub const UNITY_CHANGESET: &str = "unity-changeset";
/// Output name for the `Library` cache presence flag.
pub const LIBRARY_FOLDER_EXISTS: &str = "library-folder-exists";
/// Output name for the derived build image coordinate.
pub const IMAGE_NAME: &str = "image-name";
/// Output name for the registry tag check result.
pub const IMAGE_EXISTS: &str = "image-exists";

/// Everything a successful run reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProbeOutputs {
    pub project_path: PathBuf,
    pub unity_version: String,
    #[serde(default)]
    pub unity_changeset: Option<String>,
    pub library_folder_exists: bool,
    pub image_name: String,
    /// Only set when the image check was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_exists: Option<bool>,
}

impl ProbeOutputs {
    /// Builds the outputs for a detected version.
    pub fn new(
        version: &UnityVersion,
        library_folder_exists: bool,
        image_name: impl Into<String>,
        image_exists: Option<bool>,
    ) -> Self {
        Self {
            project_path: version.project_path.clone(),
            unity_version: version.version.clone(),
            unity_changeset: version.changeset.clone(),
            library_folder_exists,
            image_name: image_name.into(),
            image_exists,
        }
    }

    /// Name/value pairs in reporting order, excluding `image-exists`.
    ///
    /// Booleans are rendered as `true`/`false` and a missing changeset as
    /// an empty string.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (PROJECT_PATH, self.project_path.display().to_string()),
            (UNITY_VERSION, self.unity_version.clone()),
            (
                UNITY_CHANGESET,
                self.unity_changeset.clone().unwrap_or_default(),
            ),
            (LIBRARY_FOLDER_EXISTS, self.library_folder_exists.to_string()),
            (IMAGE_NAME, self.image_name.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(changeset: Option<&str>, image_exists: Option<bool>) -> ProbeOutputs {
        let mut version = UnityVersion::new("/work/game", "2021.3.4f1");
        if let Some(c) = changeset {
            version = version.with_changeset(c);
        }
        ProbeOutputs::new(
            &version,
            true,
            "ghcr.io/playeveryware/unity:2021.3.4f1",
            image_exists,
        )
    }

    #[test]
    fn test_entries_order_and_rendering() {
        let outputs = sample(Some("abc1234def5"), None);
        let entries = outputs.entries();
        let names: Vec<&str> = entries.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                PROJECT_PATH,
                UNITY_VERSION,
                UNITY_CHANGESET,
                LIBRARY_FOLDER_EXISTS,
                IMAGE_NAME
            ]
        );
        assert_eq!(entries[2].1, "abc1234def5");
        assert_eq!(entries[3].1, "true");
    }

    #[test]
    fn test_missing_changeset_renders_empty() {
        let outputs = sample(None, None);
        let changeset = outputs
            .entries()
            .into_iter()
            .find(|(n, _)| *n == UNITY_CHANGESET)
            .map(|(_, v)| v);
        assert_eq!(changeset.as_deref(), Some(""));
    }

    #[test]
    fn test_serialized_keys_match_output_names() {
        let json = serde_json::to_value(sample(None, Some(false))).unwrap();
        assert_eq!(json[UNITY_VERSION], "2021.3.4f1");
        assert_eq!(json[LIBRARY_FOLDER_EXISTS], true);
        assert_eq!(json[IMAGE_EXISTS], false);
    }

    #[test]
    fn test_image_exists_omitted_when_not_checked() {
        let json = serde_json::to_value(sample(None, None)).unwrap();
        assert!(json.get(IMAGE_EXISTS).is_none());
    }
}
