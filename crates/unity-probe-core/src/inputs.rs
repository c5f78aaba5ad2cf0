//! Validated probe inputs.
//!
//! Inputs arrive as loosely-typed strings (GitHub Actions exports every step
//! input as an `INPUT_*` environment variable, unset ones as empty strings).
//! [`RawInputs`] holds them as received; [`Inputs::resolve`] turns them into
//! checked values.

use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::error::{ProbeError, Result};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Inputs as supplied by the invoking environment.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub path: Option<String>,
    pub project_version: Option<String>,
    pub check_image: Option<String>,
    pub image_token: Option<String>,
    pub api_url: Option<String>,
}

/// Checked probe configuration.
#[derive(Debug, Clone)]
pub struct Inputs {
    /// Directory to search for the project.
    pub path: PathBuf,
    /// Explicit descriptor path, already joined onto `path` and known to exist.
    pub project_version: Option<PathBuf>,
    /// Whether to look the image up in the registry.
    pub check_image: bool,
    /// Registry access token.
    pub image_token: Option<String>,
    /// REST API base URL.
    pub api_url: Url,
}

impl Inputs {
    /// Validates raw inputs.
    ///
    /// # Errors
    /// Returns [`ProbeError::Configuration`] if `path` is missing, if an
    /// explicit `project-version` does not exist, or if the API URL is invalid.
    pub fn resolve(raw: RawInputs) -> Result<Self> {
        let path = non_empty(raw.path)
            .map(PathBuf::from)
            .ok_or_else(|| ProbeError::config("No path or project-version supplied to the action"))?;

        let project_version = match non_empty(raw.project_version) {
            Some(relative) => Some(explicit_version_path(&path, &relative)?),
            None => None,
        };

        let check_image = non_empty(raw.check_image)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let api_url = Url::parse(
            non_empty(raw.api_url)
                .as_deref()
                .unwrap_or(DEFAULT_API_URL),
        )?;

        debug!(
            path = %path.display(),
            explicit = project_version.is_some(),
            check_image,
            "Resolved inputs"
        );

        Ok(Self {
            path,
            project_version,
            check_image,
            image_token: non_empty(raw.image_token),
            api_url,
        })
    }

    /// Returns the registry token, failing if none was supplied.
    ///
    /// # Errors
    /// Returns [`ProbeError::Configuration`] when the token is missing.
    pub fn require_token(&self) -> Result<&str> {
        self.image_token
            .as_deref()
            .ok_or_else(|| ProbeError::config("Specifying check-image requires image-token"))
    }
}

/// Interprets a boolean-as-string input. Only `true` (any case) is true.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Trims an input; blank values count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn explicit_version_path(root: &Path, relative: &str) -> Result<PathBuf> {
    let joined = root.join(relative);
    if std::fs::metadata(&joined).is_err() {
        return Err(ProbeError::config(format!(
            "project-version specified but path '{}' does not exist",
            joined.display()
        )));
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn raw(path: &str) -> RawInputs {
        RawInputs {
            path: Some(path.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_path_is_configuration_error() {
        let err = Inputs::resolve(RawInputs::default()).unwrap_err();
        assert!(matches!(err, ProbeError::Configuration(_)));
    }

    #[test]
    fn test_empty_path_is_treated_as_missing() {
        let err = Inputs::resolve(raw("  ")).unwrap_err();
        assert!(matches!(err, ProbeError::Configuration(_)));
    }

    #[test]
    fn test_defaults() {
        let inputs = Inputs::resolve(raw("/work")).unwrap();
        assert_eq!(inputs.path, PathBuf::from("/work"));
        assert!(inputs.project_version.is_none());
        assert!(!inputs.check_image);
        assert!(inputs.image_token.is_none());
        assert_eq!(inputs.api_url.as_str(), "https://api.github.com/");
    }

    #[test]
    fn test_explicit_project_version_joined_onto_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("Game/ProjectSettings")).unwrap();
        fs::write(
            temp_dir.path().join("Game/ProjectSettings/ProjectVersion.txt"),
            "m_EditorVersion: 2019.4.1f1\n",
        )
        .unwrap();

        let mut input = raw(temp_dir.path().to_str().unwrap());
        input.project_version = Some("Game/ProjectSettings/ProjectVersion.txt".to_string());
        let inputs = Inputs::resolve(input).unwrap();
        assert_eq!(
            inputs.project_version,
            Some(temp_dir.path().join("Game/ProjectSettings/ProjectVersion.txt"))
        );
    }

    #[test]
    fn test_explicit_project_version_must_exist() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut input = raw(temp_dir.path().to_str().unwrap());
        input.project_version = Some("missing.txt".to_string());

        let err = Inputs::resolve(input).unwrap_err();
        assert!(matches!(err, ProbeError::Configuration(_)));
        assert!(err.to_string().contains("does not exist"));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_padded_inputs_are_trimmed() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("Game/ProjectSettings")).unwrap();
        fs::write(
            temp_dir.path().join("Game/ProjectSettings/ProjectVersion.txt"),
            "m_EditorVersion: 2019.4.1f1\n",
        )
        .unwrap();

        let inputs = Inputs::resolve(RawInputs {
            path: Some(format!("{}\n", temp_dir.path().display())),
            project_version: Some("  Game/ProjectSettings/ProjectVersion.txt\n".to_string()),
            check_image: Some(" true\n".to_string()),
            image_token: Some("ghp_secret\n".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(inputs.path, temp_dir.path());
        assert_eq!(
            inputs.project_version,
            Some(temp_dir.path().join("Game/ProjectSettings/ProjectVersion.txt"))
        );
        assert!(inputs.check_image);
        assert_eq!(inputs.require_token().unwrap(), "ghp_secret");
    }

    #[test]
    fn test_check_image_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("True "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("yes"));
        assert!(!parse_flag("1"));
    }

    #[test]
    fn test_require_token() {
        let mut input = raw("/work");
        input.check_image = Some("true".to_string());
        let inputs = Inputs::resolve(input.clone()).unwrap();
        let err = inputs.require_token().unwrap_err();
        assert!(err.to_string().contains("image-token"));

        input.image_token = Some("ghp_secret".to_string());
        let inputs = Inputs::resolve(input).unwrap();
        assert_eq!(inputs.require_token().unwrap(), "ghp_secret");
    }

    #[test]
    fn test_empty_token_is_missing() {
        let mut input = raw("/work");
        input.image_token = Some(String::new());
        let inputs = Inputs::resolve(input).unwrap();
        assert!(inputs.require_token().is_err());
    }

    #[test]
    fn test_invalid_api_url() {
        let mut input = raw("/work");
        input.api_url = Some("::not-a-url".to_string());
        let err = Inputs::resolve(input).unwrap_err();
        assert!(matches!(err, ProbeError::Configuration(_)));
    }
}
