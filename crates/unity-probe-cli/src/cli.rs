//! Command-line interface definition using clap.
//!
//! Every input can also come from the `INPUT_*` variable a GitHub Actions
//! runner exports for the step.

use clap::Parser;
use std::path::PathBuf;

use unity_probe_core::{RawInputs, DEFAULT_API_URL};

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// unity-probe - Detect a Unity project's editor version and build image
#[derive(Parser, Debug)]
#[command(name = "unity-probe")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Directory containing the Unity project (searched recursively)
    #[arg(long, env = "INPUT_PATH")]
    pub path: Option<String>,

    /// Explicit ProjectVersion.txt path, relative to --path
    #[arg(long, env = "INPUT_PROJECT-VERSION")]
    pub project_version: Option<String>,

    /// Look for a matching build image in the registry ("true" to enable)
    #[arg(long, env = "INPUT_CHECK-IMAGE")]
    pub check_image: Option<String>,

    /// Token used to list registry package versions
    #[arg(long, env = "INPUT_IMAGE-TOKEN", hide_env_values = true)]
    pub image_token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File receiving step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// How outputs and failures are reported
    #[arg(short, long, value_enum, default_value = "github")]
    pub format: OutputFormat,

    /// Enable verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Reporting format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// GitHub Actions workflow commands and GITHUB_OUTPUT records
    #[default]
    Github,
    /// A single JSON document on stdout
    Json,
}

impl Cli {
    /// Inputs as supplied, before validation.
    pub fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            path: self.path.clone(),
            project_version: self.project_version.clone(),
            check_image: self.check_image.clone(),
            image_token: self.image_token.clone(),
            api_url: Some(self.api_url.clone()),
        }
    }

    /// Returns the log level based on verbosity and runner debug mode.
    pub fn log_level(&self, runner_debug: bool) -> tracing::Level {
        match (self.verbose, runner_debug) {
            (0, false) => tracing::Level::INFO,
            (0, true) | (1, _) => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from([
            "unity-probe",
            "--path",
            "/work",
            "--project-version",
            "Game/ProjectSettings/ProjectVersion.txt",
            "--check-image",
            "true",
            "--image-token",
            "ghp_secret",
        ]);
        let raw = cli.raw_inputs();
        assert_eq!(raw.path.as_deref(), Some("/work"));
        assert_eq!(
            raw.project_version.as_deref(),
            Some("Game/ProjectSettings/ProjectVersion.txt")
        );
        assert_eq!(raw.check_image.as_deref(), Some("true"));
        assert_eq!(raw.image_token.as_deref(), Some("ghp_secret"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["unity-probe", "--path", "."]).unwrap();
        assert_eq!(cli.format, OutputFormat::Github);
        assert_eq!(cli.verbose, 0);
        assert!(cli.raw_inputs().api_url.is_some());
    }

    #[test]
    fn test_cli_json_format() {
        let cli = Cli::parse_from(["unity-probe", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["unity-probe", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(false), tracing::Level::TRACE);
    }

    #[test]
    fn test_runner_debug_raises_level() {
        let cli = Cli::parse_from(["unity-probe"]);
        assert_eq!(cli.log_level(false), tracing::Level::INFO);
        assert_eq!(cli.log_level(true), tracing::Level::DEBUG);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_author_from_workspace() {
        assert_eq!(Cli::command().get_author(), Some("PlayEveryWare"));
    }
}
