//! unity-probe core - Unity project version detection for CI pipelines.
//!
//! - **inputs**: Validate step inputs
//! - **locator**: Find `ProjectSettings/ProjectVersion.txt` and the project root
//! - **parser**: Extract editor version and changeset
//! - **registry**: Derive the build image name and look for a matching tag
//! - **report**: Report outputs, log groups and failures to the runner
//! - **probe**: Run the whole pipeline

pub mod error;
pub mod inputs;
pub mod locator;
pub mod parser;
pub mod probe;
pub mod registry;
pub mod report;

pub use error::{ProbeError, Result};
pub use inputs::{Inputs, RawInputs, DEFAULT_API_URL};
pub use locator::{find_project_version, project_root};
pub use parser::{parse_project_version, read_unity_version, ParsedVersion};
pub use probe::Probe;
pub use registry::{check_image, image_name, GithubPackages, ImageRegistry, PackageVersion};
pub use report::{GithubActions, JsonReport, OutputSink};
