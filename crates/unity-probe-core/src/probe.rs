//! The probe pipeline: locate, parse, optionally check the image, report.

use tracing::info;
use unity_probe_models::{outputs, ProbeOutputs, UnityVersion};

use crate::error::Result;
use crate::inputs::Inputs;
use crate::locator::find_project_version;
use crate::parser::read_unity_version;
use crate::registry::{check_image, image_name, GithubPackages, ImageRegistry};
use crate::report::OutputSink;

/// One probe run over validated inputs.
pub struct Probe {
    inputs: Inputs,
    registry: Option<Box<dyn ImageRegistry>>,
}

impl Probe {
    /// Creates a probe that talks to GitHub Packages when checking images.
    pub fn new(inputs: Inputs) -> Self {
        Self {
            inputs,
            registry: None,
        }
    }

    /// Uses `registry` instead of GitHub Packages.
    pub fn with_registry(mut self, registry: Box<dyn ImageRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Runs the pipeline and reports outputs to `sink`.
    ///
    /// `image-exists` is reported as soon as the check completes; the other
    /// outputs after it. A failure stops the run, leaving earlier outputs set.
    ///
    /// # Errors
    /// Returns the first error raised by any stage.
    pub fn run(&self, sink: &mut dyn OutputSink) -> Result<ProbeOutputs> {
        sink.start_group("Determining Unity project version");
        let detected = self.determine_version();
        sink.end_group();
        let unity_version = detected?;

        let library_folder_exists = unity_version.library_path().is_dir();
        let image = image_name(&unity_version.version);

        let image_exists = if self.inputs.check_image {
            sink.start_group(&format!(
                "Checking for Unity image '{}'",
                unity_version.version
            ));
            let checked = self.check_image(&unity_version.version);
            sink.end_group();
            let exists = checked?;
            sink.set_output(outputs::IMAGE_EXISTS, &exists.to_string())?;
            Some(exists)
        } else {
            None
        };

        let result = ProbeOutputs::new(&unity_version, library_folder_exists, image, image_exists);
        for (name, value) in result.entries() {
            sink.set_output(name, &value)?;
        }

        info!(
            project = %result.project_path.display(),
            version = %result.unity_version,
            library = result.library_folder_exists,
            image = %result.image_name,
            "Probe complete"
        );
        Ok(result)
    }

    fn determine_version(&self) -> Result<UnityVersion> {
        let version_file = find_project_version(&self.inputs)?;
        info!(path = %version_file.display(), "Reading project version");
        read_unity_version(&version_file)
    }

    fn check_image(&self, version: &str) -> Result<bool> {
        let token = self.inputs.require_token()?;
        match &self.registry {
            Some(registry) => check_image(registry.as_ref(), version),
            None => {
                let registry = GithubPackages::new(&self.inputs.api_url, token)?;
                check_image(&registry, version)
            }
        }
    }
}
