//! Build image lookup in the GitHub container registry.
//!
//! Prebuilt Unity build images live at [`IMAGE_REPOSITORY`], tagged with the
//! editor version. Whether a tag exists is answered from the organization's
//! package version listing.

use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::error::{ProbeError, Result};

/// Container repository holding the build images.
pub const IMAGE_REPOSITORY: &str = "ghcr.io/playeveryware/unity";

/// Organization owning the image package.
pub const PACKAGE_ORG: &str = "PlayEveryWare";

/// Container package name.
pub const PACKAGE_NAME: &str = "unity";

/// GitHub REST API version header value.
const API_VERSION: &str = "2022-11-28";

/// Image coordinate for an editor version.
pub fn image_name(version: &str) -> String {
    format!("{}:{}", IMAGE_REPOSITORY, version)
}

/// One entry of the package version listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageVersion {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metadata: PackageMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub container: ContainerMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContainerMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PackageVersion {
    /// Creates a version entry with the given tags.
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metadata: PackageMetadata {
                container: ContainerMetadata {
                    tags: tags.into_iter().map(Into::into).collect(),
                },
            },
            ..Default::default()
        }
    }

    /// Container tags of this version.
    pub fn tags(&self) -> &[String] {
        &self.metadata.container.tags
    }
}

/// Source of package versions for the image repository.
pub trait ImageRegistry {
    /// Lists package versions (a single page, no pagination).
    fn list_versions(&self) -> Result<Vec<PackageVersion>>;
}

/// Returns true if any tag of any version equals `version` exactly.
pub fn has_tag(versions: &[PackageVersion], version: &str) -> bool {
    versions
        .iter()
        .flat_map(PackageVersion::tags)
        .any(|tag| tag == version)
}

/// Checks whether an image tagged `version` exists.
///
/// # Errors
/// Propagates registry failures.
pub fn check_image(registry: &dyn ImageRegistry, version: &str) -> Result<bool> {
    let versions = registry.list_versions()?;
    debug!(count = versions.len(), "Listed package versions");

    let found = has_tag(&versions, version);
    if found {
        info!(version = %version, "Found matching tag for Unity version");
    } else {
        info!(version = %version, "No matching tag found for Unity version");
    }
    Ok(found)
}

/// GitHub Packages REST client for the image package.
pub struct GithubPackages {
    client: reqwest::blocking::Client,
    endpoint: Url,
    token: String,
}

impl GithubPackages {
    /// Creates a client against `api_url` authenticated with `token`.
    ///
    /// # Errors
    /// Returns [`ProbeError::Configuration`] if the token is empty or the
    /// endpoint cannot be built, and [`ProbeError::Network`] if the HTTP
    /// client cannot be created.
    pub fn new(api_url: &Url, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(ProbeError::config(
                "Specifying check-image requires image-token",
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("unity-probe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: versions_endpoint(api_url)?,
            token: token.to_string(),
        })
    }

    /// URL of the package version listing.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ImageRegistry for GithubPackages {
    fn list_versions(&self) -> Result<Vec<PackageVersion>> {
        debug!(url = %self.endpoint, "Requesting package versions");

        let response = self
            .client
            .get(self.endpoint.clone())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()?
            .error_for_status()?;

        let versions: Vec<PackageVersion> = response.json()?;
        Ok(versions)
    }
}

/// Builds `{api_url}/orgs/{org}/packages/container/{package}/versions`.
pub fn versions_endpoint(api_url: &Url) -> Result<Url> {
    let mut base = api_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let endpoint = base.join(&format!(
        "orgs/{}/packages/container/{}/versions",
        PACKAGE_ORG, PACKAGE_NAME
    ))?;
    Ok(endpoint)
}
