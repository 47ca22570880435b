//! Release lookup and template download against the GitHub REST API.

use crate::error::{Result, SpecifyError};
use serde::Deserialize;
use std::path::Path;

/// Upstream repository that publishes the template archives.
pub const TEMPLATE_OWNER: &str = "github";
pub const TEMPLATE_REPO: &str = "spec-kit";

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = "specify-cli";

// ---------------------------------------------------------------------------
// ReleaseRef / ReleaseSource
// ---------------------------------------------------------------------------

/// A resolved template release: one tag, one matched asset.
/// Created once per pipeline run, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRef {
    pub tag: String,
    pub asset_name: String,
    pub download_url: String,
}

/// Capability seam between the orchestrator and the network.
pub trait ReleaseSource {
    /// Resolve the latest published release and the asset matching
    /// `spec-kit-template-<assistant_id>*.zip`.
    fn resolve_latest(&self, assistant_id: &str) -> Result<ReleaseRef>;

    /// Stream the asset bytes to `dest`, overwriting any existing file.
    /// The caller owns the file and is responsible for deleting it.
    fn download(&self, release: &ReleaseRef, dest: &Path) -> Result<()>;
}

// ---------------------------------------------------------------------------
// GitHubReleases
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    name: String,
    browser_download_url: String,
}

pub struct GitHubReleases {
    client: reqwest::blocking::Client,
    api_base: String,
}

impl GitHubReleases {
    pub fn new() -> Self {
        Self::with_api_base(GITHUB_API)
    }

    /// Point the release lookup at a different API base (used by tests).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Connectivity probe for `specify check`. Never errors.
    pub fn reachable(&self) -> bool {
        self.client
            .get(&self.api_base)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .map(|resp| resp.status().is_success())
            .unwrap_or(false)
    }
}

impl Default for GitHubReleases {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseSource for GitHubReleases {
    fn resolve_latest(&self, assistant_id: &str) -> Result<ReleaseRef> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_base, TEMPLATE_OWNER, TEMPLATE_REPO
        );
        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .map_err(|e| SpecifyError::TemplateNotFound(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(SpecifyError::TemplateNotFound(format!(
                "release lookup for {}/{} returned {}",
                TEMPLATE_OWNER,
                TEMPLATE_REPO,
                resp.status()
            )));
        }
        let release: LatestRelease = resp
            .json()
            .map_err(|e| SpecifyError::TemplateNotFound(e.to_string()))?;

        let pattern = format!("spec-kit-template-{assistant_id}");
        let asset = release
            .assets
            .iter()
            .find(|a| a.name.contains(&pattern) && a.name.ends_with(".zip"))
            .ok_or_else(|| {
                SpecifyError::TemplateNotFound(format!(
                    "no template asset for AI '{}' in release {}",
                    assistant_id, release.tag_name
                ))
            })?;

        Ok(ReleaseRef {
            tag: release.tag_name.clone(),
            asset_name: asset.name.clone(),
            download_url: asset.browser_download_url.clone(),
        })
    }

    fn download(&self, release: &ReleaseRef, dest: &Path) -> Result<()> {
        let mut resp = self
            .client
            .get(&release.download_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .map_err(|e| SpecifyError::DownloadFailed(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(SpecifyError::DownloadFailed(format!(
                "{} fetching {}",
                resp.status(),
                release.asset_name
            )));
        }
        let mut file =
            std::fs::File::create(dest).map_err(|e| SpecifyError::DownloadFailed(e.to_string()))?;
        resp.copy_to(&mut file)
            .map_err(|e| SpecifyError::DownloadFailed(e.to_string()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn latest_release_body(tag: &str, assets: &[(&str, &str)]) -> String {
        let assets: Vec<String> = assets
            .iter()
            .map(|(name, url)| {
                format!(r#"{{"name":"{name}","browser_download_url":"{url}"}}"#)
            })
            .collect();
        format!(
            r#"{{"tag_name":"{tag}","assets":[{}]}}"#,
            assets.join(",")
        )
    }

    #[test]
    fn resolve_latest_picks_matching_zip_asset() {
        let mut server = mockito::Server::new();
        let body = latest_release_body(
            "v1.2.0",
            &[
                ("spec-kit-template-gemini-v1.2.0.zip", "http://x/gemini.zip"),
                ("spec-kit-template-claude-v1.2.0.zip", "http://x/claude.zip"),
                ("spec-kit-template-claude-v1.2.0.tar.gz", "http://x/claude.tar.gz"),
            ],
        );
        let _m = server
            .mock("GET", "/repos/github/spec-kit/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let gh = GitHubReleases::with_api_base(server.url());
        let release = gh.resolve_latest("claude").unwrap();
        assert_eq!(release.tag, "v1.2.0");
        assert_eq!(release.asset_name, "spec-kit-template-claude-v1.2.0.zip");
        assert_eq!(release.download_url, "http://x/claude.zip");
    }

    #[test]
    fn resolve_latest_without_matching_asset_is_template_not_found() {
        let mut server = mockito::Server::new();
        let body = latest_release_body(
            "v1.2.0",
            &[("spec-kit-template-gemini-v1.2.0.zip", "http://x/g.zip")],
        );
        let _m = server
            .mock("GET", "/repos/github/spec-kit/releases/latest")
            .with_status(200)
            .with_body(body)
            .create();

        let gh = GitHubReleases::with_api_base(server.url());
        let err = gh.resolve_latest("claude").unwrap_err();
        assert!(matches!(err, SpecifyError::TemplateNotFound(_)));
        assert!(err.to_string().contains("claude"));
    }

    #[test]
    fn resolve_latest_maps_missing_release_to_template_not_found() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/repos/github/spec-kit/releases/latest")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create();

        let gh = GitHubReleases::with_api_base(server.url());
        let err = gh.resolve_latest("claude").unwrap_err();
        assert!(matches!(err, SpecifyError::TemplateNotFound(_)));
    }

    #[test]
    fn download_writes_asset_bytes() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/assets/template.zip")
            .with_status(200)
            .with_body(b"zip-bytes".as_slice())
            .create();

        let release = ReleaseRef {
            tag: "v1.0.0".into(),
            asset_name: "template.zip".into(),
            download_url: format!("{}/assets/template.zip", server.url()),
        };
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("template.zip");

        let gh = GitHubReleases::with_api_base(server.url());
        gh.download(&release, &dest).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"zip-bytes");
    }

    #[test]
    fn download_overwrites_existing_file() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/assets/template.zip")
            .with_status(200)
            .with_body(b"fresh".as_slice())
            .create();

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("template.zip");
        std::fs::write(&dest, b"stale-and-longer").unwrap();

        let release = ReleaseRef {
            tag: "v1.0.0".into(),
            asset_name: "template.zip".into(),
            download_url: format!("{}/assets/template.zip", server.url()),
        };
        let gh = GitHubReleases::with_api_base(server.url());
        gh.download(&release, &dest).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"fresh");
    }

    #[test]
    fn download_non_success_is_download_failed() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/assets/template.zip")
            .with_status(500)
            .create();

        let release = ReleaseRef {
            tag: "v1.0.0".into(),
            asset_name: "template.zip".into(),
            download_url: format!("{}/assets/template.zip", server.url()),
        };
        let dir = TempDir::new().unwrap();
        let gh = GitHubReleases::with_api_base(server.url());
        let err = gh
            .download(&release, &dir.path().join("t.zip"))
            .unwrap_err();
        assert!(matches!(err, SpecifyError::DownloadFailed(_)));
    }
}
