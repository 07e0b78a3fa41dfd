use crate::checksum;
use crate::config::ReleaseConfig;
use crate::download_client::DownloadClient;
use crate::encoding::decode_page;
use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// A release tarball identified by package, version and architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub package: String,
    pub version: String,
    pub arch: String,
}

impl ReleaseAsset {
    pub fn new(package: &str, version: &str, arch: &str) -> Self {
        Self {
            package: package.to_string(),
            version: version.to_string(),
            arch: arch.to_string(),
        }
    }

    /// `<package>-<version>-<arch>.tar.gz`
    pub fn file_name(&self) -> String {
        format!("{}-{}-{}.tar.gz", self.package, self.version, self.arch)
    }

    /// Path of the tarball below the release download root: `<version>/<file_name>`.
    pub fn remote_path(&self) -> String {
        format!("{}/{}", self.version, self.file_name())
    }
}

impl From<&ReleaseConfig> for ReleaseAsset {
    fn from(config: &ReleaseConfig) -> Self {
        Self::new(&config.package, &config.version, &config.arch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    /// A local copy already matched the expected checksum.
    AlreadyVerified(PathBuf),
    Fetched(PathBuf),
    /// The release page does not link the asset. Nothing was written.
    NotFound,
}

/// Number of anchors in `page` whose href is exactly `href`.
pub fn count_asset_links(page: &str, href: &str) -> Result<usize> {
    let pattern = Regex::new(&format!(r#"href="{}""#, regex::escape(href)))
        .context("Failed to build release link pattern")?;
    Ok(pattern.find_iter(page).count())
}

/// Fetches the release described by `release` into `output_dir`.
///
/// The latest release page is scraped for a link to the asset; the tarball is
/// only downloaded when the page links it and no verified local copy exists.
pub async fn locate_and_fetch<D: DownloadClient>(
    release: &ReleaseConfig,
    output_dir: &Path,
    client: &D,
) -> Result<LocateOutcome> {
    let asset = ReleaseAsset::from(release);
    let destination = output_dir.join(asset.file_name());

    if checksum::verify(&destination, &release.md5)? {
        tracing::debug!("{} already verified", destination.display());
        return Ok(LocateOutcome::AlreadyVerified(destination));
    }

    let latest_url = release.latest_release_url();
    let page = client
        .fetch_page(&latest_url)
        .await
        .with_context(|| format!("Failed to fetch release page {latest_url}"))?;
    let html = decode_page(&page.body, page.content_type.as_deref());

    let remote_path = asset.remote_path();
    let links = count_asset_links(&html, &release.download_href(&remote_path))?;
    if links == 0 {
        tracing::debug!("{} does not link {}", latest_url, remote_path);
        return Ok(LocateOutcome::NotFound);
    }

    client
        .download(&release.download_url(&remote_path), &destination)
        .await?;
    Ok(LocateOutcome::Fetched(destination))
}
