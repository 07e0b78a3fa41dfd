use crate::checksum;
use crate::download_client::DownloadClient;
use crate::error::DownloadError;
use anyhow::Result;
use std::path::{Path, PathBuf};
use url::Url;

/// A URL and the local file it should end up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub destination: PathBuf,
}

impl DownloadRequest {
    /// Targets `output_dir/<last path segment of url>`.
    pub fn new(url: &str, output_dir: &Path) -> Result<Self, DownloadError> {
        let file_name = file_name_from_url(url)?;
        Ok(Self {
            url: url.to_string(),
            destination: output_dir.join(file_name),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination already had the expected checksum; nothing was downloaded.
    AlreadyVerified(PathBuf),
    Downloaded(PathBuf),
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::AlreadyVerified(path) | FetchOutcome::Downloaded(path) => path,
        }
    }
}

/// Last non-empty path segment of `url`, ignoring query and fragment.
pub fn file_name_from_url(url: &str) -> Result<String, DownloadError> {
    let parsed = Url::parse(url).map_err(|e| DownloadError::invalid_url(url, e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DownloadError::invalid_url(
            url,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    parsed
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(|s| s.to_string())
        .ok_or_else(|| DownloadError::invalid_url(url, "URL path has no file name"))
}

/// Downloads `url` into `output_dir` unless a file with `expected_md5` is already there.
pub async fn fetch_url<D: DownloadClient>(
    url: &str,
    expected_md5: &str,
    output_dir: &Path,
    client: &D,
) -> Result<FetchOutcome> {
    let request = DownloadRequest::new(url, output_dir)?;

    if checksum::verify(&request.destination, expected_md5)? {
        tracing::debug!("{} already verified", request.destination.display());
        return Ok(FetchOutcome::AlreadyVerified(request.destination));
    }

    client.download(&request.url, &request.destination).await?;
    Ok(FetchOutcome::Downloaded(request.destination))
}
