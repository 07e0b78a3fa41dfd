use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory downloaded files are written to
    pub output_dir: PathBuf,

    /// Platform-specific architecture string.
    pub arch: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new_for_path(Path::new("."))
    }
}

impl Config {
    pub fn new_for_path(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Sets up a Config writing into `output_dir`, or the current directory when absent.
    /// The directory is created if it does not exist yet.
    pub fn setup(output_dir: Option<&Path>) -> Result<Self> {
        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        Ok(Self::new_for_path(&output_dir))
    }
}

/// Everything needed to find and fetch one pinned release tarball.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    /// Scheme and host of the release hosting site, without a trailing slash
    pub base_url: String,
    pub owner: String,
    pub package: String,
    pub version: String,
    pub arch: String,
    /// Expected lowercase hex MD5 of the tarball
    pub md5: String,
}

pub const DEFAULT_BASE_URL: &str = "https://github.com";
pub const DEFAULT_OWNER: &str = "wiztk";
pub const DEFAULT_PACKAGE: &str = "libskia";
pub const DEFAULT_VERSION: &str = "m67";
pub const DEFAULT_MD5: &str = "e3ba61f3a227db06444055e3405d3878";

impl ReleaseConfig {
    /// The pinned libskia release for the architecture in `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            package: DEFAULT_PACKAGE.to_string(),
            version: DEFAULT_VERSION.to_string(),
            arch: config.arch.clone(),
            md5: DEFAULT_MD5.to_string(),
        }
    }

    fn repo_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.owner,
            self.package
        )
    }

    pub fn latest_release_url(&self) -> String {
        format!("{}/releases/latest", self.repo_url())
    }

    pub fn download_url(&self, remote_path: &str) -> String {
        format!("{}/releases/download/{}", self.repo_url(), remote_path)
    }

    /// Site-relative href the release page uses to link `remote_path`.
    pub fn download_href(&self, remote_path: &str) -> String {
        format!(
            "/{}/{}/releases/download/{}",
            self.owner, self.package, remote_path
        )
    }
}
