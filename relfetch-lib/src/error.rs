use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Invalid download URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {status}")]
    HttpStatus { url: String, status: StatusCode },
}

impl DownloadError {
    pub fn invalid_url<S: Into<String>>(url: &str, reason: S) -> Self {
        DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
