use crate::transfer::TransferProgress;
use anyhow::Result;
use std::path::Path;

/// Raw body of a fetched HTML page plus the `Content-Type` it was served with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

pub trait DownloadClient {
    /// Fetches `url` fully into memory.
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<FetchedPage>> + Send;

    /// Streams `url` into `output_path`, creating or truncating it.
    fn download(
        &self,
        url: &str,
        output_path: &Path,
    ) -> impl Future<Output = Result<TransferProgress>> + Send;
}
