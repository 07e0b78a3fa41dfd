use crate::download_client::{DownloadClient, FetchedPage};
use crate::transfer::TransferProgress;
use anyhow::{Context, anyhow};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Serves canned pages and files, and records every URL it was asked for.
#[derive(Default)]
pub struct MockDownloadClient {
    pages: HashMap<String, FetchedPage>,
    files: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MockDownloadClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: Vec<u8>) -> Self {
        self.insert_page(url, body, None)
    }

    pub fn with_page_content_type(self, url: &str, body: Vec<u8>, content_type: &str) -> Self {
        self.insert_page(url, body, Some(content_type.to_string()))
    }

    pub fn with_file(mut self, url: &str, body: Vec<u8>) -> Self {
        self.files.insert(url.to_string(), body);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn insert_page(mut self, url: &str, body: Vec<u8>, content_type: Option<String>) -> Self {
        self.pages
            .insert(url.to_string(), FetchedPage { body, content_type });
        self
    }

    fn record(&self, url: &str) {
        self.requests.lock().unwrap().push(url.to_string());
    }
}

impl DownloadClient for MockDownloadClient {
    async fn fetch_page(&self, url: &str) -> anyhow::Result<FetchedPage> {
        self.record(url);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("404 Not Found: {url}"))
    }

    async fn download(&self, url: &str, output_path: &Path) -> anyhow::Result<TransferProgress> {
        self.record(url);
        let body = self
            .files
            .get(url)
            .ok_or_else(|| anyhow!("404 Not Found: {url}"))?;
        fs::write(output_path, body)
            .context(format!("Failed to write file: {:?}", output_path))?;

        let size = body.len() as u64;
        Ok(TransferProgress {
            transferred: size,
            total: Some(size),
        })
    }
}
