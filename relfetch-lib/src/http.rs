use crate::download_client::{DownloadClient, FetchedPage};
use crate::error::DownloadError;
use crate::logging::{progress_bar_style, spinner_style};
use crate::transfer::{TransferProgress, stream_to_writer};
use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::path::Path;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const USER_AGENT: &str = concat!("relfetch/", env!("CARGO_PKG_VERSION"));

/// [`DownloadClient`] backed by a real HTTP(S) connection.
///
/// Every request is a single attempt: there are no retries and no timeouts.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status,
            }
            .into());
        }
        Ok(response)
    }
}

impl DownloadClient for HttpClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let current_span = tracing::Span::current();
        current_span.pb_set_style(&spinner_style("{msg}")?);
        current_span.pb_set_message(&format!("Fetching {url}..."));

        let response = self.get(url).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read {url}"))?;

        Ok(FetchedPage {
            body: body.to_vec(),
            content_type,
        })
    }

    #[instrument(skip_all)]
    async fn download(&self, url: &str, output_path: &Path) -> Result<TransferProgress> {
        let file_name = output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| output_path.display().to_string());
        tracing::info!("Downloading {}", file_name);

        let response = self.get(url).await?;
        let total = response.content_length();

        let current_span = tracing::Span::current();
        match total {
            Some(total) => {
                current_span.pb_set_style(&progress_bar_style()?);
                current_span.pb_set_length(total);
            }
            None => {
                current_span.pb_set_style(&spinner_style("{msg} {bytes} ({bytes_per_sec})")?);
            }
        }
        current_span.pb_set_message(&file_name);
        current_span.pb_set_finish_message(&format!("{file_name} Complete!"));

        let mut file = tokio::fs::File::create(output_path)
            .await
            .with_context(|| format!("Failed to create {}", output_path.display()))?;

        let progress = stream_to_writer(response.bytes_stream(), total, &mut file, |p| {
            current_span.pb_set_position(p.transferred);
        })
        .await
        .with_context(|| format!("Failed to download {url}"))?;

        tracing::debug!(
            "Wrote {} bytes to {}",
            progress.transferred,
            output_path.display()
        );
        Ok(progress)
    }
}
