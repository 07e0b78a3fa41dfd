use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Smallest write chunk used when the total size is known.
pub const MIN_CHUNK_SIZE: usize = 12 * 1024;

/// Largest write chunk, so huge downloads don't buffer 1% of themselves in memory.
pub const MAX_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Write chunk used when the server doesn't report a content length.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Bytes written so far against the advertised total, if there was one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub transferred: u64,
    pub total: Option<u64>,
}

impl TransferProgress {
    pub fn new(total: Option<u64>) -> Self {
        Self {
            transferred: 0,
            total,
        }
    }

    /// Completed share in `0.0..=1.0`, or `None` when the total is unknown or zero.
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some((self.transferred as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.transferred += bytes as u64;
    }
}

/// Roughly 1% of the total per chunk, or a fixed chunk when the total is unknown.
pub fn chunk_size(total: Option<u64>) -> usize {
    match total {
        Some(total) => {
            let one_percent = usize::try_from(total / 100).unwrap_or(MAX_CHUNK_SIZE);
            one_percent.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
        }
        None => DEFAULT_CHUNK_SIZE,
    }
}

/// Copies `stream` into `writer` in chunks of [`chunk_size`], calling `on_chunk`
/// after every chunk is written.
///
/// Stops at the end of the stream. Read and write errors abort the copy; whatever
/// was already written stays in `writer`.
pub async fn stream_to_writer<S, B, E, W, F>(
    stream: S,
    total: Option<u64>,
    writer: &mut W,
    mut on_chunk: F,
) -> Result<TransferProgress>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
    W: AsyncWrite + Unpin,
    F: FnMut(&TransferProgress),
{
    let chunk_size = chunk_size(total);
    let mut progress = TransferProgress::new(total);
    let mut buffer: Vec<u8> = Vec::with_capacity(chunk_size);
    let mut stream = std::pin::pin!(stream);

    while let Some(piece) = stream.next().await {
        let piece = piece.context("Failed to read response body")?;
        buffer.extend_from_slice(piece.as_ref());

        while buffer.len() >= chunk_size {
            writer
                .write_all(&buffer[..chunk_size])
                .await
                .context("Failed to write downloaded data")?;
            buffer.drain(..chunk_size);
            progress.advance(chunk_size);
            on_chunk(&progress);
        }
    }

    if !buffer.is_empty() {
        writer
            .write_all(&buffer)
            .await
            .context("Failed to write downloaded data")?;
        progress.advance(buffer.len());
        on_chunk(&progress);
    }

    writer.flush().await?;
    Ok(progress)
}
