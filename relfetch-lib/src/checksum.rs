use anyhow::{Context, Result};
use md5::{Digest, Md5};
use std::io::ErrorKind;
use std::path::Path;

/// Lowercase hex MD5 of `data`.
pub fn md5_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(Md5::digest(data.as_ref()))
}

/// Reads the whole file and returns its lowercase hex MD5.
pub fn md5_file(path: &Path) -> Result<String> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(md5_hex(data))
}

/// Returns true if the file at `path` exists and its MD5 equals `expected_hex`.
///
/// A missing file is not an error: it just means the file still has to be fetched.
/// The comparison is exact, so an uppercase `expected_hex` never matches.
/// Any other I/O failure is returned to the caller.
pub fn verify(path: &Path, expected_hex: &str) -> Result<bool> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} does not exist yet", path.display());
            return Ok(false);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let actual = md5_hex(&data);
    if actual != expected_hex {
        tracing::debug!(
            "Checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected_hex,
            actual
        );
    }
    Ok(actual == expected_hex)
}
