//! HTTP file downloads and checksum verification
//!
//! Checksums come from sidecar URLs holding the expected digest as the first
//! whitespace-separated token. A mismatch is reported to the caller as
//! `Ok(false)`, not an error: the callers decide whether it is fatal.

use crate::Result;
use md5::Md5;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Stream a URL to a local file
pub async fn download_file(client: &Client, url: &str, dest: &Path) -> Result<()> {
    info!("downloading {url} to {}", dest.display());
    let mut response = client.get(url).send().await?.error_for_status()?;
    let mut file = tokio::fs::File::create(dest).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

/// Verify a file against a `.sha256` sidecar URL
pub async fn verify_sha256(client: &Client, path: &Path, sha256_url: &str) -> Result<bool> {
    let expected = fetch_expected_digest(client, sha256_url, false).await?;
    let data = tokio::fs::read(path).await?;
    let actual = format!("{:x}", Sha256::digest(&data));
    Ok(compare_digests(path, &expected, &actual))
}

/// Verify a file against a `.md5` sidecar URL
pub async fn verify_md5(client: &Client, path: &Path, md5_url: &str) -> Result<bool> {
    let expected = fetch_expected_digest(client, md5_url, true).await?;
    let data = tokio::fs::read(path).await?;
    let actual = format!("{:x}", Md5::digest(&data));
    Ok(compare_digests(path, &expected, &actual))
}

/// Fetch the sidecar document and extract the digest token
///
/// Some md5 sidecars quote the digest; strip quotes when asked.
async fn fetch_expected_digest(client: &Client, url: &str, strip_quotes: bool) -> Result<String> {
    let body = client.get(url).send().await?.error_for_status()?.text().await?;
    let token = body.split_whitespace().next().unwrap_or_default();
    let token = if strip_quotes {
        token.replace(['"', '\''], "")
    } else {
        token.to_string()
    };
    Ok(token)
}

fn compare_digests(path: &Path, expected: &str, actual: &str) -> bool {
    if expected == actual {
        info!("checksum verified for {}", path.display());
        true
    } else {
        warn!(
            "checksum mismatch for {}: expected {expected}, got {actual}",
            path.display()
        );
        false
    }
}
