//! Source dataset and resource acquisition
//!
//! Downloads the two card databases into the working directory and the
//! supplementary resources (token list, ban lists, typeline conf) into the
//! resource directory, in the layout the merge step expects.

use crate::fetch::archive::{extract_tar_xz, extract_zip};
use crate::fetch::download::{download_file, verify_md5, verify_sha256};
use crate::Result;
use reqwest::Client;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const PRIMARY_URL: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";
const SECONDARY_ZIP_URL: &str = "https://ygocdb.com/api/v0/cards.zip";
const SECONDARY_MD5_URL: &str = "https://ygocdb.com/api/v0/cards.zip.md5";

const TOKEN_URL: &str =
    "https://github.com/Arshtyi/YuGiOh-Tokens/releases/download/latest/token.json";
const BANLIST_URL: &str = "https://github.com/Arshtyi/YuGiOh-Forbidden-And-Limited-List/releases/download/latest/forbidden_and_limited_list.tar.xz";
const TYPELINE_URL: &str = "https://github.com/Arshtyi/Translations-Of-YuGiOh-Cards-Type/releases/download/latest/typeline.conf";

/// Download the primary dataset to `<tmp>/json1.json`
pub async fn fetch_primary(client: &Client, tmp_dir: &Path) -> Result<()> {
    download_file(client, PRIMARY_URL, &tmp_dir.join("json1.json")).await
}

/// Download and unpack the secondary dataset to `<tmp>/json2.json`
///
/// The zip holds a single `cards.json`; its md5 sidecar covers the extracted
/// file, not the archive. Verification failure leaves `json2.json` absent,
/// which fails the merge step later.
pub async fn fetch_secondary(client: &Client, tmp_dir: &Path) -> Result<()> {
    let zip_path = tmp_dir.join("cards.zip");
    download_file(client, SECONDARY_ZIP_URL, &zip_path).await?;
    extract_zip(&zip_path, tmp_dir)?;

    let extracted = tmp_dir.join("cards.json");
    if !extracted.exists() {
        warn!("expected extracted file {} not found", extracted.display());
        return Ok(());
    }

    if verify_md5(client, &extracted, SECONDARY_MD5_URL).await? {
        let dest = tmp_dir.join("json2.json");
        if dest.exists() {
            fs::remove_file(&dest)?;
        }
        fs::rename(&extracted, &dest)?;
        fs::remove_file(&zip_path)?;
        info!("secondary dataset ready at {}", dest.display());
    } else {
        warn!("md5 verification failed for the extracted secondary dataset");
    }
    Ok(())
}

/// Download the supplementary resources into `res_dir`
///
/// A failed checksum on a resource is reported but not fatal; the merge can
/// run with a stale or absent resource (ban lists and typeline conf degrade
/// to empty).
pub async fn fetch_resources(client: &Client, res_dir: &Path) -> Result<()> {
    fs::create_dir_all(res_dir)?;

    let token_path = res_dir.join("token.json");
    download_file(client, TOKEN_URL, &token_path).await?;
    if !verify_sha256(client, &token_path, &sidecar(TOKEN_URL)).await? {
        warn!("token.json verification failed");
    }

    let banlist_path = res_dir.join("forbidden_and_limited_list.tar.xz");
    download_file(client, BANLIST_URL, &banlist_path).await?;
    if verify_sha256(client, &banlist_path, &sidecar(BANLIST_URL)).await? {
        extract_tar_xz(&banlist_path, &res_dir.join("limited"))?;
        fs::remove_file(&banlist_path)?;
    } else {
        warn!("ban-list bundle verification failed");
    }

    let typeline_path = res_dir.join("typeline.conf");
    download_file(client, TYPELINE_URL, &typeline_path).await?;
    if !verify_sha256(client, &typeline_path, &sidecar(TYPELINE_URL)).await? {
        warn!("typeline.conf verification failed");
    }

    Ok(())
}

/// Re-serialize the downloaded datasets pretty-printed for inspection
pub fn reformat_datasets(tmp_dir: &Path) -> Result<()> {
    for filename in ["json1.json", "json2.json"] {
        let path = tmp_dir.join(filename);
        if !path.exists() {
            warn!("{filename} not found, skipping reformat");
            continue;
        }
        info!("reformatting {filename}");
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        write_pretty_json(&path, &value)?;
    }
    Ok(())
}

fn write_pretty_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    fs::write(path, buf)?;
    Ok(())
}

fn sidecar(url: &str) -> String {
    format!("{url}.sha256")
}
