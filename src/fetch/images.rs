//! Bulk card-image fetcher
//!
//! Downstream consumer of the merged catalog: fetches one image per record,
//! saved as `<record id>.png`, using the record's `cardImage` id in the URL.
//! Bounded parallelism with a fixed inter-submission delay, then one
//! sequential retry pass over the failures.

use crate::{CatalogError, Result};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

const IMAGE_URL_BASE: &str = "https://images.ygoprodeck.com/images/cards_cropped";

const MAX_IN_FLIGHT: usize = 15;
const SUBMIT_DELAY: Duration = Duration::from_millis(60);
const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Outcome of a bulk image run
#[derive(Debug, Default)]
pub struct ImageFetchReport {
    pub total: usize,
    pub success: usize,
    pub failed: Vec<String>,
}

/// Download images for every record of a catalog file into `output_dir`
pub async fn download_images(catalog_path: &Path, output_dir: &Path) -> Result<ImageFetchReport> {
    if !catalog_path.exists() {
        return Err(CatalogError::MissingInput(catalog_path.to_path_buf()));
    }
    tokio::fs::create_dir_all(output_dir).await?;

    let content = tokio::fs::read_to_string(catalog_path).await?;
    let catalog: BTreeMap<String, Value> = serde_json::from_str(&content)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(20))
        .build()?;
    let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT));

    let mut report = ImageFetchReport {
        total: catalog.len(),
        ..ImageFetchReport::default()
    };
    info!(
        "downloading {} images to {}",
        report.total,
        output_dir.display()
    );

    let mut tasks = JoinSet::new();
    for (card_id, record) in &catalog {
        let image_id = image_id_of(card_id, record);
        let dest = output_dir.join(format!("{card_id}.png"));
        let card_id = card_id.clone();
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            // Semaphore errors only on close, which never happens here
            let _permit = semaphore.acquire().await.expect("semaphore closed");
            let ok = fetch_image(&client, &image_id, &dest).await;
            (card_id, ok)
        });

        tokio::time::sleep(SUBMIT_DELAY).await;
    }

    while let Some(result) = tasks.join_next().await {
        let (card_id, ok) = result?;
        if ok {
            report.success += 1;
        } else {
            report.failed.push(card_id);
        }
    }

    if !report.failed.is_empty() {
        info!("retrying {} failed downloads", report.failed.len());
        let mut still_failed = Vec::new();
        for card_id in std::mem::take(&mut report.failed) {
            tokio::time::sleep(RETRY_DELAY).await;
            let record = &catalog[&card_id];
            let image_id = image_id_of(&card_id, record);
            let dest = output_dir.join(format!("{card_id}.png"));
            if fetch_image(&client, &image_id, &dest).await {
                report.success += 1;
            } else {
                still_failed.push(card_id);
            }
        }
        report.failed = still_failed;
    }

    print_report(&report);
    Ok(report)
}

/// The image id of a record, falling back to the record key
fn image_id_of(card_id: &str, record: &Value) -> String {
    match record.get("cardImage") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => card_id.to_string(),
    }
}

/// Fetch one image; a file that already exists counts as success
async fn fetch_image(client: &Client, image_id: &str, dest: &Path) -> bool {
    if dest.exists() {
        return true;
    }
    let url = format!("{IMAGE_URL_BASE}/{image_id}.jpg");
    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => match response.bytes().await {
            Ok(bytes) => tokio::fs::write(dest, &bytes).await.is_ok(),
            Err(e) => {
                warn!("error reading image {image_id}: {e}");
                false
            }
        },
        Ok(response) => {
            warn!("image {image_id} returned status {}", response.status());
            false
        }
        Err(e) => {
            warn!("error downloading image {image_id}: {e}");
            false
        }
    }
}

fn print_report(report: &ImageFetchReport) {
    println!("{}", "-".repeat(30));
    if report.failed.is_empty() {
        println!(
            "Image download finished successfully ({}/{})",
            report.success, report.total
        );
    } else {
        println!("Image download finished with issues.");
        println!("Successfully downloaded: {}/{}", report.success, report.total);
        println!("Failed: {}", report.failed.len());
        println!("Failed IDs: {:?}", report.failed);
    }
    println!("{}", "-".repeat(30));
}
