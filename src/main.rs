//! Card catalog generator - Main Binary
//!
//! Fetches the two source card databases, merges them into one catalog keyed
//! by artwork id, and bulk-downloads the card images.

use anyhow::Context;
use clap::{Parser, Subcommand};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use ygo_catalog::{fetch, merge};

#[derive(Parser)]
#[command(name = "ygocat")]
#[command(about = "Yu-Gi-Oh card catalog generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the source datasets and resources
    Fetch {
        /// Working directory for the downloaded datasets
        #[arg(long, default_value = "tmp")]
        tmp_dir: PathBuf,

        /// Directory for supplementary resources (ban lists, typeline conf)
        #[arg(long, default_value = "res")]
        res_dir: PathBuf,

        /// Skip the pretty-print reformat of the downloaded datasets
        #[arg(long)]
        no_reformat: bool,
    },

    /// Merge the downloaded datasets into the catalog
    Merge {
        /// Working directory holding json1.json and json2.json
        #[arg(long, default_value = "tmp")]
        tmp_dir: PathBuf,

        /// Directory holding the supplementary resources
        #[arg(long, default_value = "res")]
        res_dir: PathBuf,

        /// Output catalog file
        #[arg(long, default_value = "cards.json")]
        output: PathBuf,
    },

    /// Download card images for an existing catalog
    Images {
        /// Catalog file produced by the merge step
        #[arg(long, default_value = "cards.json")]
        catalog: PathBuf,

        /// Directory to save images into
        #[arg(long, default_value = "figure")]
        output_dir: PathBuf,
    },

    /// Fetch, merge, and download images in sequence
    All {
        #[arg(long, default_value = "tmp")]
        tmp_dir: PathBuf,

        #[arg(long, default_value = "res")]
        res_dir: PathBuf,

        #[arg(long, default_value = "cards.json")]
        output: PathBuf,

        #[arg(long, default_value = "figure")]
        image_dir: PathBuf,
    },
}

async fn run_fetch(tmp_dir: &Path, res_dir: &Path, reformat: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all(tmp_dir)
        .with_context(|| format!("creating working directory {}", tmp_dir.display()))?;

    let client = Client::new();
    fetch::fetch_secondary(&client, tmp_dir)
        .await
        .context("fetching secondary dataset")?;
    fetch::fetch_primary(&client, tmp_dir)
        .await
        .context("fetching primary dataset")?;
    fetch::fetch_resources(&client, res_dir)
        .await
        .context("fetching resources")?;
    if reformat {
        fetch::reformat_datasets(tmp_dir).context("reformatting datasets")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            tmp_dir,
            res_dir,
            no_reformat,
        } => {
            run_fetch(&tmp_dir, &res_dir, !no_reformat).await?;
        }

        Commands::Merge {
            tmp_dir,
            res_dir,
            output,
        } => {
            merge::run_merge(&tmp_dir, &res_dir, &output).context("merging datasets")?;
        }

        Commands::Images {
            catalog,
            output_dir,
        } => {
            fetch::download_images(&catalog, &output_dir)
                .await
                .context("downloading images")?;
        }

        Commands::All {
            tmp_dir,
            res_dir,
            output,
            image_dir,
        } => {
            run_fetch(&tmp_dir, &res_dir, true).await?;
            merge::run_merge(&tmp_dir, &res_dir, &output).context("merging datasets")?;
            fetch::download_images(&output, &image_dir)
                .await
                .context("downloading images")?;
        }
    }

    Ok(())
}
