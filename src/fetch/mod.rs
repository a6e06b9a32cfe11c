//! Download plumbing: source datasets, resources, and card images
//!
//! Ordinary I/O around the merge engine. The engine itself never touches the
//! network; these modules produce its input files and consume its output.

pub mod archive;
pub mod download;
pub mod images;
pub mod sources;

pub use images::{download_images, ImageFetchReport};
pub use sources::{fetch_primary, fetch_resources, fetch_secondary, reformat_datasets};
