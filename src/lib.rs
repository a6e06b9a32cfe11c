//! Yu-Gi-Oh card catalog generator
//!
//! Merges two independently-sourced card databases (a stats/mechanics source
//! and a localized-text source) into one canonical catalog keyed by artwork
//! id, then bulk-downloads the card images.

pub mod core;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod merge;

pub use error::{CatalogError, Result};
