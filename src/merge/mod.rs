//! The record-merge engine
//!
//! Reconciles the primary and secondary datasets into one canonical record
//! per artwork id. Pure in-memory transformation: the only side effect is
//! the final catalog write.

pub mod builder;
pub mod catalog;
pub mod classify;
pub mod index;

pub use builder::build_records;
pub use catalog::{merge, run_merge, Catalog, MergeStats};
pub use classify::{build_typeline, classify, Classification};
pub use index::{SecondaryEntry, SecondaryIndex};
