//! Input loaders
//!
//! Parsers for the two source datasets, the per-ruleset ban lists, and the
//! typeline translation table.

pub mod banlist;
pub mod dataset;
pub mod typeline;

pub use banlist::BanLists;
pub use dataset::{load_primary, load_secondary};
pub use typeline::TypelineTable;
