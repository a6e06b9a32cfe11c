//! Catalog assembly and output
//!
//! Collects builder output into one mapping keyed by the string form of the
//! artwork id (the serialization target needs textual keys; the values keep
//! the numeric id) and writes it in a single pass once the whole primary
//! dataset has been traversed.

use crate::core::{CanonicalCard, PrimaryDataset};
use crate::loader::{self, BanLists, TypelineTable};
use crate::merge::builder::build_records;
use crate::merge::index::SecondaryIndex;
use crate::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Merge run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub secondary_entries: usize,
    pub primary_cards: usize,
    pub records: usize,
    pub skipped: usize,
}

/// The merged output catalog
#[derive(Debug, Default)]
pub struct Catalog {
    records: BTreeMap<String, CanonicalCard>,
}

impl Catalog {
    pub fn get(&self, id: i64) -> Option<&CanonicalCard> {
        self.records.get(&id.to_string())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CanonicalCard)> {
        self.records.iter()
    }

    /// Serialize pretty-printed with 4-space indent; non-ASCII text is
    /// preserved literally
    pub fn to_json_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.records.serialize(&mut serializer)?;
        // serde_json output is always valid UTF-8
        Ok(String::from_utf8(buf).expect("serializer produced invalid UTF-8"))
    }

    /// Write the final artifact; nothing is written unless serialization of
    /// the whole catalog succeeds
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Run the merge over fully-materialized inputs
///
/// Unresolved primary cards (no secondary match via their own id or any
/// artwork id) are skipped and counted; everything else fans out through the
/// record builder.
pub fn merge(
    primary: &PrimaryDataset,
    index: &SecondaryIndex,
    ban_lists: &BanLists,
    table: &TypelineTable,
) -> (Catalog, MergeStats) {
    let mut catalog = Catalog::default();
    let mut stats = MergeStats {
        secondary_entries: index.len(),
        primary_cards: primary.data.len(),
        ..MergeStats::default()
    };

    for card in &primary.data {
        let Some(entry) = index.resolve(card) else {
            warn!(
                "card with id {:?} not found in secondary dataset, skipping",
                card.id
            );
            stats.skipped += 1;
            continue;
        };
        for record in build_records(card, entry, ban_lists, table) {
            catalog.records.insert(record.id.to_string(), record);
        }
    }

    stats.records = catalog.len();
    (catalog, stats)
}

/// Load all inputs, run the merge, and write the catalog artifact
///
/// Expects `json1.json` (primary) and `json2.json` (secondary) under
/// `tmp_dir`, plus the ban lists and typeline conf under `res_dir`.
pub fn run_merge(tmp_dir: &Path, res_dir: &Path, output: &Path) -> Result<MergeStats> {
    let ban_lists = BanLists::load(res_dir);
    let table = TypelineTable::load(&res_dir.join("typeline.conf"));

    info!("loading secondary dataset for name and description lookup");
    let secondary = loader::load_secondary(&tmp_dir.join("json2.json"))?;
    let index = SecondaryIndex::build(&secondary);
    info!("loaded {} cards from the secondary dataset", index.len());

    let primary = loader::load_primary(&tmp_dir.join("json1.json"))?;
    info!("loaded {} cards from the primary dataset", primary.data.len());

    let (catalog, stats) = merge(&primary, &index, &ban_lists, &table);
    catalog.write_to(output)?;

    print_summary(&stats);
    Ok(stats)
}

fn print_summary(stats: &MergeStats) {
    println!("{}", "-".repeat(30));
    println!("Summary:");
    println!("primary dataset:   {} cards", stats.primary_cards);
    println!("secondary dataset: {} cards", stats.secondary_entries);
    println!("catalog:           {} records", stats.records);
    if stats.skipped > 0 {
        println!("skipped:           {} cards (no secondary match)", stats.skipped);
    }
    println!("{}", "-".repeat(30));
}
