//! Forbidden/limited list loader
//!
//! One JSON file per ruleset under `<res>/limited/`, each shaped
//! `{"forbidden": [ids...], "limited": [ids...], "semi-limited": [ids...]}`.
//! The per-status lists are flattened into id -> status maps for lookup by
//! a card's representative (minimum artwork) id.

use crate::core::LimitedStatus;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// The three supported rulesets, in reporting order
pub const RULESETS: [&str; 3] = ["ocg", "tcg", "md"];

/// Per-ruleset id -> ban status maps
#[derive(Debug, Clone, Default)]
pub struct BanLists {
    ocg: FxHashMap<i64, String>,
    tcg: FxHashMap<i64, String>,
    md: FxHashMap<i64, String>,
}

impl BanLists {
    /// Load all ruleset files from `<res_dir>/limited/`
    ///
    /// A missing directory, a missing ruleset file, or a malformed ruleset
    /// file degrades to an empty map for that ruleset with a warning; the
    /// ban lists are supplementary, not required inputs.
    pub fn load(res_dir: &Path) -> Self {
        let limited_dir = res_dir.join("limited");
        if !limited_dir.exists() {
            warn!(
                "limited list directory {} not found",
                limited_dir.display()
            );
            return BanLists::default();
        }

        let mut lists = BanLists::default();
        for ruleset in RULESETS {
            let path = limited_dir.join(format!("{ruleset}.json"));
            *lists.map_mut(ruleset) = Self::load_ruleset(&path, ruleset);
        }
        lists
    }

    fn load_ruleset(path: &Path, ruleset: &str) -> FxHashMap<i64, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                warn!("{ruleset} limited list not found at {}", path.display());
                return FxHashMap::default();
            }
        };
        match Self::parse(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!("failed to parse {ruleset} limited list: {e}");
                FxHashMap::default()
            }
        }
    }

    /// Parse one ruleset document, flattening status -> [ids] into id -> status
    pub fn parse(content: &str) -> serde_json::Result<FxHashMap<i64, String>> {
        let by_status: FxHashMap<String, Vec<i64>> = serde_json::from_str(content)?;
        let mut map = FxHashMap::default();
        for (status, ids) in by_status {
            for id in ids {
                map.insert(id, status.clone());
            }
        }
        Ok(map)
    }

    fn map_mut(&mut self, ruleset: &str) -> &mut FxHashMap<i64, String> {
        match ruleset {
            "ocg" => &mut self.ocg,
            "tcg" => &mut self.tcg,
            "md" => &mut self.md,
            _ => unreachable!("unknown ruleset {ruleset}"),
        }
    }

    /// Insert a single entry (test setup helper)
    pub fn insert(&mut self, ruleset: &str, id: i64, status: impl Into<String>) {
        self.map_mut(ruleset).insert(id, status.into());
    }

    /// Look up the ban status of a representative id across all rulesets
    pub fn status_for(&self, id: i64) -> LimitedStatus {
        LimitedStatus {
            ocg: self.ocg.get(&id).cloned(),
            tcg: self.tcg.get(&id).cloned(),
            md: self.md.get(&id).cloned(),
        }
    }
}
