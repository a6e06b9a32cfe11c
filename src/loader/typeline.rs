//! Typeline translation table (`typeline.conf`)
//!
//! A plain `key=value` file mapping raw type tokens to their display strings.
//! Unknown tokens pass through untranslated.

use rustc_hash::FxHashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Raw type token -> display string mapping
#[derive(Debug, Clone, Default)]
pub struct TypelineTable {
    map: FxHashMap<String, String>,
}

impl TypelineTable {
    /// Parse a table from conf text: blank lines and lines without `=` are
    /// ignored, both sides are trimmed, only the first `=` splits
    pub fn parse(content: &str) -> Self {
        let mut map = FxHashMap::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        TypelineTable { map }
    }

    /// Load from a conf file; a missing file yields an empty (pass-through)
    /// table
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => {
                warn!("typeline conf {} not found, using empty table", path.display());
                TypelineTable::default()
            }
        }
    }

    /// Translate a raw token, passing it through unchanged if unmapped
    pub fn translate<'a>(&'a self, token: &'a str) -> &'a str {
        self.map.get(token).map(String::as_str).unwrap_or(token)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
