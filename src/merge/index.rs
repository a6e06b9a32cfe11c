//! Secondary index and id reconciliation
//!
//! The two datasets do not share a consistent key: a secondary entry's id may
//! coincide with a primary card's id or with any of its artwork ids. The
//! index is a single precomputed hash map probed with ordered candidate keys.

use crate::core::{PrimaryCard, SecondaryDataset};
use rustc_hash::FxHashMap;

/// Text fields projected out of one secondary entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryEntry {
    pub name: Option<String>,
    pub desc: String,
    pub pdesc: String,
    pub types: String,
}

/// Id-keyed lookup over the secondary dataset
#[derive(Debug, Default)]
pub struct SecondaryIndex {
    entries: FxHashMap<i64, SecondaryEntry>,
}

impl SecondaryIndex {
    /// Project the secondary dataset into the index
    ///
    /// Wrapper keys are discarded; values lacking an id are silently
    /// excluded. Windows line endings in the text fields are normalized.
    pub fn build(dataset: &SecondaryDataset) -> Self {
        let mut entries = FxHashMap::default();
        for card in dataset.values() {
            let Some(id) = card.id else { continue };
            entries.insert(
                id,
                SecondaryEntry {
                    name: card.cn_name.clone(),
                    desc: normalize_newlines(card.text.desc.as_deref()),
                    pdesc: normalize_newlines(card.text.pdesc.as_deref()),
                    types: card.text.types.clone().unwrap_or_default(),
                },
            );
        }
        SecondaryIndex { entries }
    }

    pub fn get(&self, id: i64) -> Option<&SecondaryEntry> {
        self.entries.get(&id)
    }

    /// Resolve a primary card against the index: try the card's own id, then
    /// each artwork id in original order, first hit wins
    pub fn resolve(&self, card: &PrimaryCard) -> Option<&SecondaryEntry> {
        if let Some(entry) = card.id.and_then(|id| self.entries.get(&id)) {
            return Some(entry);
        }
        card.card_images
            .iter()
            .filter_map(|artwork| artwork.raw_id())
            .find_map(|id| self.entries.get(&id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_newlines(text: Option<&str>) -> String {
    text.map(|t| t.replace("\r\n", "\n")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SecondaryCard;
    use serde_json::json;

    fn dataset(values: Vec<serde_json::Value>) -> SecondaryDataset {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                let card: SecondaryCard = serde_json::from_value(v).unwrap();
                (format!("wrapper-{i}"), card)
            })
            .collect()
    }

    fn primary(id: Option<i64>, artwork_ids: Vec<serde_json::Value>) -> PrimaryCard {
        serde_json::from_value(json!({
            "id": id,
            "card_images": artwork_ids.into_iter().map(|id| json!({"id": id})).collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    #[test]
    fn test_build_skips_entries_without_id() {
        let index = SecondaryIndex::build(&dataset(vec![
            json!({"id": 1, "cn_name": "A"}),
            json!({"cn_name": "no id"}),
        ]));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(1).unwrap().name.as_deref(), Some("A"));
    }

    #[test]
    fn test_build_normalizes_newlines_and_defaults() {
        let index = SecondaryIndex::build(&dataset(vec![json!({
            "id": 2,
            "text": {"desc": "line1\r\nline2", "pdesc": "p\r\nq"}
        })]));
        let entry = index.get(2).unwrap();
        assert_eq!(entry.desc, "line1\nline2");
        assert_eq!(entry.pdesc, "p\nq");
        assert_eq!(entry.types, "");
        assert_eq!(entry.name, None);
    }

    #[test]
    fn test_resolve_prefers_primary_id() {
        let index = SecondaryIndex::build(&dataset(vec![
            json!({"id": 10, "cn_name": "by-main-id"}),
            json!({"id": 11, "cn_name": "by-artwork-id"}),
        ]));
        let card = primary(Some(10), vec![json!(11)]);
        assert_eq!(
            index.resolve(&card).unwrap().name.as_deref(),
            Some("by-main-id")
        );
    }

    #[test]
    fn test_resolve_falls_back_to_artwork_ids_in_order() {
        let index = SecondaryIndex::build(&dataset(vec![
            json!({"id": 21, "cn_name": "first-artwork"}),
            json!({"id": 22, "cn_name": "second-artwork"}),
        ]));
        let card = primary(Some(999), vec![json!(20), json!(21), json!(22)]);
        assert_eq!(
            index.resolve(&card).unwrap().name.as_deref(),
            Some("first-artwork")
        );
    }

    #[test]
    fn test_resolve_miss() {
        let index = SecondaryIndex::build(&dataset(vec![json!({"id": 1})]));
        let card = primary(Some(5), vec![json!(6)]);
        assert!(index.resolve(&card).is_none());
    }
}
