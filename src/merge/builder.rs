//! Per-artwork record builder
//!
//! One resolved primary card fans out to one canonical record per artwork
//! printing. All records of a card share every field except the artwork id
//! itself (and its cardImage mirror).

use crate::core::{
    CanonicalCard, CardKind, CardType, MonsterDetails, MonsterStats, Pendulum, PrimaryCard,
};
use crate::loader::{BanLists, TypelineTable};
use crate::merge::classify::{build_typeline, classify};
use crate::merge::index::SecondaryEntry;
use tracing::warn;

/// Build the canonical records for one primary card already resolved against
/// the secondary index
///
/// An artwork whose id fails integer parsing is skipped with a diagnostic;
/// its siblings are still emitted. A card with zero parseable artwork ids
/// yields no records.
pub fn build_records(
    card: &PrimaryCard,
    entry: &SecondaryEntry,
    ban_lists: &BanLists,
    table: &TypelineTable,
) -> Vec<CanonicalCard> {
    let class = classify(card);

    let typeline = match class.card_type {
        CardType::Monster => build_typeline(card.typeline.as_deref(), &entry.types, table),
        _ => None,
    };

    // Representative id: minimum over the card's parseable artwork ids
    let min_id = card
        .card_images
        .iter()
        .filter_map(|artwork| artwork.parsed_id())
        .min();

    let mut records = Vec::with_capacity(card.card_images.len());
    for artwork in &card.card_images {
        let Some(raw_id) = artwork.id.as_ref() else {
            continue;
        };
        let Some(id) = artwork.parsed_id() else {
            warn!("could not convert artwork id {raw_id} to an integer, skipping");
            continue;
        };
        let unique_id = min_id.unwrap_or(id);

        let status = ban_lists.status_for(unique_id);
        let limited = (!status.is_empty()).then_some(status);

        let kind = match class.card_type {
            CardType::Spell => CardKind::Spell {
                race: lowercased_race(card),
            },
            CardType::Trap => CardKind::Trap {
                race: lowercased_race(card),
            },
            CardType::Monster => CardKind::Monster(MonsterDetails {
                atk: card.atk,
                typeline: typeline.clone(),
                stats: if class.is_link {
                    MonsterStats::Link {
                        link_val: card.linkval,
                        link_markers: card.linkmarkers.as_ref().map(|markers| {
                            markers.iter().map(|m| m.to_lowercase()).collect()
                        }),
                    }
                } else {
                    MonsterStats::Normal {
                        def: card.def,
                        level: card.level,
                    }
                },
                pendulum: class.is_pendulum.then(|| Pendulum {
                    scale: card.scale,
                    description: entry.pdesc.clone(),
                }),
            }),
        };

        records.push(CanonicalCard {
            id,
            unique_id,
            name: entry.name.clone(),
            description: entry.desc.clone(),
            attribute: class.attribute.clone(),
            frame_type: class.frame_type.clone(),
            limited,
            kind,
        });
    }
    records
}

fn lowercased_race(card: &PrimaryCard) -> String {
    card.race.as_deref().unwrap_or_default().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(fields: serde_json::Value) -> PrimaryCard {
        serde_json::from_value(fields).unwrap()
    }

    fn entry() -> SecondaryEntry {
        SecondaryEntry {
            name: Some("卡名".to_string()),
            desc: "效果文本".to_string(),
            pdesc: "灵摆文本".to_string(),
            types: String::new(),
        }
    }

    #[test]
    fn test_artwork_fanout_shares_unique_id() {
        let card = card(json!({
            "id": 300,
            "frameType": "effect",
            "attribute": "WATER",
            "atk": 1200,
            "def": 800,
            "level": 3,
            "card_images": [{"id": 302}, {"id": 300}, {"id": 301}],
        }));
        let records = build_records(&card, &entry(), &BanLists::default(), &TypelineTable::default());

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.unique_id == 300));
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![302, 300, 301]);
        for r in &records {
            assert_eq!(r.card_image(), r.id);
            assert_eq!(r.name.as_deref(), Some("卡名"));
            assert_eq!(r.attribute, "water");
        }
    }

    #[test]
    fn test_malformed_artwork_id_skipped_individually() {
        let card = card(json!({
            "id": 400,
            "frameType": "spell",
            "race": "Quick-Play",
            "card_images": [{"id": 400}, {"id": "junk"}, {"id": 401}],
        }));
        let records = build_records(&card, &entry(), &BanLists::default(), &TypelineTable::default());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 400);
        assert_eq!(records[1].id, 401);
        assert!(records
            .iter()
            .all(|r| matches!(&r.kind, CardKind::Spell { race } if race == "quick-play")));
    }

    #[test]
    fn test_zero_parseable_artworks_yield_no_records() {
        let card = card(json!({
            "id": 500,
            "frameType": "effect",
            "card_images": [{"id": "bad"}, {}],
        }));
        let records = build_records(&card, &entry(), &BanLists::default(), &TypelineTable::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_link_monster_excludes_def_and_level() {
        let card = card(json!({
            "id": 600,
            "frameType": "link_monster",
            "attribute": "DARK",
            "atk": 1000,
            "def": 2000,
            "level": 4,
            "linkval": 2,
            "linkmarkers": ["Top", "Bottom"],
            "card_images": [{"id": 600}],
        }));
        let records = build_records(&card, &entry(), &BanLists::default(), &TypelineTable::default());

        let CardKind::Monster(details) = &records[0].kind else {
            panic!("expected monster");
        };
        assert_eq!(details.atk, Some(1000));
        assert_eq!(
            details.stats,
            MonsterStats::Link {
                link_val: Some(2),
                link_markers: Some(vec!["top".to_string(), "bottom".to_string()]),
            }
        );
    }

    #[test]
    fn test_pendulum_monster_gets_description_and_scale() {
        let card = card(json!({
            "id": 700,
            "frameType": "effect_pendulum",
            "attribute": "LIGHT",
            "scale": 8,
            "card_images": [{"id": 700}],
        }));
        let records = build_records(&card, &entry(), &BanLists::default(), &TypelineTable::default());

        let CardKind::Monster(details) = &records[0].kind else {
            panic!("expected monster");
        };
        let pendulum = details.pendulum.as_ref().unwrap();
        assert_eq!(pendulum.scale, Some(8));
        assert_eq!(pendulum.description, "灵摆文本");
    }

    #[test]
    fn test_ban_status_keyed_by_unique_id() {
        let mut ban_lists = BanLists::default();
        ban_lists.insert("ocg", 800, "forbidden");
        // status of a non-representative artwork id must not leak in
        ban_lists.insert("tcg", 801, "limited");

        let card = card(json!({
            "id": 800,
            "frameType": "trap",
            "card_images": [{"id": 801}, {"id": 800}],
        }));
        let records = build_records(&card, &entry(), &ban_lists, &TypelineTable::default());

        for r in &records {
            let limited = r.limited.as_ref().unwrap();
            assert_eq!(limited.ocg.as_deref(), Some("forbidden"));
            assert_eq!(limited.tcg, None);
        }
    }

    #[test]
    fn test_unrestricted_card_has_no_limited_field() {
        let card = card(json!({
            "id": 900,
            "frameType": "spell",
            "card_images": [{"id": 900}],
        }));
        let records = build_records(&card, &entry(), &BanLists::default(), &TypelineTable::default());
        assert!(records[0].limited.is_none());
    }
}
