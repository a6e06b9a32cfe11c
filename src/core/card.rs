//! Card records for the two source datasets and the merged catalog
//!
//! The primary dataset is the stats/mechanics source, organized by logical
//! card with one or more artwork printings. The secondary dataset is the
//! localized-text source, keyed by a loosely-related id space. The output
//! unit is one `CanonicalCard` per artwork id.

use rustc_hash::FxHashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One entry from the primary dataset (the `data` array of the card-info API)
#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryCard {
    pub id: Option<i64>,
    #[serde(rename = "frameType")]
    pub frame_type: Option<String>,
    pub attribute: Option<String>,
    pub race: Option<String>,
    pub atk: Option<i64>,
    pub def: Option<i64>,
    pub level: Option<i64>,
    pub linkval: Option<i64>,
    pub linkmarkers: Option<Vec<String>>,
    pub scale: Option<i64>,
    pub typeline: Option<Vec<String>>,
    #[serde(default)]
    pub card_images: Vec<ArtworkRef>,
}

/// One artwork printing reference inside a primary card
///
/// The id is kept as a raw JSON value: a malformed (non-integer) artwork id
/// must be skippable per artwork, not abort deserialization of the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkRef {
    pub id: Option<Value>,
}

impl ArtworkRef {
    /// Parse the artwork id as an integer (accepts a numeric string)
    pub fn parsed_id(&self) -> Option<i64> {
        match self.id.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// The id as a raw lookup key, without string coercion
    pub fn raw_id(&self) -> Option<i64> {
        self.id.as_ref()?.as_i64()
    }
}

/// The primary dataset document: `{"data": [PrimaryCard, ...]}`
#[derive(Debug, Deserialize)]
pub struct PrimaryDataset {
    #[serde(default)]
    pub data: Vec<PrimaryCard>,
}

/// One entry from the secondary dataset
#[derive(Debug, Clone, Deserialize)]
pub struct SecondaryCard {
    pub id: Option<i64>,
    pub cn_name: Option<String>,
    #[serde(default)]
    pub text: SecondaryText,
}

/// Long-form text block of a secondary entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecondaryText {
    pub desc: Option<String>,
    pub pdesc: Option<String>,
    pub types: Option<String>,
}

/// The secondary dataset document: a mapping whose wrapper keys are irrelevant
pub type SecondaryDataset = FxHashMap<String, SecondaryCard>;

/// Broad card category derived from the primary frame type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Monster,
    Spell,
    Trap,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Monster => "monster",
            CardType::Spell => "spell",
            CardType::Trap => "trap",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-ruleset ban status attached to a record
///
/// Serialized only for rulesets that restrict the card; a fully-unrestricted
/// card carries no `limited` field at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LimitedStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md: Option<String>,
}

impl LimitedStatus {
    pub fn is_empty(&self) -> bool {
        self.ocg.is_none() && self.tcg.is_none() && self.md.is_none()
    }
}

/// Monster stat block: link monsters carry link attributes instead of
/// def/level, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonsterStats {
    Normal {
        def: Option<i64>,
        level: Option<i64>,
    },
    Link {
        link_val: Option<i64>,
        link_markers: Option<Vec<String>>,
    },
}

/// Pendulum extension, orthogonal to the link/normal split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pendulum {
    pub scale: Option<i64>,
    /// Always attached for pendulum frames, even when empty
    pub description: String,
}

/// Monster-only fields of a canonical record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterDetails {
    pub atk: Option<i64>,
    pub typeline: Option<String>,
    pub stats: MonsterStats,
    pub pendulum: Option<Pendulum>,
}

/// Category-specific payload of a canonical record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardKind {
    Spell { race: String },
    Trap { race: String },
    Monster(MonsterDetails),
}

impl CardKind {
    pub fn card_type(&self) -> CardType {
        match self {
            CardKind::Spell { .. } => CardType::Spell,
            CardKind::Trap { .. } => CardType::Trap,
            CardKind::Monster(_) => CardType::Monster,
        }
    }
}

/// One merged catalog record, keyed by artwork id
///
/// `unique_id` is the minimum artwork id among all printings of the same
/// logical card; it is the ban-list lookup key and is identical across
/// sibling records.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalCard {
    pub id: i64,
    pub unique_id: i64,
    pub name: Option<String>,
    pub description: String,
    pub attribute: String,
    pub frame_type: Option<String>,
    pub limited: Option<LimitedStatus>,
    pub kind: CardKind,
}

impl CanonicalCard {
    /// The artwork image id; coincides with the record id
    pub fn card_image(&self) -> i64 {
        self.id
    }

    pub fn card_type(&self) -> CardType {
        self.kind.card_type()
    }
}

// The output shape is flat: the kind variant is flattened into optional
// fields at serialization time, in the field order of the original artifact.
impl Serialize for CanonicalCard {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("uniqueId", &self.unique_id)?;
        map.serialize_entry("cardImage", &self.card_image())?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("cardType", self.card_type().as_str())?;
        map.serialize_entry("attribute", &self.attribute)?;
        map.serialize_entry("frameType", &self.frame_type)?;
        if let Some(limited) = &self.limited {
            map.serialize_entry("limited", limited)?;
        }
        match &self.kind {
            CardKind::Spell { race } | CardKind::Trap { race } => {
                map.serialize_entry("race", race)?;
            }
            CardKind::Monster(details) => {
                if let Some(atk) = details.atk {
                    map.serialize_entry("atk", &atk)?;
                }
                if let Some(typeline) = &details.typeline {
                    map.serialize_entry("typeline", typeline)?;
                }
                match &details.stats {
                    MonsterStats::Normal { def, level } => {
                        if let Some(def) = def {
                            map.serialize_entry("def", def)?;
                        }
                        if let Some(level) = level {
                            map.serialize_entry("level", level)?;
                        }
                    }
                    MonsterStats::Link {
                        link_val,
                        link_markers,
                    } => {
                        if let Some(link_val) = link_val {
                            map.serialize_entry("linkVal", link_val)?;
                        }
                        if let Some(markers) = link_markers {
                            map.serialize_entry("linkMarkers", markers)?;
                        }
                    }
                }
                if let Some(pendulum) = &details.pendulum {
                    if let Some(scale) = pendulum.scale {
                        map.serialize_entry("scale", &scale)?;
                    }
                    map.serialize_entry("pendulumDescription", &pendulum.description)?;
                }
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_artwork_id_parsing() {
        let numeric = ArtworkRef {
            id: Some(json!(46986414)),
        };
        assert_eq!(numeric.parsed_id(), Some(46986414));
        assert_eq!(numeric.raw_id(), Some(46986414));

        let string = ArtworkRef {
            id: Some(json!("46986414")),
        };
        assert_eq!(string.parsed_id(), Some(46986414));
        // String ids never match the integer-keyed secondary index
        assert_eq!(string.raw_id(), None);

        let garbage = ArtworkRef {
            id: Some(json!("not-a-number")),
        };
        assert_eq!(garbage.parsed_id(), None);

        let missing = ArtworkRef { id: None };
        assert_eq!(missing.parsed_id(), None);
    }

    #[test]
    fn test_spell_record_serialization() {
        let record = CanonicalCard {
            id: 100,
            unique_id: 100,
            name: Some("Foo".to_string()),
            description: "Bar".to_string(),
            attribute: "spell".to_string(),
            frame_type: Some("spell".to_string()),
            limited: None,
            kind: CardKind::Spell {
                race: String::new(),
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 100,
                "uniqueId": 100,
                "cardImage": 100,
                "name": "Foo",
                "description": "Bar",
                "cardType": "spell",
                "attribute": "spell",
                "frameType": "spell",
                "race": ""
            })
        );
    }

    #[test]
    fn test_link_monster_never_serializes_level() {
        let record = CanonicalCard {
            id: 1,
            unique_id: 1,
            name: Some("Linky".to_string()),
            description: String::new(),
            attribute: "dark".to_string(),
            frame_type: Some("link".to_string()),
            limited: None,
            kind: CardKind::Monster(MonsterDetails {
                atk: Some(1000),
                typeline: None,
                stats: MonsterStats::Link {
                    link_val: Some(2),
                    link_markers: Some(vec!["top".to_string(), "bottom".to_string()]),
                },
                pendulum: None,
            }),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["linkVal"], json!(2));
        assert_eq!(value["linkMarkers"], json!(["top", "bottom"]));
        assert!(value.get("def").is_none());
        assert!(value.get("level").is_none());
    }

    #[test]
    fn test_pendulum_description_serialized_even_when_empty() {
        let record = CanonicalCard {
            id: 5,
            unique_id: 5,
            name: None,
            description: String::new(),
            attribute: "light".to_string(),
            frame_type: Some("effect-pendulum".to_string()),
            limited: None,
            kind: CardKind::Monster(MonsterDetails {
                atk: None,
                typeline: None,
                stats: MonsterStats::Normal {
                    def: Some(200),
                    level: Some(4),
                },
                pendulum: Some(Pendulum {
                    scale: None,
                    description: String::new(),
                }),
            }),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["pendulumDescription"], json!(""));
        assert!(value.get("scale").is_none());
        // name is always present, null when the secondary source had none
        assert_eq!(value["name"], json!(null));
    }

    #[test]
    fn test_limited_status_partial() {
        let record = CanonicalCard {
            id: 7,
            unique_id: 7,
            name: Some("Banned".to_string()),
            description: String::new(),
            attribute: "trap".to_string(),
            frame_type: Some("trap".to_string()),
            limited: Some(LimitedStatus {
                ocg: Some("forbidden".to_string()),
                tcg: None,
                md: Some("limited".to_string()),
            }),
            kind: CardKind::Trap {
                race: "normal".to_string(),
            },
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value["limited"],
            json!({"ocg": "forbidden", "md": "limited"})
        );
    }
}
