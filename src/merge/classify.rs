//! Card classification and typeline construction
//!
//! Both are pure functions of the primary card's raw fields plus (for the
//! typeline) the secondary type-string and the translation table.

use crate::core::{CardType, PrimaryCard};
use crate::loader::TypelineTable;

/// Derived classification of one primary card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub card_type: CardType,
    /// Lowercased monster attribute, or the card type itself for spells/traps
    pub attribute: String,
    /// Raw frame type with underscores replaced by hyphens
    pub frame_type: Option<String>,
    pub is_link: bool,
    pub is_pendulum: bool,
}

/// Classify a primary card from its raw frame type
pub fn classify(card: &PrimaryCard) -> Classification {
    let frame = card.frame_type.as_deref();

    let card_type = match frame {
        Some("spell") => CardType::Spell,
        Some("trap") => CardType::Trap,
        _ => CardType::Monster,
    };

    let attribute = match card_type {
        CardType::Monster => card
            .attribute
            .as_deref()
            .unwrap_or_default()
            .to_lowercase(),
        _ => card_type.as_str().to_string(),
    };

    let frame_lower = frame.map(str::to_lowercase);
    Classification {
        card_type,
        attribute,
        frame_type: frame.map(|f| f.replace('_', "-")),
        is_link: frame_lower
            .as_deref()
            .is_some_and(|f| f.contains("link")),
        is_pendulum: frame_lower
            .as_deref()
            .is_some_and(|f| f.contains("pendulum")),
    }
}

/// Build the bracketed display typeline for a monster card
///
/// Combines, in fixed order: the translated first raw typeline token, then
/// the segments of the secondary type-string's bracketed prefix with the
/// first segment dropped (it duplicates the raw token's concept) and the
/// rest reversed. Returns None when both sources are empty.
pub fn build_typeline(
    raw_typeline: Option<&[String]>,
    secondary_types: &str,
    table: &TypelineTable,
) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();

    if let Some(first) = raw_typeline.and_then(|tl| tl.first()) {
        parts.push(table.translate(first));
    }

    if let Some(inner) = bracketed_prefix(secondary_types) {
        let segments: Vec<&str> = inner.split('|').collect();
        if segments.len() > 1 {
            parts.extend(segments[1..].iter().rev());
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("【{}】", parts.join("/")))
    }
}

/// Extract the content of a `[...]` prefix, if the string starts with one
fn bracketed_prefix(s: &str) -> Option<&str> {
    let rest = s.strip_prefix('[')?;
    let end = rest.find(']')?;
    Some(&rest[..end])
}
