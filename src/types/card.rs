//! Card record types consumed from the card-search provider.

use serde::{Deserialize, Serialize};

/// Canonical card-type bucket for creatures (attackers and bench support).
pub const CREATURE_TYPE: &str = "Creature";

/// Canonical card-type bucket for support/utility cards.
pub const SUPPORT_TYPE: &str = "Support";

/// Canonical card-type bucket for energy cards.
pub const ENERGY_TYPE: &str = "Energy";

/// Target deck size. Drives the completion percentage and the search
/// policy's "full enough" cutoff.
pub const TARGET_DECK_SIZE: usize = 60;

/// An attack printed on a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Attack {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            text: Some(text.into()),
        }
    }
}

/// An ability printed on a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl Ability {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            text: Some(text.into()),
        }
    }
}

/// A card record as returned by the search provider.
///
/// Provider payloads are loosely populated, so every field is optional.
/// Missing fields degrade to zero-contribution defaults in scoring and tag
/// extraction rather than producing errors. Records without a `card_id`
/// are skipped silently when added to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub hp: Option<u32>,
    /// Elemental types (e.g. "Fire", "Water").
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub attacks: Vec<Attack>,
    #[serde(default)]
    pub abilities: Vec<Ability>,
}

impl CardRecord {
    /// Create a record with an id and a name; everything else defaults.
    pub fn new(card_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            card_id: Some(card_id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_card_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = Some(card_type.into());
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_elemental_type(mut self, elemental: impl Into<String>) -> Self {
        self.types.push(elemental.into());
        self
    }

    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Card name, falling back to "Unknown".
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Card type, falling back to "Unknown".
    pub fn display_type(&self) -> &str {
        self.card_type.as_deref().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_partial_record() {
        let json = r#"{"card_id": "c1", "name": "Emberpup"}"#;
        let card: CardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(card.card_id.as_deref(), Some("c1"));
        assert_eq!(card.display_type(), "Unknown");
        assert!(card.attacks.is_empty());
        assert!(card.types.is_empty());
    }

    #[test]
    fn deserialize_full_record() {
        let json = r#"{
            "card_id": "c2",
            "name": "Tidecaller",
            "card_type": "Creature",
            "subtype": "Stage 1",
            "hp": 120,
            "types": ["Water"],
            "attacks": [{"name": "Wave", "text": "Discard an energy."}],
            "abilities": [{"name": "Flow", "text": "Draw a card."}]
        }"#;
        let card: CardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(card.hp, Some(120));
        assert_eq!(card.attacks.len(), 1);
        assert_eq!(card.abilities[0].name.as_deref(), Some("Flow"));
    }

    #[test]
    fn missing_name_falls_back() {
        let card = CardRecord {
            card_id: Some("c3".into()),
            ..CardRecord::default()
        };
        assert_eq!(card.display_name(), "Unknown");
    }
}
