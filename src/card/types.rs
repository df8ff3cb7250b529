use crate::card::effects::{ActivatedAbility, Effect, Trigger};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifies a player. Games are two-player; indices are 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player in a two-player game.
    pub fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }
}

/// Identifies one physical card instance, stable across zone changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

/// Identifies a card definition (the shared, immutable template).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardDefId(pub u32);

/// Mana colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaColor {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "C")]
    Colorless,
}

/// Mana cost for a card: colored/colorless pips plus a generic component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaCost {
    #[serde(default)]
    pub white: u32,
    #[serde(default)]
    pub blue: u32,
    #[serde(default)]
    pub black: u32,
    #[serde(default)]
    pub red: u32,
    #[serde(default)]
    pub green: u32,
    #[serde(default)]
    pub colorless: u32,
    #[serde(default)]
    pub generic: u32,
}

impl ManaCost {
    pub fn total_value(&self) -> u32 {
        self.white + self.blue + self.black + self.red + self.green + self.colorless + self.generic
    }

    pub fn is_free(&self) -> bool {
        self.total_value() == 0
    }
}

/// Primary card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Land,
    Creature,
    Instant,
    Sorcery,
    Artifact,
    Enchantment,
    Planeswalker,
}

impl CardType {
    /// Permanent types stay on the battlefield after resolving.
    pub fn is_permanent(self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery)
    }
}

/// Static ability keywords consulted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    Flying,
    Reach,
    Vigilance,
    Haste,
    Flash,
}

/// Static card template, shared by every instance of the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardDefId,
    pub name: String,
    pub card_type: CardType,
    #[serde(default)]
    pub mana_cost: ManaCost,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub toughness: Option<u32>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    /// Effect executed when the card resolves as a spell.
    #[serde(default)]
    pub effect: Option<Effect>,
    /// Effect executed when the card enters the battlefield.
    #[serde(default)]
    pub etb_effect: Option<Effect>,
    #[serde(default)]
    pub activated: Option<ActivatedAbility>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

impl CardDefinition {
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }

    pub fn is_land(&self) -> bool {
        self.card_type == CardType::Land
    }
}

/// One physical card. The definition is shared; the instance id is unique
/// per object and stable while the card moves between zones.
#[derive(Debug, Clone)]
pub struct CardInstance {
    pub id: InstanceId,
    pub owner: PlayerId,
    pub definition: Arc<CardDefinition>,
}

impl CardInstance {
    pub fn new(id: InstanceId, owner: PlayerId, definition: Arc<CardDefinition>) -> Self {
        CardInstance {
            id,
            owner,
            definition,
        }
    }

    pub fn card_id(&self) -> CardDefId {
        self.definition.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips_between_players() {
        assert_eq!(PlayerId(0).opponent(), PlayerId(1));
        assert_eq!(PlayerId(1).opponent(), PlayerId(0));
    }

    #[test]
    fn test_total_value_sums_all_components() {
        let cost = ManaCost {
            white: 1,
            generic: 2,
            ..Default::default()
        };
        assert_eq!(cost.total_value(), 3);
        assert!(!cost.is_free());
        assert!(ManaCost::default().is_free());
    }

    #[test]
    fn test_permanent_types() {
        assert!(CardType::Creature.is_permanent());
        assert!(CardType::Land.is_permanent());
        assert!(CardType::Enchantment.is_permanent());
        assert!(!CardType::Instant.is_permanent());
        assert!(!CardType::Sorcery.is_permanent());
    }
}
