use crate::card::effects::{
    ActivatedAbility, Effect, GameEventKind, Trigger, TriggerCondition,
};
use crate::card::types::{CardDefId, CardDefinition, CardType, Keyword, ManaColor, ManaCost};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardSetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("card not found: {0}")]
    CardNotFound(String),
    #[error("invalid card data: {0}")]
    InvalidCard(String),
}

/// Display-name lookup supplied to UI layers. The engine itself never
/// depends on display strings.
pub trait CardRegistry {
    fn display_name(&self, id: CardDefId) -> Option<&str>;
}

/// A set of card definitions, loadable from JSON.
pub struct CardSet {
    by_id: HashMap<CardDefId, Arc<CardDefinition>>,
    by_name: HashMap<String, CardDefId>,
}

impl CardSet {
    pub fn new(definitions: Vec<CardDefinition>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        for def in definitions {
            by_name.insert(def.name.clone(), def.id);
            by_id.insert(def.id, Arc::new(def));
        }
        CardSet { by_id, by_name }
    }

    /// Load card definitions from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, CardSetError> {
        let content = std::fs::read_to_string(path)?;
        let definitions: Vec<CardDefinition> = serde_json::from_str(&content)?;
        let set = CardSet::new(definitions);
        set.validate()?;
        Ok(set)
    }

    pub fn get(&self, id: CardDefId) -> Result<Arc<CardDefinition>, CardSetError> {
        self.by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| CardSetError::CardNotFound(format!("id {}", id.0)))
    }

    pub fn get_by_name(&self, name: &str) -> Result<Arc<CardDefinition>, CardSetError> {
        let id = self
            .by_name
            .get(name)
            .ok_or_else(|| CardSetError::CardNotFound(name.to_string()))?;
        self.get(*id)
    }

    pub fn card_count(&self) -> usize {
        self.by_id.len()
    }

    pub fn card_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check structural consistency: creatures carry power/toughness,
    /// nothing else does, and ids are unique within the set.
    pub fn validate(&self) -> Result<(), CardSetError> {
        if self.by_id.is_empty() {
            return Err(CardSetError::InvalidCard("no cards loaded".to_string()));
        }
        for def in self.by_id.values() {
            let has_stats = def.power.is_some() && def.toughness.is_some();
            if def.is_creature() && !has_stats {
                return Err(CardSetError::InvalidCard(format!(
                    "creature {} is missing power/toughness",
                    def.name
                )));
            }
            if !def.is_creature() && (def.power.is_some() || def.toughness.is_some()) {
                return Err(CardSetError::InvalidCard(format!(
                    "non-creature {} has power/toughness",
                    def.name
                )));
            }
        }
        if self.by_name.len() != self.by_id.len() {
            return Err(CardSetError::InvalidCard(
                "duplicate card names in set".to_string(),
            ));
        }
        Ok(())
    }
}

impl CardRegistry for CardSet {
    fn display_name(&self, id: CardDefId) -> Option<&str> {
        self.by_id.get(&id).map(|d| d.name.as_str())
    }
}

fn land(id: u32, name: &str) -> CardDefinition {
    CardDefinition {
        id: CardDefId(id),
        name: name.to_string(),
        card_type: CardType::Land,
        mana_cost: ManaCost::default(),
        power: None,
        toughness: None,
        keywords: Vec::new(),
        effect: None,
        etb_effect: None,
        activated: None,
        triggers: Vec::new(),
    }
}

fn creature(
    id: u32,
    name: &str,
    cost: ManaCost,
    power: u32,
    toughness: u32,
    keywords: Vec<Keyword>,
) -> CardDefinition {
    CardDefinition {
        id: CardDefId(id),
        name: name.to_string(),
        card_type: CardType::Creature,
        mana_cost: cost,
        power: Some(power),
        toughness: Some(toughness),
        keywords,
        effect: None,
        etb_effect: None,
        activated: None,
        triggers: Vec::new(),
    }
}

/// Built-in demo set used by the CLI, benches, and tests.
pub fn demo_set() -> CardSet {
    let mut cards = vec![
        land(1, "Plains"),
        land(2, "Island"),
        land(3, "Swamp"),
        land(4, "Mountain"),
        land(5, "Forest"),
        creature(
            10,
            "Bear Cub",
            ManaCost {
                green: 1,
                generic: 1,
                ..Default::default()
            },
            2,
            2,
            Vec::new(),
        ),
        creature(
            11,
            "Cliff Hawk",
            ManaCost {
                blue: 1,
                generic: 1,
                ..Default::default()
            },
            2,
            1,
            vec![Keyword::Flying],
        ),
        creature(
            12,
            "Web Spider",
            ManaCost {
                green: 1,
                generic: 2,
                ..Default::default()
            },
            1,
            4,
            vec![Keyword::Reach],
        ),
        creature(
            13,
            "Rush Goblin",
            ManaCost {
                red: 1,
                ..Default::default()
            },
            2,
            1,
            vec![Keyword::Haste],
        ),
        creature(
            14,
            "Ambush Lynx",
            ManaCost {
                green: 1,
                generic: 1,
                ..Default::default()
            },
            2,
            2,
            vec![Keyword::Flash],
        ),
        creature(
            15,
            "Tower Sentinel",
            ManaCost {
                white: 1,
                generic: 2,
                ..Default::default()
            },
            2,
            4,
            vec![Keyword::Vigilance],
        ),
    ];

    // Omen Keeper: draws a card when it enters the battlefield.
    let mut omen_keeper = creature(
        16,
        "Omen Keeper",
        ManaCost {
            blue: 1,
            generic: 1,
            ..Default::default()
        },
        1,
        2,
        Vec::new(),
    );
    omen_keeper.etb_effect = Some(Effect::DrawCards { count: 1 });
    cards.push(omen_keeper);

    // Spirit Chaplain: gains its controller 1 life whenever any creature
    // enters the battlefield (itself included).
    let mut chaplain = creature(
        17,
        "Spirit Chaplain",
        ManaCost {
            white: 1,
            ..Default::default()
        },
        1,
        1,
        Vec::new(),
    );
    chaplain.triggers = vec![Trigger {
        event: GameEventKind::ZoneChanged,
        condition: TriggerCondition::AnyCreatureEnters,
        effect: Effect::GainLife { amount: 1 },
    }];
    cards.push(chaplain);

    cards.push(CardDefinition {
        id: CardDefId(20),
        name: "Lightning Jolt".to_string(),
        card_type: CardType::Instant,
        mana_cost: ManaCost {
            red: 1,
            ..Default::default()
        },
        power: None,
        toughness: None,
        keywords: Vec::new(),
        effect: Some(Effect::DealDamage { amount: 3 }),
        etb_effect: None,
        activated: None,
        triggers: Vec::new(),
    });

    cards.push(CardDefinition {
        id: CardDefId(21),
        name: "Life Sap".to_string(),
        card_type: CardType::Sorcery,
        mana_cost: ManaCost {
            black: 1,
            generic: 1,
            ..Default::default()
        },
        power: None,
        toughness: None,
        keywords: Vec::new(),
        effect: Some(Effect::Sequence {
            effects: vec![
                Effect::LoseLife { amount: 2 },
                Effect::GainLife { amount: 2 },
            ],
        }),
        etb_effect: None,
        activated: None,
        triggers: Vec::new(),
    });

    // Scrying Lens: tap to draw a card.
    cards.push(CardDefinition {
        id: CardDefId(22),
        name: "Scrying Lens".to_string(),
        card_type: CardType::Artifact,
        mana_cost: ManaCost {
            generic: 2,
            ..Default::default()
        },
        power: None,
        toughness: None,
        keywords: Vec::new(),
        effect: None,
        etb_effect: None,
        activated: Some(ActivatedAbility {
            effect: Effect::DrawCards { count: 1 },
        }),
        triggers: Vec::new(),
    });

    // Battle Standard: an extra combat phase when it resolves.
    cards.push(CardDefinition {
        id: CardDefId(23),
        name: "Battle Standard".to_string(),
        card_type: CardType::Sorcery,
        mana_cost: ManaCost {
            red: 1,
            generic: 2,
            ..Default::default()
        },
        power: None,
        toughness: None,
        keywords: Vec::new(),
        effect: Some(Effect::AddCombatPhase),
        etb_effect: None,
        activated: None,
        triggers: Vec::new(),
    });

    // Prism Font: tap for one colorless mana.
    cards.push(CardDefinition {
        id: CardDefId(24),
        name: "Prism Font".to_string(),
        card_type: CardType::Artifact,
        mana_cost: ManaCost {
            generic: 1,
            ..Default::default()
        },
        power: None,
        toughness: None,
        keywords: Vec::new(),
        effect: None,
        etb_effect: None,
        activated: Some(ActivatedAbility {
            effect: Effect::AddMana {
                color: ManaColor::Colorless,
                amount: 1,
            },
        }),
        triggers: Vec::new(),
    });

    CardSet::new(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_set_validates() {
        let set = demo_set();
        assert!(set.validate().is_ok());
        assert!(set.card_count() >= 14);
    }

    #[test]
    fn test_get_by_name() {
        let set = demo_set();
        let bear = set.get_by_name("Bear Cub").unwrap();
        assert_eq!(bear.power, Some(2));
        assert!(set.get_by_name("No Such Card").is_err());
    }

    #[test]
    fn test_display_name_lookup() {
        let set = demo_set();
        let id = set.get_by_name("Forest").unwrap().id;
        assert_eq!(set.display_name(id), Some("Forest"));
        assert_eq!(set.display_name(CardDefId(9999)), None);
    }

    #[test]
    fn test_validate_rejects_creature_without_stats() {
        let mut def = land(1, "Broken");
        def.card_type = CardType::Creature;
        let set = CardSet::new(vec![def]);
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_set_round_trips_through_json() {
        let set = demo_set();
        let defs: Vec<CardDefinition> = set
            .card_names()
            .iter()
            .map(|n| (*set.get_by_name(n).unwrap()).clone())
            .collect();
        let json = serde_json::to_string(&defs).unwrap();
        let parsed: Vec<CardDefinition> = serde_json::from_str(&json).unwrap();
        let reloaded = CardSet::new(parsed);
        assert_eq!(reloaded.card_count(), set.card_count());
        assert!(reloaded.validate().is_ok());
    }
}
