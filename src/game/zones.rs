use crate::card::types::{CardInstance, InstanceId, Keyword, PlayerId};

/// The zones a card can occupy. A card instance exists in exactly one zone
/// at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Stack,
}

/// Per-creature battlefield state. All mutators are copy-on-write so combat
/// math can snapshot values without aliasing the live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatureState {
    pub base_power: u32,
    pub base_toughness: u32,
    pub plus_counters: u32,
    pub damage: u32,
    pub attacking: bool,
    pub attacked_this_turn: bool,
    /// The attacker this creature blocks, if any.
    pub blocking: Option<InstanceId>,
    /// The blocker assigned to this creature, if any.
    pub blocked_by: Option<InstanceId>,
    pub summoning_sick: bool,
}

impl CreatureState {
    pub fn new(base_power: u32, base_toughness: u32, summoning_sick: bool) -> Self {
        CreatureState {
            base_power,
            base_toughness,
            plus_counters: 0,
            damage: 0,
            attacking: false,
            attacked_this_turn: false,
            blocking: None,
            blocked_by: None,
            summoning_sick,
        }
    }

    pub fn power(&self) -> u32 {
        self.base_power + self.plus_counters
    }

    pub fn toughness(&self) -> u32 {
        self.base_toughness + self.plus_counters
    }

    /// Marked damage meets or exceeds toughness.
    pub fn has_lethal_damage(&self) -> bool {
        self.damage >= self.toughness()
    }

    pub fn with_counters_added(self, count: u32) -> Self {
        CreatureState {
            plus_counters: self.plus_counters + count,
            ..self
        }
    }

    pub fn with_damage_marked(self, amount: u32) -> Self {
        CreatureState {
            damage: self.damage + amount,
            ..self
        }
    }

    pub fn with_damage_cleared(self) -> Self {
        CreatureState { damage: 0, ..self }
    }

    pub fn with_attacking(self, attacker: bool) -> Self {
        CreatureState {
            attacking: attacker,
            attacked_this_turn: self.attacked_this_turn || attacker,
            ..self
        }
    }

    pub fn with_blocking(self, attacker: Option<InstanceId>) -> Self {
        CreatureState {
            blocking: attacker,
            ..self
        }
    }

    pub fn with_blocked_by(self, blocker: Option<InstanceId>) -> Self {
        CreatureState {
            blocked_by: blocker,
            ..self
        }
    }

    pub fn with_sickness_cleared(self) -> Self {
        CreatureState {
            summoning_sick: false,
            ..self
        }
    }

    /// Reset the per-turn attack bookkeeping at untap.
    pub fn with_turn_flags_cleared(self) -> Self {
        CreatureState {
            attacked_this_turn: false,
            ..self
        }
    }

    /// Drop all combat relationships at end of combat.
    pub fn with_combat_cleared(self) -> Self {
        CreatureState {
            attacking: false,
            blocking: None,
            blocked_by: None,
            ..self
        }
    }
}

/// Battlefield-only state for a permanent; discarded when it leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermanentState {
    pub tapped: bool,
    pub creature: Option<CreatureState>,
}

/// A card on the battlefield together with its controller and state.
#[derive(Debug, Clone)]
pub struct Permanent {
    pub card: CardInstance,
    pub controller: PlayerId,
    pub state: PermanentState,
}

impl Permanent {
    pub fn new(card: CardInstance, controller: PlayerId) -> Self {
        let creature = if card.definition.is_creature() {
            Some(CreatureState::new(
                card.definition.power.unwrap_or(0),
                card.definition.toughness.unwrap_or(0),
                !card.definition.has_keyword(Keyword::Haste),
            ))
        } else {
            None
        };
        Permanent {
            card,
            controller,
            state: PermanentState {
                tapped: false,
                creature,
            },
        }
    }

    pub fn id(&self) -> InstanceId {
        self.card.id
    }

    pub fn is_creature(&self) -> bool {
        self.state.creature.is_some()
    }

    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.card.definition.has_keyword(keyword)
    }
}

/// Permanents in play, shared by both players. Insertion order is preserved
/// and drives trigger evaluation order.
#[derive(Debug, Clone, Default)]
pub struct Battlefield {
    permanents: Vec<Permanent>,
}

impl Battlefield {
    pub fn new() -> Self {
        Battlefield {
            permanents: Vec::new(),
        }
    }

    pub fn add(&mut self, permanent: Permanent) {
        self.permanents.push(permanent);
    }

    pub fn remove(&mut self, id: InstanceId) -> Option<Permanent> {
        let pos = self.permanents.iter().position(|p| p.id() == id)?;
        Some(self.permanents.remove(pos))
    }

    pub fn get(&self, id: InstanceId) -> Option<&Permanent> {
        self.permanents.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Permanent> {
        self.permanents.iter_mut().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    pub fn permanents(&self) -> &[Permanent] {
        &self.permanents
    }

    pub fn permanents_mut(&mut self) -> &mut [Permanent] {
        &mut self.permanents
    }

    pub fn len(&self) -> usize {
        self.permanents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permanents.is_empty()
    }
}

/// An ordered, owner-scoped pile of cards (library, hand, or graveyard).
#[derive(Debug, Clone, Default)]
pub struct CardPile {
    cards: Vec<CardInstance>,
}

impl CardPile {
    pub fn new() -> Self {
        CardPile { cards: Vec::new() }
    }

    pub fn add(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    /// Remove and return the top card (drawing from a library).
    pub fn draw(&mut self) -> Option<CardInstance> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let pos = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(pos))
    }

    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut Vec<CardInstance> {
        &mut self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
