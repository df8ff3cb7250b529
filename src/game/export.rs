use crate::card::effects::TargetRef;
use crate::card::types::{CardDefId, InstanceId, PlayerId};
use crate::game::sba::{GameOutcome, GameStatus};
use crate::game::stack::StackItem;
use crate::game::state::Game;
use crate::game::turns::Step;
use serde::{Deserialize, Serialize};

/// A card reference inside an export: the stable instance id plus the
/// definition id. Display names are a registry concern, never exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub instance: InstanceId,
    pub card: CardDefId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPoolExport {
    pub white: u32,
    pub blue: u32,
    pub black: u32,
    pub red: u32,
    pub green: u32,
    pub colorless: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureExport {
    pub power: u32,
    pub toughness: u32,
    pub base_power: u32,
    pub base_toughness: u32,
    pub plus_counters: u32,
    pub damage: u32,
    pub attacking: bool,
    pub summoning_sick: bool,
    pub blocking: Option<InstanceId>,
    pub blocked_by: Option<InstanceId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermanentExport {
    pub card: CardRef,
    pub controller: PlayerId,
    pub tapped: bool,
    pub creature: Option<CreatureExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerExport {
    pub id: PlayerId,
    pub life: i32,
    pub mana: ManaPoolExport,
    pub hand: Vec<CardRef>,
    pub library: Vec<CardRef>,
    pub graveyard: Vec<CardRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StackItemExport {
    SpellOnStack {
        card: CardRef,
        controller: PlayerId,
        targets: Vec<TargetRef>,
    },
    AbilityOnStack {
        source: InstanceId,
        controller: PlayerId,
        targets: Vec<TargetRef>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleExport {
    InProgress,
    Finished,
}

/// Flattened, serializable snapshot of a full game. Identical internal state
/// always produces a byte-identical JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateExport {
    pub turn: u32,
    pub active_player: PlayerId,
    pub step: Step,
    pub priority_player: PlayerId,
    pub lifecycle: LifecycleExport,
    pub outcome: Option<GameOutcome>,
    pub scheduled_steps: Vec<Step>,
    pub players: Vec<PlayerExport>,
    pub battlefield: Vec<PermanentExport>,
    pub stack: Vec<StackItemExport>,
}

impl Game {
    /// Produce a deterministic snapshot of the game. Side-effect free; the
    /// exporter never mutates game state.
    pub fn export(&self) -> GameStateExport {
        let (lifecycle, outcome) = match self.status {
            GameStatus::InProgress => (LifecycleExport::InProgress, None),
            GameStatus::Finished(outcome) => (LifecycleExport::Finished, Some(outcome)),
        };

        GameStateExport {
            turn: self.turn.turn_number,
            active_player: self.turn.active_player,
            step: self.turn.step,
            priority_player: self.priority.holder,
            lifecycle,
            outcome,
            scheduled_steps: self.turn.scheduled_steps.iter().copied().collect(),
            players: self.players.iter().map(export_player).collect(),
            battlefield: self
                .battlefield
                .permanents()
                .iter()
                .map(export_permanent)
                .collect(),
            stack: self.stack.items().iter().map(export_stack_item).collect(),
        }
    }
}

fn card_ref(card: &crate::card::types::CardInstance) -> CardRef {
    CardRef {
        instance: card.id,
        card: card.card_id(),
    }
}

fn export_player(player: &crate::game::state::PlayerState) -> PlayerExport {
    PlayerExport {
        id: player.id,
        life: player.life,
        mana: ManaPoolExport {
            white: player.mana.white,
            blue: player.mana.blue,
            black: player.mana.black,
            red: player.mana.red,
            green: player.mana.green,
            colorless: player.mana.colorless,
        },
        hand: player.hand.cards().iter().map(card_ref).collect(),
        library: player.library.cards().iter().map(card_ref).collect(),
        graveyard: player.graveyard.cards().iter().map(card_ref).collect(),
    }
}

fn export_permanent(permanent: &crate::game::zones::Permanent) -> PermanentExport {
    PermanentExport {
        card: card_ref(&permanent.card),
        controller: permanent.controller,
        tapped: permanent.state.tapped,
        creature: permanent.state.creature.map(|c| CreatureExport {
            power: c.power(),
            toughness: c.toughness(),
            base_power: c.base_power,
            base_toughness: c.base_toughness,
            plus_counters: c.plus_counters,
            damage: c.damage,
            attacking: c.attacking,
            summoning_sick: c.summoning_sick,
            blocking: c.blocking,
            blocked_by: c.blocked_by,
        }),
    }
}

fn export_stack_item(item: &StackItem) -> StackItemExport {
    match item {
        StackItem::Spell {
            card,
            controller,
            targets,
        } => StackItemExport::SpellOnStack {
            card: card_ref(card),
            controller: *controller,
            targets: targets.clone(),
        },
        StackItem::Ability {
            source,
            controller,
            targets,
            ..
        } => StackItemExport::AbilityOnStack {
            source: *source,
            controller: *controller,
            targets: targets.clone(),
        },
    }
}
