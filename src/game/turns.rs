use crate::error::GameError;
use crate::game::state::Game;
use crate::game::triggers::{self, GameEvent};
use crate::game::{combat, sba};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Steps of a turn, in order. `ADVANCE_STEP` is the only transition action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    Untap,
    Upkeep,
    Draw,
    FirstMain,
    BeginningOfCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndOfCombat,
    SecondMain,
    EndStep,
    Cleanup,
}

impl Step {
    /// The next step in the normal sequence, or None at the end of the turn.
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Untap => Some(Step::Upkeep),
            Step::Upkeep => Some(Step::Draw),
            Step::Draw => Some(Step::FirstMain),
            Step::FirstMain => Some(Step::BeginningOfCombat),
            Step::BeginningOfCombat => Some(Step::DeclareAttackers),
            Step::DeclareAttackers => Some(Step::DeclareBlockers),
            Step::DeclareBlockers => Some(Step::CombatDamage),
            Step::CombatDamage => Some(Step::EndOfCombat),
            Step::EndOfCombat => Some(Step::SecondMain),
            Step::SecondMain => Some(Step::EndStep),
            Step::EndStep => Some(Step::Cleanup),
            Step::Cleanup => None,
        }
    }

    pub fn is_main(self) -> bool {
        matches!(self, Step::FirstMain | Step::SecondMain)
    }
}

/// Turn-level state: whose turn it is, which step, and any extra steps
/// scheduled by effects (drained before the normal sequence resumes).
#[derive(Debug, Clone)]
pub struct TurnState {
    pub turn_number: u32,
    pub active_player: crate::card::types::PlayerId,
    pub step: Step,
    pub scheduled_steps: VecDeque<Step>,
}

impl TurnState {
    pub fn new(starting_player: crate::card::types::PlayerId) -> Self {
        TurnState {
            turn_number: 1,
            active_player: starting_player,
            step: Step::Untap,
            scheduled_steps: VecDeque::new(),
        }
    }
}

/// Advance to the next step, firing its entry effects. Scheduled extra steps
/// take precedence over the normal successor; after Cleanup the turn passes
/// to the other player.
pub fn advance_step(game: &mut Game) -> Result<(), GameError> {
    let next = match game.turn.scheduled_steps.pop_front() {
        Some(step) => step,
        None => match game.turn.step.next() {
            Some(step) => step,
            None => {
                begin_next_turn(game);
                return Ok(());
            }
        },
    };
    game.turn.step = next;
    enter_step(game);
    Ok(())
}

/// Rotate the active player and start their turn at Untap. The turn number
/// increments when control returns to the first player in turn order.
fn begin_next_turn(game: &mut Game) {
    let next_active = game.turn.active_player.opponent();
    game.turn.active_player = next_active;
    if next_active.index() == 0 {
        game.turn.turn_number += 1;
    }
    game.turn.scheduled_steps.clear();
    // Auto-pass intent lasts until a new turn begins.
    game.priority.auto_pass = [false, false];
    for player in game.players.iter_mut() {
        player.lands_played_this_turn = 0;
    }
    game.turn.step = Step::Untap;
    enter_step(game);
}

/// Fire the entry effects for the current step and hand priority to the
/// active player.
fn enter_step(game: &mut Game) {
    let step = game.turn.step;
    game.priority.holder = game.turn.active_player;
    game.priority.consecutive_passes = 0;

    match step {
        Step::Untap => untap_step(game),
        Step::Draw => draw_step(game),
        Step::CombatDamage => combat::resolve_combat_damage(game),
        Step::EndOfCombat => combat::end_combat(game),
        Step::Cleanup => cleanup_step(game),
        _ => {}
    }

    triggers::raise_event(game, &GameEvent::StepStarted { step });
    sba::run_sba(game);
}

/// Untap the active player's permanents and clear their summoning sickness
/// and per-turn attack bookkeeping.
fn untap_step(game: &mut Game) {
    let active = game.turn.active_player;
    for permanent in game.battlefield.permanents_mut() {
        if permanent.controller != active {
            continue;
        }
        permanent.state.tapped = false;
        if let Some(creature) = permanent.state.creature {
            permanent.state.creature =
                Some(creature.with_sickness_cleared().with_turn_flags_cleared());
        }
    }
}

/// Automatic draw for the active player, skipped on the opening turn of the
/// game (the starting player's first turn).
fn draw_step(game: &mut Game) {
    let active = game.turn.active_player;
    let opening_turn = game.turn.turn_number == 1 && active.index() == 0;
    if !opening_turn {
        game.draw_cards(active, 1);
    }
}

/// Cleanup: clear all mana pools and all marked damage, then the active
/// player discards down to seven cards.
fn cleanup_step(game: &mut Game) {
    for player in game.players.iter_mut() {
        player.mana.clear();
    }
    for permanent in game.battlefield.permanents_mut() {
        if let Some(creature) = permanent.state.creature {
            permanent.state.creature = Some(creature.with_damage_cleared());
        }
    }
    let active = game.turn.active_player.index();
    while game.players[active].hand.len() > 7 {
        let last = game.players[active].hand.cards()[game.players[active].hand.len() - 1].id;
        if let Some(card) = game.players[active].hand.remove(last) {
            game.players[active].graveyard.add(card);
        }
    }
}
