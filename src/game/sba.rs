use crate::card::types::{InstanceId, PlayerId};
use crate::game::state::Game;
use crate::game::triggers;
use serde::{Deserialize, Serialize};

/// Why a player lost the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LossReason {
    LifeTotal,
    EmptyLibrary,
}

/// Why a finished game ended without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawReason {
    SimultaneousLoss,
}

/// Terminal result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameOutcome {
    Win {
        winner: PlayerId,
        reason: LossReason,
    },
    Draw {
        reason: DrawReason,
    },
}

/// Whether the game is still accepting actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished(GameOutcome),
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished(_))
    }
}

/// Run state-based actions to a fixed point: destroy creatures with lethal
/// damage, then determine losses (life at or below zero, or an attempted
/// draw from an empty library this action). Called after every mutation.
pub fn run_sba(game: &mut Game) {
    if game.status.is_finished() {
        return;
    }

    loop {
        let dead: Vec<InstanceId> = game
            .battlefield
            .permanents()
            .iter()
            .filter(|p| {
                p.state
                    .creature
                    .map(|c| c.has_lethal_damage())
                    .unwrap_or(false)
            })
            .map(|p| p.id())
            .collect();
        if dead.is_empty() {
            break;
        }
        for id in dead {
            triggers::destroy_permanent(game, id);
        }
    }

    let mut losses: Vec<(PlayerId, LossReason)> = Vec::new();
    for player in game.players.iter_mut() {
        if player.life <= 0 {
            losses.push((player.id, LossReason::LifeTotal));
        } else if player.drew_from_empty {
            losses.push((player.id, LossReason::EmptyLibrary));
        }
        // The flag is consumed once SBA has observed it.
        player.drew_from_empty = false;
    }

    match losses.as_slice() {
        [] => {}
        [(loser, reason)] => {
            game.status = GameStatus::Finished(GameOutcome::Win {
                winner: loser.opponent(),
                reason: *reason,
            });
        }
        _ => {
            game.status = GameStatus::Finished(GameOutcome::Draw {
                reason: DrawReason::SimultaneousLoss,
            });
        }
    }
}
