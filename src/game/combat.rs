use crate::card::types::{InstanceId, Keyword, PlayerId};
use crate::error::GameError;
use crate::game::state::Game;
use crate::game::triggers::{self, GameEvent};

/// One computed combat damage assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageAssignment {
    pub target: DamageTarget,
    pub amount: u32,
}

/// The recipient of combat damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageTarget {
    Player(PlayerId),
    Creature(InstanceId),
}

/// Declare an attacker. Legal only during DeclareAttackers for the active
/// player, with an untapped creature that is neither summoning sick (absent
/// Haste) nor a repeat attacker this turn.
pub fn declare_attacker(
    game: &mut Game,
    player: PlayerId,
    creature_id: InstanceId,
) -> Result<(), GameError> {
    if game.turn.step != crate::game::turns::Step::DeclareAttackers {
        return Err(GameError::WrongStep(game.turn.step));
    }
    if player != game.turn.active_player {
        return Err(GameError::NotYourTurn(player));
    }
    let permanent = game
        .battlefield
        .get(creature_id)
        .ok_or(GameError::PermanentNotFound(creature_id))?;
    if permanent.controller != player {
        return Err(GameError::NotYourPermanent(creature_id, player));
    }
    let creature = permanent
        .state
        .creature
        .ok_or(GameError::NotACreature(creature_id))?;
    if permanent.state.tapped {
        return Err(GameError::CreatureTapped(creature_id));
    }
    if creature.summoning_sick && !permanent.has_keyword(Keyword::Haste) {
        return Err(GameError::CreatureHasSummoningSickness(creature_id));
    }
    if creature.attacked_this_turn {
        return Err(GameError::AlreadyAttacked(creature_id));
    }

    let vigilance = permanent.has_keyword(Keyword::Vigilance);
    let permanent = game
        .battlefield
        .get_mut(creature_id)
        .expect("validated above");
    permanent.state.creature = Some(creature.with_attacking(true));
    if !vigilance {
        permanent.state.tapped = true;
    }

    triggers::raise_event(
        game,
        &GameEvent::CreatureDeclaredAttacker {
            attacker: creature_id,
            controller: player,
        },
    );
    Ok(())
}

/// Declare a blocker. Legal only during DeclareBlockers for the defending
/// player; one blocker per attacker and one attacker per blocker. A Flying
/// attacker can only be blocked by Flying or Reach.
pub fn declare_blocker(
    game: &mut Game,
    player: PlayerId,
    blocker_id: InstanceId,
    attacker_id: InstanceId,
) -> Result<(), GameError> {
    if game.turn.step != crate::game::turns::Step::DeclareBlockers {
        return Err(GameError::WrongStep(game.turn.step));
    }
    if player != game.turn.active_player.opponent() {
        return Err(GameError::NotYourTurn(player));
    }

    let blocker = game
        .battlefield
        .get(blocker_id)
        .ok_or(GameError::PermanentNotFound(blocker_id))?;
    if blocker.controller != player {
        return Err(GameError::NotYourPermanent(blocker_id, player));
    }
    let blocker_state = blocker
        .state
        .creature
        .ok_or(GameError::NotACreature(blocker_id))?;
    if blocker.state.tapped {
        return Err(GameError::CreatureTapped(blocker_id));
    }
    if blocker_state.blocking.is_some() {
        return Err(GameError::AlreadyBlocking(blocker_id));
    }

    let attacker = game
        .battlefield
        .get(attacker_id)
        .ok_or(GameError::PermanentNotFound(attacker_id))?;
    let attacker_state = attacker
        .state
        .creature
        .ok_or(GameError::NotACreature(attacker_id))?;
    if !attacker_state.attacking {
        return Err(GameError::NotAttacking(attacker_id));
    }
    if attacker_state.blocked_by.is_some() {
        return Err(GameError::AttackerAlreadyBlocked(attacker_id));
    }
    if attacker.has_keyword(Keyword::Flying)
        && !(blocker.has_keyword(Keyword::Flying) || blocker.has_keyword(Keyword::Reach))
    {
        return Err(GameError::CannotBlockFlyingCreature(blocker_id));
    }

    let blocker = game
        .battlefield
        .get_mut(blocker_id)
        .expect("validated above");
    blocker.state.creature = Some(blocker_state.with_blocking(Some(attacker_id)));
    let attacker = game
        .battlefield
        .get_mut(attacker_id)
        .expect("validated above");
    attacker.state.creature = Some(attacker_state.with_blocked_by(Some(blocker_id)));
    Ok(())
}

/// Compute all combat damage assignments without applying any of them.
/// Attackers that have left the battlefield assign nothing; a blocked
/// attacker whose blocker has left deals no damage (no trample substitution).
pub fn compute_damage(game: &Game) -> Vec<DamageAssignment> {
    let mut assignments = Vec::new();
    for permanent in game.battlefield.permanents() {
        let Some(creature) = permanent.state.creature else {
            continue;
        };
        if !creature.attacking {
            continue;
        }
        let power = creature.power();
        match creature.blocked_by {
            Some(blocker_id) => {
                if let Some(blocker) = game.battlefield.get(blocker_id) {
                    if let Some(blocker_state) = blocker.state.creature {
                        if power > 0 {
                            assignments.push(DamageAssignment {
                                target: DamageTarget::Creature(blocker_id),
                                amount: power,
                            });
                        }
                        if blocker_state.power() > 0 {
                            assignments.push(DamageAssignment {
                                target: DamageTarget::Creature(permanent.id()),
                                amount: blocker_state.power(),
                            });
                        }
                    }
                }
                // Blocker gone: the assignment is dropped entirely.
            }
            None => {
                if power > 0 {
                    assignments.push(DamageAssignment {
                        target: DamageTarget::Player(permanent.controller.opponent()),
                        amount: power,
                    });
                }
            }
        }
    }
    assignments
}

/// Apply assignments simultaneously: all amounts were computed against the
/// pre-damage snapshot, so a 5/1 trading with a 1/5 kills both.
pub fn apply_damage(game: &mut Game, assignments: &[DamageAssignment]) {
    for assignment in assignments {
        match assignment.target {
            DamageTarget::Player(player) => {
                game.players[player.index()].life -= assignment.amount as i32;
            }
            DamageTarget::Creature(id) => {
                if let Some(permanent) = game.battlefield.get_mut(id) {
                    if let Some(creature) = permanent.state.creature {
                        permanent.state.creature =
                            Some(creature.with_damage_marked(assignment.amount));
                    }
                }
            }
        }
    }
}

/// Automatic damage resolution on entry to the CombatDamage step.
pub fn resolve_combat_damage(game: &mut Game) {
    let assignments = compute_damage(game);
    apply_damage(game, &assignments);
}

/// Clear attack/block relationships at end of combat and raise COMBAT_ENDED.
/// Marked damage persists until Cleanup.
pub fn end_combat(game: &mut Game) {
    for permanent in game.battlefield.permanents_mut() {
        if let Some(creature) = permanent.state.creature {
            permanent.state.creature = Some(creature.with_combat_cleared());
        }
    }
    triggers::raise_event(game, &GameEvent::CombatEnded);
}
