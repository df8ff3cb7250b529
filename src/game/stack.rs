use crate::card::effects::{Effect, EffectContext, TargetRef};
use crate::card::types::{CardInstance, InstanceId, PlayerId};
use crate::error::GameError;
use crate::game::state::Game;
use crate::game::triggers::{self, GameEvent};
use crate::game::zones::ZoneKind;
use crate::game::{sba, turns};

/// One pending item on the stack.
#[derive(Debug, Clone)]
pub enum StackItem {
    /// A spell cast from hand; the card rides the stack with it.
    Spell {
        card: CardInstance,
        controller: PlayerId,
        targets: Vec<TargetRef>,
    },
    /// An activated ability. Carries its effect and the source id as
    /// last-known information, so it resolves even if the source has since
    /// left the battlefield.
    Ability {
        source: InstanceId,
        effect: Effect,
        controller: PlayerId,
        targets: Vec<TargetRef>,
    },
}

impl StackItem {
    pub fn controller(&self) -> PlayerId {
        match self {
            StackItem::Spell { controller, .. } => *controller,
            StackItem::Ability { controller, .. } => *controller,
        }
    }
}

/// The stack: insertion-ordered, resolved LIFO.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    items: Vec<StackItem>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: StackItem) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<StackItem> {
        self.items.pop()
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Priority bookkeeping: who may act, how many consecutive passes have
/// occurred, and each player's auto-pass (end-turn) intent.
#[derive(Debug, Clone)]
pub struct PriorityState {
    pub holder: PlayerId,
    pub consecutive_passes: u8,
    pub auto_pass: [bool; 2],
}

impl PriorityState {
    pub fn new(holder: PlayerId) -> Self {
        PriorityState {
            holder,
            consecutive_passes: 0,
            auto_pass: [false, false],
        }
    }

    pub fn has_auto_pass(&self, player: PlayerId) -> bool {
        self.auto_pass[player.index()]
    }
}

/// After a spell or ability is put on the stack, priority passes to the
/// actor's opponent and the pass count resets.
pub fn on_stack_push(game: &mut Game, actor: PlayerId) {
    game.priority.holder = actor.opponent();
    game.priority.consecutive_passes = 0;
}

/// Pass priority for `player`. When both players have passed consecutively,
/// the top of a non-empty stack resolves; with an empty stack nothing
/// resolves and the active player may advance the step.
pub fn pass_priority(game: &mut Game, player: PlayerId) -> Result<(), GameError> {
    if game.priority.holder != player {
        return Err(GameError::NotYourPriority(player));
    }
    game.priority.consecutive_passes += 1;
    if game.priority.consecutive_passes >= 2 {
        if game.stack.is_empty() {
            game.priority.holder = game.turn.active_player;
            game.priority.consecutive_passes = 0;
        } else {
            resolve_top(game);
        }
    } else {
        game.priority.holder = player.opponent();
    }
    Ok(())
}

/// Pop and resolve the top stack item, then reset priority to the active
/// player and run state-based actions.
pub fn resolve_top(game: &mut Game) {
    let Some(item) = game.stack.pop() else {
        return;
    };

    match item {
        StackItem::Spell {
            card,
            controller,
            targets,
        } => {
            let instance = card.id;
            if let Some(effect) = card.definition.effect.clone() {
                let ctx = EffectContext {
                    source: instance,
                    controller,
                    targets,
                };
                triggers::execute_effect(game, &effect, &ctx);
            }
            if card.definition.card_type.is_permanent() {
                triggers::enter_battlefield(game, card, controller, ZoneKind::Stack);
            } else {
                game.players[controller.index()].graveyard.add(card);
            }
            triggers::raise_event(
                game,
                &GameEvent::SpellResolved {
                    instance,
                    controller,
                },
            );
        }
        StackItem::Ability {
            source,
            effect,
            controller,
            targets,
        } => {
            let ctx = EffectContext {
                source,
                controller,
                targets,
            };
            triggers::execute_effect(game, &effect, &ctx);
        }
    }

    game.priority.holder = game.turn.active_player;
    game.priority.consecutive_passes = 0;
    sba::run_sba(game);
}

/// Run auto-passes for players holding end-turn intent. Each iteration
/// either resolves a stack item or advances one step, and intent clears at
/// the start of a new turn, so the loop terminates.
pub fn run_auto_pass(game: &mut Game) {
    while !game.is_finished() {
        let holder = game.priority.holder;
        if !game.priority.has_auto_pass(holder) {
            break;
        }
        if !game.stack.is_empty() {
            // The intent holder passes the instant they receive priority.
            let _ = pass_priority(game, holder);
        } else if holder == game.turn.active_player {
            if turns::advance_step(game).is_err() {
                break;
            }
        } else {
            // Non-active holder with empty stack: pass back to the active
            // player, who decides whether to advance.
            game.priority.holder = game.turn.active_player;
            game.priority.consecutive_passes = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::registry::demo_set;
    use crate::card::types::CardInstance;
    use std::sync::Arc;

    #[test]
    fn test_stack_is_lifo() {
        let set = demo_set();
        let def = set.get_by_name("Lightning Jolt").unwrap();
        let mut stack = Stack::new();
        for id in 1..=3u64 {
            stack.push(StackItem::Spell {
                card: CardInstance::new(InstanceId(id), PlayerId(0), Arc::clone(&def)),
                controller: PlayerId(0),
                targets: Vec::new(),
            });
        }
        let popped = match stack.pop().unwrap() {
            StackItem::Spell { card, .. } => card.id,
            _ => unreachable!(),
        };
        assert_eq!(popped, InstanceId(3));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_priority_state_defaults() {
        let state = PriorityState::new(PlayerId(0));
        assert_eq!(state.holder, PlayerId(0));
        assert!(!state.has_auto_pass(PlayerId(0)));
        assert!(!state.has_auto_pass(PlayerId(1)));
    }
}
