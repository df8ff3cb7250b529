use crate::card::effects::TargetRef;
use crate::card::types::{CardType, InstanceId, Keyword, PlayerId};
use crate::error::GameError;
use crate::game::state::Game;
use crate::game::stack::{self, StackItem};
use crate::game::triggers;
use crate::game::turns;
use crate::game::zones::ZoneKind;
use crate::game::{combat, sba};
use serde::{Deserialize, Serialize};

/// A player action submitted to `Game::apply`. Actions are processed
/// strictly in submission order; each either commits fully or is rejected
/// with no partial effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AdvanceStep {
        player: PlayerId,
    },
    EndTurn {
        player: PlayerId,
    },
    PlayLand {
        player: PlayerId,
        card: InstanceId,
    },
    CastSpell {
        player: PlayerId,
        card: InstanceId,
        #[serde(default)]
        targets: Vec<TargetRef>,
    },
    PassPriority {
        player: PlayerId,
    },
    DeclareAttacker {
        player: PlayerId,
        creature: InstanceId,
    },
    DeclareBlocker {
        player: PlayerId,
        blocker: InstanceId,
        attacker: InstanceId,
    },
    ActivateAbility {
        player: PlayerId,
        permanent: InstanceId,
    },
    DrawCard {
        player: PlayerId,
        amount: u32,
    },
}

impl Action {
    pub fn player(&self) -> PlayerId {
        match self {
            Action::AdvanceStep { player }
            | Action::EndTurn { player }
            | Action::PlayLand { player, .. }
            | Action::CastSpell { player, .. }
            | Action::PassPriority { player }
            | Action::DeclareAttacker { player, .. }
            | Action::DeclareBlocker { player, .. }
            | Action::ActivateAbility { player, .. }
            | Action::DrawCard { player, .. } => *player,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::AdvanceStep { .. } => ActionKind::AdvanceStep,
            Action::EndTurn { .. } => ActionKind::EndTurn,
            Action::PlayLand { .. } => ActionKind::PlayLand,
            Action::CastSpell { .. } => ActionKind::CastSpell,
            Action::PassPriority { .. } => ActionKind::PassPriority,
            Action::DeclareAttacker { .. } => ActionKind::DeclareAttacker,
            Action::DeclareBlocker { .. } => ActionKind::DeclareBlocker,
            Action::ActivateAbility { .. } => ActionKind::ActivateAbility,
            Action::DrawCard { .. } => ActionKind::DrawCard,
        }
    }
}

/// Action type tags, used by the allowed-actions query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    AdvanceStep,
    EndTurn,
    PlayLand,
    CastSpell,
    PassPriority,
    DeclareAttacker,
    DeclareBlocker,
    ActivateAbility,
    DrawCard,
}

impl Game {
    /// Validate and apply one action. Validation happens before any
    /// mutation; on success, triggers run for every raised event and
    /// state-based actions run to completion before this returns.
    pub fn apply(&mut self, action: &Action) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        let player = action.player();
        self.player(player)?;

        match action {
            Action::AdvanceStep { player } => self.apply_advance_step(*player)?,
            Action::EndTurn { player } => {
                self.priority.auto_pass[player.index()] = true;
            }
            Action::PlayLand { player, card } => self.apply_play_land(*player, *card)?,
            Action::CastSpell {
                player,
                card,
                targets,
            } => self.apply_cast_spell(*player, *card, targets)?,
            Action::PassPriority { player } => stack::pass_priority(self, *player)?,
            Action::DeclareAttacker { player, creature } => {
                combat::declare_attacker(self, *player, *creature)?
            }
            Action::DeclareBlocker {
                player,
                blocker,
                attacker,
            } => combat::declare_blocker(self, *player, *blocker, *attacker)?,
            Action::ActivateAbility { player, permanent } => {
                self.apply_activate_ability(*player, *permanent)?
            }
            Action::DrawCard { player, amount } => {
                if *amount == 0 {
                    return Err(GameError::InvalidAmount);
                }
                self.draw_cards(*player, *amount);
            }
        }

        sba::run_sba(self);
        stack::run_auto_pass(self);
        Ok(())
    }

    fn apply_advance_step(&mut self, player: PlayerId) -> Result<(), GameError> {
        if player != self.turn.active_player {
            return Err(GameError::NotYourTurn(player));
        }
        if !self.stack.is_empty() {
            return Err(GameError::StackNotEmpty(self.stack.len()));
        }
        turns::advance_step(self)
    }

    fn apply_play_land(&mut self, player: PlayerId, card_id: InstanceId) -> Result<(), GameError> {
        if player != self.turn.active_player {
            return Err(GameError::NotYourTurn(player));
        }
        if !self.turn.step.is_main() {
            return Err(GameError::NotMainPhase(self.turn.step));
        }
        if !self.stack.is_empty() {
            return Err(GameError::StackNotEmpty(self.stack.len()));
        }
        if self.players[player.index()].lands_played_this_turn >= 1 {
            return Err(GameError::LandAlreadyPlayed);
        }
        let card = self.players[player.index()]
            .hand
            .get(card_id)
            .ok_or(GameError::CardNotInHand(card_id, player))?;
        if !card.definition.is_land() {
            return Err(GameError::WrongCardType(card.card_id()));
        }

        let card = self.players[player.index()]
            .hand
            .remove(card_id)
            .expect("validated above");
        self.players[player.index()].lands_played_this_turn += 1;
        triggers::enter_battlefield(self, card, player, ZoneKind::Hand);
        Ok(())
    }

    fn apply_cast_spell(
        &mut self,
        player: PlayerId,
        card_id: InstanceId,
        targets: &[TargetRef],
    ) -> Result<(), GameError> {
        if self.priority.holder != player {
            return Err(GameError::NotYourPriority(player));
        }
        let card = self.players[player.index()]
            .hand
            .get(card_id)
            .ok_or(GameError::CardNotInHand(card_id, player))?;
        let definition = &card.definition;
        if definition.is_land() {
            return Err(GameError::WrongCardType(definition.id));
        }

        // Instants and Flash permanents only need priority; everything else
        // is sorcery-speed.
        let instant_speed = definition.card_type == CardType::Instant
            || definition.has_keyword(Keyword::Flash);
        if !instant_speed {
            if player != self.turn.active_player {
                return Err(GameError::NotYourTurn(player));
            }
            if !self.turn.step.is_main() {
                return Err(GameError::NotMainPhase(self.turn.step));
            }
            if !self.stack.is_empty() {
                return Err(GameError::StackNotEmpty(self.stack.len()));
            }
        }
        self.validate_targets(targets)?;

        // Payment precedes the move to the stack and is all-or-nothing.
        let cost = definition.mana_cost.clone();
        self.players[player.index()].mana.pay(&cost)?;

        let card = self.players[player.index()]
            .hand
            .remove(card_id)
            .expect("validated above");
        self.stack.push(StackItem::Spell {
            card,
            controller: player,
            targets: targets.to_vec(),
        });
        stack::on_stack_push(self, player);
        Ok(())
    }

    fn apply_activate_ability(
        &mut self,
        player: PlayerId,
        permanent_id: InstanceId,
    ) -> Result<(), GameError> {
        if self.priority.holder != player {
            return Err(GameError::NotYourPriority(player));
        }
        let permanent = self.permanent(permanent_id)?;
        if permanent.controller != player {
            return Err(GameError::NotYourPermanent(permanent_id, player));
        }
        let ability = permanent
            .card
            .definition
            .activated
            .clone()
            .ok_or(GameError::NoActivatedAbility(permanent_id))?;
        if permanent.state.tapped {
            return Err(GameError::AlreadyTapped(permanent_id));
        }
        if let Some(creature) = permanent.state.creature {
            if creature.summoning_sick && !permanent.has_keyword(Keyword::Haste) {
                return Err(GameError::CreatureHasSummoningSickness(permanent_id));
            }
        }

        // Tap cost is paid up front; the ability then waits on the stack.
        let permanent = self
            .battlefield
            .get_mut(permanent_id)
            .expect("validated above");
        permanent.state.tapped = true;
        self.stack.push(StackItem::Ability {
            source: permanent_id,
            effect: ability.effect,
            controller: player,
            targets: Vec::new(),
        });
        stack::on_stack_push(self, player);
        Ok(())
    }

    fn validate_targets(&self, targets: &[TargetRef]) -> Result<(), GameError> {
        for target in targets {
            match target {
                TargetRef::Player { player } => {
                    self.player(*player)?;
                }
                TargetRef::Permanent { permanent } => {
                    self.permanent(*permanent)?;
                }
            }
        }
        Ok(())
    }

    /// The action type tags currently legal for `player`.
    pub fn allowed_actions(&self, player: PlayerId) -> Vec<ActionKind> {
        let mut allowed = Vec::new();
        if self.is_finished() || self.player(player).is_err() {
            return allowed;
        }

        let is_active = player == self.turn.active_player;
        let holds_priority = self.priority.holder == player;
        let stack_empty = self.stack.is_empty();
        let state = &self.players[player.index()];

        if is_active && stack_empty {
            allowed.push(ActionKind::AdvanceStep);
        }
        if !self.priority.has_auto_pass(player) {
            allowed.push(ActionKind::EndTurn);
        }
        if is_active
            && self.turn.step.is_main()
            && stack_empty
            && state.lands_played_this_turn == 0
            && state.hand.cards().iter().any(|c| c.definition.is_land())
        {
            allowed.push(ActionKind::PlayLand);
        }
        if holds_priority && self.has_castable_card(player) {
            allowed.push(ActionKind::CastSpell);
        }
        if holds_priority {
            allowed.push(ActionKind::PassPriority);
        }
        if is_active
            && self.turn.step == turns::Step::DeclareAttackers
            && self.has_eligible_attacker(player)
        {
            allowed.push(ActionKind::DeclareAttacker);
        }
        if player == self.defending_player()
            && self.turn.step == turns::Step::DeclareBlockers
            && self.has_eligible_blocker(player)
        {
            allowed.push(ActionKind::DeclareBlocker);
        }
        if holds_priority && self.has_activatable_permanent(player) {
            allowed.push(ActionKind::ActivateAbility);
        }
        allowed.push(ActionKind::DrawCard);
        allowed
    }

    fn has_castable_card(&self, player: PlayerId) -> bool {
        let state = &self.players[player.index()];
        let sorcery_speed_ok = player == self.turn.active_player
            && self.turn.step.is_main()
            && self.stack.is_empty();
        state.hand.cards().iter().any(|card| {
            let definition = &card.definition;
            if definition.is_land() {
                return false;
            }
            let instant_speed = definition.card_type == CardType::Instant
                || definition.has_keyword(Keyword::Flash);
            (instant_speed || sorcery_speed_ok) && state.mana.can_pay(&definition.mana_cost)
        })
    }

    fn has_eligible_attacker(&self, player: PlayerId) -> bool {
        self.battlefield.permanents().iter().any(|p| {
            p.controller == player
                && !p.state.tapped
                && p.state.creature.map_or(false, |c| {
                    !c.attacked_this_turn
                        && (!c.summoning_sick || p.has_keyword(Keyword::Haste))
                })
        })
    }

    fn has_eligible_blocker(&self, player: PlayerId) -> bool {
        let unblocked_attacker = self.battlefield.permanents().iter().any(|p| {
            p.state
                .creature
                .map_or(false, |c| c.attacking && c.blocked_by.is_none())
        });
        unblocked_attacker
            && self.battlefield.permanents().iter().any(|p| {
                p.controller == player
                    && !p.state.tapped
                    && p.state.creature.map_or(false, |c| c.blocking.is_none())
            })
    }

    fn has_activatable_permanent(&self, player: PlayerId) -> bool {
        self.battlefield.permanents().iter().any(|p| {
            p.controller == player
                && p.card.definition.activated.is_some()
                && !p.state.tapped
                && p.state.creature.map_or(true, |c| {
                    !c.summoning_sick || p.has_keyword(Keyword::Haste)
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_json_uses_protocol_tags() {
        let action = Action::CastSpell {
            player: PlayerId(0),
            card: InstanceId(4),
            targets: vec![TargetRef::Player {
                player: PlayerId(1),
            }],
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"CAST_SPELL\""));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn test_targets_default_to_empty() {
        let json = r#"{ "type": "CAST_SPELL", "player": 0, "card": 9 }"#;
        let action: Action = serde_json::from_str(json).unwrap();
        match action {
            Action::CastSpell { targets, .. } => assert!(targets.is_empty()),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_action_kind_mapping() {
        let action = Action::PassPriority { player: PlayerId(1) };
        assert_eq!(action.kind(), ActionKind::PassPriority);
        assert_eq!(action.player(), PlayerId(1));
    }
}
