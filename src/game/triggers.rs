use crate::card::effects::{Effect, EffectContext, GameEventKind, TargetRef, TriggerCondition};
use crate::card::types::{CardInstance, InstanceId, PlayerId};
use crate::game::state::Game;
use crate::game::turns::Step;
use crate::game::zones::{Permanent, ZoneKind};
use crate::game::sba;

/// A game event, produced and consumed synchronously. Events are never
/// queued; trigger evaluation for one event completes before the raising
/// action returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ZoneChanged {
        instance: InstanceId,
        from: ZoneKind,
        to: ZoneKind,
        owner: PlayerId,
    },
    StepStarted {
        step: Step,
    },
    CreatureDeclaredAttacker {
        attacker: InstanceId,
        controller: PlayerId,
    },
    CombatEnded,
    SpellResolved {
        instance: InstanceId,
        controller: PlayerId,
    },
}

impl GameEvent {
    pub fn kind(&self) -> GameEventKind {
        match self {
            GameEvent::ZoneChanged { .. } => GameEventKind::ZoneChanged,
            GameEvent::StepStarted { .. } => GameEventKind::StepStarted,
            GameEvent::CreatureDeclaredAttacker { .. } => GameEventKind::CreatureDeclaredAttacker,
            GameEvent::CombatEnded => GameEventKind::CombatEnded,
            GameEvent::SpellResolved { .. } => GameEventKind::SpellResolved,
        }
    }
}

/// Evaluate every trigger on every battlefield permanent against the event,
/// in battlefield insertion order, and execute the matching effects. This is
/// a registry scan, not publish/subscribe: cards never hold live listeners.
pub fn raise_event(game: &mut Game, event: &GameEvent) {
    let kind = event.kind();
    let mut pending: Vec<(InstanceId, PlayerId, Effect)> = Vec::new();
    for permanent in game.battlefield.permanents() {
        for trigger in &permanent.card.definition.triggers {
            if trigger.event == kind && condition_matches(game, trigger.condition, permanent, event)
            {
                pending.push((
                    permanent.id(),
                    permanent.controller,
                    trigger.effect.clone(),
                ));
            }
        }
    }
    for (source, controller, effect) in pending {
        // Triggered effects never inherit targets.
        let ctx = EffectContext::untargeted(source, controller);
        execute_effect(game, &effect, &ctx);
    }
}

fn condition_matches(
    game: &Game,
    condition: TriggerCondition,
    source: &Permanent,
    event: &GameEvent,
) -> bool {
    match condition {
        TriggerCondition::Always => true,
        TriggerCondition::SelfEnters => matches!(
            event,
            GameEvent::ZoneChanged { instance, to: ZoneKind::Battlefield, .. }
                if *instance == source.id()
        ),
        TriggerCondition::AnyCreatureEnters => match event {
            GameEvent::ZoneChanged {
                instance,
                to: ZoneKind::Battlefield,
                ..
            } => game
                .battlefield
                .get(*instance)
                .map(|p| p.is_creature())
                .unwrap_or(false),
            _ => false,
        },
        TriggerCondition::SelfAttacks => matches!(
            event,
            GameEvent::CreatureDeclaredAttacker { attacker, .. } if *attacker == source.id()
        ),
        TriggerCondition::AnyAttacks => {
            matches!(event, GameEvent::CreatureDeclaredAttacker { .. })
        }
    }
}

/// The single entry point for putting a permanent onto the battlefield.
/// Initializes permanent/creature state (summoning sick unless Haste), runs
/// the card's own ETB effect with an empty target list, then raises
/// ZONE_CHANGED for declarative triggers.
pub fn enter_battlefield(game: &mut Game, card: CardInstance, controller: PlayerId, from: ZoneKind) {
    let owner = card.owner;
    let instance = card.id;
    let etb = card.definition.etb_effect.clone();

    game.battlefield.add(Permanent::new(card, controller));

    if let Some(effect) = etb {
        let ctx = EffectContext::untargeted(instance, controller);
        execute_effect(game, &effect, &ctx);
    }

    raise_event(
        game,
        &GameEvent::ZoneChanged {
            instance,
            from,
            to: ZoneKind::Battlefield,
            owner,
        },
    );
}

/// Move a permanent from the battlefield to its owner's graveyard. Its
/// battlefield state is discarded with it.
pub fn destroy_permanent(game: &mut Game, id: InstanceId) {
    if let Some(permanent) = game.battlefield.remove(id) {
        let owner = permanent.card.owner;
        game.players[owner.index()].graveyard.add(permanent.card);
    }
}

/// Execute one effect against its context. Effects are best-effort at
/// resolution time: assignments to targets that no longer exist are dropped
/// rather than failing the resolution.
pub fn execute_effect(game: &mut Game, effect: &Effect, ctx: &EffectContext) {
    match effect {
        Effect::DealDamage { amount } => {
            for target in &ctx.targets {
                match target {
                    TargetRef::Player { player } => {
                        if let Some(p) = game.players.get_mut(player.index()) {
                            p.life -= *amount as i32;
                        }
                    }
                    TargetRef::Permanent { permanent } => {
                        mark_damage(game, *permanent, *amount);
                    }
                }
            }
        }
        Effect::GainLife { amount } => {
            game.players[ctx.controller.index()].life += *amount as i32;
        }
        Effect::LoseLife { amount } => {
            for target in &ctx.targets {
                if let TargetRef::Player { player } = target {
                    if let Some(p) = game.players.get_mut(player.index()) {
                        p.life -= *amount as i32;
                    }
                }
            }
        }
        Effect::DrawCards { count } => {
            game.draw_cards(ctx.controller, *count);
        }
        Effect::AddMana { color, amount } => {
            if *amount > 0 {
                let _ = game.players[ctx.controller.index()].mana.add(*color, *amount);
            }
        }
        Effect::PutCounters { count } => {
            for target in &ctx.targets {
                if let TargetRef::Permanent { permanent } = target {
                    if let Some(p) = game.battlefield.get_mut(*permanent) {
                        if let Some(creature) = p.state.creature {
                            p.state.creature = Some(creature.with_counters_added(*count));
                        }
                    }
                }
            }
        }
        Effect::DestroyPermanent => {
            for target in &ctx.targets {
                if let TargetRef::Permanent { permanent } = target {
                    destroy_permanent(game, *permanent);
                }
            }
        }
        Effect::TapPermanent => {
            for target in &ctx.targets {
                if let TargetRef::Permanent { permanent } = target {
                    if let Some(p) = game.battlefield.get_mut(*permanent) {
                        p.state.tapped = true;
                    }
                }
            }
        }
        Effect::AddCombatPhase => {
            for step in [
                Step::BeginningOfCombat,
                Step::DeclareAttackers,
                Step::DeclareBlockers,
                Step::CombatDamage,
                Step::EndOfCombat,
            ] {
                game.turn.scheduled_steps.push_back(step);
            }
        }
        Effect::Sequence { effects } => {
            for inner in effects {
                execute_effect(game, inner, ctx);
            }
        }
    }
    sba::run_sba(game);
}

fn mark_damage(game: &mut Game, id: InstanceId, amount: u32) {
    if let Some(permanent) = game.battlefield.get_mut(id) {
        if let Some(creature) = permanent.state.creature {
            permanent.state.creature = Some(creature.with_damage_marked(amount));
        }
    }
}
