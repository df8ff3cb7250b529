use crate::card::types::{InstanceId, ManaColor, PlayerId};
use serde::{Deserialize, Serialize};

/// A target chosen when a spell or ability is put on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TargetRef {
    Player { player: PlayerId },
    Permanent { permanent: InstanceId },
}

/// Declarative effect executed when a spell, ability, or trigger resolves.
///
/// Effects are plain data so card sets can be loaded from JSON and so a
/// resolving stack item never needs its source to still be on the
/// battlefield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Deal damage to each target (players lose life, creatures mark damage).
    DealDamage { amount: u32 },
    /// The controller gains life.
    GainLife { amount: u32 },
    /// Each target player loses life.
    LoseLife { amount: u32 },
    /// The controller draws cards.
    DrawCards { count: u32 },
    /// Add mana to the controller's pool.
    AddMana { color: ManaColor, amount: u32 },
    /// Put +1/+1 counters on each target creature.
    PutCounters { count: u32 },
    /// Destroy each target permanent.
    DestroyPermanent,
    /// Tap each target permanent.
    TapPermanent,
    /// Schedule an additional combat phase after the current step.
    AddCombatPhase,
    /// Run several effects in order.
    Sequence { effects: Vec<Effect> },
}

/// Context an effect executes against: the source instance (which may have
/// left the battlefield by resolution time), the controller, and the targets
/// chosen at cast/activation time. Trigger and ETB effects always receive an
/// empty target list.
#[derive(Debug, Clone)]
pub struct EffectContext {
    pub source: InstanceId,
    pub controller: PlayerId,
    pub targets: Vec<TargetRef>,
}

impl EffectContext {
    pub fn untargeted(source: InstanceId, controller: PlayerId) -> Self {
        EffectContext {
            source,
            controller,
            targets: Vec::new(),
        }
    }
}

/// The event families triggers can watch for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEventKind {
    ZoneChanged,
    StepStarted,
    CreatureDeclaredAttacker,
    CombatEnded,
    SpellResolved,
}

/// Declarative predicate narrowing which events of the watched kind fire the
/// trigger. Evaluated centrally by the engine, never by active subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCondition {
    /// The trigger's own card entered the battlefield.
    SelfEnters,
    /// Any creature entered the battlefield.
    AnyCreatureEnters,
    /// The trigger's own card was declared as an attacker.
    SelfAttacks,
    /// Any creature was declared as an attacker.
    AnyAttacks,
    /// Every event of the watched kind qualifies.
    Always,
}

/// A declarative triggered ability stored on a card definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub event: GameEventKind,
    pub condition: TriggerCondition,
    pub effect: Effect,
}

/// An activated ability. The only supported cost is tapping the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivatedAbility {
    pub effect: Effect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_json_round_trip() {
        let effect = Effect::Sequence {
            effects: vec![
                Effect::DealDamage { amount: 3 },
                Effect::GainLife { amount: 2 },
            ],
        };
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }

    #[test]
    fn test_trigger_deserializes_from_card_set_shape() {
        let json = r#"{
            "event": "zone_changed",
            "condition": "any_creature_enters",
            "effect": { "effect": "gain_life", "amount": 1 }
        }"#;
        let trigger: Trigger = serde_json::from_str(json).unwrap();
        assert_eq!(trigger.event, GameEventKind::ZoneChanged);
        assert_eq!(trigger.condition, TriggerCondition::AnyCreatureEnters);
    }

    #[test]
    fn test_untargeted_context_is_empty() {
        let ctx = EffectContext::untargeted(InstanceId(7), PlayerId(0));
        assert!(ctx.targets.is_empty());
    }
}
