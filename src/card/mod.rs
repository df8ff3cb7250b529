pub mod effects;
pub mod registry;
pub mod types;

pub use effects::{
    ActivatedAbility, Effect, EffectContext, GameEventKind, TargetRef, Trigger, TriggerCondition,
};
pub use registry::{demo_set, CardRegistry, CardSet, CardSetError};
pub use types::{
    CardDefId, CardDefinition, CardInstance, CardType, InstanceId, Keyword, ManaColor, ManaCost,
    PlayerId,
};
