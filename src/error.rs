use crate::card::types::{CardDefId, InstanceId, PlayerId};
use crate::game::turns::Step;
use thiserror::Error;

/// Errors produced by action validation and resolution.
///
/// Every variant is raised before any state is mutated, so a caller that
/// receives an error may correct the input and retry against the same state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    // Timing
    #[error("player {0:?} is not the active player")]
    NotYourTurn(PlayerId),
    #[error("this action requires a main phase, current step is {0:?}")]
    NotMainPhase(Step),
    #[error("this action requires an empty stack ({0} item(s) pending)")]
    StackNotEmpty(usize),
    #[error("action is not legal during {0:?}")]
    WrongStep(Step),
    #[error("a land has already been played this turn")]
    LandAlreadyPlayed,

    // Ownership / authorization
    #[error("player {0:?} does not hold priority")]
    NotYourPriority(PlayerId),
    #[error("permanent {0:?} is not controlled by player {1:?}")]
    NotYourPermanent(InstanceId, PlayerId),

    // Resources
    #[error("card {0:?} is not in player {1:?}'s hand")]
    CardNotInHand(InstanceId, PlayerId),
    #[error("card {0:?} is not the right type for this action")]
    WrongCardType(CardDefId),
    #[error("insufficient mana to pay the cost")]
    InsufficientMana,
    #[error("mana amount must be positive and within the pool balance")]
    InvalidManaAmount,
    #[error("amount must be at least 1")]
    InvalidAmount,
    #[error("permanent {0:?} has no activated ability")]
    NoActivatedAbility(InstanceId),
    #[error("permanent {0:?} is already tapped")]
    AlreadyTapped(InstanceId),

    // Combat legality
    #[error("permanent {0:?} is not a creature")]
    NotACreature(InstanceId),
    #[error("creature {0:?} is tapped and cannot be declared")]
    CreatureTapped(InstanceId),
    #[error("creature {0:?} has summoning sickness")]
    CreatureHasSummoningSickness(InstanceId),
    #[error("creature {0:?} has already attacked this turn")]
    AlreadyAttacked(InstanceId),
    #[error("creature {0:?} is already blocking")]
    AlreadyBlocking(InstanceId),
    #[error("attacker {0:?} is already blocked")]
    AttackerAlreadyBlocked(InstanceId),
    #[error("creature {0:?} cannot block a flying attacker")]
    CannotBlockFlyingCreature(InstanceId),
    #[error("creature {0:?} is not attacking")]
    NotAttacking(InstanceId),

    // Not found
    #[error("unknown player {0:?}")]
    PlayerNotFound(PlayerId),
    #[error("permanent {0:?} not found on the battlefield")]
    PermanentNotFound(InstanceId),

    // Lifecycle
    #[error("the game has finished; no further actions are accepted")]
    GameFinished,
}
