pub mod card;
pub mod error;
pub mod game;
pub mod rng;

pub use card::{CardDefinition, CardInstance, CardRegistry, CardSet, PlayerId};
pub use error::GameError;
pub use game::{Action, ActionKind, Game, GameOutcome, GameStateExport, Step};
