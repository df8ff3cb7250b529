pub mod actions;
pub mod combat;
pub mod export;
pub mod mana;
pub mod sba;
pub mod stack;
pub mod state;
pub mod triggers;
pub mod turns;
pub mod zones;

pub use actions::{Action, ActionKind};
pub use export::GameStateExport;
pub use sba::{DrawReason, GameOutcome, GameStatus, LossReason};
pub use state::{Game, PlayerState};
pub use turns::Step;
