use crate::card::types::{CardDefinition, CardInstance, InstanceId, PlayerId};
use crate::error::GameError;
use crate::game::mana::ManaPool;
use crate::game::sba::GameStatus;
use crate::game::stack::{PriorityState, Stack};
use crate::game::turns::TurnState;
use crate::game::zones::{Battlefield, CardPile, Permanent};
use crate::rng::GameRng;
use std::sync::Arc;

/// Per-player state: life, mana pool, and the owner-scoped zones.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub id: PlayerId,
    pub life: i32,
    pub mana: ManaPool,
    pub library: CardPile,
    pub hand: CardPile,
    pub graveyard: CardPile,
    pub lands_played_this_turn: u32,
    /// Set when this player attempted to draw from an empty library;
    /// consumed by the next state-based action check.
    pub drew_from_empty: bool,
}

impl PlayerState {
    fn new(id: PlayerId) -> Self {
        PlayerState {
            id,
            life: 20,
            mana: ManaPool::new(),
            library: CardPile::new(),
            hand: CardPile::new(),
            graveyard: CardPile::new(),
            lands_played_this_turn: 0,
            drew_from_empty: false,
        }
    }
}

/// The single mutable aggregate holding a full game. All resolution routines
/// take it by reference, so multiple games can coexist in one process.
#[derive(Debug, Clone)]
pub struct Game {
    pub players: [PlayerState; 2],
    pub battlefield: Battlefield,
    pub stack: Stack,
    pub turn: TurnState,
    pub priority: PriorityState,
    pub status: GameStatus,
    next_instance: u64,
}

/// Number of cards in each opening hand.
const OPENING_HAND_SIZE: usize = 7;

impl Game {
    /// Build a game from two deck lists. Libraries are shuffled with the
    /// seeded RNG and each player draws an opening hand; player 0 takes the
    /// first turn, which starts at Untap.
    pub fn new(
        deck0: Vec<Arc<CardDefinition>>,
        deck1: Vec<Arc<CardDefinition>>,
        seed: Option<u64>,
    ) -> Game {
        let starting_player = PlayerId(0);
        let mut game = Game {
            players: [
                PlayerState::new(PlayerId(0)),
                PlayerState::new(PlayerId(1)),
            ],
            battlefield: Battlefield::new(),
            stack: Stack::new(),
            turn: TurnState::new(starting_player),
            priority: PriorityState::new(starting_player),
            status: GameStatus::InProgress,
            next_instance: 1,
        };

        let mut rng = GameRng::new(seed);
        for (index, deck) in [deck0, deck1].into_iter().enumerate() {
            let owner = PlayerId(index as u8);
            let mut cards: Vec<CardInstance> = deck
                .into_iter()
                .map(|definition| {
                    let id = game.new_instance_id();
                    CardInstance::new(id, owner, definition)
                })
                .collect();
            rng.shuffle(&mut cards);
            for card in cards {
                game.players[owner.index()].library.add(card);
            }
            for _ in 0..OPENING_HAND_SIZE {
                if let Some(card) = game.players[owner.index()].library.draw() {
                    game.players[owner.index()].hand.add(card);
                }
            }
        }

        game
    }

    pub fn new_instance_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    pub fn player(&self, id: PlayerId) -> Result<&PlayerState, GameError> {
        self.players
            .get(id.index())
            .ok_or(GameError::PlayerNotFound(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut PlayerState, GameError> {
        self.players
            .get_mut(id.index())
            .ok_or(GameError::PlayerNotFound(id))
    }

    pub fn active_player(&self) -> PlayerId {
        self.turn.active_player
    }

    /// The active player's opponent.
    pub fn defending_player(&self) -> PlayerId {
        self.turn.active_player.opponent()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn permanent(&self, id: InstanceId) -> Result<&Permanent, GameError> {
        self.battlefield
            .get(id)
            .ok_or(GameError::PermanentNotFound(id))
    }

    /// Draw `count` cards for `player`. An attempted draw from an empty
    /// library sets the loss flag consumed by state-based actions and stops
    /// drawing.
    pub fn draw_cards(&mut self, player: PlayerId, count: u32) {
        let Ok(state) = self.player_mut(player) else {
            return;
        };
        for _ in 0..count {
            match state.library.draw() {
                Some(card) => state.hand.add(card),
                None => {
                    state.drew_from_empty = true;
                    break;
                }
            }
        }
    }
}
