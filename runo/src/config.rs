use crate::constants::{
    DeckComposition, CALLOUT_PENALTY_CARDS, INITIAL_CARDS_PER_PLAYER, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::error::{Result, UnoError};
use crate::player::UnoCallPolicy;

/// Who takes the first turn once cards are dealt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartingPlayer {
    /// Seat 0 always starts.
    #[default]
    First,
    /// Any seat, uniformly at random.
    Random,
}

/// Table rules for a single game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of seats; the game starts once all are filled.
    pub capacity: usize,
    pub initial_cards_per_player: usize,
    pub deck: DeckComposition,
    pub starting_player: StartingPlayer,
    pub uno_call_policy: UnoCallPolicy,
    pub callout_penalty: usize,
    /// Seed for shuffling and random choices. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_PLAYERS,
            initial_cards_per_player: INITIAL_CARDS_PER_PLAYER,
            deck: DeckComposition::STANDARD,
            starting_player: StartingPlayer::default(),
            uno_call_policy: UnoCallPolicy::default(),
            callout_penalty: CALLOUT_PENALTY_CARDS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(capacity: usize) -> Result<Self> {
        Self::default().with_capacity(capacity).validated()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_initial_cards_per_player(mut self, count: usize) -> Self {
        self.initial_cards_per_player = count;
        self
    }

    pub fn with_deck(mut self, deck: DeckComposition) -> Self {
        self.deck = deck;
        self
    }

    pub fn with_starting_player(mut self, starting_player: StartingPlayer) -> Self {
        self.starting_player = starting_player;
        self
    }

    pub fn with_uno_call_policy(mut self, policy: UnoCallPolicy) -> Self {
        self.uno_call_policy = policy;
        self
    }

    pub fn with_callout_penalty(mut self, penalty: usize) -> Self {
        self.callout_penalty = penalty;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_PLAYERS {
            return Err(UnoError::InvalidConfiguration(
                "a table needs at least 2 seats",
            ));
        }
        if self.capacity > MAX_PLAYERS {
            return Err(UnoError::InvalidConfiguration(
                "a table has at most 4 seats",
            ));
        }
        if self.initial_cards_per_player == 0 {
            return Err(UnoError::InvalidConfiguration(
                "players must be dealt at least one card",
            ));
        }
        // Every hand plus the first discard has to come out of the deck.
        if self.capacity * self.initial_cards_per_player >= self.deck.total() {
            return Err(UnoError::InvalidConfiguration(
                "the deck is too small to deal every hand",
            ));
        }
        Ok(())
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
