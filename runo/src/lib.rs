//! Rules engine for UNO.
//!
//! The engine is synchronous and owns all of its state. A caller seats
//! players on a [`Game`], starts it, and then submits one action at a time
//! for whoever holds the turn.

pub mod ai;
pub mod card;
pub mod config;
pub mod constants;
pub mod deck;
pub mod error;
pub mod game;
pub mod player;
pub mod rules;
pub mod snapshot;
pub mod turn;

pub use card::{Card, CardColor, CardKind, ColoredCard};
pub use config::{GameConfig, StartingPlayer};
pub use deck::Deck;
pub use error::{IllegalMove, Result, UnoError};
pub use game::{Direction, Game, GameStatus};
pub use player::{HeldCard, Player, UnoCallPolicy};
pub use turn::{PlayAction, PlayTurnResult, TurnAction, TurnActionResult};
