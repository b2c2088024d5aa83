use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players, need {required} but have {actual}")]
    InsufficientPlayers { required: usize, actual: usize },
    #[error("Too many players")]
    TooManyPlayers,
    #[error("A player named {0:?} is already seated")]
    DuplicatePlayer(String),
    #[error("The game has not started yet")]
    GameNotStarted,
    #[error("The game has already started")]
    GameAlreadyStarted,
    #[error("The game has already ended")]
    GameAlreadyEnded,
    #[error("The first card has already been flipped")]
    FirstCardAlreadyFlipped,
    #[error("No cards left to draw, even after reshuffling the discard pile")]
    EmptyDraw,
    #[error("The deck is empty")]
    EmptyDeck,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("Illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
}

/// Reasons a turn action is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("it is not this player's turn")]
    NotPlayersTurn,
    #[error("the card is not in the player's hand")]
    CardNotInHand,
    #[error("the card cannot be played right now")]
    CardNotPlayable,
    #[error("a color must be chosen for a wild card")]
    ColorNotChosen,
    #[error("the player must draw before passing")]
    MustDrawBeforePassing,
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
