use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumCountMacro,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum CardColor {
    Red,
    Blue,
    Green,
    Yellow,
}

/// The face of a card that carries a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColoredCard {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
}

/// Flat classification of a card, wild cards included.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum CardKind {
    Number,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

/// A single UNO card.
///
/// Only colored cards carry a [`CardColor`]; the two wild faces are colorless
/// until played, and the color chosen for them lives on the game, not on the
/// card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Colored(CardColor, ColoredCard),
    Wild,
    WildDrawFour,
}

impl ColoredCard {
    pub fn kind(&self) -> CardKind {
        match self {
            ColoredCard::Number(_) => CardKind::Number,
            ColoredCard::Skip => CardKind::Skip,
            ColoredCard::Reverse => CardKind::Reverse,
            ColoredCard::DrawTwo => CardKind::DrawTwo,
        }
    }
}

impl Card {
    pub fn number(color: CardColor, value: u8) -> Self {
        debug_assert!(value <= 9, "number cards go from 0 to 9");
        Card::Colored(color, ColoredCard::Number(value))
    }

    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    pub fn kind(&self) -> CardKind {
        match self {
            Card::Colored(_, face) => face.kind(),
            Card::Wild => CardKind::Wild,
            Card::WildDrawFour => CardKind::WildDrawFour,
        }
    }

    /// Face value, only present on number cards.
    pub fn value(&self) -> Option<u8> {
        match self {
            Card::Colored(_, ColoredCard::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDrawFour)
    }

    /// Anything that is not a plain number card.
    pub fn is_special(&self) -> bool {
        self.kind() != CardKind::Number
    }

    /// Color-agnostic compatibility with `top`.
    ///
    /// This ignores the game's current color and the wild draw four
    /// restriction, so it must not be used as the only gate for a play. See
    /// [`crate::rules::is_playable`] for the check the engine enforces.
    pub fn can_play_on(&self, top: &Card) -> bool {
        match (self, top) {
            (Card::Colored(color, face), Card::Colored(top_color, top_face)) => {
                color == top_color || face == top_face
            }
            // Either side is wild.
            _ => true,
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, card) => {
                write!(f, "{} {}", color, {
                    match card {
                        ColoredCard::Number(number) => number.to_string(),
                        ColoredCard::Skip => "Skip".to_string(),
                        ColoredCard::Reverse => "Reverse".to_string(),
                        ColoredCard::DrawTwo => "Draw Two".to_string(),
                    }
                })
            }
            Card::Wild => write!(f, "Wild"),
            Card::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}
