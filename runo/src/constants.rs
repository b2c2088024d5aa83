use strum::EnumCount;

use crate::card::CardColor;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const INITIAL_CARDS_PER_PLAYER: usize = 7;
pub const CALLOUT_PENALTY_CARDS: usize = 2;

pub(crate) const DRAW_TWO_PENALTY: usize = 2;
pub(crate) const WILD_DRAW_FOUR_PENALTY: usize = 4;

/// How many copies of each card go into a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckComposition {
    pub zeros_per_color: u8,
    /// Copies of each number from 1 to 9, per color.
    pub numbers_per_color: u8,
    pub skips_per_color: u8,
    pub reverses_per_color: u8,
    pub draw_twos_per_color: u8,
    pub wilds: u8,
    pub wild_draw_fours: u8,
}

impl DeckComposition {
    /// The 120 card deck this engine plays with by default: two of every
    /// number (zero included) and eight of each wild.
    pub const STANDARD: DeckComposition = DeckComposition {
        zeros_per_color: 2,
        numbers_per_color: 2,
        skips_per_color: 2,
        reverses_per_color: 2,
        draw_twos_per_color: 2,
        wilds: 8,
        wild_draw_fours: 8,
    };

    /// The traditional 108 card deck.
    pub const CLASSIC: DeckComposition = DeckComposition {
        zeros_per_color: 1,
        numbers_per_color: 2,
        skips_per_color: 2,
        reverses_per_color: 2,
        draw_twos_per_color: 2,
        wilds: 4,
        wild_draw_fours: 4,
    };

    pub const fn number_cards_per_color(&self) -> usize {
        self.zeros_per_color as usize + 9 * self.numbers_per_color as usize
    }

    pub const fn action_cards_per_color(&self) -> usize {
        self.skips_per_color as usize
            + self.reverses_per_color as usize
            + self.draw_twos_per_color as usize
    }

    pub const fn colored_cards(&self) -> usize {
        (self.number_cards_per_color() + self.action_cards_per_color()) * CardColor::COUNT
    }

    pub const fn total(&self) -> usize {
        self.colored_cards() + self.wilds as usize + self.wild_draw_fours as usize
    }
}

impl Default for DeckComposition {
    fn default() -> Self {
        Self::STANDARD
    }
}

pub const STANDARD_DECK_SIZE: usize = DeckComposition::STANDARD.total();
pub const CLASSIC_DECK_SIZE: usize = DeckComposition::CLASSIC.total();
