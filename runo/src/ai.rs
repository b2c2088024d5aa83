//! Reference decision policy for computer players.
//!
//! Nothing here mutates a [`Game`]; callers ask the policy for a
//! [`TurnAction`] and submit it themselves.

use rand::{seq::SliceRandom, Rng};
use strum::EnumCount;

use crate::card::{Card, CardColor};
use crate::game::Game;
use crate::player::HeldCard;
use crate::turn::{PlayAction, TurnAction};

const COLORS: [CardColor; CardColor::COUNT] = [
    CardColor::Red,
    CardColor::Blue,
    CardColor::Green,
    CardColor::Yellow,
];

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> CardColor {
    COLORS[rng.gen_range(0..COLORS.len())]
}

/// True when no card in `hand` is flagged playable.
pub fn should_draw(hand: &[HeldCard]) -> bool {
    !hand.iter().any(|held| held.playable)
}

/// Picks uniformly among the cards flagged playable.
pub fn select_card_to_play<R: Rng + ?Sized>(hand: &[HeldCard], rng: &mut R) -> Option<Card> {
    let playable = hand
        .iter()
        .filter(|held| held.playable)
        .map(|held| held.card)
        .collect::<Vec<_>>();
    playable.choose(rng).copied()
}

/// The color the hand holds most of. Ties are broken at random, and a hand
/// without colored cards gets any color.
pub fn choose_wild_color<'a, R: Rng + ?Sized>(
    hand: impl IntoIterator<Item = &'a Card>,
    rng: &mut R,
) -> CardColor {
    let mut counts = [0usize; CardColor::COUNT];
    for color in hand.into_iter().filter_map(Card::color) {
        if let Some(index) = COLORS.iter().position(|candidate| *candidate == color) {
            counts[index] += 1;
        }
    }

    let best = counts.iter().copied().max().unwrap_or(0);
    if best == 0 {
        return random_color(rng);
    }

    let tied = COLORS
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count == best)
        .map(|(color, _)| *color)
        .collect::<Vec<_>>();
    tied.choose(rng).copied().unwrap_or_else(|| random_color(rng))
}

/// Interface for computer-controlled seats.
pub trait Policy {
    fn decide(&mut self, game: &Game) -> TurnAction;
}

/// Plays a random legal card, draws when there is none.
pub struct RandomPolicy<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Policy for RandomPolicy<R> {
    fn decide(&mut self, game: &Game) -> TurnAction {
        let Some(player) = game.current_player() else {
            return TurnAction::Draw;
        };
        if should_draw(player.hand()) {
            return TurnAction::Draw;
        }

        match select_card_to_play(player.hand(), &mut self.rng) {
            Some(card) => {
                let color = card
                    .is_wild()
                    .then(|| choose_wild_color(player.cards(), &mut self.rng));
                TurnAction::Play(PlayAction::new(card, color))
            }
            None => TurnAction::Draw,
        }
    }
}
