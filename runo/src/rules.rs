//! Legality checks shared by the advisory pass and the play gate.

use crate::card::{Card, CardColor};

/// Whether `card` may be played from `hand`.
///
/// `top` is the discard pile's top card and `current_color` the active color.
/// `hand` is the whole hand of the player, including `card` itself; it is only
/// consulted for the wild draw four restriction.
///
/// Precedence:
/// 1. an empty discard pile accepts anything
/// 2. a wild draw four needs a hand without another card of the current color
/// 3. a plain wild is always fine
/// 4. same color as the current color
/// 5. a number with the top card's value
/// 6. an action of the top card's kind
pub fn is_playable<'a>(
    card: &Card,
    top: Option<&Card>,
    current_color: Option<CardColor>,
    hand: impl IntoIterator<Item = &'a Card>,
) -> bool {
    let Some(top) = top else {
        return true;
    };

    match card {
        Card::WildDrawFour => !holds_color(hand, current_color),
        Card::Wild => true,
        Card::Colored(color, _) => {
            if Some(*color) == current_color {
                return true;
            }
            if let (Some(value), Some(top_value)) = (card.value(), top.value()) {
                return value == top_value;
            }
            card.is_special() && card.kind() == top.kind()
        }
    }
}

fn holds_color<'a>(hand: impl IntoIterator<Item = &'a Card>, color: Option<CardColor>) -> bool {
    match color {
        Some(color) => hand.into_iter().any(|card| card.color() == Some(color)),
        None => false,
    }
}
