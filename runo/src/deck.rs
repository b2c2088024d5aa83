use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;

use crate::{
    card::{Card, CardColor, ColoredCard},
    constants::DeckComposition,
    error::{Result, UnoError},
};

/// An ordered pile of cards. The top of the pile is the end of the vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds every card of `composition` in a fixed order, unshuffled.
    pub fn unshuffled(composition: &DeckComposition) -> Self {
        let mut cards = Vec::with_capacity(composition.total());

        for color in CardColor::iter() {
            for _ in 0..composition.skips_per_color {
                cards.push(Card::Colored(color, ColoredCard::Skip));
            }

            for _ in 0..composition.reverses_per_color {
                cards.push(Card::Colored(color, ColoredCard::Reverse));
            }

            for _ in 0..composition.draw_twos_per_color {
                cards.push(Card::Colored(color, ColoredCard::DrawTwo));
            }

            for _ in 0..composition.zeros_per_color {
                cards.push(Card::number(color, 0));
            }

            for number in 1..=9 {
                for _ in 0..composition.numbers_per_color {
                    cards.push(Card::number(color, number));
                }
            }
        }

        for _ in 0..composition.wilds {
            cards.push(Card::Wild);
        }

        for _ in 0..composition.wild_draw_fours {
            cards.push(Card::WildDrawFour);
        }

        Self(cards)
    }

    /// A full shuffled deck.
    pub fn standard<R: Rng + ?Sized>(composition: &DeckComposition, rng: &mut R) -> Self {
        let mut deck = Self::unshuffled(composition);
        deck.shuffle(rng);
        deck
    }

    /// A deck in exactly the given order, last card on top.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }

    pub fn draw(&mut self) -> Result<Card> {
        self.0.pop().ok_or(UnoError::EmptyDeck)
    }

    /// Draws up to `count` cards from the top, fewer if the deck runs out.
    pub(crate) fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let start = self.0.len().saturating_sub(count);
        let mut drawn = self.0.split_off(start);
        drawn.reverse();
        drawn
    }

    pub fn peek(&self) -> Option<&Card> {
        self.0.last()
    }

    pub fn add_card(&mut self, card: Card) {
        self.0.push(card);
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.extend(cards);
    }

    /// Removes every card but the top one and returns them, bottom first.
    pub(crate) fn take_all_but_top(&mut self) -> Vec<Card> {
        match self.0.pop() {
            Some(top) => {
                let rest = std::mem::take(&mut self.0);
                self.0.push(top);
                rest
            }
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::card::CardKind;
    use crate::constants::{CLASSIC_DECK_SIZE, STANDARD_DECK_SIZE};

    fn count(deck: &Deck, predicate: impl Fn(&Card) -> bool) -> usize {
        deck.iter().filter(|card| predicate(card)).count()
    }

    #[test]
    fn correct_card_count_new_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::standard(&DeckComposition::STANDARD, &mut rng);
        assert_eq!(deck.len(), STANDARD_DECK_SIZE);

        let classic = Deck::standard(&DeckComposition::CLASSIC, &mut rng);
        assert_eq!(classic.len(), CLASSIC_DECK_SIZE);
    }

    #[test]
    fn standard_deck_has_configured_composition() {
        let mut rng = StdRng::seed_from_u64(11);
        let deck = Deck::standard(&DeckComposition::STANDARD, &mut rng);

        for color in CardColor::iter() {
            for number in 0..=9 {
                assert_eq!(count(&deck, |card| *card == Card::number(color, number)), 2);
            }
            for face in [ColoredCard::Skip, ColoredCard::Reverse, ColoredCard::DrawTwo] {
                assert_eq!(count(&deck, |card| *card == Card::Colored(color, face)), 2);
            }
        }

        assert_eq!(count(&deck, |card| card.kind() == CardKind::Wild), 8);
        assert_eq!(count(&deck, |card| card.kind() == CardKind::WildDrawFour), 8);
    }

    #[test]
    fn classic_deck_has_a_single_zero_per_color() {
        let deck = Deck::unshuffled(&DeckComposition::CLASSIC);
        for color in CardColor::iter() {
            assert_eq!(count(&deck, |card| *card == Card::number(color, 0)), 1);
            assert_eq!(count(&deck, |card| *card == Card::number(color, 9)), 2);
        }
        assert_eq!(count(&deck, Card::is_wild), 8);
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let mut rng = StdRng::seed_from_u64(3);
        let ordered = Deck::unshuffled(&DeckComposition::STANDARD);
        let mut shuffled = ordered.clone();
        shuffled.shuffle(&mut rng);

        assert_ne!(ordered, shuffled);
        let mut left = ordered.0.iter().map(|card| card.to_string()).collect::<Vec<_>>();
        let mut right = shuffled.0.iter().map(|card| card.to_string()).collect::<Vec<_>>();
        left.sort();
        right.sort();
        assert_eq!(left, right);
    }

    #[test]
    fn draw_and_peek_use_the_top_card() {
        let mut deck = Deck::from_cards(vec![Card::Wild, Card::number(CardColor::Red, 4)]);

        assert_eq!(deck.peek(), Some(&Card::number(CardColor::Red, 4)));
        assert_eq!(deck.draw(), Ok(Card::number(CardColor::Red, 4)));
        assert_eq!(deck.draw(), Ok(Card::Wild));
        assert_eq!(deck.peek(), None);
        assert_eq!(deck.draw(), Err(UnoError::EmptyDeck));
    }

    #[test]
    fn add_cards_push_onto_the_top() {
        let mut deck = Deck::new();
        deck.add_card(Card::Wild);
        deck.add_cards([Card::number(CardColor::Blue, 1), Card::WildDrawFour]);

        assert_eq!(deck.len(), 3);
        assert_eq!(deck.peek(), Some(&Card::WildDrawFour));
    }

    #[test]
    fn draw_cards_stops_when_empty() {
        let mut deck = Deck::from_cards(vec![
            Card::number(CardColor::Green, 1),
            Card::number(CardColor::Green, 2),
        ]);

        let drawn = deck.draw_cards(5);
        assert_eq!(
            drawn,
            vec![Card::number(CardColor::Green, 2), Card::number(CardColor::Green, 1)]
        );
        assert!(deck.is_empty());
    }

    #[test]
    fn take_all_but_top_leaves_a_single_card() {
        let mut deck = Deck::from_cards(vec![
            Card::number(CardColor::Red, 1),
            Card::number(CardColor::Red, 2),
            Card::number(CardColor::Red, 3),
        ]);

        let rest = deck.take_all_but_top();
        assert_eq!(rest.len(), 2);
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.peek(), Some(&Card::number(CardColor::Red, 3)));
    }
}
