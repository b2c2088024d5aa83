use crate::card::Card;
use crate::error::{IllegalMove, Result};

/// Whether reaching a single card declares UNO by itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnoCallPolicy {
    #[default]
    Automatic,
    Manual,
}

/// A card in a player's hand together with the engine's advisory flag.
///
/// `playable` is recomputed by the game at every turn boundary and is only a
/// hint for presentation. It is not part of the card's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldCard {
    pub card: Card,
    pub playable: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    is_ai: bool,
    hand: Vec<HeldCard>,
    has_called_uno: bool,
    uno_call_policy: UnoCallPolicy,
}

impl Player {
    pub fn new(name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            name: name.into(),
            is_ai,
            hand: Vec::new(),
            has_called_uno: false,
            uno_call_policy: UnoCallPolicy::default(),
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    pub fn has_called_uno(&self) -> bool {
        self.has_called_uno
    }

    pub fn uno_call_policy(&self) -> UnoCallPolicy {
        self.uno_call_policy
    }

    pub(crate) fn set_uno_call_policy(&mut self, policy: UnoCallPolicy) {
        self.uno_call_policy = policy;
        self.rederive_uno();
    }

    pub fn hand(&self) -> &[HeldCard] {
        &self.hand
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.hand.iter().map(|held| &held.card)
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn card_index(&self, card: &Card) -> Option<usize> {
        self.hand.iter().position(|held| &held.card == card)
    }

    pub fn has_card(&self, card: &Card) -> bool {
        self.card_index(card).is_some()
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.push(HeldCard {
            card,
            playable: false,
        });
        self.rederive_uno();
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.add_card(card);
        }
    }

    /// Removes one copy of `card` from the hand.
    pub fn remove_card(&mut self, card: &Card) -> Result<Card> {
        let index = self.card_index(card).ok_or(IllegalMove::CardNotInHand)?;
        let held = self.hand.remove(index);
        self.rederive_uno();
        Ok(held.card)
    }

    /// Declares UNO. Only succeeds with exactly one card left that has not
    /// been declared yet.
    pub fn declare_uno(&mut self) -> bool {
        if self.hand.len() == 1 && !self.has_called_uno {
            self.has_called_uno = true;
            true
        } else {
            false
        }
    }

    pub fn has_playable_cards(&self) -> bool {
        self.hand.iter().any(|held| held.playable)
    }

    pub fn playable_cards(&self) -> Vec<&Card> {
        self.hand
            .iter()
            .filter(|held| held.playable)
            .map(|held| &held.card)
            .collect()
    }

    pub(crate) fn set_playable_flags(&mut self, mut is_playable: impl FnMut(&Card) -> bool) {
        for held in &mut self.hand {
            held.playable = is_playable(&held.card);
        }
    }

    pub(crate) fn clear_playable_flags(&mut self) {
        self.set_playable_flags(|_| false);
    }

    fn rederive_uno(&mut self) {
        match self.hand.len() {
            1 => {
                if self.uno_call_policy == UnoCallPolicy::Automatic {
                    self.has_called_uno = true;
                }
            }
            _ => self.has_called_uno = false,
        }
    }
}
