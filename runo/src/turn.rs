use crate::card::{Card, CardColor, ColoredCard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayAction {
    Colored(CardColor, ColoredCard),
    /// The color to switch to. AI seats may leave it to the engine.
    Wild(Option<CardColor>),
    WildDrawFour(Option<CardColor>),
}

impl PlayAction {
    pub fn new(card: Card, chosen_color: Option<CardColor>) -> Self {
        match card {
            Card::Colored(color, face) => PlayAction::Colored(color, face),
            Card::Wild => PlayAction::Wild(chosen_color),
            Card::WildDrawFour => PlayAction::WildDrawFour(chosen_color),
        }
    }

    pub fn card(&self) -> Card {
        match self {
            PlayAction::Colored(color, face) => Card::Colored(*color, *face),
            PlayAction::Wild(_) => Card::Wild,
            PlayAction::WildDrawFour(_) => Card::WildDrawFour,
        }
    }

    pub fn chosen_color(&self) -> Option<CardColor> {
        match self {
            PlayAction::Colored(..) => None,
            PlayAction::Wild(color) | PlayAction::WildDrawFour(color) => *color,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    Play(PlayAction),
    /// Draw one card and pass the turn.
    Draw,
    /// Draw one card and keep the turn to decide what to do with it.
    DrawAndHold,
    /// End the turn after a [`TurnAction::DrawAndHold`].
    Pass,
    Callout,
    Uno,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnActionResult {
    Neutral,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
    Drew(Card),
    DrewAndHeld(Card),
    Passed,
    CalloutFailed,
    /// Seats that were caught with an undeclared single card.
    CalledOut(Vec<usize>),
    UnoFailed,
    UnoSuccessful,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayTurnResult {
    pub turn_action_result: TurnActionResult,
    pub won: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_action_round_trips_its_card() {
        let red_skip = Card::Colored(CardColor::Red, ColoredCard::Skip);
        let action = PlayAction::new(red_skip, Some(CardColor::Blue));
        assert_eq!(action, PlayAction::Colored(CardColor::Red, ColoredCard::Skip));
        assert_eq!(action.card(), red_skip);
        assert_eq!(action.chosen_color(), None);
    }

    #[test]
    fn wild_play_actions_keep_the_chosen_color() {
        let action = PlayAction::new(Card::WildDrawFour, Some(CardColor::Green));
        assert_eq!(action, PlayAction::WildDrawFour(Some(CardColor::Green)));
        assert_eq!(action.card(), Card::WildDrawFour);
        assert_eq!(action.chosen_color(), Some(CardColor::Green));

        assert_eq!(PlayAction::new(Card::Wild, None).chosen_color(), None);
    }
}
