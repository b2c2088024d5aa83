use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::ai;
use crate::card::{Card, CardColor, CardKind};
use crate::config::{GameConfig, StartingPlayer};
use crate::constants::{DRAW_TWO_PENALTY, WILD_DRAW_FOUR_PENALTY};
use crate::deck::Deck;
use crate::error::{IllegalMove, Result, UnoError};
use crate::player::Player;
use crate::rules;
use crate::snapshot::GameSnapshot;
use crate::turn::{PlayTurnResult, TurnAction, TurnActionResult};

#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    InProgress,
    Ended,
}

/// A single UNO game.
///
/// Seats are filled with [`Game::add_player`] until the configured capacity
/// is reached, then [`Game::start_game`] deals and [`Game::start_first_turn`]
/// flips the first discard. From then on the current player acts through
/// [`Game::play_turn`] or the individual play and draw methods.
///
/// Every mutator validates its input before touching any state, so a call
/// that returns an error leaves the game exactly as it was.
#[derive(Debug, Clone)]
pub struct Game {
    id: Uuid,
    config: GameConfig,
    players: Vec<Player>,
    draw_pile: Deck,
    discard_pile: Deck,
    direction: Direction,
    current_player_index: usize,
    current_color: Option<CardColor>,
    status: GameStatus,
    winner: Option<usize>,
    drew_this_turn: bool,
    rng: StdRng,
}

impl Game {
    /// Creates an empty table with a freshly shuffled deck.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let draw_pile = Deck::standard(&config.deck, &mut rng);

        Ok(Self::assemble(config, draw_pile, rng))
    }

    /// Creates an empty table that deals from `draw_pile` exactly as given,
    /// top card first.
    pub fn with_draw_pile(config: GameConfig, draw_pile: Deck) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self::assemble(config, draw_pile, rng))
    }

    fn assemble(config: GameConfig, draw_pile: Deck, mut rng: StdRng) -> Self {
        let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let players = Vec::with_capacity(config.capacity);

        Self {
            id,
            config,
            players,
            draw_pile,
            discard_pile: Deck::new(),
            direction: Direction::default(),
            current_player_index: 0,
            current_color: None,
            status: GameStatus::NotStarted,
            winner: None,
            drew_this_turn: false,
            rng,
        }
    }

    /// Seats `player` and returns its seat index.
    pub fn add_player(&mut self, mut player: Player) -> Result<usize> {
        if self.status != GameStatus::NotStarted {
            return Err(UnoError::GameAlreadyStarted);
        }
        if self.players.len() >= self.config.capacity {
            return Err(UnoError::TooManyPlayers);
        }
        if self.players.iter().any(|seated| seated.name() == player.name()) {
            return Err(UnoError::DuplicatePlayer(player.name().to_string()));
        }

        player.set_uno_call_policy(self.config.uno_call_policy);
        debug!(player = %player.name(), ai = player.is_ai(), "player seated");
        self.players.push(player);

        Ok(self.players.len() - 1)
    }

    /// Deals the opening hands and picks the starting player.
    pub fn start_game(&mut self) -> Result<()> {
        match self.status {
            GameStatus::NotStarted => {}
            GameStatus::InProgress => return Err(UnoError::GameAlreadyStarted),
            GameStatus::Ended => return Err(UnoError::GameAlreadyEnded),
        }
        if self.players.len() != self.config.capacity {
            return Err(UnoError::InsufficientPlayers {
                required: self.config.capacity,
                actual: self.players.len(),
            });
        }
        let cards_per_player = self.config.initial_cards_per_player;
        if self.draw_pile.len() < cards_per_player * self.players.len() {
            return Err(UnoError::EmptyDraw);
        }

        for _ in 0..cards_per_player {
            for player in &mut self.players {
                player.add_card(self.draw_pile.draw()?);
            }
        }

        self.current_player_index = match self.config.starting_player {
            StartingPlayer::First => 0,
            StartingPlayer::Random => self.rng.gen_range(0..self.players.len()),
        };
        self.status = GameStatus::InProgress;

        info!(
            game = %self.id,
            players = self.players.len(),
            starting_player = self.current_player_index,
            "game started"
        );

        self.update_playable_cards();
        Ok(())
    }

    /// Flips the first discard. Action and wild cards met on the way are
    /// shuffled back into the draw pile.
    pub fn start_first_turn(&mut self) -> Result<Card> {
        self.ensure_in_progress()?;
        if !self.discard_pile.is_empty() {
            return Err(UnoError::FirstCardAlreadyFlipped);
        }

        let mut set_aside = Vec::new();
        let first_card = loop {
            match self.draw_pile.draw() {
                Ok(card) if !card.is_special() => break card,
                Ok(card) => set_aside.push(card),
                Err(_) => {
                    self.draw_pile.add_cards(set_aside.into_iter().rev());
                    return Err(UnoError::EmptyDraw);
                }
            }
        };

        if !set_aside.is_empty() {
            trace!(count = set_aside.len(), "special cards returned to the draw pile");
            self.draw_pile.add_cards(set_aside);
            self.draw_pile.shuffle(&mut self.rng);
        }

        self.discard_pile.add_card(first_card);
        self.current_color = first_card.color();
        debug!(card = %first_card, "first card flipped");

        self.update_playable_cards();
        Ok(first_card)
    }

    /// Refreshes the advisory `playable` flags of the current player's hand.
    /// Every other hand is cleared.
    pub fn update_playable_cards(&mut self) {
        let in_progress = self.status == GameStatus::InProgress;
        let top = self.discard_pile.peek().copied();
        let current_color = self.current_color;
        let current = self.current_player_index;

        for (seat, player) in self.players.iter_mut().enumerate() {
            if !in_progress || seat != current {
                player.clear_playable_flags();
                continue;
            }

            let hand = player.cards().copied().collect::<Vec<_>>();
            player.set_playable_flags(|card| {
                rules::is_playable(card, top.as_ref(), current_color, &hand)
            });
            trace!(
                player = %player.name(),
                playable = player.playable_cards().len(),
                "playable cards updated"
            );
        }
    }

    /// Whether the current player may legally play `card` right now.
    pub fn is_card_playable(&self, card: &Card) -> bool {
        let Some(player) = self.current_player() else {
            return false;
        };
        rules::is_playable(card, self.discard_pile.peek(), self.current_color, player.cards())
    }

    /// Plays `card` from the current player's hand.
    ///
    /// Wild cards need `chosen_color`. For an AI player without one, the
    /// engine picks a color at random.
    ///
    /// When the card empties the hand the game ends on the spot: the card's
    /// effect is not resolved and the turn does not move.
    pub fn play_card(
        &mut self,
        card: &Card,
        chosen_color: Option<CardColor>,
    ) -> Result<PlayTurnResult> {
        self.ensure_in_progress()?;

        let player = &self.players[self.current_player_index];
        if !player.has_card(card) {
            return Err(IllegalMove::CardNotInHand.into());
        }
        if !self.is_card_playable(card) {
            return Err(IllegalMove::CardNotPlayable.into());
        }
        let is_ai = player.is_ai();
        let new_color = match (card.color(), chosen_color) {
            (Some(color), _) | (None, Some(color)) => color,
            (None, None) if is_ai => ai::random_color(&mut self.rng),
            (None, None) => return Err(IllegalMove::ColorNotChosen.into()),
        };

        let seat = self.current_player_index;
        let played = self.players[seat].remove_card(card)?;
        self.discard_pile.add_card(played);
        self.current_color = Some(new_color);

        debug!(
            player = %self.players[seat].name(),
            card = %played,
            color = %new_color,
            "card played"
        );

        let turn_action_result = match played.kind() {
            CardKind::Number => TurnActionResult::Neutral,
            CardKind::Skip => TurnActionResult::Skip,
            CardKind::Reverse => TurnActionResult::Reverse,
            CardKind::DrawTwo => TurnActionResult::DrawTwo,
            CardKind::Wild => TurnActionResult::Wild,
            CardKind::WildDrawFour => TurnActionResult::WildDrawFour,
        };

        if self.players[seat].cards_count() == 0 {
            self.status = GameStatus::Ended;
            self.winner = Some(seat);
            self.update_playable_cards();
            info!(game = %self.id, winner = %self.players[seat].name(), "game ended");

            return Ok(PlayTurnResult {
                turn_action_result,
                won: true,
            });
        }

        match played.kind() {
            CardKind::Number | CardKind::Wild => self.move_turn_n_players_ahead(1),
            CardKind::Skip => self.move_turn_n_players_ahead(2),
            CardKind::Reverse => self.perform_reverse(),
            CardKind::DrawTwo => self.perform_draw_penalty(DRAW_TWO_PENALTY),
            CardKind::WildDrawFour => self.perform_draw_penalty(WILD_DRAW_FOUR_PENALTY),
        }

        self.update_playable_cards();
        Ok(PlayTurnResult {
            turn_action_result,
            won: false,
        })
    }

    /// Takes the top card of the draw pile, refilling the pile from the
    /// discards when it is empty. The card is handed to the caller; no hand
    /// receives it and the turn does not move.
    pub fn draw_card(&mut self) -> Result<Card> {
        self.ensure_in_progress()?;
        self.draw_from_piles().ok_or(UnoError::EmptyDraw)
    }

    /// Draws a card into the current player's hand and passes the turn.
    pub fn draw_card_for_current_player(&mut self) -> Result<Card> {
        let card = self.draw_card()?;
        let seat = self.current_player_index;
        self.players[seat].add_card(card);
        debug!(player = %self.players[seat].name(), "drew a card and passed");

        self.move_turn_n_players_ahead(1);
        self.update_playable_cards();
        Ok(card)
    }

    /// Draws a card into the current player's hand and keeps the turn with
    /// them. They may then play any legal card or [`Game::pass_turn`].
    pub fn draw_card_without_advancing_turn(&mut self) -> Result<Card> {
        let card = self.draw_card()?;
        let seat = self.current_player_index;
        self.players[seat].add_card(card);
        self.drew_this_turn = true;
        debug!(player = %self.players[seat].name(), "drew a card and held the turn");

        self.update_playable_cards();
        Ok(card)
    }

    /// Ends the current turn without playing. Only allowed after drawing, or
    /// when there is nothing left to draw.
    pub fn pass_turn(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        if !self.drew_this_turn && self.can_draw() {
            return Err(IllegalMove::MustDrawBeforePassing.into());
        }

        debug!(player = %self.players[self.current_player_index].name(), "passed");
        self.move_turn_n_players_ahead(1);
        self.update_playable_cards();
        Ok(())
    }

    /// Declares UNO for the current player.
    pub fn declare_uno(&mut self) -> Result<bool> {
        self.declare_uno_for(self.current_player_index)
    }

    /// Declares UNO for the player at `seat`, whether or not it is their
    /// turn.
    pub fn declare_uno_for(&mut self, seat: usize) -> Result<bool> {
        self.ensure_in_progress()?;
        let player = self
            .players
            .get_mut(seat)
            .ok_or(IllegalMove::NotPlayersTurn)?;

        let declared = player.declare_uno();
        debug!(player = %player.name(), declared, "uno");
        Ok(declared)
    }

    /// Calls out every other player sitting on one undeclared card. Each of
    /// them draws the callout penalty; when nobody is caught the caller draws
    /// it instead. Returns the seats that were caught.
    pub fn callout(&mut self) -> Result<Vec<usize>> {
        self.ensure_in_progress()?;
        let called_out = self.perform_callout();
        self.update_playable_cards();
        Ok(called_out)
    }

    /// Runs `action` for the player at `seat`. Only [`TurnAction::Uno`] may be
    /// sent by a seat that does not hold the turn.
    pub fn play_turn(&mut self, seat: usize, turn_action: TurnAction) -> Result<PlayTurnResult> {
        self.ensure_in_progress()?;
        if seat != self.current_player_index && turn_action != TurnAction::Uno {
            return Err(IllegalMove::NotPlayersTurn.into());
        }

        let turn_action_result = match turn_action {
            TurnAction::Play(play_action) => {
                return self.play_card(&play_action.card(), play_action.chosen_color());
            }
            TurnAction::Draw => TurnActionResult::Drew(self.draw_card_for_current_player()?),
            TurnAction::DrawAndHold => {
                TurnActionResult::DrewAndHeld(self.draw_card_without_advancing_turn()?)
            }
            TurnAction::Pass => {
                self.pass_turn()?;
                TurnActionResult::Passed
            }
            TurnAction::Callout => {
                let called_out = self.callout()?;
                if called_out.is_empty() {
                    TurnActionResult::CalloutFailed
                } else {
                    TurnActionResult::CalledOut(called_out)
                }
            }
            TurnAction::Uno => {
                if self.declare_uno_for(seat)? {
                    TurnActionResult::UnoSuccessful
                } else {
                    TurnActionResult::UnoFailed
                }
            }
        };

        Ok(PlayTurnResult {
            turn_action_result,
            won: false,
        })
    }

    pub fn snapshot(&self, viewer: Option<usize>) -> GameSnapshot {
        GameSnapshot::from_game(self, viewer)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_started(&self) -> bool {
        self.status != GameStatus::NotStarted
    }

    pub fn is_game_ended(&self) -> bool {
        self.status == GameStatus::Ended
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|seat| self.players.get(seat))
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get_player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn next_player_index(&self) -> usize {
        self.nth_player_index_ahead(1)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_color(&self) -> Option<CardColor> {
        self.current_color
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.peek()
    }

    pub fn draw_pile(&self) -> &Deck {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &Deck {
        &self.discard_pile
    }

    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_count(&self) -> usize {
        self.discard_pile.len()
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.status {
            GameStatus::NotStarted => Err(UnoError::GameNotStarted),
            GameStatus::InProgress => Ok(()),
            GameStatus::Ended => Err(UnoError::GameAlreadyEnded),
        }
    }

    fn can_draw(&self) -> bool {
        !self.draw_pile.is_empty() || self.discard_pile.len() > 1
    }

    fn draw_from_piles(&mut self) -> Option<Card> {
        if self.draw_pile.is_empty() && self.discard_pile.len() > 1 {
            let recycled = self.discard_pile.take_all_but_top();
            debug!(cards = recycled.len(), "reshuffling the discard pile into the draw pile");
            self.draw_pile.add_cards(recycled);
            self.draw_pile.shuffle(&mut self.rng);
        }
        self.draw_pile.draw().ok()
    }

    /// Gives up to `count` cards to `seat`, as many as the piles can supply.
    fn draw_cards_to_player(&mut self, seat: usize, count: usize) -> usize {
        let mut drawn = self.draw_pile.draw_cards(count);
        while drawn.len() < count {
            let Some(card) = self.draw_from_piles() else {
                break;
            };
            drawn.push(card);
        }

        let drawn_count = drawn.len();
        self.players[seat].add_cards(drawn);
        drawn_count
    }

    /// In a two player game the reverse acts as a skip, so the player who
    /// reversed goes again.
    fn perform_reverse(&mut self) {
        self.direction = self.direction.reversed();
        if self.players.len() == 2 {
            self.move_turn_n_players_ahead(2);
        } else {
            self.move_turn_n_players_ahead(1);
        }
    }

    fn perform_draw_penalty(&mut self, count: usize) {
        self.move_turn_n_players_ahead(1);
        let target = self.current_player_index;
        let drawn = self.draw_cards_to_player(target, count);
        debug!(player = %self.players[target].name(), cards = drawn, "penalty drawn");
        self.move_turn_n_players_ahead(1);
    }

    fn perform_callout(&mut self) -> Vec<usize> {
        let current = self.current_player_index;
        let penalty = self.config.callout_penalty;

        let called_out = self
            .players
            .iter()
            .enumerate()
            .filter(|(seat, player)| {
                *seat != current && player.cards_count() == 1 && !player.has_called_uno()
            })
            .map(|(seat, _)| seat)
            .collect::<Vec<_>>();

        if called_out.is_empty() {
            self.draw_cards_to_player(current, penalty);
        } else {
            for seat in &called_out {
                self.draw_cards_to_player(*seat, penalty);
            }
        }

        debug!(caller = current, caught = ?called_out, "callout");
        called_out
    }

    fn nth_player_index_ahead(&self, n: usize) -> usize {
        let count = self.players.len();
        if count == 0 {
            return 0;
        }
        let steps = n % count;
        match self.direction {
            Direction::Clockwise => (self.current_player_index + steps) % count,
            Direction::CounterClockwise => (self.current_player_index + count - steps) % count,
        }
    }

    fn move_turn_n_players_ahead(&mut self, n: usize) {
        self.current_player_index = self.nth_player_index_ahead(n);
        self.drew_this_turn = false;
        trace!(current_player = self.current_player_index, "turn moved");
    }
}
