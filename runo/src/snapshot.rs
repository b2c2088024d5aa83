use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::{Card, CardColor};
use crate::game::{Direction, Game, GameStatus};

/// What a presentation layer needs to render a table, from one seat's point
/// of view. Other players' cards are only counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_id: Uuid,
    pub status: GameStatus,
    pub current_player: usize,
    pub top_card: Option<Card>,
    pub current_color: Option<CardColor>,
    pub direction: Direction,
    pub players: Vec<PlayerSummary>,
    /// The viewer's hand; empty for spectators.
    pub player_hand: Vec<Card>,
    pub deck_cards_remaining: usize,
    pub winner: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub name: String,
    pub is_ai: bool,
    pub cards_count: usize,
    pub has_called_uno: bool,
}

impl GameSnapshot {
    pub fn from_game(game: &Game, viewer: Option<usize>) -> Self {
        let players = game
            .players()
            .iter()
            .map(|player| PlayerSummary {
                name: player.name().to_string(),
                is_ai: player.is_ai(),
                cards_count: player.cards_count(),
                has_called_uno: player.has_called_uno(),
            })
            .collect();

        let player_hand = viewer
            .and_then(|seat| game.get_player(seat))
            .map(|player| player.cards().copied().collect())
            .unwrap_or_default();

        Self {
            game_id: game.id(),
            status: game.status(),
            current_player: game.current_player_index(),
            top_card: game.top_card().copied(),
            current_color: game.current_color(),
            direction: game.direction(),
            players,
            player_hand,
            deck_cards_remaining: game.draw_pile_count(),
            winner: game.winner_index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::player::Player;

    fn started_game() -> Game {
        let mut game = Game::new(GameConfig::new(2).unwrap().with_seed(8)).unwrap();
        game.add_player(Player::human("Ann")).unwrap();
        game.add_player(Player::ai("Bot")).unwrap();
        game.start_game().unwrap();
        game.start_first_turn().unwrap();
        game
    }

    #[test]
    fn snapshot_hides_other_hands() {
        let game = started_game();

        let snapshot = game.snapshot(Some(0));
        assert_eq!(snapshot.player_hand.len(), 7);
        assert_eq!(snapshot.players[1].cards_count, 7);
        assert!(snapshot.players[1].is_ai);
        assert_eq!(snapshot.top_card.as_ref(), game.top_card());
        assert_eq!(snapshot.deck_cards_remaining, game.draw_pile_count());

        assert!(game.snapshot(None).player_hand.is_empty());
        assert!(game.snapshot(Some(9)).player_hand.is_empty());
    }

    #[test]
    fn snapshot_serializes_with_camel_case_fields() {
        let game = started_game();
        let value = serde_json::to_value(game.snapshot(Some(1))).unwrap();

        for field in [
            "gameId",
            "status",
            "currentPlayer",
            "topCard",
            "currentColor",
            "players",
            "playerHand",
            "deckCardsRemaining",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["status"], "InProgress");
        assert_eq!(value["players"][0]["name"], "Ann");
        assert_eq!(value["players"][1]["isAi"], true);
    }

    #[test]
    fn snapshot_survives_a_json_round_trip() {
        let game = started_game();
        let snapshot = game.snapshot(Some(0));

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
