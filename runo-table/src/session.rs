use std::{collections::BTreeMap, time::Duration};

use color_eyre::{eyre::eyre, Result};
use rand::{rngs::StdRng, SeedableRng};
use runo::{
    ai::{Policy, RandomPolicy},
    error::UnoError,
    game::Game,
    player::Player,
    turn::{TurnAction, TurnActionResult},
};
use tracing::{debug, info, warn};

use crate::config::TableConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Won { winner: String, turns: usize },
    TurnLimit { turns: usize },
}

/// One table: a game, the policy that plays every seat, and the pacing.
///
/// The session is the only owner of its game. Nothing else holds a reference
/// to it while it runs.
pub struct Session {
    index: usize,
    game: Game,
    policy: RandomPolicy<StdRng>,
    think_delay: Duration,
    max_turns: usize,
    emit_json: bool,
    turns: usize,
}

impl Session {
    pub fn new(config: &TableConfig, index: usize) -> Result<Self> {
        let mut game = Game::new(config.game_config(index)?)?;
        for seat in 0..config.players {
            game.add_player(Player::ai(format!("Bot {}", seat + 1)))?;
        }

        let rng = match config.seed_for(index) {
            Some(seed) => StdRng::seed_from_u64(seed.rotate_left(32)),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            index,
            game,
            policy: RandomPolicy::new(rng),
            think_delay: config.think_delay(),
            max_turns: config.max_turns,
            emit_json: config.json,
            turns: 0,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub async fn run(&mut self) -> Result<SessionOutcome> {
        self.game.start_game()?;
        let first_card = self.game.start_first_turn()?;
        info!(table = self.index, game = %self.game.id(), first_card = %first_card, "table opened");

        while !self.game.is_game_ended() {
            if self.turns >= self.max_turns {
                warn!(table = self.index, turns = self.turns, "turn limit reached");
                return Ok(SessionOutcome::TurnLimit { turns: self.turns });
            }

            // Computer players "think" here, outside the engine.
            if !self.think_delay.is_zero() {
                tokio::time::sleep(self.think_delay).await;
            }

            self.take_turn()?;
            self.turns += 1;

            if self.emit_json {
                println!("{}", serde_json::to_string(&self.game.snapshot(None))?);
            }
        }

        let winner = self
            .game
            .winner()
            .ok_or_else(|| eyre!("game {} ended without a winner", self.game.id()))?
            .name()
            .to_string();
        info!(table = self.index, winner = %winner, turns = self.turns, "table closed");

        Ok(SessionOutcome::Won {
            winner,
            turns: self.turns,
        })
    }

    fn take_turn(&mut self) -> Result<TurnActionResult> {
        let seat = self.game.current_player_index();
        let action = self.policy.decide(&self.game);

        let result = match self.game.play_turn(seat, action) {
            Ok(result) => result.turn_action_result,
            Err(UnoError::EmptyDraw) if action == TurnAction::Draw => {
                self.game.pass_turn()?;
                TurnActionResult::Passed
            }
            Err(error) => return Err(error.into()),
        };

        debug!(table = self.index, seat, ?action, ?result, "turn taken");
        Ok(result)
    }
}

/// Wins per player name across finished games.
pub fn tally(outcomes: &[SessionOutcome]) -> BTreeMap<String, usize> {
    let mut wins = BTreeMap::new();
    for outcome in outcomes {
        if let SessionOutcome::Won { winner, .. } = outcome {
            *wins.entry(winner.clone()).or_insert(0) += 1;
        }
    }
    wins
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn config(args: &[&str]) -> TableConfig {
        TableConfig::try_parse_from(std::iter::once("runo-table").chain(args.iter().copied()))
            .unwrap()
    }

    #[tokio::test]
    async fn session_plays_a_game_to_the_end() {
        let config = config(&["--players", "3", "--seed", "17", "--max-turns", "20000"]);
        let mut session = Session::new(&config, 0).unwrap();

        let outcome = session.run().await.unwrap();

        match outcome {
            SessionOutcome::Won { winner, turns } => {
                assert!(turns > 0);
                let winner = session
                    .game()
                    .players()
                    .iter()
                    .find(|player| player.name() == winner)
                    .unwrap();
                assert_eq!(winner.cards_count(), 0);
            }
            SessionOutcome::TurnLimit { .. } => panic!("game should finish"),
        }
        assert!(session.game().is_game_ended());
    }

    #[tokio::test]
    async fn session_stops_at_the_turn_limit() {
        let config = config(&["--players", "4", "--seed", "3", "--max-turns", "2"]);
        let mut session = Session::new(&config, 0).unwrap();

        let outcome = session.run().await.unwrap();

        assert_eq!(outcome, SessionOutcome::TurnLimit { turns: 2 });
        assert!(!session.game().is_game_ended());
    }

    #[tokio::test(start_paused = true)]
    async fn think_delay_is_spent_before_each_move() {
        let config = config(&["--players", "2", "--seed", "5", "--max-turns", "3", "--think-ms", "1000"]);
        let mut session = Session::new(&config, 0).unwrap();
        let started = tokio::time::Instant::now();

        let outcome = session.run().await.unwrap();

        let elapsed = started.elapsed();
        match outcome {
            SessionOutcome::TurnLimit { turns } => {
                assert_eq!(elapsed.as_secs(), turns as u64);
            }
            SessionOutcome::Won { turns, .. } => {
                assert_eq!(elapsed.as_secs(), turns as u64);
            }
        }
    }

    #[test]
    fn same_seed_gives_the_same_table() {
        let config = config(&["--players", "2", "--seed", "9"]);
        let first = Session::new(&config, 0).unwrap();
        let second = Session::new(&config, 0).unwrap();
        let other = Session::new(&config, 1).unwrap();

        assert_eq!(first.game().id(), second.game().id());
        assert_ne!(first.game().id(), other.game().id());
    }

    #[test]
    fn tally_counts_wins_per_player() {
        let outcomes = [
            SessionOutcome::Won {
                winner: "Bot 1".to_string(),
                turns: 10,
            },
            SessionOutcome::TurnLimit { turns: 50 },
            SessionOutcome::Won {
                winner: "Bot 1".to_string(),
                turns: 12,
            },
            SessionOutcome::Won {
                winner: "Bot 2".to_string(),
                turns: 8,
            },
        ];

        let wins = tally(&outcomes);

        assert_eq!(wins.get("Bot 1"), Some(&2));
        assert_eq!(wins.get("Bot 2"), Some(&1));
        assert_eq!(wins.len(), 2);
    }
}
