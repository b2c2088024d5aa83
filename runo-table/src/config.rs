use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use runo::{
    config::{GameConfig, StartingPlayer},
    constants::DeckComposition,
    error::UnoError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeckChoice {
    /// 120 cards, two of every number
    Standard,
    /// 108 cards, one zero per color
    Classic,
}

impl DeckChoice {
    fn composition(self) -> DeckComposition {
        match self {
            DeckChoice::Standard => DeckComposition::STANDARD,
            DeckChoice::Classic => DeckComposition::CLASSIC,
        }
    }
}

/// Plays UNO games between computer players.
#[derive(Parser, Debug, Clone)]
#[command(name = "runo-table", version)]
pub struct TableConfig {
    /// Number of seats at each table (2 to 4)
    #[arg(short, long, env = "RUNO_PLAYERS", default_value_t = 4)]
    pub players: usize,

    /// Number of games to play side by side
    #[arg(short, long, env = "RUNO_GAMES", default_value_t = 1)]
    pub games: usize,

    /// Seed for deterministic games; game N uses seed + N
    #[arg(short, long, env = "RUNO_SEED")]
    pub seed: Option<u64>,

    /// Pause before every computer move, in milliseconds
    #[arg(long = "think-ms", env = "RUNO_THINK_MS", default_value_t = 0)]
    pub think_ms: u64,

    /// Give up on a game after this many turns
    #[arg(long = "max-turns", env = "RUNO_MAX_TURNS", default_value_t = 5_000)]
    pub max_turns: usize,

    #[arg(long, value_enum, env = "RUNO_DECK", default_value_t = DeckChoice::Standard)]
    pub deck: DeckChoice,

    /// Pick the starting player at random instead of seat 0
    #[arg(long = "random-start", action = ArgAction::SetTrue)]
    pub random_start: bool,

    /// Print a JSON snapshot of the table after every turn
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,
}

impl TableConfig {
    pub fn seed_for(&self, game_index: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(game_index as u64))
    }

    pub fn game_config(&self, game_index: usize) -> Result<GameConfig, UnoError> {
        let starting_player = if self.random_start {
            StartingPlayer::Random
        } else {
            StartingPlayer::First
        };

        let mut config = GameConfig::default()
            .with_capacity(self.players)
            .with_deck(self.deck.composition())
            .with_starting_player(starting_player);
        if let Some(seed) = self.seed_for(game_index) {
            config = config.with_seed(seed);
        }
        config.validated()
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> TableConfig {
        TableConfig::try_parse_from(std::iter::once("runo-table").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn arguments_map_onto_the_game_config() {
        let config = parse(&["--players", "3", "--seed", "10", "--deck", "classic", "--random-start"]);

        let game_config = config.game_config(2).unwrap();
        assert_eq!(game_config.capacity, 3);
        assert_eq!(game_config.seed, Some(12));
        assert_eq!(game_config.deck.total(), 108);
        assert_eq!(game_config.starting_player, StartingPlayer::Random);
    }

    #[test]
    fn invalid_table_size_is_rejected() {
        let config = parse(&["--players", "6"]);
        assert!(matches!(
            config.game_config(0),
            Err(UnoError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn think_delay_is_in_milliseconds() {
        let config = parse(&["--think-ms", "250"]);
        assert_eq!(config.think_delay(), Duration::from_millis(250));
    }
}
