mod config;
mod session;

use clap::Parser;
use color_eyre::Result;
use futures::future::try_join_all;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::TableConfig;
use crate::session::{tally, Session, SessionOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = TableConfig::parse();
    info!(
        tables = config.games,
        players = config.players,
        seed = ?config.seed,
        "opening tables"
    );

    let mut sessions = (0..config.games)
        .map(|index| Session::new(&config, index))
        .collect::<Result<Vec<_>>>()?;

    // Every session owns its game, so the tables can run side by side.
    let outcomes = try_join_all(sessions.iter_mut().map(Session::run)).await?;

    for session in &sessions {
        let game = session.game();
        debug!(
            game = %game.id(),
            status = %game.status(),
            draw_pile = game.draw_pile_count(),
            discard_pile = game.discard_pile_count(),
            "table state"
        );
    }

    let unfinished = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, SessionOutcome::TurnLimit { .. }))
        .count();
    for (player, wins) in tally(&outcomes) {
        info!(player = %player, wins, "result");
    }
    if unfinished > 0 {
        info!(unfinished, "some tables hit the turn limit");
    }

    Ok(())
}
