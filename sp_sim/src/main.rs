//! Swiss tournament simulator.
//!
//! Registers a field of players, pairs and plays every round with seeded
//! random outcomes, and prints the final standings.

mod config;
mod logging;
mod simulation;

use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use swiss_pairing::db::{Database, MemoryStandingsStore, PgStandingsStore};
use swiss_pairing::tournament::TournamentManager;

use config::{SimConfig, SimOverrides};

const HELP: &str = "\
Simulate a Swiss-system tournament

USAGE:
  sp_sim [OPTIONS]

OPTIONS:
  --players    N           Number of players           [default: env SIM_PLAYERS or 8]
  --rounds     N           Number of rounds            [default: env SIM_ROUNDS or log2(players)]
  --seed       N           Outcome generator seed      [default: env SIM_SEED or 42]
  --tiebreak   NAME        solkoff, median or sonneborn-berger  [default: env SIM_TIEBREAK or solkoff]
  --db-url     URL         Use a PostgreSQL store      [default: env DATABASE_URL, in-memory if unset]

FLAGS:
  --json                   Print the final report as JSON
  -h, --help               Print help information

ENVIRONMENT:
  SIM_TIE_RATE             Probability a match is drawn (default: 0.1)
  RUST_LOG                 Log filter (default: info)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = SimOverrides {
        players: pargs.opt_value_from_str("--players")?,
        rounds: pargs.opt_value_from_str("--rounds")?,
        seed: pargs.opt_value_from_str("--seed")?,
        tiebreak: pargs.opt_value_from_str("--tiebreak")?,
        database_url: pargs.opt_value_from_str("--db-url")?,
        json: pargs.contains("--json"),
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();
    let config = SimConfig::from_env(overrides)?;
    info!(
        "Simulating {} player(s) over {} round(s) with {} tiebreak (seed {})",
        config.players, config.rounds, config.tiebreak, config.seed
    );

    let report = match &config.database {
        Some(db_config) => {
            info!("Connecting to database: {}", db_config.database_url);
            let db = Database::new(db_config)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
            db.ensure_schema().await?;
            info!("Database connected successfully");

            let store = PgStandingsStore::new(db.pool().clone()).with_tiebreak(config.tiebreak);
            let manager = TournamentManager::new(Arc::new(store));
            let report = simulation::run(&manager, &config).await?;
            db.close().await;
            report
        }
        None => {
            let store = MemoryStandingsStore::new().with_tiebreak(config.tiebreak);
            let manager = TournamentManager::new(Arc::new(store));
            simulation::run(&manager, &config).await?
        }
    };

    if let Some(leader) = report.standings.first() {
        info!(
            "Tournament {} finished, leader: {} with {} point(s)",
            report.tournament_id, leader.name, leader.score
        );
    }
    logging::print_report(&report, config.json)?;

    Ok(())
}
