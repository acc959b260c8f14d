//! Swiss-system tournament module.
//!
//! This module provides:
//! - Match result encoding (wins, ties, byes)
//! - Ranked standings with pluggable tiebreaks
//! - Bye eligibility tracking
//! - Adjacent-rank pairing with bye reassignment
//! - Per-tournament round counting
//!
//! ## Example
//!
//! ```
//! use swiss_pairing::db::MemoryStandingsStore;
//! use swiss_pairing::tournament::{RoundState, TournamentManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = TournamentManager::new(Arc::new(MemoryStandingsStore::default()));
//!     let tournament = manager.create_tournament().await?;
//!     let mut round = RoundState::new();
//!
//!     for name in ["Twilight Sparkle", "Fluttershy", "Applejack"] {
//!         manager.register_player(tournament.id, name).await?;
//!     }
//!
//!     // Three players: two play, the last-ranked one gets the bye
//!     let pairings = manager.swiss_pairings(tournament.id, &mut round, None).await?;
//!     assert_eq!(pairings.len(), 2);
//!     assert!(pairings[1].is_bye());
//!     assert_eq!(round.current(), 1);
//!
//!     Ok(())
//! }
//! ```

pub mod bye;
pub mod errors;
pub mod manager;
pub mod models;
pub mod pairing;
pub mod round;
pub mod scoring;
pub mod standings;

pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    BYE_ID, BYE_NAME, MatchResult, Pairing, PairingOutcome, Player, PlayerId, StandingRow,
    Tournament, TournamentId,
};
pub use round::RoundState;
pub use standings::{MedianBuchholz, Solkoff, SonnebornBerger, TiebreakKind, TiebreakStrategy};
