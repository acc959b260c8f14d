//! # Swiss Pairing
//!
//! Pairings and standings for Swiss-system tournaments.
//!
//! Each round, players are ranked by points, then tiebreak, then id, and
//! neighbours in that ranking are paired: first against second, third against
//! fourth, and so on. With an odd field the last-ranked player gets a bye,
//! unless they have already had one and someone else has not.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Result encoding, standings, bye eligibility, pairing and round state
//! - [`db`]: Standings stores (PostgreSQL and in-memory) behind async repository traits
//!
//! ## Example
//!
//! ```
//! use swiss_pairing::tournament::{RoundState, StandingRow, pairing};
//!
//! let standings: Vec<StandingRow> = (1..=4)
//!     .map(|id| StandingRow {
//!         player_id: id,
//!         name: format!("Player {id}"),
//!         score: 0.0,
//!         tiebreak_score: 0.0,
//!         matches_played: 0,
//!     })
//!     .collect();
//!
//! let outcome = pairing::pair(&standings, &[], None, RoundState::new()).unwrap();
//! assert_eq!(outcome.pairings.len(), 2);
//! assert_eq!(outcome.round.current(), 1);
//! ```

/// Standings stores and database access.
pub mod db;

/// Swiss tournament engine.
pub mod tournament;

pub use tournament::{
    BYE_ID, MatchResult, Pairing, Player, PlayerId, RoundState, StandingRow, TournamentError,
    TournamentManager, TournamentResult,
};
