//! Tournament error types.

use std::time::Duration;

use thiserror::Error;

use super::models::{PlayerId, TournamentId};
use crate::db::timeouts::TimeoutError;

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Tournament does not exist in the store
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    /// Player is not registered in the tournament
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// Negative id, or the bye used where a real player is required
    #[error("Invalid player id: {0}")]
    InvalidPlayerId(PlayerId),

    /// A player was reported as their own opponent
    #[error("Player {0} cannot be paired against themselves")]
    SelfPairing(PlayerId),

    /// Player names must not be blank
    #[error("Player name must not be empty")]
    EmptyName,

    /// A forced bye was requested for a field that has no bye slot
    #[error("Cannot force a bye for player {0}: field has an even number of players")]
    ForcedByeOnEvenField(PlayerId),

    /// The same player appears twice in the standings
    #[error("Duplicate player in standings: {0}")]
    DuplicatePlayer(PlayerId),

    /// The bye placeholder appears as a ranked player
    #[error("Bye placeholder must not appear in standings")]
    ByeInStandings,

    /// Standings violate (score desc, tiebreak desc, id asc)
    #[error("Standings out of order at position {position}: player {player_id}")]
    StandingsOutOfOrder { position: usize, player_id: PlayerId },

    /// Score or tiebreak value is NaN or negative
    #[error("Invalid score for player {player_id}: {value}")]
    InvalidScore { player_id: PlayerId, value: f64 },

    /// Bye reassignment picked a player it had already tried
    #[error("Bye reassignment revisited player {0}")]
    ByeReassignmentLoop(PlayerId),

    /// Store operation timed out
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TournamentError {
    /// Whether the error came from caller input rather than the store
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TournamentError::UnknownPlayer(_)
                | TournamentError::InvalidPlayerId(_)
                | TournamentError::SelfPairing(_)
                | TournamentError::EmptyName
                | TournamentError::ForcedByeOnEvenField(_)
        )
    }

    /// Whether the standings handed to the engine were inconsistent
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            TournamentError::DuplicatePlayer(_)
                | TournamentError::ByeInStandings
                | TournamentError::StandingsOutOfOrder { .. }
                | TournamentError::InvalidScore { .. }
                | TournamentError::ByeReassignmentLoop(_)
        )
    }

    /// Get a client-safe error message that doesn't leak store internals
    pub fn client_message(&self) -> String {
        match self {
            TournamentError::Database(_) => "Internal server error".to_string(),
            TournamentError::Timeout(_) => "Store unavailable".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<TimeoutError> for TournamentError {
    fn from(err: TimeoutError) -> Self {
        match err {
            TimeoutError::Timeout(duration) => TournamentError::Timeout(duration),
            TimeoutError::Database(e) => TournamentError::Database(e),
        }
    }
}

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(TournamentError::SelfPairing(3).is_validation());
        assert!(!TournamentError::SelfPairing(3).is_data_integrity());
        assert!(TournamentError::ByeInStandings.is_data_integrity());
        assert!(TournamentError::ByeReassignmentLoop(4).is_data_integrity());
        assert!(!TournamentError::NotFound(1).is_validation());
    }

    #[test]
    fn test_client_message_sanitizes_database_errors() {
        let err = TournamentError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.client_message(), "Internal server error");

        let err = TournamentError::UnknownPlayer(42);
        assert_eq!(err.client_message(), "Unknown player: 42");
    }

    #[test]
    fn test_timeout_conversion() {
        let err: TournamentError = TimeoutError::Timeout(Duration::from_secs(5)).into();
        assert!(matches!(err, TournamentError::Timeout(d) if d == Duration::from_secs(5)));
    }
}
