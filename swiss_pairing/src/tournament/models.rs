//! Swiss tournament data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::round::RoundState;

/// Tournament ID type
pub type TournamentId = i64;

/// Player ID type
pub type PlayerId = i64;

/// Reserved id of the synthetic "Bye" opponent
pub const BYE_ID: PlayerId = 0;

/// Display name of the synthetic "Bye" opponent
pub const BYE_NAME: &str = "Bye";

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (assigned by the store, always >= 1 for real players)
    pub id: PlayerId,
    /// Player's full name (need not be unique)
    pub name: String,
}

impl Player {
    /// Create a new player
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The placeholder opponent paired with whoever sits out a round
    pub fn bye() -> Self {
        Self::new(BYE_ID, BYE_NAME)
    }

    /// Whether this is the bye placeholder
    pub fn is_bye(&self) -> bool {
        self.id == BYE_ID
    }
}

/// Tournament scope for players, matches and standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// Tournament ID
    pub id: TournamentId,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// A recorded match outcome.
///
/// `score1 + score2` is always 1. A bye only ever occupies the second slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Round the match was played in (1-indexed)
    pub round: u32,
    /// Winner, or first player of a tie
    pub player1: PlayerId,
    /// Loser, second player of a tie, or the bye
    pub player2: PlayerId,
    /// Points awarded to `player1`
    pub score1: f64,
    /// Points awarded to `player2`
    pub score2: f64,
}

impl MatchResult {
    /// Whether this result records a bye
    pub fn is_bye(&self) -> bool {
        self.player2 == BYE_ID
    }

    /// Whether `player` took part in this match
    pub fn involves(&self, player: PlayerId) -> bool {
        self.player1 == player || self.player2 == player
    }

    /// Points `player` earned in this match, if they played in it
    pub fn points_for(&self, player: PlayerId) -> Option<f64> {
        if self.player1 == player {
            Some(self.score1)
        } else if self.player2 == player {
            Some(self.score2)
        } else {
            None
        }
    }

    /// The other participant, if `player` played in this match
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        if self.player1 == player {
            Some(self.player2)
        } else if self.player2 == player {
            Some(self.player1)
        } else {
            None
        }
    }
}

/// One row of the ranked standings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub player_id: PlayerId,
    pub name: String,
    /// Accumulated points (wins count 1, ties 0.5, byes 1)
    pub score: f64,
    /// Secondary ranking key produced by the configured tiebreak strategy
    pub tiebreak_score: f64,
    /// Matches played, byes included
    pub matches_played: u32,
}

impl StandingRow {
    /// The player this row describes
    pub fn player(&self) -> Player {
        Player::new(self.player_id, self.name.clone())
    }
}

/// Two players meeting in the next round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub first: Player,
    pub second: Player,
}

impl Pairing {
    /// Create a pairing between two players
    pub fn new(first: Player, second: Player) -> Self {
        Self { first, second }
    }

    /// Pair `player` against the bye
    pub fn bye(player: Player) -> Self {
        Self::new(player, Player::bye())
    }

    /// Whether one side of this pairing is the bye
    pub fn is_bye(&self) -> bool {
        self.first.is_bye() || self.second.is_bye()
    }

    /// Both player ids in table order
    pub fn ids(&self) -> (PlayerId, PlayerId) {
        (self.first.id, self.second.id)
    }
}

/// Pairings for a round together with the round state they advanced to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingOutcome {
    pub pairings: Vec<Pairing>,
    pub round: RoundState,
}
