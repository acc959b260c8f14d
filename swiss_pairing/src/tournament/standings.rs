//! Standings table and tiebreak strategies.
//!
//! Rows are ranked by score (descending), then tiebreak (descending), then
//! player id (ascending). Stores build rows with [`compute_standings`]; the
//! pairing engine only checks the ordering with [`validate_standings`].

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{TournamentError, TournamentResult};
use super::models::{BYE_ID, MatchResult, Player, PlayerId, StandingRow};

/// Secondary ranking key for players on equal points
pub trait TiebreakStrategy: Send + Sync {
    /// Short name used in logs and configuration
    fn name(&self) -> &'static str;

    /// Tiebreak score of `player` given the full match history
    fn score(&self, player: PlayerId, history: &[MatchResult]) -> f64;
}

/// Total points `player` has earned across `history`
pub fn points(player: PlayerId, history: &[MatchResult]) -> f64 {
    history.iter().filter_map(|m| m.points_for(player)).sum()
}

/// Final scores of every real opponent `player` has faced, one entry per match
fn opponent_scores(player: PlayerId, history: &[MatchResult]) -> Vec<f64> {
    history
        .iter()
        .filter_map(|m| m.opponent_of(player))
        .filter(|&opponent| opponent != BYE_ID)
        .map(|opponent| points(opponent, history))
        .collect()
}

/// Solkoff: sum of the final scores of all opponents (byes excluded)
#[derive(Debug, Clone, Copy, Default)]
pub struct Solkoff;

impl TiebreakStrategy for Solkoff {
    fn name(&self) -> &'static str {
        "solkoff"
    }

    fn score(&self, player: PlayerId, history: &[MatchResult]) -> f64 {
        opponent_scores(player, history).iter().sum()
    }
}

/// Median Buchholz: Solkoff without the best and worst opponent.
///
/// With fewer than three opponents nothing is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianBuchholz;

impl TiebreakStrategy for MedianBuchholz {
    fn name(&self) -> &'static str {
        "median"
    }

    fn score(&self, player: PlayerId, history: &[MatchResult]) -> f64 {
        let mut scores = opponent_scores(player, history);
        if scores.len() < 3 {
            return scores.iter().sum();
        }
        scores.sort_by(f64::total_cmp);
        scores[1..scores.len() - 1].iter().sum()
    }
}

/// Sonneborn-Berger: opponents' final scores weighted by the points taken off them
#[derive(Debug, Clone, Copy, Default)]
pub struct SonnebornBerger;

impl TiebreakStrategy for SonnebornBerger {
    fn name(&self) -> &'static str {
        "sonneborn-berger"
    }

    fn score(&self, player: PlayerId, history: &[MatchResult]) -> f64 {
        history
            .iter()
            .filter_map(|m| {
                let opponent = m.opponent_of(player)?;
                if opponent == BYE_ID {
                    return None;
                }
                let earned = m.points_for(player)?;
                Some(earned * points(opponent, history))
            })
            .sum()
    }
}

/// Selectable tiebreak strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TiebreakKind {
    #[default]
    Solkoff,
    Median,
    SonnebornBerger,
}

impl TiebreakKind {
    /// Strategy implementing this kind
    pub fn strategy(self) -> &'static dyn TiebreakStrategy {
        match self {
            TiebreakKind::Solkoff => &Solkoff,
            TiebreakKind::Median => &MedianBuchholz,
            TiebreakKind::SonnebornBerger => &SonnebornBerger,
        }
    }
}

impl fmt::Display for TiebreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy().name())
    }
}

impl FromStr for TiebreakKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "solkoff" | "buchholz" => Ok(TiebreakKind::Solkoff),
            "median" | "median-buchholz" => Ok(TiebreakKind::Median),
            "sonneborn-berger" | "sb" => Ok(TiebreakKind::SonnebornBerger),
            other => Err(format!("unknown tiebreak strategy '{other}'")),
        }
    }
}

/// Ranking order: score desc, tiebreak desc, player id asc
pub fn standing_order(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.tiebreak_score.total_cmp(&a.tiebreak_score))
        .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Build the ranked standings for `players` from the tournament's match history.
///
/// Every registered player gets a row, including those who have not played yet.
/// Byes count as a played match worth a full point.
pub fn compute_standings(
    players: &[Player],
    history: &[MatchResult],
    strategy: &dyn TiebreakStrategy,
) -> Vec<StandingRow> {
    let mut totals: HashMap<PlayerId, (f64, u32)> = HashMap::new();
    for m in history {
        for (player, earned) in [(m.player1, m.score1), (m.player2, m.score2)] {
            let entry = totals.entry(player).or_default();
            entry.0 += earned;
            entry.1 += 1;
        }
    }

    let mut rows: Vec<StandingRow> = players
        .iter()
        .filter(|p| !p.is_bye())
        .map(|p| {
            let (score, matches_played) = totals.get(&p.id).copied().unwrap_or_default();
            StandingRow {
                player_id: p.id,
                name: p.name.clone(),
                score,
                tiebreak_score: strategy.score(p.id, history),
                matches_played,
            }
        })
        .collect();

    rows.sort_by(standing_order);
    rows
}

/// Check that `rows` are a well-formed standings table.
///
/// # Errors
///
/// * [`TournamentError::ByeInStandings`] if the bye placeholder is ranked
/// * [`TournamentError::InvalidPlayerId`] for negative ids
/// * [`TournamentError::DuplicatePlayer`] if a player appears twice
/// * [`TournamentError::InvalidScore`] for NaN or negative values
/// * [`TournamentError::StandingsOutOfOrder`] if the ranking order is violated
pub fn validate_standings(rows: &[StandingRow]) -> TournamentResult<()> {
    let mut seen = HashSet::with_capacity(rows.len());

    for (position, row) in rows.iter().enumerate() {
        if row.player_id == BYE_ID {
            return Err(TournamentError::ByeInStandings);
        }
        if row.player_id < BYE_ID {
            return Err(TournamentError::InvalidPlayerId(row.player_id));
        }
        if !seen.insert(row.player_id) {
            return Err(TournamentError::DuplicatePlayer(row.player_id));
        }
        for value in [row.score, row.tiebreak_score] {
            if value.is_nan() || value < 0.0 {
                return Err(TournamentError::InvalidScore {
                    player_id: row.player_id,
                    value,
                });
            }
        }
        if position > 0 && standing_order(&rows[position - 1], row) != Ordering::Less {
            return Err(TournamentError::StandingsOutOfOrder {
                position,
                player_id: row.player_id,
            });
        }
    }

    Ok(())
}
