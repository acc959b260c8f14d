//! Bye eligibility.

use std::collections::HashSet;

use super::models::{BYE_ID, MatchResult, PlayerId, StandingRow};

/// Players who have already received a bye in `history`
pub fn bye_recipients(history: &[MatchResult]) -> HashSet<PlayerId> {
    history
        .iter()
        .filter(|m| m.is_bye())
        .map(|m| m.player1)
        .collect()
}

/// Whether `player` has received a bye in `history`
pub fn has_had_bye(player: PlayerId, history: &[MatchResult]) -> bool {
    history.iter().any(|m| m.is_bye() && m.player1 == player)
}

/// Players still eligible for a bye, weakest first.
///
/// `standings` must be in ranking order. The result runs the other way:
/// score ascending, tiebreak ascending, and the highest id first among equals.
/// Players who already had a bye are left out, so an empty result means
/// everyone has had one.
pub fn eligible_for_bye(standings: &[StandingRow], history: &[MatchResult]) -> Vec<PlayerId> {
    let had_bye = bye_recipients(history);
    standings
        .iter()
        .rev()
        .map(|row| row.player_id)
        .filter(|id| *id != BYE_ID && !had_bye.contains(id))
        .collect()
}
