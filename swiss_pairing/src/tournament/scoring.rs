//! Match outcome encoding.
//!
//! Turns a reported win, loss or tie into the points stored for each side.

use super::errors::{TournamentError, TournamentResult};
use super::models::{BYE_ID, MatchResult, PlayerId};
use super::round::RoundState;

/// Points for a win (and for a bye)
pub const WIN_POINTS: f64 = 1.0;

/// Points for each side of a tie
pub const TIE_POINTS: f64 = 0.5;

/// Points for a loss
pub const LOSS_POINTS: f64 = 0.0;

/// Encode a reported outcome as a [`MatchResult`] stamped with the current round.
///
/// A bye reported as the winner is moved to the losing slot, and a tie against
/// a bye counts as a full win for the real player.
///
/// # Errors
///
/// * [`TournamentError::InvalidPlayerId`] if either id is negative
/// * [`TournamentError::SelfPairing`] if both ids are the same (two byes included)
pub fn encode(
    winner: PlayerId,
    loser: PlayerId,
    tie: bool,
    round: &RoundState,
) -> TournamentResult<MatchResult> {
    for id in [winner, loser] {
        if id < BYE_ID {
            return Err(TournamentError::InvalidPlayerId(id));
        }
    }
    if winner == loser {
        return Err(TournamentError::SelfPairing(winner));
    }

    let (winner, loser) = if winner == BYE_ID {
        (loser, winner)
    } else {
        (winner, loser)
    };
    let tie = tie && loser != BYE_ID;

    let (score1, score2) = if tie {
        (TIE_POINTS, TIE_POINTS)
    } else {
        (WIN_POINTS, LOSS_POINTS)
    };

    Ok(MatchResult {
        round: round.result_round(),
        player1: winner,
        player2: loser,
        score1,
        score2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_awards_full_point_to_winner() {
        let result = encode(3, 8, false, &RoundState::at(2)).unwrap();
        assert_eq!(result.player1, 3);
        assert_eq!(result.player2, 8);
        assert_eq!(result.score1, 1.0);
        assert_eq!(result.score2, 0.0);
        assert_eq!(result.round, 2);
    }

    #[test]
    fn test_tie_splits_points() {
        let result = encode(3, 8, true, &RoundState::at(1)).unwrap();
        assert_eq!((result.score1, result.score2), (0.5, 0.5));
        assert_eq!(result.score1 + result.score2, 1.0);
    }

    #[test]
    fn test_bye_reported_as_winner_is_swapped() {
        let result = encode(BYE_ID, 6, false, &RoundState::at(1)).unwrap();
        assert_eq!(result.player1, 6);
        assert_eq!(result.player2, BYE_ID);
        assert_eq!(result.score1, 1.0);
        assert!(result.is_bye());
    }

    #[test]
    fn test_tie_against_bye_is_a_win() {
        let tie = encode(6, BYE_ID, true, &RoundState::at(1)).unwrap();
        let win = encode(6, BYE_ID, false, &RoundState::at(1)).unwrap();
        assert_eq!(tie, win);

        let swapped = encode(BYE_ID, 6, true, &RoundState::at(1)).unwrap();
        assert_eq!(swapped, win);
    }

    #[test]
    fn test_self_pairing_rejected() {
        assert!(matches!(
            encode(4, 4, false, &RoundState::new()),
            Err(TournamentError::SelfPairing(4))
        ));
        assert!(matches!(
            encode(BYE_ID, BYE_ID, false, &RoundState::new()),
            Err(TournamentError::SelfPairing(BYE_ID))
        ));
    }

    #[test]
    fn test_negative_ids_rejected() {
        assert!(matches!(
            encode(-1, 2, false, &RoundState::new()),
            Err(TournamentError::InvalidPlayerId(-1))
        ));
        assert!(matches!(
            encode(2, -5, true, &RoundState::new()),
            Err(TournamentError::InvalidPlayerId(-5))
        ));
    }

    #[test]
    fn test_results_before_first_pairing_stamped_round_one() {
        let result = encode(1, 2, false, &RoundState::new()).unwrap();
        assert_eq!(result.round, 1);
    }
}
