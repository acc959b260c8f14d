//! Round counter for a single tournament.
//!
//! The counter names the round whose pairings were most recently generated.
//! It is owned by the caller and threaded through pairing and reporting calls,
//! so separate tournaments never share a counter.

use serde::{Deserialize, Serialize};

/// Current round of one tournament
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    current_round: u32,
}

impl RoundState {
    /// Start of a tournament, before any pairings
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume at a known round
    pub fn at(current_round: u32) -> Self {
        Self { current_round }
    }

    /// Round whose pairings were most recently generated (0 before the first)
    pub fn current(&self) -> u32 {
        self.current_round
    }

    /// Move to the next round, returning the new round number
    pub fn advance(&mut self) -> u32 {
        self.current_round += 1;
        self.current_round
    }

    /// Copy of this state moved to the next round
    pub fn advanced(mut self) -> Self {
        self.advance();
        self
    }

    /// Back to the start of the tournament
    pub fn reset(&mut self) {
        self.current_round = 0;
    }

    /// Round number to stamp on a reported result.
    ///
    /// Results reported before the first pairing belong to round 1.
    pub fn result_round(&self) -> u32 {
        self.current_round.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_reset() {
        let mut round = RoundState::new();
        assert_eq!(round.current(), 0);
        assert_eq!(round.advance(), 1);
        assert_eq!(round.advance(), 2);
        round.reset();
        assert_eq!(round.current(), 0);
    }

    #[test]
    fn test_advanced_leaves_original_untouched() {
        let round = RoundState::at(3);
        let next = round.advanced();
        assert_eq!(round.current(), 3);
        assert_eq!(next.current(), 4);
    }

    #[test]
    fn test_result_round_never_zero() {
        assert_eq!(RoundState::new().result_round(), 1);
        assert_eq!(RoundState::at(1).result_round(), 1);
        assert_eq!(RoundState::at(4).result_round(), 4);
    }
}
