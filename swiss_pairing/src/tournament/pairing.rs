//! Swiss pairing engine.
//!
//! Players are paired with their neighbours in the standings: ranks 1 and 2,
//! ranks 3 and 4, and so on. With an odd field the last-ranked player sits out
//! against the bye, unless they already had one and someone else is still
//! eligible. In that case the weakest eligible player is moved to the bottom
//! of the table and the round is paired again.

use std::collections::HashSet;

use super::errors::{TournamentError, TournamentResult};
use super::models::{BYE_ID, Pairing, PairingOutcome, PlayerId, StandingRow};
use super::round::RoundState;
use super::standings::validate_standings;

/// Result of a single pairing pass
enum Attempt {
    /// Pairings are final
    Paired(Vec<Pairing>),
    /// The bye has to go to this player instead
    Reassign(PlayerId),
}

/// Pair the next round.
///
/// * `standings` - ranked standings, validated before use
/// * `eligible` - bye-eligible players, weakest first (see [`super::bye::eligible_for_bye`])
/// * `forced_bye` - give the bye to this player instead of the last-ranked one
/// * `round` - round state before pairing
///
/// The returned outcome holds the pairings in table order and `round`
/// advanced by exactly one, however many passes the bye reassignment took.
///
/// # Errors
///
/// * Any error from [`validate_standings`]
/// * [`TournamentError::InvalidPlayerId`] if `forced_bye` is the bye itself
/// * [`TournamentError::UnknownPlayer`] if the forced or reassigned player is not in `standings`
/// * [`TournamentError::ForcedByeOnEvenField`] if a bye is forced with an even field
/// * [`TournamentError::ByeReassignmentLoop`] if reassignment revisits a player
pub fn pair(
    standings: &[StandingRow],
    eligible: &[PlayerId],
    forced_bye: Option<PlayerId>,
    round: RoundState,
) -> TournamentResult<PairingOutcome> {
    validate_standings(standings)?;

    if let Some(id) = forced_bye
        && id <= BYE_ID
    {
        return Err(TournamentError::InvalidPlayerId(id));
    }

    let mut tried = HashSet::new();
    let mut forced = forced_bye;

    loop {
        if let Some(id) = forced
            && !tried.insert(id)
        {
            return Err(TournamentError::ByeReassignmentLoop(id));
        }

        match pair_once(standings, eligible, forced)? {
            Attempt::Paired(pairings) => {
                let round = round.advanced();
                log::info!(
                    "Paired round {} with {} table(s) for {} player(s)",
                    round.current(),
                    pairings.len(),
                    standings.len()
                );
                return Ok(PairingOutcome { pairings, round });
            }
            Attempt::Reassign(alternate) => {
                log::debug!("Bye candidate already had a bye, reassigning to player {alternate}");
                forced = Some(alternate);
            }
        }
    }
}

fn pair_once(
    standings: &[StandingRow],
    eligible: &[PlayerId],
    forced: Option<PlayerId>,
) -> TournamentResult<Attempt> {
    let mut order: Vec<&StandingRow> = standings.iter().collect();

    if let Some(id) = forced {
        if order.len() % 2 == 0 {
            return Err(TournamentError::ForcedByeOnEvenField(id));
        }
        let idx = order
            .iter()
            .position(|row| row.player_id == id)
            .ok_or(TournamentError::UnknownPlayer(id))?;
        let row = order.remove(idx);
        order.push(row);
    }

    let tables = order.chunks_exact(2);
    let leftover = tables.remainder().first().copied();
    let mut pairings: Vec<Pairing> = tables
        .map(|table| Pairing::new(table[0].player(), table[1].player()))
        .collect();

    if let Some(candidate) = leftover {
        if forced.is_none()
            && let Some(&alternate) = eligible.first()
            && !eligible.contains(&candidate.player_id)
        {
            return Ok(Attempt::Reassign(alternate));
        }
        pairings.push(Pairing::bye(candidate.player()));
    }

    Ok(Attempt::Paired(pairings))
}
