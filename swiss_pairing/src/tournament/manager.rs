//! Tournament manager driving a Swiss event against a store.

use std::collections::HashSet;
use std::sync::Arc;

use super::errors::{TournamentError, TournamentResult};
use super::models::{BYE_ID, MatchResult, Pairing, PlayerId, StandingRow, Tournament, TournamentId};
use super::round::RoundState;
use super::{pairing, scoring};
use crate::db::repository::{StandingsStore, TournamentRepository};

/// Tournament manager
///
/// Holds no per-tournament state of its own. The caller owns each
/// tournament's [`RoundState`] and passes it into every round-sensitive call,
/// and must not pair the same tournament from two tasks at once.
pub struct TournamentManager<S> {
    store: Arc<S>,
}

impl<S> Clone for TournamentManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> TournamentManager<S>
where
    S: StandingsStore + TournamentRepository,
{
    /// Create a new tournament manager
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        self.store.as_ref()
    }

    /// Create a new tournament
    pub async fn create_tournament(&self) -> TournamentResult<Tournament> {
        let tournament = self.store.create_tournament().await?;
        log::info!("Created tournament {}", tournament.id);
        Ok(tournament)
    }

    /// Register a player, returning the id the store assigned
    pub async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }

        let player_id = self.store.register_player(tournament_id, name).await?;
        log::debug!("Registered player {player_id} ({name}) in tournament {tournament_id}");
        Ok(player_id)
    }

    /// Number of registered players
    pub async fn count_players(&self, tournament_id: TournamentId) -> TournamentResult<usize> {
        self.store.count_players(tournament_id).await
    }

    /// Remove all match records and start the round count over
    pub async fn delete_matches(
        &self,
        tournament_id: TournamentId,
        round: &mut RoundState,
    ) -> TournamentResult<()> {
        self.store.delete_matches(tournament_id).await?;
        round.reset();
        log::info!("Cleared matches for tournament {tournament_id}");
        Ok(())
    }

    /// Remove all player registrations
    pub async fn delete_players(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        self.store.delete_players(tournament_id).await?;
        log::info!("Cleared players for tournament {tournament_id}");
        Ok(())
    }

    /// Ranked standings, leader first
    pub async fn player_standings(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<StandingRow>> {
        self.store.standings(tournament_id).await
    }

    /// Full match history in recording order
    pub async fn match_history(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<MatchResult>> {
        self.store.match_history(tournament_id).await
    }

    /// Record the outcome of a single match in the current round.
    ///
    /// Either side may be the bye; see [`scoring::encode`] for how that is stored.
    pub async fn report_match(
        &self,
        tournament_id: TournamentId,
        round: &RoundState,
        winner: PlayerId,
        loser: PlayerId,
        tie: bool,
    ) -> TournamentResult<MatchResult> {
        let result = scoring::encode(winner, loser, tie, round)?;

        let registered: HashSet<PlayerId> = self
            .store
            .standings(tournament_id)
            .await?
            .into_iter()
            .map(|row| row.player_id)
            .collect();
        for id in [result.player1, result.player2] {
            if id != BYE_ID && !registered.contains(&id) {
                return Err(TournamentError::UnknownPlayer(id));
            }
        }

        self.store.record_match(tournament_id, &result).await?;
        log::debug!(
            "Recorded round {} result in tournament {}: {} ({}) vs {} ({})",
            result.round,
            tournament_id,
            result.player1,
            result.score1,
            result.player2,
            result.score2
        );
        Ok(result)
    }

    /// Pair the next round and advance `round`.
    ///
    /// `forced_bye` hands the bye to a specific player in an odd field.
    /// `round` is only advanced when pairing succeeds.
    pub async fn swiss_pairings(
        &self,
        tournament_id: TournamentId,
        round: &mut RoundState,
        forced_bye: Option<PlayerId>,
    ) -> TournamentResult<Vec<Pairing>> {
        let standings = self.store.standings(tournament_id).await?;
        let eligible = if standings.len() % 2 == 1 {
            self.store.players_with_no_bye(tournament_id).await?
        } else {
            Vec::new()
        };

        let outcome = pairing::pair(&standings, &eligible, forced_bye, *round)?;
        *round = outcome.round;
        Ok(outcome.pairings)
    }
}
