//! In-memory store for tests, simulations and single-process use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::repository::{StandingsStore, TournamentRepository};
use crate::tournament::standings::{TiebreakKind, compute_standings};
use crate::tournament::{
    MatchResult, Player, PlayerId, StandingRow, Tournament, TournamentError, TournamentId,
    TournamentResult,
};

#[derive(Debug, Default)]
struct TournamentData {
    tournament: Option<Tournament>,
    registered: Vec<PlayerId>,
    matches: Vec<MatchResult>,
}

#[derive(Debug)]
struct MemoryState {
    next_tournament_id: TournamentId,
    next_player_id: PlayerId,
    players: HashMap<PlayerId, Player>,
    tournaments: HashMap<TournamentId, TournamentData>,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            next_tournament_id: 1,
            next_player_id: 1,
            players: HashMap::new(),
            tournaments: HashMap::new(),
        }
    }
}

impl MemoryState {
    fn get(&self, tournament_id: TournamentId) -> TournamentResult<&TournamentData> {
        self.tournaments
            .get(&tournament_id)
            .ok_or(TournamentError::NotFound(tournament_id))
    }

    fn get_mut(&mut self, tournament_id: TournamentId) -> TournamentResult<&mut TournamentData> {
        self.tournaments
            .get_mut(&tournament_id)
            .ok_or(TournamentError::NotFound(tournament_id))
    }

    fn registered_players(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Player>> {
        let mut players: Vec<Player> = self
            .get(tournament_id)?
            .registered
            .iter()
            .filter_map(|id| self.players.get(id).cloned())
            .collect();
        players.sort_by_key(|p| p.id);
        Ok(players)
    }
}

/// Store keeping every tournament in process memory
#[derive(Clone, Default)]
pub struct MemoryStandingsStore {
    state: Arc<RwLock<MemoryState>>,
    tiebreak: TiebreakKind,
}

impl MemoryStandingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different tiebreak when building standings
    pub fn with_tiebreak(mut self, tiebreak: TiebreakKind) -> Self {
        self.tiebreak = tiebreak;
        self
    }
}

#[async_trait]
impl StandingsStore for MemoryStandingsStore {
    async fn standings(&self, tournament_id: TournamentId) -> TournamentResult<Vec<StandingRow>> {
        let state = self.state.read().await;
        let players = state.registered_players(tournament_id)?;
        let history = &state.get(tournament_id)?.matches;
        Ok(compute_standings(&players, history, self.tiebreak.strategy()))
    }

    async fn match_history(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<MatchResult>> {
        let state = self.state.read().await;
        Ok(state.get(tournament_id)?.matches.clone())
    }

    async fn record_match(
        &self,
        tournament_id: TournamentId,
        result: &MatchResult,
    ) -> TournamentResult<()> {
        let mut state = self.state.write().await;
        state.get_mut(tournament_id)?.matches.push(result.clone());
        Ok(())
    }
}

#[async_trait]
impl TournamentRepository for MemoryStandingsStore {
    async fn create_tournament(&self) -> TournamentResult<Tournament> {
        let mut state = self.state.write().await;
        let id = state.next_tournament_id;
        state.next_tournament_id += 1;

        let tournament = Tournament {
            id,
            created_at: Utc::now(),
        };
        state.tournaments.insert(
            id,
            TournamentData {
                tournament: Some(tournament.clone()),
                ..Default::default()
            },
        );
        Ok(tournament)
    }

    async fn tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        let state = self.state.read().await;
        state
            .get(tournament_id)?
            .tournament
            .clone()
            .ok_or(TournamentError::NotFound(tournament_id))
    }

    async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId> {
        let mut state = self.state.write().await;
        state.get(tournament_id)?;

        let player_id = state.next_player_id;
        state.next_player_id += 1;
        state.players.insert(player_id, Player::new(player_id, name));
        state.get_mut(tournament_id)?.registered.push(player_id);
        Ok(player_id)
    }

    async fn players(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Player>> {
        let state = self.state.read().await;
        state.registered_players(tournament_id)
    }

    async fn count_players(&self, tournament_id: TournamentId) -> TournamentResult<usize> {
        let state = self.state.read().await;
        Ok(state.get(tournament_id)?.registered.len())
    }

    async fn delete_matches(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        let mut state = self.state.write().await;
        state.get_mut(tournament_id)?.matches.clear();
        Ok(())
    }

    async fn delete_players(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        let mut state = self.state.write().await;
        let removed = std::mem::take(&mut state.get_mut(tournament_id)?.registered);

        let still_referenced = |state: &MemoryState, id: PlayerId| {
            state.tournaments.values().any(|t| {
                t.registered.contains(&id) || t.matches.iter().any(|m| m.involves(id))
            })
        };
        for id in removed {
            if !still_referenced(&*state, id) {
                state.players.remove(&id);
            }
        }
        Ok(())
    }
}
