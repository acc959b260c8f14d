//! Seeded round-by-round tournament simulation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use swiss_pairing::db::{StandingsStore, TournamentRepository};
use swiss_pairing::tournament::{
    BYE_ID, MatchResult, Pairing, RoundState, StandingRow, TournamentId, TournamentManager,
    TournamentResult,
};

use crate::config::SimConfig;
use crate::logging;

/// One simulated round
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub pairings: Vec<Pairing>,
    pub results: Vec<MatchResult>,
}

/// A finished simulation
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub tournament_id: TournamentId,
    pub rounds: Vec<RoundReport>,
    pub standings: Vec<StandingRow>,
}

/// Register players, then pair and play every round with random outcomes
pub async fn run<S>(
    manager: &TournamentManager<S>,
    config: &SimConfig,
) -> TournamentResult<SimulationReport>
where
    S: StandingsStore + TournamentRepository,
{
    let mut rng = StdRng::seed_from_u64(config.seed);
    let tournament = manager.create_tournament().await?;
    let mut round = RoundState::new();

    for i in 1..=config.players {
        manager
            .register_player(tournament.id, &format!("Player {i}"))
            .await?;
    }

    let mut rounds = Vec::with_capacity(config.rounds as usize);
    for _ in 0..config.rounds {
        let pairings = manager.swiss_pairings(tournament.id, &mut round, None).await?;

        let mut results = Vec::with_capacity(pairings.len());
        for pairing in &pairings {
            let (first, second) = pairing.ids();
            let result = if second == BYE_ID {
                manager
                    .report_match(tournament.id, &round, first, BYE_ID, false)
                    .await?
            } else if rng.random_bool(config.tie_rate) {
                manager
                    .report_match(tournament.id, &round, first, second, true)
                    .await?
            } else if rng.random_bool(0.5) {
                manager
                    .report_match(tournament.id, &round, first, second, false)
                    .await?
            } else {
                manager
                    .report_match(tournament.id, &round, second, first, false)
                    .await?
            };
            results.push(result);
        }

        let report = RoundReport {
            round: round.current(),
            pairings,
            results,
        };
        logging::log_round(&report);
        rounds.push(report);
    }

    let standings = manager.player_standings(tournament.id).await?;
    Ok(SimulationReport {
        tournament_id: tournament.id,
        rounds,
        standings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use swiss_pairing::db::MemoryStandingsStore;
    use swiss_pairing::tournament::TiebreakKind;

    fn config(players: usize, rounds: u32, seed: u64) -> SimConfig {
        SimConfig {
            players,
            rounds,
            seed,
            tie_rate: 0.2,
            tiebreak: TiebreakKind::Solkoff,
            database: None,
            json: false,
        }
    }

    fn manager() -> TournamentManager<MemoryStandingsStore> {
        TournamentManager::new(Arc::new(MemoryStandingsStore::new()))
    }

    #[tokio::test]
    async fn test_simulation_plays_every_round() {
        let report = run(&manager(), &config(8, 3, 1)).await.unwrap();
        assert_eq!(report.rounds.len(), 3);
        assert_eq!(report.standings.len(), 8);

        let rounds: Vec<u32> = report.rounds.iter().map(|r| r.round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);

        // Every round awards one point per table
        let total: f64 = report.standings.iter().map(|r| r.score).sum();
        assert_eq!(total, 12.0);
    }

    #[tokio::test]
    async fn test_odd_field_rotates_byes() {
        let report = run(&manager(), &config(5, 5, 9)).await.unwrap();
        let recipients: HashSet<_> = report
            .rounds
            .iter()
            .flat_map(|r| r.results.iter())
            .filter(|m| m.is_bye())
            .map(|m| m.player1)
            .collect();
        assert_eq!(recipients.len(), 5);
    }

    #[tokio::test]
    async fn test_same_seed_same_tournament() {
        let first = run(&manager(), &config(6, 3, 77)).await.unwrap();
        let second = run(&manager(), &config(6, 3, 77)).await.unwrap();
        assert_eq!(
            serde_json::to_value(&first.standings).unwrap(),
            serde_json::to_value(&second.standings).unwrap()
        );
    }
}
