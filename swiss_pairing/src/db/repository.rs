//! Repository trait definitions for testability and dependency injection.
//!
//! The pairing engine only ever talks to a [`StandingsStore`]; registration and
//! tournament lifecycle live behind [`TournamentRepository`]. Both have a
//! PostgreSQL implementation here and an in-memory one in [`super::memory`].

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::timeouts::{with_default_timeout, with_transaction_timeout};
use crate::tournament::bye::eligible_for_bye;
use crate::tournament::standings::{TiebreakKind, compute_standings};
use crate::tournament::{
    MatchResult, Player, PlayerId, StandingRow, Tournament, TournamentError, TournamentId,
    TournamentResult,
};

/// Trait for the standings and match history the pairing engine consumes
#[async_trait]
pub trait StandingsStore: Send + Sync {
    /// Ranked standings: score desc, tiebreak desc, player id asc
    async fn standings(&self, tournament_id: TournamentId) -> TournamentResult<Vec<StandingRow>>;

    /// Every recorded result in recording order
    async fn match_history(&self, tournament_id: TournamentId)
    -> TournamentResult<Vec<MatchResult>>;

    /// Append a result
    async fn record_match(
        &self,
        tournament_id: TournamentId,
        result: &MatchResult,
    ) -> TournamentResult<()>;

    /// Players who have not had a bye yet, weakest first
    async fn players_with_no_bye(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<PlayerId>> {
        let standings = self.standings(tournament_id).await?;
        let history = self.match_history(tournament_id).await?;
        Ok(eligible_for_bye(&standings, &history))
    }
}

/// Trait for tournament lifecycle and registration operations
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Create a new tournament
    async fn create_tournament(&self) -> TournamentResult<Tournament>;

    /// Find tournament by ID
    async fn tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament>;

    /// Create a player and register them in the tournament
    async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId>;

    /// Registered players in id order
    async fn players(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Player>>;

    /// Number of registered players
    async fn count_players(&self, tournament_id: TournamentId) -> TournamentResult<usize>;

    /// Remove every match recorded in the tournament
    async fn delete_matches(&self, tournament_id: TournamentId) -> TournamentResult<()>;

    /// Remove every registration in the tournament
    async fn delete_players(&self, tournament_id: TournamentId) -> TournamentResult<()>;
}

/// PostgreSQL implementation of both store traits
#[derive(Clone)]
pub struct PgStandingsStore {
    pool: PgPool,
    tiebreak: TiebreakKind,
}

impl PgStandingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            tiebreak: TiebreakKind::default(),
        }
    }

    /// Use a different tiebreak when building standings
    pub fn with_tiebreak(mut self, tiebreak: TiebreakKind) -> Self {
        self.tiebreak = tiebreak;
        self
    }
}

#[async_trait]
impl StandingsStore for PgStandingsStore {
    async fn standings(&self, tournament_id: TournamentId) -> TournamentResult<Vec<StandingRow>> {
        let players = self.players(tournament_id).await?;
        let history = self.match_history(tournament_id).await?;
        Ok(compute_standings(
            &players,
            &history,
            self.tiebreak.strategy(),
        ))
    }

    async fn match_history(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<MatchResult>> {
        let rows = with_default_timeout(
            sqlx::query(
                r#"
                SELECT round, player_1_id, player_2_id, player_1_score, player_2_score
                FROM matches
                WHERE tournament_id = $1
                ORDER BY id
                "#,
            )
            .bind(tournament_id)
            .fetch_all(&self.pool),
        )
        .await?;

        let history = rows
            .into_iter()
            .map(|row| MatchResult {
                round: row.get::<i32, _>("round") as u32,
                player1: row.get("player_1_id"),
                player2: row.get("player_2_id"),
                score1: row.get("player_1_score"),
                score2: row.get("player_2_score"),
            })
            .collect();

        Ok(history)
    }

    async fn record_match(
        &self,
        tournament_id: TournamentId,
        result: &MatchResult,
    ) -> TournamentResult<()> {
        with_default_timeout(
            sqlx::query(
                r#"
                INSERT INTO matches (tournament_id, round, player_1_id, player_2_id, player_1_score, player_2_score)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(tournament_id)
            .bind(result.round as i32)
            .bind(result.player1)
            .bind(result.player2)
            .bind(result.score1)
            .bind(result.score2)
            .execute(&self.pool),
        )
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TournamentRepository for PgStandingsStore {
    async fn create_tournament(&self) -> TournamentResult<Tournament> {
        let row = with_default_timeout(
            sqlx::query("INSERT INTO tournaments DEFAULT VALUES RETURNING id, created_at")
                .fetch_one(&self.pool),
        )
        .await?;

        Ok(Tournament {
            id: row.get("id"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        })
    }

    async fn tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        let row = with_default_timeout(
            sqlx::query("SELECT id, created_at FROM tournaments WHERE id = $1")
                .bind(tournament_id)
                .fetch_optional(&self.pool),
        )
        .await?
        .ok_or(TournamentError::NotFound(tournament_id))?;

        Ok(Tournament {
            id: row.get("id"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        })
    }

    async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId> {
        self.tournament(tournament_id).await?;

        let player_id = with_transaction_timeout(async {
            let mut tx = self.pool.begin().await?;

            let row = sqlx::query("INSERT INTO players (name) VALUES ($1) RETURNING id")
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;
            let player_id: PlayerId = row.get("id");

            sqlx::query(
                "INSERT INTO registered_players (tournament_id, player_id) VALUES ($1, $2)",
            )
            .bind(tournament_id)
            .bind(player_id)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok::<_, sqlx::Error>(player_id)
        })
        .await?;

        Ok(player_id)
    }

    async fn players(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Player>> {
        self.tournament(tournament_id).await?;

        let rows = with_default_timeout(
            sqlx::query(
                r#"
                SELECT p.id, p.name
                FROM players p
                JOIN registered_players rp ON rp.player_id = p.id
                WHERE rp.tournament_id = $1 AND p.id > 0
                ORDER BY p.id
                "#,
            )
            .bind(tournament_id)
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Player::new(row.get::<PlayerId, _>("id"), row.get::<String, _>("name")))
            .collect())
    }

    async fn count_players(&self, tournament_id: TournamentId) -> TournamentResult<usize> {
        let row = with_default_timeout(
            sqlx::query(
                "SELECT COUNT(player_id) AS count FROM registered_players WHERE tournament_id = $1",
            )
            .bind(tournament_id)
            .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.get::<i64, _>("count") as usize)
    }

    async fn delete_matches(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        with_default_timeout(
            sqlx::query("DELETE FROM matches WHERE tournament_id = $1")
                .bind(tournament_id)
                .execute(&self.pool),
        )
        .await?;

        Ok(())
    }

    async fn delete_players(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        with_transaction_timeout(async {
            let mut tx = self.pool.begin().await?;

            sqlx::query("DELETE FROM registered_players WHERE tournament_id = $1")
                .bind(tournament_id)
                .execute(&mut *tx)
                .await?;

            // Drop players no tournament refers to any more
            sqlx::query(
                r#"
                DELETE FROM players p
                WHERE p.id > 0
                  AND NOT EXISTS (SELECT 1 FROM registered_players rp WHERE rp.player_id = p.id)
                  AND NOT EXISTS (
                      SELECT 1 FROM matches m WHERE m.player_1_id = p.id OR m.player_2_id = p.id
                  )
                "#,
            )
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        })
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DatabaseConfig};
    use crate::tournament::BYE_ID;
    use crate::tournament::round::RoundState;
    use crate::tournament::scoring::encode;

    async fn connect() -> PgStandingsStore {
        let config = DatabaseConfig::from_env();
        let db = Database::new(&config)
            .await
            .expect("Failed to connect to database");
        db.ensure_schema().await.expect("Failed to apply schema");
        PgStandingsStore::new(db.pool().clone())
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_pg_register_and_standings() {
        let store = connect().await;
        let tournament = store.create_tournament().await.unwrap();

        let a = store.register_player(tournament.id, "Melpomene Murray").await.unwrap();
        let b = store.register_player(tournament.id, "Randy Schwartz").await.unwrap();
        assert_eq!(store.count_players(tournament.id).await.unwrap(), 2);

        let standings = store.standings(tournament.id).await.unwrap();
        assert_eq!(standings.len(), 2);
        assert!(standings.iter().all(|r| r.matches_played == 0 && r.score == 0.0));

        let result = encode(b, a, false, &RoundState::new()).unwrap();
        store.record_match(tournament.id, &result).await.unwrap();
        let standings = store.standings(tournament.id).await.unwrap();
        assert_eq!(standings[0].player_id, b);

        store.delete_matches(tournament.id).await.unwrap();
        store.delete_players(tournament.id).await.unwrap();
        assert_eq!(store.count_players(tournament.id).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_pg_bye_history() {
        let store = connect().await;
        let tournament = store.create_tournament().await.unwrap();
        let a = store.register_player(tournament.id, "Bob").await.unwrap();
        let b = store.register_player(tournament.id, "Joe").await.unwrap();

        let result = encode(BYE_ID, a, true, &RoundState::at(1)).unwrap();
        store.record_match(tournament.id, &result).await.unwrap();

        let no_bye = store.players_with_no_bye(tournament.id).await.unwrap();
        assert_eq!(no_bye, vec![b]);

        store.delete_matches(tournament.id).await.unwrap();
        store.delete_players(tournament.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL database at DATABASE_URL"]
    async fn test_pg_unknown_tournament() {
        let store = connect().await;
        assert!(matches!(
            store.tournament(i64::MAX).await,
            Err(TournamentError::NotFound(_))
        ));
    }
}
