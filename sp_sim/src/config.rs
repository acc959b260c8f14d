//! Simulator configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use swiss_pairing::db::DatabaseConfig;
use swiss_pairing::tournament::TiebreakKind;

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Clone, Default)]
pub struct SimOverrides {
    pub players: Option<usize>,
    pub rounds: Option<u32>,
    pub seed: Option<u64>,
    pub tiebreak: Option<String>,
    pub database_url: Option<String>,
    pub json: bool,
}

/// Complete simulator configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of players to register
    pub players: usize,
    /// Number of rounds to pair and play
    pub rounds: u32,
    /// Seed for the outcome generator
    pub seed: u64,
    /// Probability that a match is drawn
    pub tie_rate: f64,
    /// Tiebreak used when ranking
    pub tiebreak: TiebreakKind,
    /// PostgreSQL store; the in-memory store is used when absent
    pub database: Option<DatabaseConfig>,
    /// Print the final report as JSON
    pub json: bool,
}

impl SimConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a value is present but unusable
    pub fn from_env(overrides: SimOverrides) -> Result<Self, ConfigError> {
        let players = overrides
            .players
            .unwrap_or_else(|| parse_env_or("SIM_PLAYERS", 8));

        // Enough rounds to separate a single winner by default
        let rounds = overrides
            .rounds
            .unwrap_or_else(|| parse_env_or("SIM_ROUNDS", default_rounds(players)));

        let seed = overrides.seed.unwrap_or_else(|| parse_env_or("SIM_SEED", 42));

        let tiebreak = match overrides
            .tiebreak
            .or_else(|| std::env::var("SIM_TIEBREAK").ok())
        {
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                var: "SIM_TIEBREAK".to_string(),
                reason,
            })?,
            None => TiebreakKind::default(),
        };

        let database = overrides
            .database_url
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .map(|database_url| DatabaseConfig {
                database_url,
                ..DatabaseConfig::from_env()
            });

        let config = SimConfig {
            players,
            rounds,
            seed,
            tie_rate: parse_env_or("SIM_TIE_RATE", 0.1),
            tiebreak,
            database,
            json: overrides.json,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 {
            return Err(ConfigError::Invalid {
                var: "SIM_PLAYERS".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if self.rounds == 0 {
            return Err(ConfigError::Invalid {
                var: "SIM_ROUNDS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.tie_rate) {
            return Err(ConfigError::Invalid {
                var: "SIM_TIE_RATE".to_string(),
                reason: format!("Must be between 0 and 1, got {}", self.tie_rate),
            });
        }

        Ok(())
    }
}

/// Rounds needed for a Swiss event to produce a single unbeaten player
pub fn default_rounds(players: usize) -> u32 {
    players.max(2).next_power_of_two().trailing_zeros()
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
