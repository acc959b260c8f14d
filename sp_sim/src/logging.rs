//! Logging setup and report output.

use log::{debug, info};
use swiss_pairing::tournament::{BYE_ID, StandingRow};

use crate::simulation::{RoundReport, SimulationReport};

/// Initialize logging
///
/// Log level is configurable via the RUST_LOG env var and defaults to `info`.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();
}

/// Log the pairings and outcomes of a finished round
pub fn log_round(report: &RoundReport) {
    info!(
        "Round {}: {} table(s) played",
        report.round,
        report.results.len()
    );
    for result in &report.results {
        if result.player2 == BYE_ID {
            debug!("  player {} had the bye", result.player1);
        } else {
            debug!(
                "  {} ({}) vs {} ({})",
                result.player1, result.score1, result.player2, result.score2
            );
        }
    }
}

/// Render standings as a fixed-width table, leader first
pub fn render_standings(standings: &[StandingRow]) -> String {
    let name_width = standings
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut out = format!(
        "{:>4}  {:<name_width$}  {:>6}  {:>8}  {:>7}\n",
        "Rank", "Player", "Score", "Tiebreak", "Matches"
    );
    for (rank, row) in standings.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>6.1}  {:>8.1}  {:>7}\n",
            rank + 1,
            row.name,
            row.score,
            row.tiebreak_score,
            row.matches_played
        ));
    }
    out
}

/// Print the final report to stdout
pub fn print_report(report: &SimulationReport, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_standings(&report.standings));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player_id: i64, name: &str, score: f64) -> StandingRow {
        StandingRow {
            player_id,
            name: name.to_string(),
            score,
            tiebreak_score: 1.5,
            matches_played: 2,
        }
    }

    #[test]
    fn test_render_standings() {
        let table = render_standings(&[row(2, "Twilight Sparkle", 2.0), row(1, "Ned", 0.5)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Tiebreak"));
        assert!(lines[1].starts_with("   1  Twilight Sparkle"));
        assert!(lines[1].contains("2.0"));
        assert!(lines[2].contains("Ned"));
        assert!(lines[2].contains("0.5"));
    }

    #[test]
    fn test_render_empty_standings() {
        assert_eq!(render_standings(&[]).lines().count(), 1);
    }

    #[test]
    fn test_log_round_does_not_panic() {
        log_round(&RoundReport {
            round: 1,
            pairings: Vec::new(),
            results: Vec::new(),
        });
    }
}
