use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use crate::config::Config;
use crate::history::{load_history, save_history};
use crate::scoring::{tournament_standings, RoundData, RoundWeights, Standing, TournamentStandings};

/// Read all published rounds and score them.
///
/// This is the whole batch behind the `standings`, `round` and `pending`
/// commands. Fails on unreadable input or on a round without a weight.
pub fn load_and_score(config: &Config, verbose: bool) -> Result<(Vec<RoundData>, TournamentStandings)> {
    let rounds = crate::input::load_rounds(config, verbose)?;

    if verbose {
        let played: usize = rounds.iter().map(RoundData::played_count).sum();
        let total: usize = rounds.iter().map(|r| r.results.len()).sum();
        eprintln!("Loaded {} rounds, {}/{} matches played", rounds.len(), played, total);
    }

    let weights = RoundWeights::from_rounds(&config.rounds);
    let standings = tournament_standings(&rounds, &weights)?;

    Ok((rounds, standings))
}

/// Append the overall standing to the history file if it changed.
/// Returns true if a snapshot was written.
pub fn record_history(path: &Path, overall: &Standing) -> Result<bool> {
    let mut history = load_history(path)?;
    if !history.record(overall, Utc::now()) {
        return Ok(false);
    }
    save_history(path, &history)?;
    Ok(true)
}
