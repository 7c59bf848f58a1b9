use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::Path;

use crate::scoring::{Fixture, MatchResult, ResultsTable, RoundId, Score};

/// Kickoff format used in results files, e.g. `2024-06-14 21:00`.
pub const KICKOFF_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a round's results file.
///
/// Format, one match per line: `<kickoff> | <match key> | <score>` where the
/// score is `H-A`, or `-`, `-:-` or empty for a match not played yet. Blank
/// lines and `#` comments are skipped.
///
/// A match may be listed a second time to fill in its result, but a result
/// is never overwritten. Unlike tipps, malformed lines are errors.
pub fn parse_results(content: &str, source: &str) -> Result<ResultsTable> {
    let mut results = ResultsTable::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let location = format!("{}:{}", source, idx + 1);

        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        let [kickoff, key, score] = parts.as_slice() else {
            bail!("{}: expected '<kickoff> | <match> | <score>', got: {}", location, line)
        };
        if key.is_empty() {
            bail!("{}: missing match name", location)
        }

        let kickoff = NaiveDateTime::parse_from_str(kickoff, KICKOFF_FORMAT)
            .with_context(|| format!("{}: invalid kickoff '{}'", location, kickoff))?;
        let result = parse_result(score).with_context(|| location.clone())?;

        match results.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(Fixture::new(kickoff, result));
            }
            Entry::Occupied(mut slot) => match result {
                MatchResult::Played(score) => slot
                    .get_mut()
                    .record(score)
                    .with_context(|| format!("{}: {}", location, key))?,
                MatchResult::NotPlayed => bail!("{}: duplicate fixture '{}'", location, key),
            },
        }
    }

    Ok(results)
}

fn parse_result(s: &str) -> Result<MatchResult> {
    match s {
        "" | "-" | "-:-" => Ok(MatchResult::NotPlayed),
        _ => Ok(MatchResult::Played(Score::parse(s)?)),
    }
}

/// Load `<results_dir>/<round>.txt`. Returns `None` when the round has no
/// results file yet.
pub fn load_round_results(results_dir: &Path, round: RoundId) -> Result<Option<ResultsTable>> {
    let path = results_dir.join(format!("{}.txt", round));
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read results file at {}", path.display()))?;
    parse_results(&content, &path.display().to_string()).map(Some)
}
