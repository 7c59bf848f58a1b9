use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::buffered_eprintln;
use crate::scoring::{PlayerTipps, Prediction, RoundId, Score, TippsTable};

/// Parse one player's tipps file.
///
/// Format, one match per line: `<match key>: <home>-<away>`. Blank lines and
/// lines starting with `#` are skipped. A tipp that is empty or does not
/// parse becomes `Prediction::Missing`; the latter also emits a warning.
pub fn parse_tipps(content: &str, source: &str) -> PlayerTipps {
    let mut tipps = PlayerTipps::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, tipp)) = line.split_once(':') else {
            buffered_eprintln!("{}:{}: expected '<match>: <tipp>', skipping: {}", source, idx + 1, line);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            buffered_eprintln!("{}:{}: missing match name, skipping: {}", source, idx + 1, line);
            continue;
        }

        let tipp = tipp.trim();
        let prediction = if tipp.is_empty() {
            Prediction::Missing
        } else {
            match Score::parse(tipp) {
                Ok(score) => Prediction::Given(score),
                Err(e) => {
                    buffered_eprintln!("{}:{}: {} - counted as no tipp", source, idx + 1, e);
                    Prediction::Missing
                }
            }
        };

        if tipps.insert(key.to_string(), prediction).is_some() {
            buffered_eprintln!("{}:{}: '{}' tipped twice, using the later line", source, idx + 1, key);
        }
    }

    tipps
}

/// Load all tipps files of a round from `<tipps_dir>/<round>/*.txt`.
///
/// The player key is the file name without extension. A missing round
/// directory yields an empty table.
pub fn load_round_tipps(tipps_dir: &Path, round: RoundId) -> Result<TippsTable> {
    let round_dir = tipps_dir.join(round.to_string());
    let dir_pattern = glob::Pattern::escape(&round_dir.to_string_lossy());
    let pattern = format!("{}/*.txt", dir_pattern);

    let mut table = TippsTable::new();
    let paths = glob::glob(&pattern)
        .with_context(|| format!("Invalid tipps path pattern {}", pattern))?;

    for entry in paths {
        let path = entry.context("Failed to read tipps directory entry")?;
        let Some(player) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read tipps file at {}", path.display()))?;
        table.insert(player, parse_tipps(&content, &path.display().to_string()));
    }

    Ok(table)
}
