pub mod results;
pub mod tipps;

pub use results::{load_round_results, parse_results, KICKOFF_FORMAT};
pub use tipps::{load_round_tipps, parse_tipps};

use anyhow::Result;

use crate::config::Config;
use crate::scoring::RoundData;

/// Read tipps and results for every configured round, in config order.
///
/// Rounds without a results file are not published yet and are left out.
pub fn load_rounds(config: &Config, verbose: bool) -> Result<Vec<RoundData>> {
    let mut rounds = Vec::new();

    for round_config in &config.rounds {
        let Some(results) = load_round_results(&config.results_dir, round_config.id)? else {
            if verbose {
                eprintln!("{}: no results file yet, skipping", round_config.display_name());
            }
            continue;
        };
        let tipps = load_round_tipps(&config.tipps_dir, round_config.id)?;

        if verbose {
            eprintln!(
                "{}: {} matches, {} players",
                round_config.display_name(),
                results.len(),
                tipps.len()
            );
        }

        rounds.push(RoundData {
            id: round_config.id,
            tipps,
            results,
        });
    }

    Ok(rounds)
}
