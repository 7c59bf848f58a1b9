use anyhow::{Context, Result};
use std::collections::BTreeMap;

use super::config::RoundWeights;
use super::rule::{score, Prediction};
use super::types::{PlayerTipps, ResultsTable, RoundData, RoundId, Standing, TippsTable};

/// Points one player earned for one match, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPoints {
    pub prediction: Prediction,
    /// `None` when the match is unplayed or the player gave no tipp
    pub points: Option<u32>,
}

/// Per-match breakdown of a round: match key -> player -> points.
pub type ScoreTable = BTreeMap<String, BTreeMap<String, MatchPoints>>;

/// Weighted points of one player for one round.
///
/// Only matches in `results` count; tipps for other match keys are ignored.
/// A match the player did not tipp scores nothing. Saturates instead of
/// overflowing for weights beyond what validation accepts.
pub fn round_points(tipps: &PlayerTipps, results: &ResultsTable, weight: u32) -> u32 {
    let raw: u32 = results
        .iter()
        .map(|(key, fixture)| {
            let prediction = tipps.get(key).copied().unwrap_or(Prediction::Missing);
            score(prediction, fixture.result).unwrap_or(0)
        })
        .sum();
    raw.saturating_mul(weight)
}

/// Standing for one round: every player in the round's tipps table gets an entry.
///
/// Fails if the round has no configured weight; no partial standing is returned.
pub fn round_standing(
    tipps: &TippsTable,
    results: &ResultsTable,
    round: RoundId,
    weights: &RoundWeights,
) -> Result<Standing> {
    let weight = weights.weight(round)?;
    Ok(tipps
        .iter()
        .map(|(player, player_tipps)| (player.clone(), round_points(player_tipps, results, weight)))
        .collect())
}

/// Sum per-round standings into a tournament standing.
///
/// A player missing from a round contributes 0 for it.
pub fn overall_standing(rounds: &[Standing]) -> Standing {
    let mut overall = Standing::new();
    for standing in rounds {
        for (player, points) in standing {
            let total = overall.entry(player.clone()).or_default();
            *total = total.saturating_add(*points);
        }
    }
    overall
}

/// Per-round standings (in input order) plus the overall standing.
#[derive(Debug, Clone)]
pub struct TournamentStandings {
    pub rounds: Vec<(RoundId, Standing)>,
    pub overall: Standing,
}

/// Score a whole tournament. Stops at the first round without a weight.
pub fn tournament_standings(rounds: &[RoundData], weights: &RoundWeights) -> Result<TournamentStandings> {
    let mut per_round = Vec::with_capacity(rounds.len());
    for round in rounds {
        let standing = round_standing(&round.tipps, &round.results, round.id, weights)
            .with_context(|| format!("Failed to score round {}", round.id))?;
        per_round.push((round.id, standing));
    }

    let standings: Vec<Standing> = per_round.iter().map(|(_, s)| s.clone()).collect();
    Ok(TournamentStandings {
        overall: overall_standing(&standings),
        rounds: per_round,
    })
}

/// Unweighted per-match breakdown of a round, for the round detail view.
pub fn score_table(tipps: &TippsTable, results: &ResultsTable) -> ScoreTable {
    results
        .iter()
        .map(|(key, fixture)| {
            let row = tipps
                .iter()
                .map(|(player, player_tipps)| {
                    let prediction = player_tipps.get(key).copied().unwrap_or(Prediction::Missing);
                    let points = score(prediction, fixture.result);
                    (player.clone(), MatchPoints { prediction, points })
                })
                .collect();
            (key.clone(), row)
        })
        .collect()
}
