use std::collections::BTreeMap;

use super::rule::Prediction;
use super::types::{ResultsTable, TippsTable};

/// Match key -> player -> raw tipp, for matches still to be played.
pub type PendingTable = BTreeMap<String, BTreeMap<String, Prediction>>;

/// Collect the tipps for every match of a round that has no result yet.
///
/// Each unplayed match is listed even if nobody tipped it, and each player
/// of the round appears for it (`Prediction::Missing` when they skipped it).
/// Played matches never appear.
pub fn pending_matches(tipps: &TippsTable, results: &ResultsTable) -> PendingTable {
    results
        .iter()
        .filter(|(_, fixture)| !fixture.result.is_played())
        .map(|(key, _)| {
            let row = tipps
                .iter()
                .map(|(player, player_tipps)| {
                    let prediction = player_tipps.get(key).copied().unwrap_or(Prediction::Missing);
                    (player.clone(), prediction)
                })
                .collect();
            (key.clone(), row)
        })
        .collect()
}
