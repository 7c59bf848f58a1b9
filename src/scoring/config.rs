use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::types::RoundId;

/// One tournament round and its point multiplier.
///
/// Example YAML:
/// ```yaml
/// rounds:
///   - { id: 24, weight: 1, name: "Group stage" }
///   - { id: 16, weight: 2, name: "Round of 16" }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RoundConfig {
    /// Round identifier; also the name of the round's tipps directory and results file
    pub id: RoundId,

    /// Multiplier applied to the round's summed match points (must be >= 1)
    pub weight: u32,

    /// Display name (defaults to "Round <id>")
    #[serde(default)]
    pub name: Option<String>,
}

impl RoundConfig {
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Round {}", self.id))
    }
}

/// Largest accepted round weight. Keeps weighted totals far from `u32::MAX`.
pub const MAX_ROUND_WEIGHT: u32 = 1000;

/// Default round table for a 24-team European championship.
pub fn default_rounds() -> Vec<RoundConfig> {
    [
        (24, 1, "Group stage"),
        (16, 2, "Round of 16"),
        (8, 3, "Quarter-finals"),
        (4, 4, "Semi-finals"),
        (2, 5, "Final"),
    ]
    .into_iter()
    .map(|(id, weight, name)| RoundConfig {
        id,
        weight,
        name: Some(name.to_string()),
    })
    .collect()
}

/// Round id -> weight lookup passed into the aggregators.
///
/// Looking up a round that is not configured is an error; there is no
/// fallback weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundWeights {
    weights: BTreeMap<RoundId, u32>,
}

impl RoundWeights {
    pub fn new(weights: impl IntoIterator<Item = (RoundId, u32)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    pub fn from_rounds(rounds: &[RoundConfig]) -> Self {
        Self::new(rounds.iter().map(|r| (r.id, r.weight)))
    }

    pub fn weight(&self, round: RoundId) -> Result<u32, MissingRoundWeight> {
        self.weights
            .get(&round)
            .copied()
            .ok_or(MissingRoundWeight(round))
    }
}

/// A round was scored that has no entry in the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingRoundWeight(pub RoundId);

impl fmt::Display for MissingRoundWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No weight configured for round {}", self.0)
    }
}

impl std::error::Error for MissingRoundWeight {}

impl Default for RoundWeights {
    fn default() -> Self {
        Self::from_rounds(&default_rounds())
    }
}
