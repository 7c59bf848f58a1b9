use std::collections::HashSet;

use super::config::{RoundConfig, MAX_ROUND_WEIGHT};

/// Validate the round table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rounds(rounds: &[RoundConfig]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if rounds.is_empty() {
        errors.push("rounds: at least one round must be configured".to_string());
    }

    let mut seen = HashSet::new();
    for (i, round) in rounds.iter().enumerate() {
        if round.weight < 1 {
            errors.push(format!(
                "rounds[{}].weight: must be at least 1 (round {})",
                i, round.id
            ));
        }
        if round.weight > MAX_ROUND_WEIGHT {
            errors.push(format!(
                "rounds[{}].weight: must be at most {} (round {})",
                i, MAX_ROUND_WEIGHT, round.id
            ));
        }
        if !seen.insert(round.id) {
            errors.push(format!("rounds[{}].id: duplicate round {}", i, round.id));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
