use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::scoring::Standing;

/// Append-only time series of overall standings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pub version: u32,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub overall: Standing,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a new empty history with version 1
    pub fn new() -> Self {
        Self {
            version: 1,
            snapshots: Vec::new(),
        }
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Append a snapshot unless the standing equals the latest one.
    /// Returns true if a snapshot was added.
    pub fn record(&mut self, overall: &Standing, taken_at: DateTime<Utc>) -> bool {
        if self.latest().is_some_and(|s| &s.overall == overall) {
            return false;
        }
        self.snapshots.push(Snapshot {
            taken_at,
            overall: overall.clone(),
        });
        true
    }

    /// Every player that appears in any snapshot, sorted by name
    pub fn players(&self) -> BTreeSet<&str> {
        self.snapshots
            .iter()
            .flat_map(|s| s.overall.keys().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn standing(entries: &[(&str, u32)]) -> Standing {
        entries.iter().map(|(p, n)| (p.to_string(), *n)).collect()
    }

    #[test]
    fn test_new_history_empty() {
        let history = History::new();
        assert_eq!(history.version, 1);
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_record_appends() {
        let mut history = History::new();
        let now = Utc::now();
        assert!(history.record(&standing(&[("anna", 3)]), now));
        assert!(history.record(&standing(&[("anna", 4)]), now + Duration::hours(1)));
        assert_eq!(history.snapshots.len(), 2);
        assert_eq!(history.latest().unwrap().overall["anna"], 4);
    }

    #[test]
    fn test_record_skips_unchanged() {
        let mut history = History::new();
        let now = Utc::now();
        assert!(history.record(&standing(&[("anna", 3)]), now));
        assert!(!history.record(&standing(&[("anna", 3)]), now + Duration::hours(1)));
        assert_eq!(history.snapshots.len(), 1);
        assert_eq!(history.latest().unwrap().taken_at, now);
    }

    #[test]
    fn test_players_union() {
        let mut history = History::new();
        let now = Utc::now();
        history.record(&standing(&[("ben", 1)]), now);
        history.record(&standing(&[("anna", 3), ("ben", 1)]), now);
        let players: Vec<_> = history.players().into_iter().collect();
        assert_eq!(players, vec!["anna", "ben"]);
    }
}
