use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use super::rule::{MatchResult, Prediction, Score};

/// Round identifier, e.g. 24 for the group stage or 16 for the round of 16.
pub type RoundId = u32;

/// Player -> points. One per round, plus one cumulative standing.
pub type Standing = BTreeMap<String, u32>;

/// One player's tipps for a round: match key -> prediction.
pub type PlayerTipps = BTreeMap<String, Prediction>;

/// All tipps for a round: player -> match key -> prediction.
pub type TippsTable = BTreeMap<String, PlayerTipps>;

/// Official fixtures of a round: match key -> fixture.
pub type ResultsTable = BTreeMap<String, Fixture>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub kickoff: NaiveDateTime,
    pub result: MatchResult,
}

impl Fixture {
    pub fn new(kickoff: NaiveDateTime, result: MatchResult) -> Self {
        Self { kickoff, result }
    }

    pub fn unplayed(kickoff: NaiveDateTime) -> Self {
        Self::new(kickoff, MatchResult::NotPlayed)
    }

    /// Record the final score. A result can be recorded at most once.
    pub fn record(&mut self, score: Score) -> Result<()> {
        if let MatchResult::Played(existing) = self.result {
            bail!("Result already recorded ({}), refusing to overwrite with {}", existing, score)
        }
        self.result = MatchResult::Played(score);
        Ok(())
    }
}

/// Everything the engine needs for one round.
#[derive(Debug, Clone, Default)]
pub struct RoundData {
    pub id: RoundId,
    pub tipps: TippsTable,
    pub results: ResultsTable,
}

impl RoundData {
    pub fn new(id: RoundId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Number of matches with a known result
    pub fn played_count(&self) -> usize {
        self.results.values().filter(|f| f.result.is_played()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn kickoff() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 14)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_record_result_once() {
        let mut fixture = Fixture::unplayed(kickoff());
        fixture.record(Score::new(5, 1)).unwrap();
        assert_eq!(fixture.result, MatchResult::Played(Score::new(5, 1)));
    }

    #[test]
    fn test_record_result_twice_fails() {
        let mut fixture = Fixture::unplayed(kickoff());
        fixture.record(Score::new(5, 1)).unwrap();
        let err = fixture.record(Score::new(1, 1)).unwrap_err();
        assert!(err.to_string().contains("already recorded"));
        assert_eq!(fixture.result, MatchResult::Played(Score::new(5, 1)));
    }

    #[test]
    fn test_played_count() {
        let mut round = RoundData::new(24);
        round.results.insert(
            "GER-SCO".to_string(),
            Fixture::new(kickoff(), MatchResult::Played(Score::new(5, 1))),
        );
        round
            .results
            .insert("HUN-SUI".to_string(), Fixture::unplayed(kickoff()));
        assert_eq!(round.played_count(), 1);
    }
}
