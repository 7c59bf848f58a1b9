use anyhow::{bail, Result};
use std::fmt;

/// Points for predicting the exact score.
pub const EXACT_POINTS: u32 = 3;
/// Points for predicting the right winner (or a draw) with a wrong score.
pub const OUTCOME_POINTS: u32 = 1;

/// A match score, predicted or real: (home goals, away goals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    pub fn outcome(&self) -> Outcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Parse "2-1" or "2 - 1". Both sides must be plain non-negative integers.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let Some((home, away)) = s.split_once('-') else {
            bail!("Score must look like 'H-A': {}", s)
        };
        Ok(Score::new(parse_goals(home, s)?, parse_goals(away, s)?))
    }
}

fn parse_goals(part: &str, whole: &str) -> Result<u32> {
    let part = part.trim();
    // u32::from_str accepts a leading '+', which is not a goal count
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        bail!("Invalid goal count '{}' in score: {}", part, whole)
    }
    Ok(part.parse()?)
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.home, self.away)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// One player's tipp for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Given(Score),
    /// Not submitted, or unparseable in the tipps file
    Missing,
}

impl From<Option<Score>> for Prediction {
    fn from(score: Option<Score>) -> Self {
        score.map_or(Prediction::Missing, Prediction::Given)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Given(score) => write!(f, "{}", score),
            Prediction::Missing => write!(f, "-"),
        }
    }
}

/// The real outcome of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Played(Score),
    NotPlayed,
}

impl MatchResult {
    pub fn is_played(&self) -> bool {
        matches!(self, MatchResult::Played(_))
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Played(score) => write!(f, "{}", score),
            MatchResult::NotPlayed => write!(f, "-:-"),
        }
    }
}

/// Points for a single tipp.
///
/// Returns `None` when the tipp cannot be scored yet (match not played) or at
/// all (no tipp). Callers aggregate `None` as 0 but may display it differently.
pub fn score(prediction: Prediction, result: MatchResult) -> Option<u32> {
    let (Prediction::Given(tipp), MatchResult::Played(real)) = (prediction, result) else {
        return None;
    };

    if tipp == real {
        Some(EXACT_POINTS)
    } else if tipp.outcome() == real.outcome() {
        Some(OUTCOME_POINTS)
    } else {
        Some(0)
    }
}
