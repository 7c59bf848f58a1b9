pub mod config;
pub mod engine;
pub mod pending;
pub mod rule;
pub mod types;
pub mod validation;

pub use config::*;
pub use engine::{
    overall_standing, round_points, round_standing, score_table, tournament_standings,
    MatchPoints, ScoreTable, TournamentStandings,
};
pub use pending::{pending_matches, PendingTable};
pub use rule::{score, MatchResult, Outcome, Prediction, Score};
pub use types::*;
pub use validation::validate_rounds;
