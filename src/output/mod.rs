pub mod formatter;

pub use formatter::{
    format_history, format_pending, format_points, format_prediction, format_round_detail,
    format_round_standing, format_standings_table, format_time_until, format_tsv, rank_standing,
    should_use_colors, RankedEntry,
};
