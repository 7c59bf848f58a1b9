use std::io::IsTerminal;
use std::time::Duration;

use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::history::History;
use crate::input::KICKOFF_FORMAT;
use crate::scoring::{
    MatchResult, PendingTable, Prediction, ResultsTable, ScoreTable, Standing, TournamentStandings,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// One row of a ranked standing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub player: &'a str,
    pub points: u32,
}

/// Sort a standing by points descending, then by name.
/// Equal points share a rank and the next rank is skipped (1, 1, 3).
pub fn rank_standing(standing: &Standing) -> Vec<RankedEntry<'_>> {
    let mut sorted: Vec<(&str, u32)> = standing.iter().map(|(p, n)| (p.as_str(), *n)).collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut entries: Vec<RankedEntry> = Vec::with_capacity(sorted.len());
    for (idx, (player, points)) in sorted.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.points == points => prev.rank,
            _ => idx + 1,
        };
        entries.push(RankedEntry { rank, player, points });
    }
    entries
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Width of the player column: longest name, capped so the row fits the terminal
fn player_column_width<'a>(names: impl Iterator<Item = &'a str>, fixed_width: usize) -> usize {
    let longest = names.map(|n| n.chars().count()).max().unwrap_or(0).max(6);
    match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    }
}

/// Overall standings with one column per round and a total.
///
/// Index column: 3 chars (fits "99."), right-aligned. Round and total
/// columns are right-aligned, 6 chars wide.
pub fn format_standings_table(standings: &TournamentStandings, use_colors: bool) -> String {
    if standings.overall.is_empty() {
        return "No standings yet.".to_string();
    }

    let column_width = 6;
    let fixed_width = 4 + (standings.rounds.len() + 1) * (column_width + 2);
    let name_width = player_column_width(standings.overall.keys().map(String::as_str), fixed_width);

    let mut header = format!("{:>3} {:<width$}", "#", "Player", width = name_width);
    for (round, _) in &standings.rounds {
        header.push_str(&format!("  {:>w$}", format!("R{}", round), w = column_width));
    }
    header.push_str(&format!("  {:>w$}", "Total", w = column_width));

    let rows = rank_standing(&standings.overall).into_iter().map(|entry| {
        let rank = format!("{:>2}.", entry.rank);
        let name = format!("{:<width$}", truncate_name(entry.player, name_width), width = name_width);

        let mut rounds = String::new();
        for (_, standing) in &standings.rounds {
            let cell = standing
                .get(entry.player)
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());
            rounds.push_str(&format!("  {:>w$}", cell, w = column_width));
        }
        let total = format!("  {:>w$}", entry.points, w = column_width);

        if use_colors {
            format!("{} {}{}{}", rank.dimmed(), name, rounds, total.bold())
        } else {
            format!("{} {}{}{}", rank, name, rounds, total)
        }
    });

    let header = if use_colors {
        header.underline().to_string()
    } else {
        header
    };

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ranked single-round standing, no headers
pub fn format_round_standing(standing: &Standing, use_colors: bool) -> String {
    if standing.is_empty() {
        return "No tipps for this round.".to_string();
    }

    let name_width = player_column_width(standing.keys().map(String::as_str), 4 + 8);
    rank_standing(standing)
        .into_iter()
        .map(|entry| {
            let rank = format!("{:>2}.", entry.rank);
            let name = format!("{:<width$}", truncate_name(entry.player, name_width), width = name_width);
            let points = format!("{:>6}", entry.points);
            if use_colors {
                format!("{} {}  {}", rank.dimmed(), name, points.bold())
            } else {
                format!("{} {}  {}", rank, name, points)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tab-separated overall standing for scripting
/// Columns: rank, player, points (no headers, no colors)
pub fn format_tsv(standing: &Standing) -> String {
    rank_standing(standing)
        .into_iter()
        .map(|entry| format!("{}\t{}\t{}", entry.rank, entry.player, entry.points))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format points for one tipp: "3", "0", or "." when not applicable
pub fn format_points(points: Option<u32>) -> String {
    points.map_or_else(|| ".".to_string(), |n| n.to_string())
}

/// Per-match detail of a round: result, then every player's tipp and points.
///
/// ```text
/// GER-SCO   5 - 1   anna 5 - 1 (3)   ben 1 - 0 (1)
/// ```
pub fn format_round_detail(table: &ScoreTable, results: &ResultsTable, use_colors: bool) -> String {
    if table.is_empty() {
        return "No matches in this round.".to_string();
    }

    let key_width = table.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    table
        .iter()
        .map(|(key, row)| {
            let result = results
                .get(key)
                .map(|f| f.result)
                .unwrap_or(MatchResult::NotPlayed);

            let cells = row
                .iter()
                .map(|(player, cell)| {
                    let points = format!("({})", format_points(cell.points));
                    if use_colors {
                        let points = match cell.points {
                            Some(3) => points.green().to_string(),
                            Some(1) => points.yellow().to_string(),
                            _ => points.dimmed().to_string(),
                        };
                        format!("{} {} {}", player.cyan(), cell.prediction, points)
                    } else {
                        format!("{} {} {}", player, cell.prediction, points)
                    }
                })
                .collect::<Vec<_>>()
                .join("   ");

            let key = format!("{:<width$}", key, width = key_width);
            let result = format!("{:>7}", result.to_string());
            if use_colors {
                format!("{}  {}   {}", key.bold(), result, cells)
            } else {
                format!("{}  {}   {}", key, result, cells)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable time until kickoff: "in 2h 30m", or "started" once past
pub fn format_time_until(kickoff: NaiveDateTime, now: NaiveDateTime) -> String {
    let delta = kickoff - now;
    if delta.num_minutes() < 1 {
        return "started".to_string();
    }
    // Minute precision is enough for a kickoff countdown
    let minutes = delta.num_minutes() as u64;
    format!("in {}", humantime::format_duration(Duration::from_secs(minutes * 60)))
}

/// Format a raw tipp the way it is shown in the pending table
pub fn format_prediction(prediction: &Prediction, use_colors: bool) -> String {
    match prediction {
        Prediction::Given(_) => prediction.to_string(),
        Prediction::Missing if use_colors => prediction.to_string().red().to_string(),
        Prediction::Missing => prediction.to_string(),
    }
}

/// Upcoming matches with everyone's tipp, ordered by kickoff.
pub fn format_pending(
    pending: &PendingTable,
    results: &ResultsTable,
    now: NaiveDateTime,
    use_colors: bool,
) -> String {
    if pending.is_empty() {
        return "No open matches.".to_string();
    }

    let mut rows: Vec<(Option<NaiveDateTime>, &String, _)> = pending
        .iter()
        .map(|(key, row)| (results.get(key).map(|f| f.kickoff), key, row))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    let key_width = pending.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    rows.into_iter()
        .map(|(kickoff, key, row)| {
            let when = match kickoff {
                Some(k) => format!("{} ({})", k.format(KICKOFF_FORMAT), format_time_until(k, now)),
                None => "unscheduled".to_string(),
            };
            let tipps = row
                .iter()
                .map(|(player, prediction)| {
                    format!("{} {}", player, format_prediction(prediction, use_colors))
                })
                .collect::<Vec<_>>()
                .join("   ");
            let key = format!("{:<width$}", key, width = key_width);

            if use_colors {
                format!("{}  {}   {}", when.dimmed(), key.bold(), tipps)
            } else {
                format!("{}  {}   {}", when, key, tipps)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per snapshot with every player's total at that time
pub fn format_history(history: &History, use_colors: bool) -> String {
    if history.snapshots.is_empty() {
        return "No history recorded yet.".to_string();
    }

    let players = history.players();
    let widths: Vec<usize> = players.iter().map(|p| p.chars().count().max(4)).collect();

    let mut header = format!("{:<16}", "Taken at");
    for (player, width) in players.iter().zip(&widths) {
        header.push_str(&format!("  {:>w$}", player, w = *width));
    }
    let header = if use_colors {
        header.underline().to_string()
    } else {
        header
    };

    let rows = history.snapshots.iter().map(|snapshot| {
        let mut line = snapshot.taken_at.format("%Y-%m-%d %H:%M").to_string();
        for (player, width) in players.iter().zip(&widths) {
            let cell = snapshot
                .overall
                .get(*player)
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());
            line.push_str(&format!("  {:>w$}", cell, w = *width));
        }
        line
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{pending_matches, score_table, Fixture, PlayerTipps, Score, TippsTable};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn standing(entries: &[(&str, u32)]) -> Standing {
        entries.iter().map(|(p, n)| (p.to_string(), *n)).collect()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn sample_round() -> (TippsTable, ResultsTable) {
        let mut results = ResultsTable::new();
        results.insert(
            "GER-SCO".to_string(),
            Fixture::new(at(14, 21, 0), MatchResult::Played(Score::new(5, 1))),
        );
        results.insert("SCO-SUI".to_string(), Fixture::unplayed(at(19, 21, 0)));
        results.insert("HUN-GER".to_string(), Fixture::unplayed(at(19, 18, 0)));

        let mut anna = PlayerTipps::new();
        anna.insert("GER-SCO".to_string(), Prediction::Given(Score::new(5, 1)));
        anna.insert("SCO-SUI".to_string(), Prediction::Given(Score::new(1, 2)));
        let mut ben = PlayerTipps::new();
        ben.insert("GER-SCO".to_string(), Prediction::Given(Score::new(1, 0)));

        let mut tipps = TippsTable::new();
        tipps.insert("anna".to_string(), anna);
        tipps.insert("ben".to_string(), ben);
        (tipps, results)
    }

    #[test]
    fn test_rank_standing_orders_and_ties() {
        let s = standing(&[("carl", 4), ("anna", 7), ("ben", 7), ("dora", 1)]);
        let ranked = rank_standing(&s);
        let summary: Vec<_> = ranked.iter().map(|e| (e.rank, e.player, e.points)).collect();
        assert_eq!(
            summary,
            vec![(1, "anna", 7), (1, "ben", 7), (3, "carl", 4), (4, "dora", 1)]
        );
    }

    #[test]
    fn test_rank_standing_empty() {
        assert!(rank_standing(&Standing::new()).is_empty());
    }

    #[test]
    fn test_format_standings_table() {
        let standings = TournamentStandings {
            rounds: vec![
                (24, standing(&[("A", 4)])),
                (16, standing(&[("A", 1), ("B", 2)])),
            ],
            overall: standing(&[("A", 5), ("B", 2)]),
        };
        let result = format_standings_table(&standings, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("R24"));
        assert!(lines[0].contains("R16"));
        assert!(lines[0].contains("Total"));
        assert!(lines[1].starts_with(" 1. A"));
        assert!(lines[1].trim_end().ends_with('5'));
        assert!(lines[2].starts_with(" 2. B"));
        // B did not take part in round 24
        assert!(lines[2].contains('-'));
    }

    #[test]
    fn test_format_standings_table_empty() {
        let standings = TournamentStandings {
            rounds: vec![],
            overall: Standing::new(),
        };
        assert_eq!(format_standings_table(&standings, false), "No standings yet.");
    }

    #[test]
    fn test_format_round_standing() {
        let result = format_round_standing(&standing(&[("anna", 6), ("ben", 9)]), false);
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[0].starts_with(" 1. ben"));
        assert!(lines[1].starts_with(" 2. anna"));
    }

    #[test]
    fn test_format_tsv() {
        let result = format_tsv(&standing(&[("anna", 5), ("ben", 2)]));
        assert_eq!(result, "1\tanna\t5\n2\tben\t2");
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(Some(3)), "3");
        assert_eq!(format_points(Some(0)), "0");
        assert_eq!(format_points(None), ".");
    }

    #[test]
    fn test_format_round_detail() {
        let (tipps, results) = sample_round();
        let table = score_table(&tipps, &results);
        let result = format_round_detail(&table, &results, false);

        let ger = result.lines().find(|l| l.starts_with("GER-SCO")).unwrap();
        assert!(ger.contains("5 - 1"));
        assert!(ger.contains("anna 5 - 1 (3)"));
        assert!(ger.contains("ben 1 - 0 (1)"));

        let sco = result.lines().find(|l| l.starts_with("SCO-SUI")).unwrap();
        assert!(sco.contains("-:-"));
        assert!(sco.contains("anna 1 - 2 (.)"));
        assert!(sco.contains("ben - (.)"));
    }

    #[test]
    fn test_format_time_until() {
        assert_eq!(format_time_until(at(19, 21, 0), at(19, 18, 30)), "in 2h 30m");
        assert_eq!(format_time_until(at(20, 18, 0), at(19, 18, 0)), "in 1day");
        assert_eq!(format_time_until(at(19, 18, 0), at(19, 18, 0)), "started");
        assert_eq!(format_time_until(at(19, 18, 0), at(19, 20, 0)), "started");
    }

    #[test]
    fn test_format_pending_sorted_by_kickoff() {
        let (tipps, results) = sample_round();
        let pending = pending_matches(&tipps, &results);
        let result = format_pending(&pending, &results, at(19, 12, 0), false);

        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2024-06-19 18:00 (in 6h)"));
        assert!(lines[0].contains("HUN-GER"));
        assert!(lines[1].contains("SCO-SUI"));
        assert!(lines[1].contains("anna 1 - 2"));
        assert!(lines[1].contains("ben -"));
        assert!(!result.contains("GER-SCO"));
    }

    #[test]
    fn test_format_pending_empty() {
        let pending = PendingTable::new();
        let result = format_pending(&pending, &ResultsTable::new(), at(19, 12, 0), false);
        assert_eq!(result, "No open matches.");
    }

    #[test]
    fn test_format_history() {
        let mut history = History::new();
        let first = Utc.with_ymd_and_hms(2024, 6, 20, 10, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 6, 21, 10, 0, 0).unwrap();
        history.record(&standing(&[("anna", 3)]), first);
        history.record(&standing(&[("anna", 5), ("ben", 2)]), second);

        let result = format_history(&history, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("anna"));
        assert!(lines[0].contains("ben"));
        assert!(lines[1].starts_with("2024-06-20 10:00"));
        assert!(lines[1].trim_end().ends_with('-'));
        assert!(lines[2].trim_end().ends_with('2'));
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(format_history(&History::new(), false), "No history recorded yet.");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("anna", 10), "anna");
        assert_eq!(truncate_name("maximiliane", 8), "maxim...");
        assert_eq!(truncate_name("maximiliane", 3), "max");
    }
}
