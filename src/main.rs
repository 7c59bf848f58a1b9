use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use tippspiel::scoring::{
    pending_matches, round_standing, score_table, MissingRoundWeight, RoundId, RoundWeights,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Overall standings with per-round points (default if no subcommand)
    Standings,
    /// Standing and per-match points of one round
    Round {
        /// Round id as configured, e.g. 24 or 16
        id: RoundId,
    },
    /// Matches without a result and everyone's tipp for them
    Pending,
    /// Recorded standings over time
    History,
}

/// Commands that need the tipps and results scored first.
enum ScoredView {
    Standings,
    Round(RoundId),
    Pending,
}

#[derive(Parser, Debug)]
#[command(name = "tippspiel")]
#[command(about = "Football prediction pool scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/tippspiel/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Do not append the current standing to the history file
    #[arg(long, global = true)]
    no_history: bool,

    /// Print standings as tab-separated values
    #[arg(long, global = true)]
    tsv: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Standings);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match tippspiel::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate round table at startup
    if let Err(errors) = tippspiel::scoring::validate_rounds(&config.rounds) {
        eprintln!("Round config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!("Loaded {} rounds from config", config.rounds.len());
        for round in &config.rounds {
            eprintln!("  {} (id {}): x{}", round.display_name(), round.id, round.weight);
        }
    }

    let view = match command {
        Commands::History => std::process::exit(show_history(&config)),
        Commands::Standings => ScoredView::Standings,
        Commands::Round { id } => ScoredView::Round(id),
        Commands::Pending => ScoredView::Pending,
    };

    // Parser warnings are shown after the output
    tippspiel::warnings::activate();

    let (rounds, standings) = match tippspiel::pipeline::load_and_score(&config, cli.verbose) {
        Ok(scored) => scored,
        Err(e) => {
            print_warnings();
            eprintln!("Error: {:#}", e);
            // A round without weight is a configuration problem, not an input one
            let code = if e.chain().any(|c| c.is::<MissingRoundWeight>()) {
                EXIT_CONFIG
            } else {
                EXIT_INPUT
            };
            std::process::exit(code);
        }
    };

    let use_colors = !cli.tsv && tippspiel::output::should_use_colors();

    match view {
        ScoredView::Standings => {
            if cli.tsv {
                println!("{}", tippspiel::output::format_tsv(&standings.overall));
            } else {
                println!(
                    "{}",
                    tippspiel::output::format_standings_table(&standings, use_colors)
                );
            }

            if let (Some(path), false) = (&config.history_file, cli.no_history) {
                match tippspiel::pipeline::record_history(path, &standings.overall) {
                    Ok(true) if cli.verbose => eprintln!("Recorded standing in {}", path.display()),
                    Ok(_) => {}
                    Err(e) => eprintln!("Failed to record history: {:#}", e),
                }
            }
        }
        ScoredView::Round(id) => {
            let Some(round) = rounds.iter().find(|r| r.id == id) else {
                print_warnings();
                eprintln!("Round {} has no results file yet or is not configured.", id);
                std::process::exit(EXIT_INPUT);
            };

            let weights = RoundWeights::from_rounds(&config.rounds);
            let standing = match round_standing(&round.tipps, &round.results, id, &weights) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            if cli.tsv {
                println!("{}", tippspiel::output::format_tsv(&standing));
            } else {
                let table = score_table(&round.tipps, &round.results);
                println!(
                    "{}",
                    tippspiel::output::format_round_detail(&table, &round.results, use_colors)
                );
                println!();
                println!(
                    "{}",
                    tippspiel::output::format_round_standing(&standing, use_colors)
                );
            }
        }
        ScoredView::Pending => {
            let now = chrono::Local::now().naive_local();
            let mut any = false;
            for round in &rounds {
                let pending = pending_matches(&round.tipps, &round.results);
                if pending.is_empty() {
                    continue;
                }
                any = true;
                let name = config
                    .rounds
                    .iter()
                    .find(|r| r.id == round.id)
                    .map(|r| r.display_name())
                    .unwrap_or_else(|| format!("Round {}", round.id));
                println!("{}", name);
                println!(
                    "{}",
                    tippspiel::output::format_pending(&pending, &round.results, now, use_colors)
                );
                println!();
            }
            if !any {
                println!("No open matches.");
            }
        }
    }

    print_warnings();

    if cli.verbose {
        eprintln!();
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Print the recorded standings over time; returns the exit code.
fn show_history(config: &tippspiel::config::Config) -> i32 {
    let Some(path) = &config.history_file else {
        eprintln!("No history_file configured.");
        return EXIT_CONFIG;
    };
    match tippspiel::history::load_history(path) {
        Ok(history) => {
            let use_colors = tippspiel::output::should_use_colors();
            println!("{}", tippspiel::output::format_history(&history, use_colors));
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("History error: {:#}", e);
            EXIT_INPUT
        }
    }
}

fn print_warnings() {
    let warnings = tippspiel::warnings::drain();
    if warnings.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("Input warnings:");
    for warning in warnings {
        eprintln!("  {}", warning);
    }
}
