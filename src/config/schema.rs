use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::{default_rounds, RoundConfig};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding one subdirectory per round with one `<player>.txt` each
    #[serde(default = "default_tipps_dir")]
    pub tipps_dir: PathBuf,

    /// Directory holding one `<round>.txt` results file per round
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Standings history; no history is kept when unset
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Rounds to score, in display order
    #[serde(default = "default_rounds")]
    pub rounds: Vec<RoundConfig>,
}

fn default_tipps_dir() -> PathBuf {
    PathBuf::from("tipps")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tipps_dir: default_tipps_dir(),
            results_dir: default_results_dir(),
            history_file: None,
            rounds: default_rounds(),
        }
    }
}
