mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/tippspiel/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("tippspiel"))
}

/// Get the default config file path (~/.config/tippspiel/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/tippspiel/config.yaml)
///
/// Relative `tipps_dir`, `results_dir` and `history_file` entries are resolved
/// against the directory containing the config file.
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Create ~/.config/tippspiel/config.yaml or pass --config",
            config_path.display()
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    let base = config_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(resolve_paths(config, base))
}

fn resolve_paths(mut config: Config, base: &Path) -> Config {
    config.tipps_dir = base.join(&config.tipps_dir);
    config.results_dir = base.join(&config.results_dir);
    config.history_file = config.history_file.map(|p| base.join(p));
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
tipps_dir: data/tipps
results_dir: data/results
history_file: history.json
rounds:
  - id: 24
    weight: 1
    name: "Group stage"
  - id: 16
    weight: 2
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.tipps_dir, PathBuf::from("data/tipps"));
        assert_eq!(config.history_file, Some(PathBuf::from("history.json")));
        assert_eq!(config.rounds.len(), 2);
        assert_eq!(config.rounds[1].weight, 2);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rounds.len(), 5);
        assert!(config.history_file.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("tips_dir: oops\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths_relative_to_config() {
        let config = Config {
            history_file: Some(PathBuf::from("history.json")),
            ..Config::default()
        };
        let resolved = resolve_paths(config, Path::new("/pool"));
        assert_eq!(resolved.tipps_dir, PathBuf::from("/pool/tipps"));
        assert_eq!(resolved.results_dir, PathBuf::from("/pool/results"));
        assert_eq!(resolved.history_file, Some(PathBuf::from("/pool/history.json")));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let config = Config {
            tipps_dir: PathBuf::from("/srv/tipps"),
            ..Config::default()
        };
        let resolved = resolve_paths(config, Path::new("/pool"));
        assert_eq!(resolved.tipps_dir, PathBuf::from("/srv/tipps"));
    }

    #[test]
    fn test_load_missing_config() {
        let path = env::temp_dir().join("tippspiel_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = env::temp_dir().join("tippspiel_test_load_config");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        fs::write(&path, "rounds:\n  - { id: 24, weight: 1 }\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.rounds.len(), 1);
        assert_eq!(config.tipps_dir, dir.join("tipps"));

        let _ = fs::remove_dir_all(&dir);
    }
}
