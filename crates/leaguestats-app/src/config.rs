// Configuration loading and parsing (config/league.toml).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use leaguestats_core::model::{Season, Week};

/// Highest week number Sleeper serves matchups for.
pub const MAX_SUPPORTED_WEEK: Week = 18;

const LEAGUE_FILE: &str = "league.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("no config/league.toml and no defaults/league.toml to seed it from in {dir}")]
    NoLeagueConfig { dir: PathBuf },

    #[error("failed to seed {target} from {default}: {source}")]
    SeedError {
        default: PathBuf,
        target: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub fetch: FetchConfig,
    pub export: ExportConfig,
    /// Seasons to process, oldest first.
    pub seasons: Vec<SeasonSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSource {
    pub season: Season,
    pub league_id: String,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    api: ApiConfig,
    fetch: FetchConfig,
    export: ExportConfig,
    seasons: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub max_week: Week,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub output_dir: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to
/// `base_dir`.
///
/// This does not copy defaults; prefer `load_config()` which does.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = league_path(base_dir);
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let seasons = parse_seasons(&league_file.seasons)?;

    let config = Config {
        api: league_file.api,
        fetch: league_file.fetch,
        export: league_file.export,
        seasons,
    };

    validate(&config)?;

    Ok(config)
}

/// Write `config/league.toml` from `defaults/league.toml` when no league file
/// exists yet. Returns the written path, or `None` if the league file was
/// already there (it is never overwritten).
pub fn seed_league_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = league_path(base_dir);
    if target.exists() {
        return Ok(None);
    }

    let default = base_dir.join("defaults").join(LEAGUE_FILE);
    if !default.is_file() {
        return Err(ConfigError::NoLeagueConfig {
            dir: base_dir.to_path_buf(),
        });
    }

    let seed_err = |source: std::io::Error| ConfigError::SeedError {
        default: default.clone(),
        target: target.clone(),
        source,
    };
    if let Some(config_dir) = target.parent() {
        std::fs::create_dir_all(config_dir).map_err(seed_err)?;
    }
    std::fs::copy(&default, &target).map_err(seed_err)?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Seeds `config/league.toml` from the defaults before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    seed_league_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn league_path(base_dir: &Path) -> PathBuf {
    base_dir.join("config").join(LEAGUE_FILE)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// TOML table keys are strings; turn `"2024" = "<league id>"` pairs into
/// typed sources sorted by season.
fn parse_seasons(raw: &BTreeMap<String, String>) -> Result<Vec<SeasonSource>, ConfigError> {
    let mut seasons = raw
        .iter()
        .map(|(key, league_id)| {
            let season = key
                .trim()
                .parse::<Season>()
                .map_err(|_| ConfigError::ValidationError {
                    field: format!("seasons.{key}"),
                    message: "season key must be a year".into(),
                })?;
            Ok(SeasonSource {
                season,
                league_id: league_id.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;
    seasons.sort_by_key(|s| s.season);
    Ok(seasons)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    let max_week = config.fetch.max_week;
    if !(1..=MAX_SUPPORTED_WEEK).contains(&max_week) {
        return Err(ConfigError::ValidationError {
            field: "fetch.max_week".into(),
            message: format!("must be between 1 and {MAX_SUPPORTED_WEEK} inclusive, got {max_week}"),
        });
    }

    if config.export.output_dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "export.output_dir".into(),
            message: "must not be empty".into(),
        });
    }

    if config.seasons.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "seasons".into(),
            message: "at least one season is required".into(),
        });
    }

    for source in &config.seasons {
        if source.league_id.is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("seasons.{}", source.season),
                message: "league id must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
