//! Next-game NBA player stat forecasting
//!
//! Turns a player's full chronological game log into a supervised-learning
//! dataset, trains a regression model on it, and derives a bounded
//! prediction with a confidence estimate.

pub mod data;
pub mod features;
pub mod predict;
pub mod training;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// A predictable box-score stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Pts,
    Reb,
    Ast,
    Stl,
    Blk,
    Fg3m,
    Ftm,
    FgPct,
    Fg3Pct,
    FtPct,
}

impl Stat {
    /// Canonical column code as used by the stats provider
    pub fn code(&self) -> &'static str {
        match self {
            Stat::Pts => "PTS",
            Stat::Reb => "REB",
            Stat::Ast => "AST",
            Stat::Stl => "STL",
            Stat::Blk => "BLK",
            Stat::Fg3m => "FG3M",
            Stat::Ftm => "FTM",
            Stat::FgPct => "FG_PCT",
            Stat::Fg3Pct => "FG3_PCT",
            Stat::FtPct => "FT_PCT",
        }
    }

    /// Human-readable name for output
    pub fn readable(&self) -> &'static str {
        match self {
            Stat::Pts => "points",
            Stat::Reb => "rebounds",
            Stat::Ast => "assists",
            Stat::Stl => "steals",
            Stat::Blk => "blocks",
            Stat::Fg3m => "3-point field goals made",
            Stat::Ftm => "free throws made",
            Stat::FgPct => "field goal %",
            Stat::Fg3Pct => "3-point %",
            Stat::FtPct => "free throw %",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One played game from a player's log, as returned by the stats provider.
///
/// Counting stats the provider leaves null (early-era games, 0-attempt
/// percentages) are `None`; points, rebounds, assists and minutes are
/// always present in provider data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Raw season code, e.g. "22023"
    pub season_id: String,
    pub team_id: i64,
    pub team_abbreviation: String,
    pub team_name: String,
    pub game_id: String,
    pub game_date: NaiveDate,
    /// Matchup string, e.g. "LAL vs. BOS" or "LAL @ BOS"
    pub matchup: String,
    pub won: Option<bool>,
    pub min: f64,
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub fgm: Option<f64>,
    pub fga: Option<f64>,
    pub fg_pct: Option<f64>,
    pub fg3m: Option<f64>,
    pub fg3a: Option<f64>,
    pub fg3_pct: Option<f64>,
    pub ftm: Option<f64>,
    pub fta: Option<f64>,
    pub ft_pct: Option<f64>,
    pub oreb: Option<f64>,
    pub dreb: Option<f64>,
    pub stl: Option<f64>,
    pub blk: Option<f64>,
    pub tov: Option<f64>,
    pub pf: Option<f64>,
    pub plus_minus: Option<f64>,
}

impl GameRecord {
    /// Value of a target stat for this game, if the provider reported it
    pub fn stat(&self, stat: Stat) -> Option<f64> {
        match stat {
            Stat::Pts => Some(self.pts),
            Stat::Reb => Some(self.reb),
            Stat::Ast => Some(self.ast),
            Stat::Stl => self.stl,
            Stat::Blk => self.blk,
            Stat::Fg3m => self.fg3m,
            Stat::Ftm => self.ftm,
            Stat::FgPct => self.fg_pct,
            Stat::Fg3Pct => self.fg3_pct,
            Stat::FtPct => self.ft_pct,
        }
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Player '{0}' not found")]
    PlayerNotFound(String),

    #[error("Ambiguous player name '{name}': possible matches {candidates:?}")]
    AmbiguousPlayerMatch {
        name: String,
        candidates: Vec<String>,
    },

    #[error("No game data found for {0}")]
    NoGameData(String),

    #[error("Could not merge opponent data for {0}")]
    OpponentMergeFailure(String),

    #[error("Stat '{0}' is not available for this player")]
    UnknownStat(String),

    #[error("Too few usable features: {available} available, need at least {required}")]
    InsufficientFeatures { available: usize, required: usize },

    #[error("Model training failed: {0}")]
    ModelTrainingFailure(String),

    #[error("Model returned an invalid prediction value")]
    InvalidPredictionValue,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reference data error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, PredictionError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Held-out fraction for the test partition
    pub test_fraction: f64,
    /// Seed driving the train/test shuffle
    pub seed: u64,
    /// Number of most recent games averaged into the next-game input
    pub recent_form_window: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub defensive_ratings_path: String,
    pub team_stats_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model: ModelConfig {
                test_fraction: 0.2,
                seed: 42,
                recent_form_window: 10,
            },
            data: DataConfig {
                defensive_ratings_path: "data/estimated_defensive_ratings_since_2003.csv"
                    .to_string(),
                team_stats_path: "data/nba_team_stats_since_2003.csv".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PredictionError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| PredictionError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PredictionError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
