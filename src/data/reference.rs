//! Season-keyed opponent reference tables
//!
//! Defensive ratings and team aggregate stats, addressable by
//! (team full name, season id). Loaded once per request from CSV files
//! and never mutated.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::{DataConfig, Result};

/// Franchise renames folded into the current franchise name before any join
const FRANCHISE_ALIASES: &[(&str, &str)] = &[
    ("Charlotte Bobcats", "Charlotte Hornets"),
    ("Seattle SuperSonics", "Oklahoma City Thunder"),
    ("New Orleans/Oklahoma City Hornets", "New Orleans Pelicans"),
    ("New Jersey Nets", "Brooklyn Nets"),
    ("New Orleans Hornets", "New Orleans Pelicans"),
];

/// Name variants used only by the team aggregate table
const TEAM_STATS_ALIASES: &[(&str, &str)] = &[("Los Angeles Clippers", "LA Clippers")];

/// Season aggregate stats for one (team, season)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamSeasonStats {
    pub steals: f64,
    pub blocks: f64,
    pub win_pct: f64,
}

#[derive(Debug, Deserialize)]
struct DefRatingRow {
    #[serde(rename = "TEAM_NAME")]
    team_name: String,
    #[serde(rename = "SEASON")]
    season: String,
    #[serde(rename = "E_DEF_RATING")]
    def_rating: f64,
}

#[derive(Debug, Deserialize)]
struct TeamStatsRow {
    #[serde(rename = "TEAM_NAME")]
    team_name: String,
    #[serde(rename = "YEAR")]
    season: String,
    #[serde(rename = "STL")]
    steals: f64,
    #[serde(rename = "BLK")]
    blocks: f64,
    #[serde(rename = "WIN_PCT")]
    win_pct: f64,
}

/// Static reference data for opponent enrichment
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    def_ratings: HashMap<(String, String), f64>,
    /// Team names covered by the defensive-rating table; rows whose
    /// opponent is outside this set are discarded, never guessed
    known_teams: HashSet<String>,
    team_stats: HashMap<(String, String), TeamSeasonStats>,
}

impl ReferenceTables {
    /// Load both tables from the configured CSV files
    pub fn load(config: &DataConfig) -> Result<Self> {
        let mut def_reader = csv::Reader::from_path(&config.defensive_ratings_path)?;
        let mut def_rows = Vec::new();
        for row in def_reader.deserialize::<DefRatingRow>() {
            let row = row?;
            def_rows.push((canonical_name(&row.team_name), row.season, row.def_rating));
        }

        let mut stats_reader = csv::Reader::from_path(&config.team_stats_path)?;
        let mut stats_rows = Vec::new();
        for row in stats_reader.deserialize::<TeamStatsRow>() {
            let row = row?;
            stats_rows.push((
                row.team_name,
                row.season,
                TeamSeasonStats {
                    steals: row.steals,
                    blocks: row.blocks,
                    win_pct: row.win_pct,
                },
            ));
        }

        log::debug!(
            "Loaded {} defensive-rating rows, {} team-stat rows",
            def_rows.len(),
            stats_rows.len()
        );
        Ok(Self::from_rows(def_rows, stats_rows))
    }

    /// Build tables from in-memory rows (used by tests and the CSV loader)
    pub fn from_rows(
        def_ratings: impl IntoIterator<Item = (String, String, f64)>,
        team_stats: impl IntoIterator<Item = (String, String, TeamSeasonStats)>,
    ) -> Self {
        let mut ratings = HashMap::new();
        let mut known_teams = HashSet::new();
        for (team, season, rating) in def_ratings {
            known_teams.insert(team.clone());
            ratings.insert((team, season), rating);
        }
        let stats = team_stats
            .into_iter()
            .map(|(team, season, s)| ((team, season), s))
            .collect();
        ReferenceTables {
            def_ratings: ratings,
            known_teams,
            team_stats: stats,
        }
    }

    /// Whether a team name is covered by the defensive-rating table
    pub fn is_known_team(&self, team: &str) -> bool {
        self.known_teams.contains(team)
    }

    pub fn defensive_rating(&self, team: &str, season: &str) -> Option<f64> {
        self.def_ratings
            .get(&(team.to_string(), season.to_string()))
            .copied()
    }

    /// Team aggregate stats, keyed with the aggregate table's own name
    /// variants applied
    pub fn team_stats(&self, team: &str, season: &str) -> Option<TeamSeasonStats> {
        let key_name = TEAM_STATS_ALIASES
            .iter()
            .find(|(from, _)| *from == team)
            .map(|(_, to)| *to)
            .unwrap_or(team);
        self.team_stats
            .get(&(key_name.to_string(), season.to_string()))
            .copied()
    }
}

/// Fold a historical franchise name into its current name
pub fn canonical_name(team: &str) -> String {
    FRANCHISE_ALIASES
        .iter()
        .find(|(from, _)| *from == team)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| team.to_string())
}
