//! Stats provider client
//!
//! Fetches player directories and per-player game logs from the league
//! stats API. Responses come back as result sets: a header array plus
//! positional row arrays.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;

use crate::{GameRecord, PlayerId, PredictionError, Result};

const STATS_BASE_URL: &str = "https://stats.nba.com/stats";

/// One entry from the player directory
#[derive(Debug, Clone)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub full_name: String,
}

/// External source of player directories and game logs
pub trait StatsProvider {
    /// Full player directory, historical players included
    fn list_players(&self) -> Result<Vec<PlayerInfo>>;

    /// Every recorded game for a player, in no particular order.
    /// An empty result is a valid "no data" outcome.
    fn player_game_log(&self, player: PlayerId) -> Result<Vec<GameRecord>>;
}

/// HTTP client for the league stats API
pub struct NbaStatsClient {
    client: reqwest::blocking::Client,
}

impl Default for NbaStatsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NbaStatsClient {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent("hoopcast/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        NbaStatsClient { client }
    }

    /// GET a stats endpoint, retrying once on a transient failure
    fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}/{}", STATS_BASE_URL, path);
        let send = || -> std::result::Result<Value, reqwest::Error> {
            self.client
                .get(&url)
                .header("Referer", "https://stats.nba.com/")
                .query(params)
                .send()?
                .error_for_status()?
                .json()
        };

        match send() {
            Ok(value) => Ok(value),
            Err(first) if first.is_timeout() || first.is_connect() => {
                log::warn!("Transient fetch failure for {}, retrying once: {}", path, first);
                Ok(send()?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl StatsProvider for NbaStatsClient {
    fn list_players(&self) -> Result<Vec<PlayerInfo>> {
        let body = self.get_json(
            "commonallplayers",
            &[
                ("LeagueID", "00".to_string()),
                ("IsOnlyCurrentSeason", "0".to_string()),
            ],
        )?;
        let set = ResultSet::first(&body)?;

        let id_col = set.column("PERSON_ID")?;
        let name_col = set.column("DISPLAY_FIRST_LAST")?;

        let mut players = Vec::with_capacity(set.rows.len());
        for row in &set.rows {
            let id = as_i64(row.get(id_col))
                .ok_or_else(|| PredictionError::Parse("PERSON_ID is not numeric".to_string()))?;
            let name = as_str(row.get(name_col)).unwrap_or_default();
            if !name.is_empty() {
                players.push(PlayerInfo {
                    id: PlayerId(id),
                    full_name: name,
                });
            }
        }
        log::debug!("Fetched {} players from directory", players.len());
        Ok(players)
    }

    fn player_game_log(&self, player: PlayerId) -> Result<Vec<GameRecord>> {
        let body = self.get_json(
            "leaguegamefinder",
            &[
                ("PlayerOrTeam", "P".to_string()),
                ("PlayerIdNullable", player.0.to_string()),
                ("LeagueIDNullable", "00".to_string()),
            ],
        )?;
        let set = ResultSet::first(&body)?;

        let col = |name: &str| set.column(name);
        let season = col("SEASON_ID")?;
        let team_id = col("TEAM_ID")?;
        let team_abbr = col("TEAM_ABBREVIATION")?;
        let team_name = col("TEAM_NAME")?;
        let game_id = col("GAME_ID")?;
        let game_date = col("GAME_DATE")?;
        let matchup = col("MATCHUP")?;
        let wl = col("WL")?;
        let min = col("MIN")?;
        let pts = col("PTS")?;
        let reb = col("REB")?;
        let ast = col("AST")?;

        let mut games = Vec::with_capacity(set.rows.len());
        for row in &set.rows {
            let date_str = as_str(row.get(game_date))
                .ok_or_else(|| PredictionError::Parse("GAME_DATE missing".to_string()))?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|e| PredictionError::Parse(format!("Bad GAME_DATE '{}': {}", date_str, e)))?;

            let opt = |name: &str| -> Option<f64> {
                set.column(name).ok().and_then(|i| as_f64(row.get(i)))
            };

            games.push(GameRecord {
                season_id: as_str(row.get(season)).unwrap_or_default(),
                team_id: as_i64(row.get(team_id)).unwrap_or(0),
                team_abbreviation: as_str(row.get(team_abbr)).unwrap_or_default(),
                team_name: as_str(row.get(team_name)).unwrap_or_default(),
                game_id: as_str(row.get(game_id)).unwrap_or_default(),
                game_date: date,
                matchup: as_str(row.get(matchup)).unwrap_or_default(),
                won: as_str(row.get(wl)).map(|w| w == "W"),
                min: as_f64(row.get(min)).unwrap_or(0.0),
                pts: as_f64(row.get(pts)).unwrap_or(0.0),
                reb: as_f64(row.get(reb)).unwrap_or(0.0),
                ast: as_f64(row.get(ast)).unwrap_or(0.0),
                fgm: opt("FGM"),
                fga: opt("FGA"),
                fg_pct: opt("FG_PCT"),
                fg3m: opt("FG3M"),
                fg3a: opt("FG3A"),
                fg3_pct: opt("FG3_PCT"),
                ftm: opt("FTM"),
                fta: opt("FTA"),
                ft_pct: opt("FT_PCT"),
                oreb: opt("OREB"),
                dreb: opt("DREB"),
                stl: opt("STL"),
                blk: opt("BLK"),
                tov: opt("TOV"),
                pf: opt("PF"),
                plus_minus: opt("PLUS_MINUS"),
            });
        }
        log::debug!("Fetched {} games for {}", games.len(), player);
        Ok(games)
    }
}

/// Header/rowSet pair from a stats API response
struct ResultSet {
    headers: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl ResultSet {
    fn first(body: &Value) -> Result<Self> {
        let set = body
            .get("resultSets")
            .and_then(|s| s.get(0))
            .ok_or_else(|| PredictionError::Parse("Response has no result sets".to_string()))?;

        let headers = set
            .get("headers")
            .and_then(Value::as_array)
            .ok_or_else(|| PredictionError::Parse("Result set has no headers".to_string()))?
            .iter()
            .enumerate()
            .filter_map(|(i, h)| h.as_str().map(|s| (s.to_string(), i)))
            .collect();

        let rows = set
            .get("rowSet")
            .and_then(Value::as_array)
            .ok_or_else(|| PredictionError::Parse("Result set has no rows".to_string()))?
            .iter()
            .filter_map(|r| r.as_array().cloned())
            .collect();

        Ok(ResultSet { headers, rows })
    }

    fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .get(name)
            .copied()
            .ok_or_else(|| PredictionError::Parse(format!("Missing column '{}'", name)))
    }
}

fn as_str(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn as_f64(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

fn as_i64(value: Option<&Value>) -> Option<i64> {
    value.and_then(Value::as_i64)
}
