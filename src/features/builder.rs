//! Feature extraction over a player's raw game log
//!
//! Sorts games chronologically and derives the lag, rolling, schedule and
//! opponent columns the model trains on. The chronologically first game has
//! no lag-1 predecessor and is dropped; every derived column is causal.

use std::collections::HashMap;

use crate::GameRecord;

/// Rolling mean window: the current game plus up to two preceding ones
pub const ROLLING_WINDOW: usize = 3;

/// A game record extended with derived features.
///
/// The four opponent columns start out `None` and are filled by
/// [`enrich`](crate::features::enrich) against the reference tables.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    pub game: GameRecord,
    pub rolling_pts: f64,
    pub rolling_ast: f64,
    pub rolling_reb: f64,
    pub pts_lag1: f64,
    pub ast_lag1: f64,
    pub reb_lag1: f64,
    /// 1.0 for a home game, 0.0 for away
    pub home_game: f64,
    /// 1.0 when the previous retained game was exactly one day earlier
    pub back_to_back: f64,
    /// Opponent full name if the abbreviation resolved, otherwise the raw
    /// matchup token; `None` when the matchup string carries no indicator
    pub opponent: Option<String>,
    /// Normalized season identifier, e.g. "2023-24"
    pub season: String,
    pub opp_def_rating: Option<f64>,
    pub opp_team_stl: Option<f64>,
    pub opp_team_blk: Option<f64>,
    pub opp_team_win_pct: Option<f64>,
}

/// Build ordered feature rows from an unordered game log.
///
/// Returns an empty vector for an empty log or a single-game log (the
/// first game never has lag values and is dropped).
pub fn build_features(
    mut games: Vec<GameRecord>,
    abbreviations: &HashMap<String, String>,
) -> Vec<FeatureRow> {
    if games.is_empty() {
        return Vec::new();
    }

    // Stable sort: same-day games keep their original relative order
    games.sort_by(|a, b| a.game_date.cmp(&b.game_date));

    let mut rows: Vec<FeatureRow> = Vec::with_capacity(games.len().saturating_sub(1));

    for i in 1..games.len() {
        let prev = &games[i - 1];
        let game = games[i].clone();

        // Back-to-back is computed over retained rows: the first retained
        // row has no retained predecessor and is 0
        let back_to_back = match rows.last() {
            Some(last) => {
                let delta = (game.game_date - last.game.game_date).num_days();
                if delta == 1 {
                    1.0
                } else {
                    0.0
                }
            }
            None => 0.0,
        };

        let home_game = if game.matchup.contains("vs.") { 1.0 } else { 0.0 };
        let opponent = extract_opponent(&game.matchup)
            .map(|abbr| abbreviations.get(abbr).cloned().unwrap_or_else(|| abbr.to_string()));
        let season = normalize_season(&game.season_id);

        let mut row = FeatureRow {
            pts_lag1: prev.pts,
            ast_lag1: prev.ast,
            reb_lag1: prev.reb,
            rolling_pts: 0.0,
            rolling_ast: 0.0,
            rolling_reb: 0.0,
            home_game,
            back_to_back,
            opponent,
            season,
            opp_def_rating: None,
            opp_team_stl: None,
            opp_team_blk: None,
            opp_team_win_pct: None,
            game,
        };

        // Causal rolling mean over the retained rows, min one sample:
        // the first retained row's rolling mean is its own value
        let start = rows.len().saturating_sub(ROLLING_WINDOW - 1);
        let window = &rows[start..];
        let n = (window.len() + 1) as f64;
        row.rolling_pts = (window.iter().map(|r| r.game.pts).sum::<f64>() + row.game.pts) / n;
        row.rolling_ast = (window.iter().map(|r| r.game.ast).sum::<f64>() + row.game.ast) / n;
        row.rolling_reb = (window.iter().map(|r| r.game.reb).sum::<f64>() + row.game.reb) / n;

        rows.push(row);
    }

    rows
}

/// Parse the opponent abbreviation out of a matchup string
fn extract_opponent(matchup: &str) -> Option<&str> {
    if let Some(idx) = matchup.find("vs. ") {
        Some(matchup[idx + 4..].trim())
    } else if let Some(idx) = matchup.find("@ ") {
        Some(matchup[idx + 2..].trim())
    } else {
        None
    }
}

/// Normalize a raw season code to "YYYY-YY", e.g. "22023" -> "2023-24".
///
/// The trailing four characters encode the season start year. Codes that
/// do not parse are passed through unchanged; such rows fail the reference
/// join downstream.
fn normalize_season(raw: &str) -> String {
    let len = raw.len();
    if len < 4 {
        return raw.to_string();
    }
    match raw[len - 4..].parse::<i32>() {
        Ok(year) => format!("{}-{:02}", year, (year + 1) % 100),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_game(date: NaiveDate, matchup: &str, pts: f64, ast: f64, reb: f64) -> GameRecord {
        GameRecord {
            season_id: "22023".to_string(),
            team_id: 1,
            team_abbreviation: "LAL".to_string(),
            team_name: "Los Angeles Lakers".to_string(),
            game_id: format!("00{}", date),
            game_date: date,
            matchup: matchup.to_string(),
            won: Some(true),
            min: 34.0,
            pts,
            reb,
            ast,
            fgm: Some(8.0),
            fga: Some(16.0),
            fg_pct: Some(0.5),
            fg3m: Some(2.0),
            fg3a: Some(6.0),
            fg3_pct: Some(0.333),
            ftm: Some(4.0),
            fta: Some(5.0),
            ft_pct: Some(0.8),
            oreb: Some(1.0),
            dreb: Some(6.0),
            stl: Some(1.0),
            blk: Some(0.0),
            tov: Some(3.0),
            pf: Some(2.0),
            plus_minus: Some(5.0),
        }
    }

    fn abbrevs() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("BOS".to_string(), "Boston Celtics".to_string());
        m.insert("DEN".to_string(), "Denver Nuggets".to_string());
        m
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_log_gives_no_rows() {
        assert!(build_features(Vec::new(), &abbrevs()).is_empty());
    }

    #[test]
    fn single_game_is_dropped_for_missing_lag() {
        let games = vec![make_game(date(2024, 1, 1), "LAL vs. BOS", 20.0, 5.0, 7.0)];
        assert!(build_features(games, &abbrevs()).is_empty());
    }

    #[test]
    fn output_is_sorted_by_date() {
        let games = vec![
            make_game(date(2024, 1, 10), "LAL vs. BOS", 30.0, 5.0, 7.0),
            make_game(date(2024, 1, 1), "LAL @ DEN", 20.0, 4.0, 6.0),
            make_game(date(2024, 1, 5), "LAL vs. DEN", 25.0, 6.0, 8.0),
        ];
        let rows = build_features(games, &abbrevs());
        assert_eq!(rows.len(), 2);
        for pair in rows.windows(2) {
            assert!(pair[0].game.game_date <= pair[1].game.game_date);
        }
    }

    #[test]
    fn lag_values_come_from_chronological_predecessor() {
        let games = vec![
            make_game(date(2024, 1, 1), "LAL vs. BOS", 20.0, 4.0, 6.0),
            make_game(date(2024, 1, 3), "LAL @ BOS", 30.0, 5.0, 7.0),
            make_game(date(2024, 1, 6), "LAL vs. DEN", 25.0, 6.0, 8.0),
        ];
        let rows = build_features(games, &abbrevs());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pts_lag1, 20.0);
        assert_eq!(rows[0].ast_lag1, 4.0);
        assert_eq!(rows[0].reb_lag1, 6.0);
        assert_eq!(rows[1].pts_lag1, 30.0);
    }

    #[test]
    fn first_retained_row_rolling_mean_is_own_value() {
        let games = vec![
            make_game(date(2024, 1, 1), "LAL vs. BOS", 20.0, 4.0, 6.0),
            make_game(date(2024, 1, 3), "LAL @ BOS", 30.0, 5.0, 7.0),
        ];
        let rows = build_features(games, &abbrevs());
        assert_eq!(rows[0].rolling_pts, 30.0);
        assert_eq!(rows[0].rolling_ast, 5.0);
        assert_eq!(rows[0].rolling_reb, 7.0);
    }

    #[test]
    fn rolling_mean_caps_at_three_retained_rows() {
        let games = vec![
            make_game(date(2024, 1, 1), "LAL vs. BOS", 10.0, 1.0, 1.0),
            make_game(date(2024, 1, 3), "LAL @ BOS", 20.0, 2.0, 2.0),
            make_game(date(2024, 1, 5), "LAL vs. DEN", 30.0, 3.0, 3.0),
            make_game(date(2024, 1, 7), "LAL @ DEN", 40.0, 4.0, 4.0),
            make_game(date(2024, 1, 9), "LAL vs. BOS", 50.0, 5.0, 5.0),
        ];
        let rows = build_features(games, &abbrevs());
        assert_eq!(rows.len(), 4);
        // Last row: mean of the last three retained games (30, 40, 50)
        assert!((rows[3].rolling_pts - 40.0).abs() < 1e-9);
        // Second retained row: mean of (20, 30)
        assert!((rows[1].rolling_pts - 25.0).abs() < 1e-9);
    }

    #[test]
    fn back_to_back_requires_exactly_one_day_gap() {
        let games = vec![
            make_game(date(2024, 1, 1), "LAL vs. BOS", 20.0, 4.0, 6.0),
            make_game(date(2024, 1, 3), "LAL @ BOS", 30.0, 5.0, 7.0),
            make_game(date(2024, 1, 4), "LAL vs. DEN", 25.0, 6.0, 8.0),
            make_game(date(2024, 1, 8), "LAL @ DEN", 25.0, 6.0, 8.0),
        ];
        let rows = build_features(games, &abbrevs());
        assert_eq!(rows[0].back_to_back, 0.0); // first retained row
        assert_eq!(rows[1].back_to_back, 1.0); // Jan 3 -> Jan 4
        assert_eq!(rows[2].back_to_back, 0.0); // Jan 4 -> Jan 8
    }

    #[test]
    fn home_flag_from_matchup_indicator() {
        let games = vec![
            make_game(date(2024, 1, 1), "LAL @ BOS", 20.0, 4.0, 6.0),
            make_game(date(2024, 1, 3), "LAL vs. BOS", 30.0, 5.0, 7.0),
            make_game(date(2024, 1, 5), "LAL @ DEN", 25.0, 6.0, 8.0),
        ];
        let rows = build_features(games, &abbrevs());
        assert_eq!(rows[0].home_game, 1.0);
        assert_eq!(rows[1].home_game, 0.0);
    }

    #[test]
    fn opponent_resolves_through_abbreviation_table() {
        let games = vec![
            make_game(date(2024, 1, 1), "LAL vs. BOS", 20.0, 4.0, 6.0),
            make_game(date(2024, 1, 3), "LAL @ DEN", 30.0, 5.0, 7.0),
            make_game(date(2024, 1, 5), "LAL vs. XYZ", 25.0, 6.0, 8.0),
        ];
        let rows = build_features(games, &abbrevs());
        assert_eq!(rows[0].opponent.as_deref(), Some("Denver Nuggets"));
        // Unknown abbreviation keeps the raw token
        assert_eq!(rows[1].opponent.as_deref(), Some("XYZ"));
    }

    #[test]
    fn season_id_is_normalized() {
        let games = vec![
            make_game(date(2023, 11, 1), "LAL vs. BOS", 20.0, 4.0, 6.0),
            make_game(date(2023, 11, 3), "LAL @ BOS", 30.0, 5.0, 7.0),
        ];
        let rows = build_features(games, &abbrevs());
        assert_eq!(rows[0].season, "2023-24");
    }

    #[test]
    fn season_rollover_pads_two_digits() {
        assert_eq!(normalize_season("21999"), "1999-00");
        assert_eq!(normalize_season("22009"), "2009-10");
    }
}
