//! Dataset assembly
//!
//! Selects the canonical feature set, degrades gracefully when columns are
//! unavailable, and finalizes the numeric matrix for training.

use ndarray::{Array1, Array2};

use crate::features::FeatureRow;
use crate::{PredictionError, Result, Stat};

/// Canonical model features, in matrix column order
pub const CANONICAL_FEATURES: [&str; 29] = [
    "ROLLING_PTS",
    "ROLLING_AST",
    "ROLLING_REB",
    "MIN",
    "FGM",
    "FGA",
    "FG_PCT",
    "FG3M",
    "FG3A",
    "FG3_PCT",
    "FTM",
    "FTA",
    "FT_PCT",
    "OREB",
    "DREB",
    "STL",
    "BLK",
    "TOV",
    "PF",
    "PLUS_MINUS",
    "PTS_LAG1",
    "AST_LAG1",
    "REB_LAG1",
    "HOME_GAME",
    "BACK_TO_BACK",
    "OPP_DEF_RATING",
    "OPP_TEAM_STL",
    "OPP_TEAM_BLK",
    "OPP_TEAM_WIN_PCT",
];

/// Hard minimum of canonical features below which the model is unreliable
pub const MIN_FEATURES: usize = 10;

/// Numeric matrix plus target vector for one stat
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    pub feature_names: Vec<&'static str>,
}

/// Assemble the training matrix from enriched feature rows.
///
/// A canonical feature is available when at least one row carries a value
/// for it; all-null columns are excluded. Values still missing in selected
/// columns are zero-filled, the last-resort default once the dataset is
/// finalized for modeling.
pub fn assemble(rows: &[FeatureRow], target: Stat) -> Result<Dataset> {
    let available: Vec<&'static str> = CANONICAL_FEATURES
        .iter()
        .copied()
        .filter(|name| rows.iter().any(|row| feature_value(row, name).is_some()))
        .collect();

    if available.len() < MIN_FEATURES {
        return Err(PredictionError::InsufficientFeatures {
            available: available.len(),
            required: MIN_FEATURES,
        });
    }
    if available.len() < CANONICAL_FEATURES.len() {
        log::debug!(
            "Degrading to {} of {} canonical features",
            available.len(),
            CANONICAL_FEATURES.len()
        );
    }

    if !rows.iter().any(|row| row.game.stat(target).is_some()) {
        return Err(PredictionError::UnknownStat(target.code().to_string()));
    }

    let mut x = Array2::<f64>::zeros((rows.len(), available.len()));
    let mut y = Array1::<f64>::zeros(rows.len());
    for (i, row) in rows.iter().enumerate() {
        for (j, name) in available.iter().enumerate() {
            x[(i, j)] = feature_value(row, name).unwrap_or(0.0);
        }
        y[i] = row.game.stat(target).unwrap_or(0.0);
    }

    Ok(Dataset {
        x,
        y,
        feature_names: available,
    })
}

/// Value of a canonical feature for one row, `None` when unreported
pub fn feature_value(row: &FeatureRow, name: &str) -> Option<f64> {
    match name {
        "ROLLING_PTS" => Some(row.rolling_pts),
        "ROLLING_AST" => Some(row.rolling_ast),
        "ROLLING_REB" => Some(row.rolling_reb),
        "MIN" => Some(row.game.min),
        "FGM" => row.game.fgm,
        "FGA" => row.game.fga,
        "FG_PCT" => row.game.fg_pct,
        "FG3M" => row.game.fg3m,
        "FG3A" => row.game.fg3a,
        "FG3_PCT" => row.game.fg3_pct,
        "FTM" => row.game.ftm,
        "FTA" => row.game.fta,
        "FT_PCT" => row.game.ft_pct,
        "OREB" => row.game.oreb,
        "DREB" => row.game.dreb,
        "STL" => row.game.stl,
        "BLK" => row.game.blk,
        "TOV" => row.game.tov,
        "PF" => row.game.pf,
        "PLUS_MINUS" => row.game.plus_minus,
        "PTS_LAG1" => Some(row.pts_lag1),
        "AST_LAG1" => Some(row.ast_lag1),
        "REB_LAG1" => Some(row.reb_lag1),
        "HOME_GAME" => Some(row.home_game),
        "BACK_TO_BACK" => Some(row.back_to_back),
        "OPP_DEF_RATING" => row.opp_def_rating,
        "OPP_TEAM_STL" => row.opp_team_stl,
        "OPP_TEAM_BLK" => row.opp_team_blk,
        "OPP_TEAM_WIN_PCT" => row.opp_team_win_pct,
        _ => None,
    }
}
