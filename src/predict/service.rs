//! Request orchestration
//!
//! Runs the full pipeline for one (player, stat) request and maps every
//! failure mode to a typed error. Each request owns its own game log,
//! feature rows, dataset and model; nothing is shared across requests.

use crate::data::dataset::assemble;
use crate::data::resolve::{resolve_player, resolve_stat};
use crate::data::teams::abbreviation_map;
use crate::data::{ReferenceTables, StatsProvider};
use crate::features::{build_features, OpponentEnricher};
use crate::predict::confidence;
use crate::training::train_and_predict;
use crate::{Config, PredictionError, Result, Stat};

/// Final prediction payload for one request
#[derive(Debug, Clone)]
pub struct PredictionReport {
    pub player: String,
    pub stat: Stat,
    pub prediction: f64,
    pub confidence: f64,
    pub range_min: f64,
    pub range_max: f64,
    pub mae: f64,
    /// Dataset rows that survived feature building and the opponent join
    pub data_points: usize,
    pub features_used: usize,
}

/// One-shot prediction pipeline over a stats provider and reference tables
pub struct PredictionService<'a, P: StatsProvider> {
    provider: &'a P,
    tables: &'a ReferenceTables,
    config: &'a Config,
}

impl<'a, P: StatsProvider> PredictionService<'a, P> {
    pub fn new(provider: &'a P, tables: &'a ReferenceTables, config: &'a Config) -> Self {
        PredictionService {
            provider,
            tables,
            config,
        }
    }

    /// Run the pipeline for one request, short-circuiting on the first
    /// failure. No partial result is ever produced.
    pub fn predict(&self, player_name: &str, stat_name: &str) -> Result<PredictionReport> {
        let stat = resolve_stat(stat_name)?;

        let players = self.provider.list_players()?;
        let player = resolve_player(player_name, &players)?;
        log::info!("Resolved '{}' to {} ({})", player_name, player.full_name, player.id);

        let games = self.provider.player_game_log(player.id)?;
        log::info!("Fetched {} games for {}", games.len(), player.full_name);

        let abbreviations = abbreviation_map();
        let rows = build_features(games, &abbreviations);
        if rows.is_empty() {
            return Err(PredictionError::NoGameData(player.full_name.clone()));
        }

        let rows = OpponentEnricher::new(self.tables).enrich(rows);
        if rows.is_empty() {
            return Err(PredictionError::OpponentMergeFailure(player.full_name.clone()));
        }

        let dataset = assemble(&rows, stat)?;
        let outcome = train_and_predict(&dataset, &self.config.model)?;
        let band = confidence::estimate(outcome.prediction, outcome.mae, stat);

        log::info!(
            "{} {}: predicting {:.1} (MAE {:.2}, confidence {:.1})",
            player.full_name,
            stat.code(),
            outcome.prediction,
            outcome.mae,
            band.confidence
        );

        Ok(PredictionReport {
            player: player.full_name.clone(),
            stat,
            prediction: outcome.prediction,
            confidence: band.confidence,
            range_min: band.min,
            range_max: band.max,
            mae: outcome.mae,
            data_points: rows.len(),
            features_used: dataset.feature_names.len(),
        })
    }
}
