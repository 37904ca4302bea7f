//! Regression training and next-game inference
//!
//! Splits the dataset with a seeded shuffle, scales features on the
//! training partition, fits a linear regression, reports held-out MAE
//! and produces the next-game point estimate from recent form.

use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{s, Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::dataset::Dataset;
use crate::training::metrics::mean_absolute_error;
use crate::training::scaler::StandardScaler;
use crate::{ModelConfig, PredictionError, Result};

/// Trained-model outputs for one request
#[derive(Debug, Clone, Copy)]
pub struct ModelOutcome {
    /// Next-game point estimate
    pub prediction: f64,
    /// Mean absolute error on the held-out partition
    pub mae: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Train on the dataset and predict the next game.
///
/// The same dataset and seed always produce the same split, scaling and
/// prediction. The next-game input is the column-wise mean of the most
/// recent rows in raw feature space, transformed by the fitted scaler.
pub fn train_and_predict(dataset: &Dataset, config: &ModelConfig) -> Result<ModelOutcome> {
    let n = dataset.x.nrows();
    if n < 2 {
        return Err(PredictionError::ModelTrainingFailure(format!(
            "need at least 2 dataset rows to split, got {}",
            n
        )));
    }

    let (train_idx, test_idx) = split_indices(n, config.test_fraction, config.seed);

    let x_train = dataset.x.select(Axis(0), &train_idx);
    let y_train = dataset.y.select(Axis(0), &train_idx);
    let x_test = dataset.x.select(Axis(0), &test_idx);
    let y_test = dataset.y.select(Axis(0), &test_idx);

    // Scaler is fit on the training partition only
    let scaler = StandardScaler::fit(&x_train);
    let x_train = scaler.transform(&x_train);
    let x_test = scaler.transform(&x_test);

    let train = linfa::Dataset::new(x_train, y_train);
    let model = LinearRegression::new()
        .fit(&train)
        .map_err(|e| PredictionError::ModelTrainingFailure(e.to_string()))?;

    let y_pred: Array1<f64> = model.predict(&x_test);
    let mae = mean_absolute_error(y_test.view(), y_pred.view());
    if !mae.is_finite() {
        return Err(PredictionError::ModelTrainingFailure(
            "held-out error is not finite".to_string(),
        ));
    }

    // Next-game input: average recent form, since the actual next
    // opponent and context are unknown
    let next_input = recent_form_input(&dataset.x, config.recent_form_window);
    let next_scaled = scaler.transform(&next_input);
    let prediction = model.predict(&next_scaled)[0];
    if !prediction.is_finite() {
        return Err(PredictionError::InvalidPredictionValue);
    }

    log::info!(
        "Trained on {} rows, evaluated on {} rows: MAE {:.3}",
        train_idx.len(),
        test_idx.len(),
        mae
    );

    Ok(ModelOutcome {
        prediction,
        mae,
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
    })
}

/// Seeded shuffle split; at least one row lands on each side
fn split_indices(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64 * test_fraction).ceil() as usize).max(1).min(n - 1);
    let test_idx = indices[..n_test].to_vec();
    let train_idx = indices[n_test..].to_vec();
    (train_idx, test_idx)
}

/// Column-wise mean of the most recent `window` rows as a 1-row matrix
fn recent_form_input(x: &Array2<f64>, window: usize) -> Array2<f64> {
    let n = x.nrows();
    let w = window.clamp(1, n);
    let recent = x.slice(s![n - w.., ..]);
    recent
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(x.ncols()))
        .insert_axis(Axis(0))
}
