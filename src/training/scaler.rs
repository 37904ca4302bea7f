//! Feature scaling
//!
//! Zero-mean, unit-variance scaling fit on the training partition only.
//! The fitted transform is reused for the test partition and inference
//! input so no test statistics leak into scaling.

use ndarray::{Array1, Array2, Axis};

/// Threshold below which a column's spread is treated as zero
const STD_EPSILON: f64 = 1e-12;

/// Per-column standardization parameters
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl StandardScaler {
    /// Fit column means and standard deviations.
    ///
    /// Constant columns keep a unit divisor so they map to zero instead
    /// of dividing by zero.
    pub fn fit(x: &Array2<f64>) -> Self {
        let mean = x.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(x.ncols()));
        let std = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > STD_EPSILON { s } else { 1.0 });
        StandardScaler { mean, std }
    }

    /// Apply the fitted transform without re-fitting
    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        (x - &self.mean) / &self.std
    }
}
