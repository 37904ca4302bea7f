//! Evaluation metrics

use ndarray::ArrayView1;

/// Mean absolute error between actual and predicted values
pub fn mean_absolute_error(actual: ArrayView1<f64>, predicted: ArrayView1<f64>) -> f64 {
    debug_assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return 0.0;
    }
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / actual.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn mae_averages_absolute_errors() {
        let actual = array![10.0, 20.0, 30.0];
        let predicted = array![12.0, 17.0, 30.0];
        assert!((mean_absolute_error(actual.view(), predicted.view()) - 5.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn perfect_prediction_is_zero() {
        let v = array![1.0, 2.0];
        assert_eq!(mean_absolute_error(v.view(), v.view()), 0.0);
    }
}
