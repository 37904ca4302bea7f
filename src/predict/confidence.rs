//! Confidence estimation
//!
//! Maps the model's held-out error to a bounded user-facing confidence
//! score and a prediction interval. Confidence never drops below a floor
//! and never claims near-certainty.

use crate::Stat;

const CONFIDENCE_FLOOR: f64 = 60.0;
const CONFIDENCE_CEILING: f64 = 95.0;
const CONFIDENCE_SLOPE: f64 = 35.0;
/// Half-width of the prediction interval in MAE multiples
const RANGE_MAE_FACTOR: f64 = 1.2;

/// Bounded confidence score with a prediction interval
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceBand {
    /// Confidence percentage in [60, 95]
    pub confidence: f64,
    /// Interval lower bound, floored at 0 (stats cannot be negative)
    pub min: f64,
    pub max: f64,
}

/// Stat-specific error scale: the MAE at which confidence hits the floor
fn max_mae_for(stat: Stat) -> f64 {
    match stat {
        Stat::Pts => 8.0,
        Stat::Reb | Stat::Ast => 4.0,
        Stat::Stl | Stat::Blk => 2.0,
        _ => 5.0,
    }
}

/// Convert a point estimate and MAE into a confidence band
pub fn estimate(prediction: f64, mae: f64, stat: Stat) -> ConfidenceBand {
    let confidence = (100.0 - (mae / max_mae_for(stat)) * CONFIDENCE_SLOPE)
        .clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING);
    ConfidenceBand {
        confidence,
        min: (prediction - mae * RANGE_MAE_FACTOR).max(0.0),
        max: prediction + mae * RANGE_MAE_FACTOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_stays_within_bounds() {
        for stat in [Stat::Pts, Stat::Reb, Stat::Stl, Stat::FgPct] {
            for mae in [0.0, 0.5, 2.0, 8.0, 50.0] {
                let band = estimate(10.0, mae, stat);
                assert!(band.confidence >= 60.0 && band.confidence <= 95.0);
            }
        }
    }

    #[test]
    fn points_at_full_error_scale_gives_65() {
        let band = estimate(25.0, 8.0, Stat::Pts);
        assert!((band.confidence - 65.0).abs() < 1e-9);
    }

    #[test]
    fn zero_error_caps_at_95() {
        let band = estimate(25.0, 0.0, Stat::Pts);
        assert_eq!(band.confidence, 95.0);
    }

    #[test]
    fn range_width_is_fixed_mae_multiple() {
        let band = estimate(20.0, 3.0, Stat::Pts);
        assert!((band.max - band.min - 2.4 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn range_min_is_floored_at_zero() {
        let band = estimate(1.0, 3.0, Stat::Blk);
        assert_eq!(band.min, 0.0);
        assert!(band.max > 0.0);
    }

    #[test]
    fn stat_scales_differ() {
        // Same MAE is judged more harshly for blocks than points
        let pts = estimate(20.0, 2.0, Stat::Pts);
        let blk = estimate(2.0, 2.0, Stat::Blk);
        assert!(blk.confidence < pts.confidence);
    }
}
