//! Trend, regression and smoothing primitives
//!
//! Everything here is a pure function over a numeric series. Statistics are
//! population statistics (divide by n) throughout.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TrendConfig;
use crate::error::{ensure_finite, Error, Result};
use crate::models::{TrendDirection, TrendResult};

/// Arithmetic mean (0 for an empty series)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (0 for an empty series)
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Least-squares line `y = intercept + slope * x` over x = 0, 1, 2, ...
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    /// Fitted value at index `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least squares against the 0-based index
pub fn linear_regression(values: &[f64]) -> Regression {
    let n = values.len();
    let y_mean = mean(values);
    if n < 2 {
        return Regression {
            slope: 0.0,
            intercept: y_mean,
        };
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        ss_xy += dx * (y - y_mean);
        ss_xx += dx * dx;
    }

    if ss_xx == 0.0 {
        return Regression {
            slope: 0.0,
            intercept: y_mean,
        };
    }

    let slope = ss_xy / ss_xx;
    Regression {
        slope,
        intercept: y_mean - slope * x_mean,
    }
}

/// Pearson correlation coefficient
pub fn calculate_correlation(xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(Error::validation(format!(
            "Correlation needs equal-length series (got {} and {})",
            xs.len(),
            ys.len()
        )));
    }
    ensure_finite(xs, "x series")?;
    ensure_finite(ys, "y series")?;

    if xs.len() < 2 {
        return Ok(0.0);
    }

    let x_mean = mean(xs);
    let y_mean = mean(ys);
    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        ss_xy += dx * dy;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
    }

    let denominator = (ss_xx * ss_yy).sqrt();
    if denominator == 0.0 {
        return Ok(0.0);
    }
    Ok(ss_xy / denominator)
}

/// Direction, magnitude and stability of a series
pub fn calculate_trends(values: &[f64], config: &TrendConfig) -> Result<TrendResult> {
    ensure_finite(values, "Trend series")?;

    if values.len() < 2 {
        return Ok(TrendResult::flat());
    }

    let regression = linear_regression(values);
    let first_fitted = regression.predict(0.0);
    let last_fitted = regression.predict((values.len() - 1) as f64);

    let percentage = if first_fitted == 0.0 {
        0.0
    } else {
        (last_fitted - first_fitted) / first_fitted.abs() * 100.0
    };

    let m = mean(values);
    let volatility = if m == 0.0 {
        0.0
    } else {
        std_dev(values) / m.abs() * 100.0
    };
    let stability = (100.0 - volatility).max(0.0);

    let direction = if percentage > config.stable_band_percent {
        TrendDirection::Increasing
    } else if percentage < -config.stable_band_percent {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let correlation = calculate_correlation(&xs, values)?;

    debug!(
        points = values.len(),
        direction = direction.as_str(),
        percentage,
        "Calculated trend"
    );

    Ok(TrendResult {
        direction,
        percentage,
        volatility,
        stability,
        slope: regression.slope,
        intercept: regression.intercept,
        correlation,
    })
}

/// Trailing moving average; the window shrinks over the first elements
pub fn calculate_moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::validation("Moving average window must be at least 1"));
    }
    ensure_finite(values, "Moving average series")?;

    let mut result = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for (i, v) in values.iter().enumerate() {
        running += v;
        if i >= window {
            running -= values[i - window];
        }
        let len = (i + 1).min(window);
        result.push(running / len as f64);
    }
    Ok(result)
}

/// Average value for each phase `i % period`
pub fn calculate_seasonality(values: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(Error::validation("Seasonal period must be at least 1"));
    }
    ensure_finite(values, "Seasonality series")?;

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, v) in values.iter().enumerate() {
        sums[i % period] += v;
        counts[i % period] += 1;
    }

    Ok(sums
        .into_iter()
        .zip(counts)
        .map(|(sum, count)| if count == 0 { 0.0 } else { sum / count as f64 })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TrendConfig {
        TrendConfig::default()
    }

    #[test]
    fn test_mean_and_std_dev() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert!((mean(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 5.0).abs() < 1e-9);
        assert!((std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_regression_exact_line() {
        let reg = linear_regression(&[1.0, 3.0, 5.0, 7.0]);
        assert!((reg.slope - 2.0).abs() < 1e-9);
        assert!((reg.intercept - 1.0).abs() < 1e-9);
        assert!((reg.predict(4.0) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_regression_degenerate() {
        let reg = linear_regression(&[42.0]);
        assert_eq!(reg.slope, 0.0);
        assert_eq!(reg.intercept, 42.0);

        let reg = linear_regression(&[]);
        assert_eq!(reg.slope, 0.0);
        assert_eq!(reg.intercept, 0.0);
    }

    #[test]
    fn test_trend_empty_and_single() {
        for values in [vec![], vec![250.0]] {
            let trend = calculate_trends(&values, &config()).unwrap();
            assert_eq!(trend.direction, TrendDirection::Stable);
            assert_eq!(trend.percentage, 0.0);
            assert_eq!(trend.volatility, 0.0);
            assert_eq!(trend.stability, 100.0);
        }
    }

    #[test]
    fn test_trend_compounding_growth_is_increasing() {
        let trend = calculate_trends(&[100.0, 110.0, 121.0, 133.1], &config()).unwrap();
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert!(trend.percentage > 5.0);
        assert!(trend.correlation > 0.99);
    }

    #[test]
    fn test_trend_decreasing() {
        let trend = calculate_trends(&[500.0, 400.0, 300.0, 200.0], &config()).unwrap();
        assert_eq!(trend.direction, TrendDirection::Decreasing);
        assert!(trend.percentage < -5.0);
        assert!((trend.correlation + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_within_band_is_stable() {
        let trend = calculate_trends(&[100.0, 101.0, 99.0, 102.0], &config()).unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_stability_is_complement_of_volatility() {
        for values in [
            vec![100.0, 120.0, 80.0, 110.0],
            vec![1.0, 50.0, 2.0, 90.0, 3.0],
            vec![10.0, 10.0, 10.0],
        ] {
            let trend = calculate_trends(&values, &config()).unwrap();
            assert!((trend.stability - (100.0 - trend.volatility).max(0.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_trend_zero_mean_has_no_volatility() {
        let trend = calculate_trends(&[-5.0, 5.0, -5.0, 5.0], &config()).unwrap();
        assert_eq!(trend.volatility, 0.0);
        assert_eq!(trend.stability, 100.0);
    }

    #[test]
    fn test_trend_rejects_nan() {
        let result = calculate_trends(&[1.0, f64::NAN, 3.0], &config());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_correlation() {
        let r = calculate_correlation(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-9);

        // Constant series has no defined correlation
        assert_eq!(calculate_correlation(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).unwrap(), 0.0);
        assert!(calculate_correlation(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_moving_average() {
        let ma = calculate_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(ma.len(), 5);
        assert!((ma[0] - 1.0).abs() < 1e-9);
        assert!((ma[1] - 1.5).abs() < 1e-9);
        assert!((ma[2] - 2.0).abs() < 1e-9);
        assert!((ma[4] - 4.0).abs() < 1e-9);

        assert!(calculate_moving_average(&[1.0], 0).is_err());
    }

    #[test]
    fn test_seasonality() {
        let season = calculate_seasonality(&[1.0, 10.0, 3.0, 20.0, 5.0], 2).unwrap();
        assert!((season[0] - 3.0).abs() < 1e-9);
        assert!((season[1] - 15.0).abs() < 1e-9);

        let sparse = calculate_seasonality(&[4.0], 3).unwrap();
        assert_eq!(sparse, vec![4.0, 0.0, 0.0]);

        assert!(calculate_seasonality(&[1.0], 0).is_err());
    }
}
