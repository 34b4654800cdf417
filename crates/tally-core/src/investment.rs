//! Portfolio performance metrics from periodic value snapshots

use tracing::debug;

use crate::config::InvestmentConfig;
use crate::error::{ensure_finite, Result};
use crate::models::InvestmentMetrics;
use crate::trend::{mean, std_dev};

/// Returns, volatility, Sharpe ratio and max drawdown (all in percent)
///
/// `values` are portfolio values sampled once per period (monthly by default).
pub fn calculate_investment_metrics(
    values: &[f64],
    config: &InvestmentConfig,
) -> Result<InvestmentMetrics> {
    ensure_finite(values, "Portfolio values")?;

    let returns = period_returns(values);
    if values.len() < 2 || returns.is_empty() {
        return Ok(InvestmentMetrics::default());
    }

    let periods = config.periods_per_year as f64;
    let average_return = mean(&returns);
    let annualized_return = (1.0 + average_return).powf(periods) - 1.0;
    let volatility = std_dev(&returns);

    let sharpe_ratio = if volatility == 0.0 {
        0.0
    } else {
        (annualized_return - config.risk_free_rate) / (volatility * periods.sqrt())
    };

    let first = values[0];
    let last = values[values.len() - 1];
    let total_return = if first > 0.0 { (last - first) / first } else { 0.0 };

    let metrics = InvestmentMetrics {
        total_return: total_return * 100.0,
        average_return: average_return * 100.0,
        annualized_return: annualized_return * 100.0,
        volatility: volatility * 100.0,
        sharpe_ratio,
        max_drawdown: max_drawdown(values) * 100.0,
    };

    debug!(
        snapshots = values.len(),
        annualized = metrics.annualized_return,
        sharpe = metrics.sharpe_ratio,
        "Calculated investment metrics"
    );

    Ok(metrics)
}

/// Simple returns, skipping steps from a non-positive value
fn period_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter_map(|w| {
            if w[0] > 0.0 {
                Some((w[1] - w[0]) / w[0])
            } else {
                None
            }
        })
        .collect()
}

/// Largest peak-to-trough decline as a fraction of the peak
fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;
    for &v in values {
        if v > peak {
            peak = v;
        }
        if peak > 0.0 {
            max_dd = max_dd.max((peak - v) / peak);
        }
    }
    max_dd
}
