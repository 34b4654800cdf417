//! Forecasting future values from a historical series

use tracing::debug;

use crate::config::ForecastConfig;
use crate::error::{ensure_finite, Error, Result};
use crate::models::ForecastMethod;
use crate::trend::{calculate_seasonality, linear_regression, mean};

/// Project `horizon` future values. Forecasts never go below zero.
pub fn generate_forecast(
    values: &[f64],
    horizon: usize,
    method: ForecastMethod,
    config: &ForecastConfig,
) -> Result<Vec<f64>> {
    if horizon > config.max_horizon {
        return Err(Error::validation(format!(
            "Forecast horizon {} exceeds the maximum of {}",
            horizon, config.max_horizon
        )));
    }
    ensure_finite(values, "Forecast series")?;

    if horizon == 0 {
        return Ok(Vec::new());
    }

    if values.len() < 2 {
        let level = values.first().copied().unwrap_or(0.0).max(0.0);
        return Ok(vec![level; horizon]);
    }

    let forecast = match method {
        ForecastMethod::Linear => linear(values, horizon),
        ForecastMethod::Exponential => exponential(values, horizon, config.smoothing_alpha),
        ForecastMethod::Seasonal => seasonal(values, horizon, config.max_seasonal_period)?,
    };

    debug!(
        method = method.as_str(),
        history = values.len(),
        horizon,
        "Generated forecast"
    );

    Ok(forecast)
}

fn linear(values: &[f64], horizon: usize) -> Vec<f64> {
    let slope = linear_regression(values).slope;
    let last = values[values.len() - 1];
    (1..=horizon)
        .map(|i| (last + slope * i as f64).max(0.0))
        .collect()
}

/// Single exponential smoothing: the forecast is the final smoothed level
fn exponential(values: &[f64], horizon: usize, alpha: f64) -> Vec<f64> {
    let level = values[1..]
        .iter()
        .fold(values[0], |level, v| alpha * v + (1.0 - alpha) * level);
    vec![level.max(0.0); horizon]
}

fn seasonal(values: &[f64], horizon: usize, max_period: usize) -> Result<Vec<f64>> {
    let n = values.len();
    let period = max_period.min(n / 2).max(1);

    let overall = mean(values);
    let indices: Vec<f64> = calculate_seasonality(values, period)?
        .into_iter()
        .map(|s| if overall == 0.0 { 1.0 } else { s / overall })
        .collect();

    let slope = linear_regression(values).slope;
    let last = values[n - 1];

    Ok((1..=horizon)
        .map(|i| {
            let base = last + slope * i as f64;
            (base * indices[(n - 1 + i) % period]).max(0.0)
        })
        .collect())
}
