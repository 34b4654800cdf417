//! Analytics configuration
//!
//! Every threshold the engine uses (smoothing factor, risk-free rate, anomaly
//! threshold, health score bands, insight triggers) lives here so tuning never
//! touches algorithm code.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/tally/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Top-level analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub trend: TrendConfig,
    pub forecast: ForecastConfig,
    pub anomaly: AnomalyConfig,
    pub investment: InvestmentConfig,
    pub budget: BudgetConfig,
    pub scoring: ScoringConfig,
    pub insights: InsightConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// |percentage| above this is increasing/decreasing
    pub stable_band_percent: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            stable_band_percent: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Exponential smoothing factor
    pub smoothing_alpha: f64,
    pub max_horizon: usize,
    pub max_seasonal_period: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.3,
            max_horizon: 120,
            max_seasonal_period: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// z-score threshold
    pub threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self { threshold: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentConfig {
    /// Annual risk-free rate as a fraction (0.02 = 2%)
    pub risk_free_rate: f64,
    pub periods_per_year: u32,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.02,
            periods_per_year: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub under_budget_ratio: f64,
    pub utilization_weight: f64,
    pub accuracy_weight: f64,
    pub excellent: f64,
    pub very_good: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            under_budget_ratio: 0.8,
            utilization_weight: 0.6,
            accuracy_weight: 0.4,
            excellent: 90.0,
            very_good: 80.0,
            good: 70.0,
            fair: 60.0,
        }
    }
}

/// One scoring band: a threshold and the points it awards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub threshold: f64,
    pub points: u32,
}

impl ScoreBand {
    pub const fn new(threshold: f64, points: u32) -> Self {
        Self { threshold, points }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Awarded when savings rate >= threshold
    pub savings_rate_bands: Vec<ScoreBand>,
    /// Awarded when expense ratio <= threshold
    pub expense_ratio_bands: Vec<ScoreBand>,
    /// Awarded when debt-to-income <= threshold
    pub debt_ratio_bands: Vec<ScoreBand>,
    /// Awarded when emergency months >= threshold (and > 0)
    pub emergency_fund_bands: Vec<ScoreBand>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            savings_rate_bands: vec![
                ScoreBand::new(20.0, 30),
                ScoreBand::new(10.0, 20),
                ScoreBand::new(5.0, 10),
                ScoreBand::new(0.0, 5),
            ],
            expense_ratio_bands: vec![
                ScoreBand::new(50.0, 25),
                ScoreBand::new(70.0, 15),
                ScoreBand::new(90.0, 5),
            ],
            debt_ratio_bands: vec![
                ScoreBand::new(20.0, 25),
                ScoreBand::new(40.0, 15),
                ScoreBand::new(60.0, 5),
            ],
            emergency_fund_bands: vec![
                ScoreBand::new(6.0, 20),
                ScoreBand::new(3.0, 15),
                ScoreBand::new(1.0, 10),
                ScoreBand::new(0.0, 5),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub large_income_multiple: f64,
    pub low_savings_rate: f64,
    pub strong_savings_rate: f64,
    pub high_expense_ratio: f64,
    pub high_debt_ratio: f64,
    pub emergency_fund_target_months: f64,
    pub category_concentration_percent: f64,
    pub healthy_score: u8,
    pub min_periods: usize,
    pub conservative_savings_percent: f64,
    pub standard_savings_percent: f64,
    pub aggressive_savings_percent: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            large_income_multiple: 2.0,
            low_savings_rate: 10.0,
            strong_savings_rate: 20.0,
            high_expense_ratio: 80.0,
            high_debt_ratio: 40.0,
            emergency_fund_target_months: 3.0,
            category_concentration_percent: 40.0,
            healthy_score: 80,
            min_periods: 3,
            conservative_savings_percent: 10.0,
            standard_savings_percent: 20.0,
            aggressive_savings_percent: 30.0,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration, checking the override location first
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (falls back to defaults if it doesn't exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// The embedded defaults
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Parse and validate TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Reject values the algorithms can't work with
    pub fn validate(&self) -> Result<()> {
        let alpha = self.forecast.smoothing_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::Config(format!(
                "forecast.smoothing_alpha must be in (0, 1], got {}",
                alpha
            )));
        }
        if self.forecast.max_seasonal_period == 0 {
            return Err(Error::Config(
                "forecast.max_seasonal_period must be at least 1".into(),
            ));
        }
        if !(self.anomaly.threshold.is_finite() && self.anomaly.threshold > 0.0) {
            return Err(Error::Config(format!(
                "anomaly.threshold must be positive, got {}",
                self.anomaly.threshold
            )));
        }
        if !self.investment.risk_free_rate.is_finite() {
            return Err(Error::Config("investment.risk_free_rate must be finite".into()));
        }
        if self.investment.periods_per_year == 0 {
            return Err(Error::Config(
                "investment.periods_per_year must be at least 1".into(),
            ));
        }
        if !(self.budget.under_budget_ratio > 0.0 && self.budget.under_budget_ratio <= 1.0) {
            return Err(Error::Config(format!(
                "budget.under_budget_ratio must be in (0, 1], got {}",
                self.budget.under_budget_ratio
            )));
        }
        let b = &self.budget;
        if !(b.excellent >= b.very_good && b.very_good >= b.good && b.good >= b.fair) {
            return Err(Error::Config(
                "budget rating thresholds must be descending (excellent >= very_good >= good >= fair)"
                    .into(),
            ));
        }
        if !(self.trend.stable_band_percent.is_finite() && self.trend.stable_band_percent >= 0.0) {
            return Err(Error::Config(
                "trend.stable_band_percent must be non-negative".into(),
            ));
        }

        let s = &self.scoring;
        for (name, bands) in [
            ("savings_rate_bands", &s.savings_rate_bands),
            ("expense_ratio_bands", &s.expense_ratio_bands),
            ("debt_ratio_bands", &s.debt_ratio_bands),
            ("emergency_fund_bands", &s.emergency_fund_bands),
        ] {
            if bands.iter().any(|band| !band.threshold.is_finite()) {
                return Err(Error::Config(format!(
                    "scoring.{} has a non-finite threshold",
                    name
                )));
            }
        }

        // The first matching band wins, so order decides the score
        for (name, bands) in [
            ("savings_rate_bands", &s.savings_rate_bands),
            ("emergency_fund_bands", &s.emergency_fund_bands),
        ] {
            if bands.windows(2).any(|w| w[0].threshold < w[1].threshold) {
                return Err(Error::Config(format!(
                    "scoring.{} thresholds must be descending",
                    name
                )));
            }
        }
        for (name, bands) in [
            ("expense_ratio_bands", &s.expense_ratio_bands),
            ("debt_ratio_bands", &s.debt_ratio_bands),
        ] {
            if bands.windows(2).any(|w| w[0].threshold > w[1].threshold) {
                return Err(Error::Config(format!(
                    "scoring.{} thresholds must be ascending",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("analytics.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AnalyticsConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "Loading analytics config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let config: AnalyticsConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
