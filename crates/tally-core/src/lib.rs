//! Tally Core Library
//!
//! Analytics and forecasting for the Tally personal finance tool:
//! - Period keys, date ranges and transaction aggregation
//! - Trend, regression, moving-average and seasonality primitives
//! - Linear, exponential and seasonal forecasts
//! - Z-score anomaly detection
//! - Financial ratios, health score and budget efficiency
//! - Cash-flow, investment and savings-goal analysis
//! - Pluggable insight analyzers and rule-based recommendations
//! - CSV/JSON import and TOML configuration
//!
//! Every analysis function is pure: it reads its arguments and returns a
//! value, with no I/O and no shared state.

pub mod aggregate;
pub mod anomaly;
pub mod cashflow;
pub mod config;
pub mod error;
pub mod forecast;
pub mod goals;
pub mod import;
pub mod insights;
pub mod investment;
pub mod models;
pub mod period;
pub mod scoring;
pub mod trend;

pub use aggregate::{aggregate_by_period, category_breakdown, group_by_category};
pub use anomaly::detect_anomalies;
pub use cashflow::{analyze_cash_flow, period_over_period_changes, summarize_period};
pub use config::{
    default_config_path, AnalyticsConfig, AnomalyConfig, BudgetConfig, ForecastConfig,
    InsightConfig, InvestmentConfig, ScoreBand, ScoringConfig, TrendConfig,
};
pub use error::{Error, Result};
pub use forecast::generate_forecast;
pub use goals::{goal_progress, goals_overview, savings_timeline};
pub use import::{parse_budget_csv, parse_csv, parse_json};
pub use insights::{
    generate_insights, generate_recommendations, savings_plan, AnalysisContext, Finding, Insight,
    InsightEngine, InsightKind, Priority, Recommendation, RecommendationInput, SavingsPlan,
    Severity,
};
pub use investment::calculate_investment_metrics;
pub use models::*;
pub use period::{filter_by_range, period_key, period_start, resolve_range, DateRange};
pub use scoring::{
    calculate_budget_efficiency, calculate_financial_health_score, calculate_financial_ratios,
    ratios_from_cash_flow,
};
pub use trend::{
    calculate_correlation, calculate_moving_average, calculate_seasonality, calculate_trends,
    linear_regression, Regression,
};
