//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `reports` - Period reports (summary, trends, forecast, anomalies, cashflow, categories)
//! - `health` - Ratios, health score, budget efficiency and investment metrics
//! - `goals` - Savings goal progress, timelines and overview
//! - `insights` - Findings, recommendations and savings plan
//!
//! Shared loading helpers live here.

pub mod goals;
pub mod health;
pub mod insights;
pub mod reports;

// Re-export command functions for main.rs
pub use goals::*;
pub use health::*;
pub use insights::*;
pub use reports::*;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{
    aggregate_by_period, resolve_range, AnalyticsConfig, BudgetCategory, DateRange, Granularity,
    Transaction,
};
use tracing::{debug, info};

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Load the analytics config from `--config`, the override file, or defaults
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            AnalyticsConfig::load_from(path)
        }
        None => AnalyticsConfig::load(),
    }
    .context("Failed to load analytics config")?;
    Ok(config)
}

/// Load transactions from a CSV file, or a JSON array when the extension is `.json`
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let transactions = if is_json {
        tally_core::parse_json(file)
    } else {
        tally_core::parse_csv(file)
    }
    .with_context(|| format!("Failed to read transactions from {}", path.display()))?;

    info!("Loaded {} transactions from {}", transactions.len(), path.display());
    Ok(transactions)
}

/// Load a budget CSV
pub fn load_budget(path: &Path) -> Result<Vec<BudgetCategory>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let categories = tally_core::parse_budget_csv(file)
        .with_context(|| format!("Failed to read budget from {}", path.display()))?;
    debug!(count = categories.len(), "Loaded budget categories");
    Ok(categories)
}

/// Parse a YYYY-MM-DD flag value
pub fn parse_cli_date(s: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
}

/// Resolve `--period` / `--from` / `--to` into a date range
pub fn resolve_period(
    granularity: Option<Granularity>,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
) -> Result<DateRange> {
    let from = custom_from.map(|s| parse_cli_date(s, "--from")).transpose()?;
    let to = custom_to.map(|s| parse_cli_date(s, "--to")).transpose()?;
    if from.is_some() != to.is_some() {
        anyhow::bail!("--from and --to must be given together");
    }
    Ok(resolve_range(granularity, from, to)?)
}

/// Keep only transactions in `category` (case-insensitive) when one is given
pub fn filter_category(transactions: Vec<Transaction>, category: Option<&str>) -> Vec<Transaction> {
    match category {
        Some(wanted) => transactions
            .into_iter()
            .filter(|t| t.category_label().eq_ignore_ascii_case(wanted))
            .collect(),
        None => transactions,
    }
}

/// Expense total per period, oldest first
pub fn expense_series(
    transactions: &[Transaction],
    granularity: Granularity,
) -> (Vec<String>, Vec<f64>) {
    aggregate_by_period(transactions, granularity)
        .into_iter()
        .map(|b| (b.period, b.expenses))
        .unzip()
}

/// Pretty-print a value as JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
