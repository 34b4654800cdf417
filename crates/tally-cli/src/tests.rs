//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use tally_core::{AnalyticsConfig, ForecastMethod, Granularity, TransactionType};
use tempfile::NamedTempFile;

use crate::commands::{self, truncate};

const HISTORY_CSV: &str = "Date,Description,Category,Type,Amount
2024-01-01,Payroll,Salary,income,4000
2024-01-03,Landlord,Rent,expense,-1500
2024-01-12,Market,Groceries,expense,-300
2024-02-01,Payroll,Salary,income,4000
2024-02-03,Landlord,Rent,expense,-1500
2024-02-12,Market,Groceries,expense,-320
2024-03-01,Payroll,Salary,income,4000
2024-03-03,Landlord,Rent,expense,-1500
2024-03-12,Market,Groceries,expense,-340
2024-04-01,Payroll,Salary,income,4000
2024-04-03,Landlord,Rent,expense,-1500
2024-04-12,Market,Groceries,expense,-360
";

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn history() -> NamedTempFile {
    temp_file(".csv", HISTORY_CSV)
}

fn config() -> AnalyticsConfig {
    AnalyticsConfig::embedded().unwrap()
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Groceries", 25), "Groceries");
    assert_eq!(truncate("A very long category name indeed", 10), "A very ...");
    assert_eq!(truncate("Café crème brûlée", 8), "Café ...");
}

#[test]
fn test_load_transactions_csv_and_json() {
    let csv = history();
    let txs = commands::load_transactions(csv.path()).unwrap();
    assert_eq!(txs.len(), 12);

    let json = temp_file(
        ".json",
        r#"[{"date": "2024-01-01", "amount": 10, "type": "income"}]"#,
    );
    let txs = commands::load_transactions(json.path()).unwrap();
    assert_eq!(txs.len(), 1);
    assert!(txs[0].is_income());
}

#[test]
fn test_load_transactions_errors() {
    assert!(commands::load_transactions(Path::new("/nonexistent/tx.csv")).is_err());

    let bad = temp_file(".csv", "date,amount\n2024-01-01,lots\n");
    let err = commands::load_transactions(bad.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Row 1"));
}

#[test]
fn test_load_config() {
    let cfg = commands::load_config(None).unwrap();
    assert!(cfg.anomaly.threshold > 0.0);

    let file = temp_file(".toml", "[anomaly]\nthreshold = 3.0\n");
    let cfg = commands::load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.anomaly.threshold, 3.0);

    assert!(commands::load_config(Some(Path::new("/nonexistent/analytics.toml"))).is_err());

    let invalid = temp_file(".toml", "[forecast]\nsmoothing_alpha = 2.0\n");
    assert!(commands::load_config(Some(invalid.path())).is_err());
}

#[test]
fn test_resolve_period() {
    let range = commands::resolve_period(None, Some("2024-01-01"), Some("2024-01-31")).unwrap();
    assert_eq!(range.start.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(range.end.date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

    assert!(commands::resolve_period(Some(Granularity::Monthly), None, None).is_ok());
    assert!(commands::resolve_period(None, Some("2024-01-01"), None).is_err());
    assert!(commands::resolve_period(None, Some("2024-02-01"), Some("2024-01-01")).is_err());
    assert!(commands::resolve_period(None, Some("01/02/2024"), Some("2024-03-01")).is_err());
}

#[test]
fn test_filter_category_is_case_insensitive() {
    let txs = commands::load_transactions(history().path()).unwrap();
    let groceries = commands::filter_category(txs.clone(), Some("groceries"));
    assert_eq!(groceries.len(), 4);
    assert_eq!(commands::filter_category(txs, None).len(), 12);
}

#[test]
fn test_expense_series() {
    let txs = commands::load_transactions(history().path()).unwrap();
    let (periods, series) = commands::expense_series(&txs, Granularity::Monthly);
    assert_eq!(periods, vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
    assert_eq!(series, vec![1800.0, 1820.0, 1840.0, 1860.0]);
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_summary() {
    let file = history();
    let range = commands::resolve_period(None, Some("2024-01-01"), Some("2024-02-29")).unwrap();
    assert!(commands::cmd_summary(file.path(), &range, false).is_ok());
    assert!(commands::cmd_summary(file.path(), &range, true).is_ok());

    let empty = commands::resolve_period(None, Some("2020-01-01"), Some("2020-01-31")).unwrap();
    assert!(commands::cmd_summary(file.path(), &empty, false).is_ok());
}

#[test]
fn test_cmd_trends() {
    let file = history();
    let cfg = config();
    assert!(commands::cmd_trends(file.path(), Granularity::Monthly, None, 3, &cfg, false).is_ok());
    assert!(
        commands::cmd_trends(file.path(), Granularity::Weekly, Some("Rent"), 2, &cfg, true).is_ok()
    );
    assert!(commands::cmd_trends(file.path(), Granularity::Monthly, None, 0, &cfg, false).is_err());
}

#[test]
fn test_cmd_forecast() {
    let file = history();
    let cfg = config();
    for method in [
        ForecastMethod::Linear,
        ForecastMethod::Exponential,
        ForecastMethod::Seasonal,
    ] {
        assert!(commands::cmd_forecast(
            file.path(),
            Granularity::Monthly,
            3,
            method,
            None,
            &cfg,
            false
        )
        .is_ok());
    }

    let too_far = cfg.forecast.max_horizon + 1;
    assert!(commands::cmd_forecast(
        file.path(),
        Granularity::Monthly,
        too_far,
        ForecastMethod::Linear,
        None,
        &cfg,
        true
    )
    .is_err());
}

#[test]
fn test_cmd_anomalies() {
    let file = history();
    assert!(commands::cmd_anomalies(file.path(), Granularity::Monthly, 2.0, false).is_ok());
    assert!(commands::cmd_anomalies(file.path(), Granularity::Monthly, 2.0, true).is_ok());
    assert!(commands::cmd_anomalies(file.path(), Granularity::Monthly, 0.0, false).is_err());
}

#[test]
fn test_cmd_cashflow_and_categories() {
    let file = history();
    let cfg = config();
    assert!(commands::cmd_cashflow(file.path(), Granularity::Quarterly, &cfg, false).is_ok());
    assert!(commands::cmd_cashflow(file.path(), Granularity::Monthly, &cfg, true).is_ok());
    assert!(commands::cmd_categories(file.path(), TransactionType::Expense, false).is_ok());
    assert!(commands::cmd_categories(file.path(), TransactionType::Income, true).is_ok());
}

#[test]
fn test_commands_handle_empty_history() {
    let file = temp_file(".csv", "date,amount\n");
    let cfg = config();
    assert!(commands::cmd_trends(file.path(), Granularity::Monthly, None, 3, &cfg, false).is_ok());
    assert!(commands::cmd_forecast(
        file.path(),
        Granularity::Monthly,
        3,
        ForecastMethod::Linear,
        None,
        &cfg,
        false
    )
    .is_ok());
    assert!(commands::cmd_anomalies(file.path(), Granularity::Monthly, 2.0, false).is_ok());
    assert!(commands::cmd_cashflow(file.path(), Granularity::Monthly, &cfg, false).is_ok());
    assert!(commands::cmd_categories(file.path(), TransactionType::Expense, false).is_ok());
    assert!(commands::cmd_insights(file.path(), 0.0, 0.0, None, None, &cfg, false).is_ok());
}

// ========== Health Command Tests ==========

#[test]
fn test_cmd_score() {
    let cfg = config();
    assert!(commands::cmd_score(5000.0, 4000.0, 500.0, 0.0, &cfg, false).is_ok());
    assert!(commands::cmd_score(0.0, 0.0, 0.0, 0.0, &cfg, true).is_ok());
    assert!(commands::cmd_score(f64::NAN, 0.0, 0.0, 0.0, &cfg, false).is_err());
}

#[test]
fn test_cmd_budget() {
    let cfg = config();
    let file = temp_file(".csv", "category,budgeted,spent\nRent,1500,1500\nFood,400,460\n");
    assert!(commands::cmd_budget(file.path(), &cfg, false).is_ok());
    assert!(commands::cmd_budget(file.path(), &cfg, true).is_ok());

    let missing = temp_file(".csv", "category,budgeted\nRent,1500\n");
    assert!(commands::cmd_budget(missing.path(), &cfg, false).is_err());
}

#[test]
fn test_cmd_invest() {
    let cfg = config();
    assert!(commands::cmd_invest(&[1000.0, 1050.0, 990.0, 1100.0], &cfg, false).is_ok());
    assert!(commands::cmd_invest(&[1000.0], &cfg, true).is_ok());
}

// ========== Goal Command Tests ==========

#[test]
fn test_cmd_goal_progress() {
    let date = NaiveDate::from_ymd_opt(2099, 12, 31).unwrap();
    assert!(commands::cmd_goal_progress("Car", 10000.0, 2500.0, date, 300.0, false).is_ok());
    assert!(commands::cmd_goal_progress("Car", 10000.0, 10000.0, date, 0.0, true).is_ok());
    assert!(commands::cmd_goal_progress("Car", 0.0, 0.0, date, 0.0, false).is_err());
}

#[test]
fn test_cmd_goal_timeline() {
    assert!(commands::cmd_goal_timeline(1000.0, 250.0, 4000.0, false).is_ok());
    assert!(commands::cmd_goal_timeline(5000.0, 0.0, 4000.0, false).is_ok());
    assert!(commands::cmd_goal_timeline(0.0, 0.0, 4000.0, true).is_ok());
}

#[test]
fn test_cmd_goal_overview() {
    let file = temp_file(
        ".json",
        r#"[
            {"name": "Vacation", "targetAmount": 3000, "savedAmount": 3000, "targetDate": "2099-06-01"},
            {"name": "Emergency fund", "targetAmount": 15000, "savedAmount": 4000, "targetDate": "2099-12-31"}
        ]"#,
    );
    assert!(commands::cmd_goal_overview(file.path(), false).is_ok());
    assert!(commands::cmd_goal_overview(file.path(), true).is_ok());

    let bad = temp_file(".json", r#"[{"name": "No target"}]"#);
    assert!(commands::cmd_goal_overview(bad.path(), false).is_err());
}

// ========== Insight Command Tests ==========

#[test]
fn test_insight_ratios_measure_fund_in_monthly_expenses() {
    let cfg = config();
    let txs = commands::load_transactions(history().path()).unwrap();
    let cash_flow =
        tally_core::analyze_cash_flow(&txs, Granularity::Monthly, &cfg.trend).unwrap();
    let ratios = tally_core::ratios_from_cash_flow(&cash_flow, 1000.0, 0.0, &cfg.scoring).unwrap();

    // Expenses average 1830 a month
    assert!((ratios.emergency_fund_months - 1000.0 / 1830.0).abs() < 1e-9);
    assert!(ratios.financial_health < 100);

    let recs = tally_core::generate_recommendations(
        &tally_core::RecommendationInput::new(&ratios).with_cash_flow(&cash_flow),
        &cfg.insights,
    );
    let categories: Vec<_> = recs.iter().map(|r| r.category).collect();
    assert!(categories.contains(&tally_core::insights::RecommendationCategory::EmergencyFund));
    assert!(!categories.contains(&tally_core::insights::RecommendationCategory::Investment));
}

#[test]
fn test_cmd_insights() {
    let file = history();
    let cfg = config();
    let budget = temp_file(".csv", "category,budgeted,spent\nGroceries,300,360\n");

    assert!(commands::cmd_insights(file.path(), 2000.0, 0.0, None, None, &cfg, false).is_ok());
    assert!(commands::cmd_insights(
        file.path(),
        2000.0,
        5000.0,
        Some(budget.path()),
        Some(10000.0),
        &cfg,
        true
    )
    .is_ok());
}
