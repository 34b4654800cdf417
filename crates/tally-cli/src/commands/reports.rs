//! Report command implementations

use std::path::Path;

use anyhow::Result;
use serde_json::json;
use tally_core::{
    aggregate_by_period, analyze_cash_flow, calculate_moving_average, calculate_trends,
    category_breakdown, detect_anomalies, generate_forecast, period_over_period_changes,
    summarize_period, AnalyticsConfig, DateRange, ForecastMethod, Granularity, TransactionType,
};

use super::{expense_series, filter_category, load_transactions, print_json, truncate};

pub fn cmd_summary(file: &Path, range: &DateRange, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let summary = summarize_period(&transactions, range);

    if json {
        return print_json(&json!({ "range": range, "summary": summary }));
    }

    println!();
    println!("📊 Period Summary");
    println!(
        "   Period: {} to {}",
        range.start.date(),
        range.end.date()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if summary.transaction_count == 0 {
        println!("   No transactions found in this period.");
        return Ok(());
    }

    println!("   Income:        ${:>12.2}", summary.total_income);
    println!("   Expenses:      ${:>12.2}", summary.total_expenses);
    println!("   Net savings:   ${:>12.2}", summary.net_savings);
    println!("   Savings rate:   {:>12.1}%", summary.savings_rate);
    println!();
    println!("   Transactions:   {:>12}", summary.transaction_count);
    println!("   Avg amount:    ${:>12.2}", summary.average_transaction_amount);
    println!("   Daily spend:   ${:>12.2}", summary.daily_average);

    Ok(())
}

pub fn cmd_trends(
    file: &Path,
    granularity: Granularity,
    category: Option<&str>,
    window: usize,
    config: &AnalyticsConfig,
    json: bool,
) -> Result<()> {
    let transactions = filter_category(load_transactions(file)?, category);
    let buckets = aggregate_by_period(&transactions, granularity);
    let series: Vec<f64> = buckets.iter().map(|b| b.expenses).collect();

    let trend = calculate_trends(&series, &config.trend)?;
    let moving = calculate_moving_average(&series, window)?;
    let changes = period_over_period_changes(&buckets);

    if json {
        let periods: Vec<_> = changes
            .iter()
            .zip(&moving)
            .map(|(change, avg)| {
                json!({
                    "period": change.period,
                    "expenses": change.expenses,
                    "movingAverage": avg,
                    "changePercent": change.change_percent,
                })
            })
            .collect();
        return print_json(&json!({ "trend": trend, "periods": periods }));
    }

    println!();
    println!(
        "📈 Spending Trends ({}{})",
        granularity,
        category.map(|c| format!(", {}", c)).unwrap_or_default()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if changes.is_empty() {
        println!("   No expenses found.");
        return Ok(());
    }

    println!(
        "   {:12} │ {:>12} │ {:>12} │ {:>8}",
        "Period", "Expenses", "Avg", "Change"
    );
    println!("   ─────────────┼──────────────┼──────────────┼─────────");
    for (change, avg) in changes.iter().zip(&moving) {
        let pct = change
            .change_percent
            .map(|p| format!("{:+.1}%", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:12} │ {:>12.2} │ {:>12.2} │ {:>8}",
            change.period, change.expenses, avg, pct
        );
    }

    println!();
    println!(
        "   Direction: {} ({:+.1}%)",
        trend.direction, trend.percentage
    );
    println!(
        "   Volatility: {:.1}%   Stability: {:.1}%   Fit r: {:.2}",
        trend.volatility, trend.stability, trend.correlation
    );

    Ok(())
}

pub fn cmd_forecast(
    file: &Path,
    granularity: Granularity,
    horizon: usize,
    method: ForecastMethod,
    category: Option<&str>,
    config: &AnalyticsConfig,
    json: bool,
) -> Result<()> {
    let transactions = filter_category(load_transactions(file)?, category);
    let (periods, series) = expense_series(&transactions, granularity);
    let forecast = generate_forecast(&series, horizon, method, &config.forecast)?;

    if json {
        return print_json(&json!({
            "method": method,
            "granularity": granularity,
            "history": periods.iter().zip(&series).map(|(p, v)| json!({ "period": p, "expenses": v })).collect::<Vec<_>>(),
            "forecast": forecast,
        }));
    }

    println!();
    println!("🔮 Expense Forecast ({}, {})", method, granularity);
    println!("   ─────────────────────────────────────────────────────────────");

    if series.is_empty() {
        println!("   No expense history to forecast from.");
        return Ok(());
    }

    let last = periods.last().map(String::as_str).unwrap_or("-");
    println!(
        "   History: {} periods through {}",
        series.len(),
        last
    );
    println!();
    println!("   {:>6} │ {:>12}", "Step", "Expenses");
    println!("   ───────┼─────────────");
    for (i, value) in forecast.iter().enumerate() {
        println!("   {:>6} │ {:>12.2}", format!("+{}", i + 1), value);
    }
    println!();
    println!("   Total forecast: ${:.2}", forecast.iter().sum::<f64>());

    Ok(())
}

pub fn cmd_anomalies(
    file: &Path,
    granularity: Granularity,
    threshold: f64,
    json: bool,
) -> Result<()> {
    let transactions = load_transactions(file)?;
    let (periods, series) = expense_series(&transactions, granularity);
    let records = detect_anomalies(&series, threshold)?;

    if json {
        let rows: Vec<_> = periods
            .iter()
            .zip(&records)
            .map(|(period, r)| json!({ "period": period, "record": r }))
            .collect();
        return print_json(&json!({ "threshold": threshold, "periods": rows }));
    }

    let flagged: Vec<_> = periods
        .iter()
        .zip(&records)
        .filter(|(_, r)| r.is_anomaly)
        .collect();

    println!();
    println!("🚨 Spending Anomalies ({}, threshold {:.1})", granularity, threshold);
    println!("   ─────────────────────────────────────────────────────────────");

    if flagged.is_empty() {
        println!("   ✓ No unusual periods across {} periods.", records.len());
        return Ok(());
    }

    println!("   {:12} │ {:>12} │ {:>8}", "Period", "Expenses", "Z-score");
    println!("   ─────────────┼──────────────┼─────────");
    for (period, record) in flagged {
        println!(
            "   {:12} │ {:>12.2} │ {:>+8.2}",
            period, record.value, record.z_score
        );
    }

    Ok(())
}

pub fn cmd_cashflow(
    file: &Path,
    granularity: Granularity,
    config: &AnalyticsConfig,
    json: bool,
) -> Result<()> {
    let transactions = load_transactions(file)?;
    let analysis = analyze_cash_flow(&transactions, granularity, &config.trend)?;

    if json {
        return print_json(&analysis);
    }

    println!();
    println!("💵 Cash Flow ({})", granularity);
    println!("   ─────────────────────────────────────────────────────────────");

    if analysis.periods.is_empty() {
        println!("   No transactions found.");
        return Ok(());
    }

    println!(
        "   {:12} │ {:>12} │ {:>12} │ {:>12}",
        "Period", "Income", "Expenses", "Net"
    );
    println!("   ─────────────┼──────────────┼──────────────┼─────────────");
    for p in &analysis.periods {
        let net = if p.net_flow < 0.0 {
            format!("\x1b[31m{:>12.2}\x1b[0m", p.net_flow)
        } else {
            format!("{:>12.2}", p.net_flow)
        };
        println!(
            "   {:12} │ {:>12.2} │ {:>12.2} │ {}",
            p.period, p.income, p.expenses, net
        );
    }

    println!();
    println!(
        "   Positive periods: {}   Negative periods: {}",
        analysis.positive_periods, analysis.negative_periods
    );
    println!("   Average net flow: ${:.2}", analysis.average_net_flow);
    println!("   Trend: {}", analysis.trend.direction);

    Ok(())
}

pub fn cmd_categories(file: &Path, transaction_type: TransactionType, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let breakdown = category_breakdown(&transactions, transaction_type);

    if json {
        return print_json(&breakdown);
    }

    println!();
    println!("🏷️  {} by Category", capitalize(transaction_type.as_str()));
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.categories.is_empty() {
        println!("   No {} transactions found.", transaction_type);
        return Ok(());
    }

    println!("   Total: ${:.2}", breakdown.total);
    println!();
    println!(
        "   {:25} │ {:>10} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼────────────┼────────┼───────");
    for share in &breakdown.categories {
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            truncate(&share.category, 25),
            share.amount,
            share.percentage,
            share.transaction_count
        );
    }

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
