//! Financial health, budget and investment commands

use std::path::Path;

use anyhow::Result;
use tally_core::{
    calculate_budget_efficiency, calculate_financial_ratios, calculate_investment_metrics,
    scoring::MAX_HEALTH_SCORE, AnalyticsConfig, BudgetEfficiency, FinancialRatios,
};

use super::{load_budget, print_json, truncate};

pub fn cmd_score(
    income: f64,
    expenses: f64,
    savings: f64,
    debt: f64,
    config: &AnalyticsConfig,
    json: bool,
) -> Result<()> {
    let ratios = calculate_financial_ratios(income, expenses, savings, debt, &config.scoring)?;

    if json {
        return print_json(&ratios);
    }

    print_ratios(&ratios);
    Ok(())
}

fn print_ratios(ratios: &FinancialRatios) {
    println!();
    println!(
        "❤️  Financial Health: {}/{} {}",
        ratios.financial_health,
        MAX_HEALTH_SCORE,
        health_bar(ratios.financial_health)
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Savings rate:        {:>8.1}%", ratios.savings_rate);
    println!("   Expense ratio:       {:>8.1}%", ratios.expense_ratio);
    println!("   Debt-to-income:      {:>8.1}%", ratios.debt_to_income_ratio);
    println!(
        "   Emergency fund:      {:>8.1} months",
        ratios.emergency_fund_months
    );
}

fn health_bar(score: u8) -> String {
    let filled = (score as usize).div_ceil(10).min(10);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(10 - filled))
}

pub fn cmd_budget(file: &Path, config: &AnalyticsConfig, json: bool) -> Result<()> {
    let categories = load_budget(file)?;
    let efficiency = calculate_budget_efficiency(&categories, &config.budget)?;

    if json {
        return print_json(&serde_json::json!({
            "efficiency": efficiency,
            "categories": categories,
        }));
    }

    println!();
    println!("📋 Budget Efficiency");
    println!("   ─────────────────────────────────────────────────────────────");

    if categories.is_empty() {
        println!("   No budget categories found.");
        return Ok(());
    }

    println!(
        "   {:25} │ {:>10} │ {:>10} │ {:>7}",
        "Category", "Budgeted", "Spent", "Used"
    );
    println!("   ──────────────────────────┼────────────┼────────────┼────────");
    for cat in &categories {
        let used = if cat.budgeted > 0.0 {
            format!("{:.0}%", cat.spent / cat.budgeted * 100.0)
        } else {
            "-".to_string()
        };
        let marker = if cat.spent > cat.budgeted { " ⚠️" } else { "" };
        println!(
            "   {:25} │ {:>10.2} │ {:>10.2} │ {:>7}{}",
            truncate(&cat.category, 25),
            cat.budgeted,
            cat.spent,
            used,
            marker
        );
    }

    println!();
    print_efficiency(&efficiency);
    Ok(())
}

fn print_efficiency(efficiency: &BudgetEfficiency) {
    println!(
        "   Total: ${:.2} spent of ${:.2} budgeted",
        efficiency.total_spent, efficiency.total_budgeted
    );
    println!(
        "   Utilization: {:.1}%   Accuracy: {:.1}%",
        efficiency.utilization_rate, efficiency.accuracy_score
    );
    println!(
        "   Over budget: {}   Well under budget: {}",
        efficiency.over_budget_categories, efficiency.under_budget_categories
    );
    println!("   Rating: {}", efficiency.efficiency_rating);
}

pub fn cmd_invest(values: &[f64], config: &AnalyticsConfig, json: bool) -> Result<()> {
    let metrics = calculate_investment_metrics(values, &config.investment)?;

    if json {
        return print_json(&metrics);
    }

    println!();
    println!("💹 Investment Performance ({} values)", values.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if values.len() < 2 {
        println!("   Need at least two values to measure returns.");
        return Ok(());
    }

    println!("   Total return:        {:>8.2}%", metrics.total_return);
    println!("   Average return:      {:>8.2}%", metrics.average_return);
    println!("   Annualized return:   {:>8.2}%", metrics.annualized_return);
    println!("   Volatility:          {:>8.2}%", metrics.volatility);
    println!("   Sharpe ratio:        {:>8.2}", metrics.sharpe_ratio);
    println!("   Max drawdown:        {:>8.2}%", metrics.max_drawdown);

    Ok(())
}
