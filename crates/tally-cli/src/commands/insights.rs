//! Insight and recommendation commands

use std::path::Path;

use anyhow::Result;
use serde_json::json;
use tally_core::{
    analyze_cash_flow, calculate_budget_efficiency, generate_insights, generate_recommendations,
    ratios_from_cash_flow, savings_plan, AnalyticsConfig, Granularity, Priority,
    RecommendationInput, SavingsPlan, Severity,
};
use tracing::info;

use super::{load_budget, load_transactions, print_json};

pub fn cmd_insights(
    file: &Path,
    savings: f64,
    debt: f64,
    budget_file: Option<&Path>,
    savings_goal: Option<f64>,
    config: &AnalyticsConfig,
    json: bool,
) -> Result<()> {
    let transactions = load_transactions(file)?;
    let findings = generate_insights(&transactions, config);

    let cash_flow = analyze_cash_flow(&transactions, Granularity::Monthly, &config.trend)?;
    let months = cash_flow.periods.len().max(1) as f64;
    let monthly_income = cash_flow.total_income / months;
    let monthly_expenses = cash_flow.total_expenses / months;

    let ratios = ratios_from_cash_flow(&cash_flow, savings, debt, &config.scoring)?;

    let budget = match budget_file {
        Some(path) => Some(calculate_budget_efficiency(&load_budget(path)?, &config.budget)?),
        None => None,
    };

    let mut input = RecommendationInput::new(&ratios).with_cash_flow(&cash_flow);
    if let Some(budget) = &budget {
        input = input.with_budget(budget);
    }
    let recommendations = generate_recommendations(&input, &config.insights);
    let plan = savings_plan(
        monthly_income,
        monthly_expenses,
        savings_goal.unwrap_or(0.0),
        &config.insights,
    )?;

    info!(
        findings = findings.len(),
        recommendations = recommendations.len(),
        "Generated insights"
    );

    if json {
        return print_json(&json!({
            "findings": findings,
            "ratios": ratios,
            "recommendations": recommendations,
            "savingsPlan": plan,
        }));
    }

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    if findings.is_empty() {
        println!("   ✓ Nothing unusual in this history.");
    }
    for finding in &findings {
        println!(
            "   {} {}",
            severity_icon(finding.severity),
            finding.title
        );
        println!("      {}", finding.message);
        if let Some(suggestion) = &finding.suggestion {
            println!("      → {}", suggestion);
        }
    }

    println!();
    println!(
        "📝 Recommendations (health score {}/100)",
        ratios.financial_health
    );
    println!("   ─────────────────────────────────────────────────────────────");
    if recommendations.is_empty() {
        println!("   ✓ No changes recommended.");
    }
    for rec in &recommendations {
        println!(
            "   [{}] {}: {}",
            priority_label(rec.priority),
            rec.category.as_str(),
            rec.title
        );
        println!("      {}", rec.message);
        for action in &rec.action_items {
            println!("      • {}", action);
        }
    }

    println!();
    println!("🏦 Savings Plan (monthly)");
    println!("   ─────────────────────────────────────────────────────────────");
    match plan {
        SavingsPlan::Deficit {
            shortfall,
            message,
            suggestion,
        } => {
            println!("   ⚠️  {} (short ${:.2})", message, shortfall);
            println!("      → {}", suggestion);
        }
        SavingsPlan::Surplus {
            monthly_surplus,
            current_savings_rate,
            tiers,
            months_to_goal,
        } => {
            println!(
                "   Surplus: ${:.2} ({:.1}% of income)",
                monthly_surplus, current_savings_rate
            );
            println!("   Conservative: ${:>10.2}", tiers.conservative);
            println!("   Standard:     ${:>10.2}", tiers.standard);
            println!("   Aggressive:   ${:>10.2}", tiers.aggressive);
            if let Some(months) = months_to_goal {
                println!("   Goal reached in {:.1} months at the current surplus", months);
            }
        }
    }

    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Alert => "🔴",
        Severity::Warning => "🟠",
        Severity::Attention => "🟡",
        Severity::Info => "🔵",
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MED ",
        Priority::Low => "LOW ",
    }
}
