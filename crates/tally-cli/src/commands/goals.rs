//! Savings goal commands

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::{
    goal_progress, goals_overview, savings_timeline, Goal, GoalStatus, SavingsTimeline,
};

use super::{print_json, truncate};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn cmd_goal_progress(
    name: &str,
    target: f64,
    saved: f64,
    target_date: NaiveDate,
    monthly: f64,
    json: bool,
) -> Result<()> {
    let goal = Goal {
        name: name.to_string(),
        target_amount: target,
        saved_amount: saved,
        target_date,
    };
    let progress = goal_progress(&goal, monthly, today())?;

    if json {
        return print_json(&progress);
    }

    println!();
    println!("🎯 {}", progress.name);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Saved ${:.2} of ${:.2} ({:.1}%)",
        saved, target, progress.progress_percent
    );
    println!("   Status: {}", progress.status);
    println!();
    println!("   Remaining:            ${:.2}", progress.remaining_amount);
    println!(
        "   Months to target:      {:.1} (by {})",
        progress.months_remaining, target_date
    );
    println!(
        "   Needed per month:     ${:.2}",
        progress.required_monthly_contribution
    );
    match (
        progress.projected_months_to_complete,
        progress.projected_completion_date,
    ) {
        _ if progress.status == GoalStatus::Completed => println!("   ✓ Goal reached."),
        (Some(months), Some(date)) => println!(
            "   At ${:.2}/month:      done in {:.1} months ({})",
            monthly, months, date
        ),
        _ => println!("   No monthly contribution to project from."),
    }

    Ok(())
}

pub fn cmd_goal_timeline(current: f64, monthly: f64, target: f64, json: bool) -> Result<()> {
    let timeline = savings_timeline(current, monthly, target, today())?;

    if json {
        return print_json(&timeline);
    }

    println!();
    println!("⏱️  Savings Timeline");
    println!("   ─────────────────────────────────────────────────────────────");
    match timeline {
        SavingsTimeline::Achieved => {
            println!("   ✓ Target of ${:.2} already reached.", target);
        }
        SavingsTimeline::NoContribution { remaining_amount } => {
            println!(
                "   ${:.2} still to go, but no monthly contribution is planned.",
                remaining_amount
            );
        }
        SavingsTimeline::Projected {
            months_needed,
            estimated_completion,
            remaining_amount,
        } => {
            println!("   Remaining:   ${:.2}", remaining_amount);
            println!("   Months:      {:.1}", months_needed);
            println!("   Reached by:  {}", estimated_completion);
        }
    }

    Ok(())
}

pub fn cmd_goal_overview(file: &Path, json: bool) -> Result<()> {
    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let goals: Vec<Goal> = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to read goals from {}", file.display()))?;

    let overview = goals_overview(&goals);
    let today = today();
    let progress = goals
        .iter()
        .map(|g| goal_progress(g, 0.0, today))
        .collect::<tally_core::Result<Vec<_>>>()?;

    if json {
        return print_json(&serde_json::json!({
            "overview": overview,
            "goals": progress,
        }));
    }

    println!();
    println!("🎯 Goals Overview");
    println!("   ─────────────────────────────────────────────────────────────");

    if goals.is_empty() {
        println!("   No goals found.");
        return Ok(());
    }

    println!(
        "   {:25} │ {:>7} │ {:>12} │ {:10}",
        "Goal", "Done", "Per month", "Status"
    );
    println!("   ──────────────────────────┼─────────┼──────────────┼───────────");
    for p in &progress {
        println!(
            "   {:25} │ {:>6.1}% │ {:>12.2} │ {:10}",
            truncate(&p.name, 25),
            p.progress_percent,
            p.required_monthly_contribution,
            p.status.as_str()
        );
    }

    println!();
    println!(
        "   {}/{} completed   ${:.2} of ${:.2} saved ({:.1}%)",
        overview.completed,
        overview.total_goals,
        overview.total_saved,
        overview.total_target,
        overview.overall_progress
    );

    Ok(())
}
