//! Savings goal tracking and projections

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::{ensure_finite_value, Error, Result};
use crate::models::{Goal, GoalProgress, GoalStatus, GoalsOverview, SavingsTimeline};

/// Average days per month used to turn day counts into months and back
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Progress toward a goal and what it takes to reach it on time
pub fn goal_progress(
    goal: &Goal,
    monthly_contribution: f64,
    today: NaiveDate,
) -> Result<GoalProgress> {
    ensure_finite_value(goal.target_amount, "Goal target")?;
    ensure_finite_value(goal.saved_amount, "Goal saved amount")?;
    ensure_finite_value(monthly_contribution, "Monthly contribution")?;
    if goal.target_amount <= 0.0 {
        return Err(Error::validation(format!(
            "Goal '{}' needs a positive target amount",
            goal.name
        )));
    }

    let remaining_amount = (goal.target_amount - goal.saved_amount).max(0.0);
    let progress_percent = (goal.saved_amount / goal.target_amount * 100.0).clamp(0.0, 100.0);

    let days_left = (goal.target_date - today).num_days();
    let months_remaining = (days_left as f64 / DAYS_PER_MONTH).max(0.0);

    let required_monthly_contribution = if months_remaining > 0.0 {
        remaining_amount / months_remaining
    } else {
        remaining_amount
    };

    let projected_months_to_complete = if remaining_amount <= 0.0 {
        Some(0.0)
    } else if monthly_contribution > 0.0 {
        Some(remaining_amount / monthly_contribution)
    } else {
        None
    };
    let projected_completion_date =
        projected_months_to_complete.and_then(|months| add_months(today, months));

    let status = if remaining_amount <= 0.0 {
        GoalStatus::Completed
    } else if days_left < 0 {
        GoalStatus::Overdue
    } else if monthly_contribution >= required_monthly_contribution {
        GoalStatus::OnTrack
    } else {
        GoalStatus::Behind
    };

    debug!(goal = %goal.name, status = status.as_str(), "Evaluated goal progress");

    Ok(GoalProgress {
        name: goal.name.clone(),
        progress_percent,
        remaining_amount,
        months_remaining,
        required_monthly_contribution,
        projected_months_to_complete,
        projected_completion_date,
        status,
    })
}

/// When `target` is reached from `current` saving `monthly` per month
pub fn savings_timeline(
    current: f64,
    monthly: f64,
    target: f64,
    today: NaiveDate,
) -> Result<SavingsTimeline> {
    ensure_finite_value(current, "Current savings")?;
    ensure_finite_value(monthly, "Monthly savings")?;
    ensure_finite_value(target, "Savings target")?;

    let remaining_amount = target - current;
    if remaining_amount <= 0.0 {
        return Ok(SavingsTimeline::Achieved);
    }
    if monthly <= 0.0 {
        return Ok(SavingsTimeline::NoContribution { remaining_amount });
    }

    let months_needed = remaining_amount / monthly;
    let estimated_completion = add_months(today, months_needed).ok_or_else(|| {
        Error::validation(format!(
            "Savings timeline of {:.1} months is out of range",
            months_needed
        ))
    })?;

    Ok(SavingsTimeline::Projected {
        months_needed,
        estimated_completion,
        remaining_amount,
    })
}

/// Totals across a set of goals
pub fn goals_overview(goals: &[Goal]) -> GoalsOverview {
    let total_target: f64 = goals.iter().map(|g| g.target_amount).sum();
    let total_saved: f64 = goals.iter().map(|g| g.saved_amount).sum();

    GoalsOverview {
        total_goals: goals.len(),
        completed: goals
            .iter()
            .filter(|g| g.target_amount > 0.0 && g.saved_amount >= g.target_amount)
            .count(),
        total_target,
        total_saved,
        overall_progress: if total_target > 0.0 {
            total_saved / total_target * 100.0
        } else {
            0.0
        },
    }
}

fn add_months(from: NaiveDate, months: f64) -> Option<NaiveDate> {
    let days = (months * DAYS_PER_MONTH).round();
    if !days.is_finite() || days.abs() > i32::MAX as f64 {
        return None;
    }
    from.checked_add_signed(Duration::days(days as i64))
}
