//! Tally CLI - Personal finance analytics
//!
//! Usage:
//!   tally summary --file tx.csv                 Income/expenses for the last 30 days
//!   tally trends --file tx.csv --period weekly  Expense trend per week
//!   tally forecast --file tx.csv --horizon 6    Forecast monthly expenses
//!   tally insights --file tx.csv                Findings and recommendations

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use tally_core::{ForecastMethod, Granularity, TransactionType};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Summary {
            file,
            period,
            from,
            to,
        } => {
            let granularity = period
                .as_deref()
                .map(parse_granularity)
                .transpose()?;
            let range = commands::resolve_period(granularity, from.as_deref(), to.as_deref())?;
            commands::cmd_summary(&file, &range, json)
        }
        Commands::Trends {
            file,
            period,
            category,
            window,
        } => commands::cmd_trends(
            &file,
            parse_granularity(&period)?,
            category.as_deref(),
            window,
            &config,
            json,
        ),
        Commands::Forecast {
            file,
            period,
            horizon,
            method,
            category,
        } => {
            let method: ForecastMethod = method
                .parse()
                .context("Invalid --method")?;
            commands::cmd_forecast(
                &file,
                parse_granularity(&period)?,
                horizon,
                method,
                category.as_deref(),
                &config,
                json,
            )
        }
        Commands::Anomalies {
            file,
            period,
            threshold,
        } => commands::cmd_anomalies(
            &file,
            parse_granularity(&period)?,
            threshold.unwrap_or(config.anomaly.threshold),
            json,
        ),
        Commands::Cashflow { file, period } => {
            commands::cmd_cashflow(&file, parse_granularity(&period)?, &config, json)
        }
        Commands::Categories { file, kind } => {
            let kind: TransactionType = kind.parse().context("Invalid --type")?;
            commands::cmd_categories(&file, kind, json)
        }
        Commands::Score {
            income,
            expenses,
            savings,
            debt,
        } => commands::cmd_score(income, expenses, savings, debt, &config, json),
        Commands::Budget { file } => commands::cmd_budget(&file, &config, json),
        Commands::Invest { values } => commands::cmd_invest(&values, &config, json),
        Commands::Goal { action } => match action {
            GoalAction::Progress {
                name,
                target,
                saved,
                date,
                monthly,
            } => {
                let target_date = commands::parse_cli_date(&date, "--date")?;
                commands::cmd_goal_progress(&name, target, saved, target_date, monthly, json)
            }
            GoalAction::Timeline {
                current,
                monthly,
                target,
            } => commands::cmd_goal_timeline(current, monthly, target, json),
            GoalAction::Overview { file } => commands::cmd_goal_overview(&file, json),
        },
        Commands::Insights {
            file,
            savings,
            debt,
            budget,
            goal,
        } => commands::cmd_insights(&file, savings, debt, budget.as_deref(), goal, &config, json),
    }
}

fn parse_granularity(s: &str) -> Result<Granularity> {
    s.parse().context("Invalid --period")
}
