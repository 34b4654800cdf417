//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Understand where your money goes and where it's heading
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance analytics and forecasting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analytics config file (TOML)
    ///
    /// Defaults to the override file in the platform data directory, then
    /// to the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Income, expenses and savings for a date range
    Summary {
        /// Transaction file (CSV or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Current period: daily, weekly, monthly, quarterly, yearly (default: last 30 days)
        #[arg(long)]
        period: Option<String>,

        /// Custom start date (YYYY-MM-DD) - use with --to
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD) - use with --from
        #[arg(long)]
        to: Option<String>,
    },

    /// Expense trend per period, with moving average
    Trends {
        /// Transaction file (CSV or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Granularity: daily, weekly, monthly, quarterly, yearly
        #[arg(long, default_value = "monthly")]
        period: String,

        /// Only include this category
        #[arg(long)]
        category: Option<String>,

        /// Moving-average window (periods)
        #[arg(long, default_value = "3")]
        window: usize,
    },

    /// Forecast future expenses per period
    Forecast {
        /// Transaction file (CSV or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Granularity: daily, weekly, monthly, quarterly, yearly
        #[arg(long, default_value = "monthly")]
        period: String,

        /// Number of periods to forecast
        #[arg(long, default_value = "6")]
        horizon: usize,

        /// Method: linear, exponential, seasonal
        #[arg(short, long, default_value = "linear")]
        method: String,

        /// Only include this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Flag periods with unusual spending
    Anomalies {
        /// Transaction file (CSV or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Granularity: daily, weekly, monthly, quarterly, yearly
        #[arg(long, default_value = "monthly")]
        period: String,

        /// Z-score threshold (defaults to the configured value)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Income vs expenses per period
    Cashflow {
        /// Transaction file (CSV or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Granularity: daily, weekly, monthly, quarterly, yearly
        #[arg(long, default_value = "monthly")]
        period: String,
    },

    /// Totals and shares by category
    Categories {
        /// Transaction file (CSV or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Transaction type: expense or income
        #[arg(long = "type", default_value = "expense")]
        kind: String,
    },

    /// Financial ratios and health score
    Score {
        /// Income for the period
        #[arg(long)]
        income: f64,

        /// Expenses for the period
        #[arg(long)]
        expenses: f64,

        /// Savings on hand
        #[arg(long, default_value = "0")]
        savings: f64,

        /// Outstanding debt
        #[arg(long, default_value = "0")]
        debt: f64,
    },

    /// Budget efficiency from a budget CSV (category, budgeted, spent)
    Budget {
        /// Budget CSV file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Return and risk metrics for a series of portfolio values
    Invest {
        /// Portfolio values, oldest first (comma-separated)
        #[arg(required = true, value_delimiter = ',')]
        values: Vec<f64>,
    },

    /// Savings goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Insights, recommendations and a savings plan
    Insights {
        /// Transaction file (CSV or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Savings on hand (for ratios and recommendations)
        #[arg(long, default_value = "0")]
        savings: f64,

        /// Outstanding debt
        #[arg(long, default_value = "0")]
        debt: f64,

        /// Budget CSV to include budget recommendations
        #[arg(long)]
        budget: Option<PathBuf>,

        /// Savings goal for the savings plan
        #[arg(long)]
        goal: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Progress toward a single goal
    Progress {
        /// Goal name
        #[arg(long, default_value = "Goal")]
        name: String,

        /// Target amount
        #[arg(long)]
        target: f64,

        /// Amount saved so far
        #[arg(long, default_value = "0")]
        saved: f64,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Planned monthly contribution
        #[arg(long, default_value = "0")]
        monthly: f64,
    },

    /// When a savings target will be reached
    Timeline {
        /// Current savings
        #[arg(long, default_value = "0")]
        current: f64,

        /// Monthly contribution
        #[arg(long)]
        monthly: f64,

        /// Savings target
        #[arg(long)]
        target: f64,
    },

    /// Combined progress across goals in a JSON file
    Overview {
        /// JSON array of goals (name, targetAmount, savedAmount, targetDate)
        #[arg(short, long)]
        file: PathBuf,
    },
}
