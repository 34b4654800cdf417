//! Domain models for Tally
//!
//! Every record here is an immutable value produced or consumed by a single
//! engine call. Field names are camelCase on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite_value, Error, Result};

/// Label used for transactions with no category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Infer the type from a signed amount (negative = expense)
    pub fn from_sign(amount: f64) -> Self {
        if amount < 0.0 {
            Self::Expense
        } else {
            Self::Income
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "credit" | "deposit" => Ok(Self::Income),
            "expense" | "debit" | "sale" | "payment" => Ok(Self::Expense),
            _ => Err(Error::Validation(format!(
                "Unknown transaction type: {} (valid: income, expense)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction
///
/// `transaction_type` is authoritative; `amount` is always a non-negative
/// magnitude once the record has gone through [`Transaction::new`] or
/// [`Transaction::normalized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        category: Option<&str>,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            date,
            amount: amount.abs(),
            category: category.map(str::to_string),
            transaction_type,
            description: None,
        }
    }

    pub fn income(date: NaiveDate, amount: f64, category: &str) -> Self {
        Self::new(date, amount, Some(category), TransactionType::Income)
    }

    pub fn expense(date: NaiveDate, amount: f64, category: &str) -> Self {
        Self::new(date, amount, Some(category), TransactionType::Expense)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate and coerce a record that arrived from outside (e.g. JSON)
    pub fn normalized(mut self) -> Result<Self> {
        ensure_finite_value(self.amount, "Transaction amount")?;
        self.amount = self.amount.abs();
        self.category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Ok(self)
    }

    /// Amount with sign derived from type (income positive, expense negative)
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Category name, falling back to "Uncategorized"
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }
}

/// Period granularity for keys, ranges and aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// How many of these periods make up a year
    pub fn periods_per_year(&self) -> f64 {
        match self {
            Self::Daily => 365.0,
            Self::Weekly => 52.0,
            Self::Monthly => 12.0,
            Self::Quarterly => 4.0,
            Self::Yearly => 1.0,
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(Error::Validation(format!(
                "Unknown granularity: {} (valid: daily, weekly, monthly, quarterly, yearly)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== Aggregation Models ==========

/// Transactions falling into one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationBucket {
    /// Period key, e.g. "2024-03" or "2024-W05"
    pub period: String,
    /// First calendar day of the period
    pub start: NaiveDate,
    pub items: Vec<Transaction>,
    pub count: usize,
    /// Sum of amounts regardless of type
    pub total: f64,
    pub income: f64,
    pub expenses: f64,
}

impl AggregationBucket {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Transactions sharing a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<Transaction>,
    pub count: usize,
    pub total: f64,
}

/// One row of a category share report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub transaction_count: usize,
    pub percentage: f64,
}

/// Category share report for one transaction type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub total: f64,
    pub categories: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    pub fn top_category(&self) -> Option<&CategoryShare> {
        self.categories.first()
    }
}

// ========== Trend Models ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trend summary of a numeric series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Change between first and last fitted values, in percent
    pub percentage: f64,
    /// Coefficient of variation, in percent
    pub volatility: f64,
    /// max(0, 100 - volatility)
    pub stability: f64,
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation between index and value
    pub correlation: f64,
}

impl TrendResult {
    /// Result used for series too short to fit
    pub fn flat() -> Self {
        Self {
            direction: TrendDirection::Stable,
            percentage: 0.0,
            volatility: 0.0,
            stability: 100.0,
            slope: 0.0,
            intercept: 0.0,
            correlation: 0.0,
        }
    }
}

// ========== Forecast Models ==========

/// Forecasting method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    Linear,
    Exponential,
    Seasonal,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Exponential => "exponential",
            Self::Seasonal => "seasonal",
        }
    }
}

impl std::str::FromStr for ForecastMethod {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "exponential" => Ok(Self::Exponential),
            "seasonal" => Ok(Self::Seasonal),
            _ => Err(Error::Validation(format!(
                "Unknown forecast method: {} (valid: linear, exponential, seasonal)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== Anomaly Models ==========

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyRecord {
    pub index: usize,
    pub value: f64,
    pub is_anomaly: bool,
    pub z_score: f64,
}

// ========== Scoring Models ==========

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRatios {
    pub savings_rate: f64,
    pub expense_ratio: f64,
    pub debt_to_income_ratio: f64,
    /// Income retained over the period (income - expenses)
    pub net_worth_growth: f64,
    pub emergency_fund_months: f64,
    /// Composite 0-100 score
    pub financial_health: u8,
}

/// Budgeted vs. actual spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub category: String,
    pub budgeted: f64,
    pub spent: f64,
}

impl BudgetCategory {
    pub fn new(category: impl Into<String>, budgeted: f64, spent: f64) -> Self {
        Self {
            category: category.into(),
            budgeted,
            spent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EfficiencyRating {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl EfficiencyRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for EfficiencyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEfficiency {
    pub utilization_rate: f64,
    pub accuracy_score: f64,
    pub over_budget_categories: usize,
    pub under_budget_categories: usize,
    pub efficiency_rating: EfficiencyRating,
    pub total_budgeted: f64,
    pub total_spent: f64,
}

// ========== Cash Flow Models ==========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowPeriod {
    pub period: String,
    pub income: f64,
    pub expenses: f64,
    pub net_flow: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowAnalysis {
    pub granularity: Granularity,
    pub periods: Vec<CashFlowPeriod>,
    pub trend: TrendResult,
    pub positive_periods: usize,
    pub negative_periods: usize,
    pub average_net_flow: f64,
    pub total_income: f64,
    pub total_expenses: f64,
}

/// Totals for a date range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
    pub savings_rate: f64,
    pub transaction_count: usize,
    pub average_transaction_amount: f64,
    pub daily_average: f64,
}

/// Expense change of one period against the previous one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodChange {
    pub period: String,
    pub expenses: f64,
    /// None for the first period or when the previous one had no expenses
    pub change_percent: Option<f64>,
}

// ========== Investment Models ==========

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentMetrics {
    pub total_return: f64,
    pub average_return: f64,
    pub annualized_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
}

// ========== Goal Models ==========

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub saved_amount: f64,
    pub target_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Completed,
    OnTrack,
    Behind,
    Overdue,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::OnTrack => "on_track",
            Self::Behind => "behind",
            Self::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub name: String,
    pub progress_percent: f64,
    pub remaining_amount: f64,
    pub months_remaining: f64,
    pub required_monthly_contribution: f64,
    pub projected_months_to_complete: Option<f64>,
    pub projected_completion_date: Option<NaiveDate>,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SavingsTimeline {
    /// Already at or past the target
    Achieved,
    /// No positive monthly contribution to project from
    #[serde(rename_all = "camelCase")]
    NoContribution { remaining_amount: f64 },
    #[serde(rename_all = "camelCase")]
    Projected {
        months_needed: f64,
        estimated_completion: NaiveDate,
        remaining_amount: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsOverview {
    pub total_goals: usize,
    pub completed: usize,
    pub total_target: f64,
    pub total_saved: f64,
    pub overall_progress: f64,
}
