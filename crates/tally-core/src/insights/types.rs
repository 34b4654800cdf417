//! Core types for insights and recommendations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Analyzer that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Unusually large income worth putting to work
    IncomeOpportunity,
    /// Month-over-month direction of expenses
    SpendingTrend,
    /// Months whose spending sits far from the norm
    SpendingAnomaly,
    /// Income versus expenses over the whole history
    CashFlow,
    /// A single category dominating expenses
    CategoryConcentration,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::IncomeOpportunity => "income_opportunity",
            InsightKind::SpendingTrend => "spending_trend",
            InsightKind::SpendingAnomaly => "spending_anomaly",
            InsightKind::CashFlow => "cash_flow",
            InsightKind::CategoryConcentration => "category_concentration",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income_opportunity" => Ok(InsightKind::IncomeOpportunity),
            "spending_trend" => Ok(InsightKind::SpendingTrend),
            "spending_anomaly" => Ok(InsightKind::SpendingAnomaly),
            "cash_flow" => Ok(InsightKind::CashFlow),
            "category_concentration" => Ok(InsightKind::CategoryConcentration),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Attention => 2,
            Severity::Warning => 3,
            Severity::Alert => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "attention" => Ok(Severity::Attention),
            "warning" => Ok(Severity::Warning),
            "alert" => Ok(Severity::Alert),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A finding produced by an insight analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub kind: InsightKind,
    /// Stable key for deduplication (e.g., "anomaly:spending:2024-03")
    pub key: String,
    pub severity: Severity,
    /// Short title (e.g., "Spending Is Rising")
    pub title: String,
    /// One sentence with the numbers already filled in
    pub message: String,
    /// Whether the user has something concrete to do
    pub actionable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Analyzer-specific structured data
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Finding {
    pub fn new(
        kind: InsightKind,
        key: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            severity,
            title: title.into(),
            message: message.into(),
            actionable: false,
            suggestion: None,
            data: serde_json::Value::Null,
        }
    }

    /// Attach a suggestion, which makes the finding actionable
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self.actionable = true;
        self
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort rank (lower comes first)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Area of finances a recommendation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Savings,
    Spending,
    Debt,
    EmergencyFund,
    Budget,
    CashFlow,
    Investment,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::Savings => "savings",
            RecommendationCategory::Spending => "spending",
            RecommendationCategory::Debt => "debt",
            RecommendationCategory::EmergencyFund => "emergency_fund",
            RecommendationCategory::Budget => "budget",
            RecommendationCategory::CashFlow => "cash_flow",
            RecommendationCategory::Investment => "investment",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    pub action_items: Vec<String>,
}

impl Recommendation {
    pub fn new(
        category: RecommendationCategory,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            priority,
            title: title.into(),
            message: message.into(),
            action_items: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action_items.push(action.into());
        self
    }
}

/// Monthly savings amounts at three levels of ambition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsTiers {
    pub conservative: f64,
    pub standard: f64,
    pub aggressive: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SavingsPlan {
    /// Expenses meet or exceed income; nothing left to save
    #[serde(rename_all = "camelCase")]
    Deficit {
        shortfall: f64,
        message: String,
        suggestion: String,
    },
    #[serde(rename_all = "camelCase")]
    Surplus {
        monthly_surplus: f64,
        current_savings_rate: f64,
        tiers: SavingsTiers,
        /// None when there is no goal to reach
        months_to_goal: Option<f64>,
    },
}
