//! Insight Engine - Proactive Financial Insights
//!
//! A pluggable set of analyzers that look over a transaction history and
//! surface what is interesting, actionable, or concerning.
//!
//! ## Built-in Insights
//!
//! - **Income Opportunity** - Unusually large income (bonus, refund)
//! - **Spending Trend** - Monthly expenses clearly rising or falling
//! - **Spending Anomaly** - Months far from typical spending
//! - **Cash Flow** - Deficit alert or strong savings rate
//! - **Category Concentration** - One category dominating expenses
//!
//! Recommendations are separate: [`generate_recommendations`] turns ratios,
//! budget efficiency and cash-flow results into prioritized advice.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::new(&transactions, &config);
//! let findings = engine.analyze_all(&ctx);
//! ```

pub mod cash_flow;
pub mod category_concentration;
pub mod engine;
pub mod income_opportunity;
pub mod recommendations;
pub mod spending_anomaly;
pub mod spending_trend;
pub mod types;

pub use cash_flow::CashFlowInsight;
pub use category_concentration::CategoryConcentrationInsight;
pub use engine::{generate_insights, AnalysisContext, Insight, InsightEngine};
pub use income_opportunity::IncomeOpportunityInsight;
pub use recommendations::{generate_recommendations, savings_plan, RecommendationInput};
pub use spending_anomaly::SpendingAnomalyInsight;
pub use spending_trend::SpendingTrendInsight;
pub use types::{
    Finding, InsightKind, Priority, Recommendation, RecommendationCategory, SavingsPlan,
    SavingsTiers, Severity,
};
