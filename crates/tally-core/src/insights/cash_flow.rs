//! Cash Flow Insight
//!
//! Compares total income and expenses across the transaction set.

use crate::error::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind, Severity};

pub struct CashFlowInsight;

impl CashFlowInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CashFlowInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for CashFlowInsight {
    fn id(&self) -> InsightKind {
        InsightKind::CashFlow
    }

    fn name(&self) -> &'static str {
        "Cash Flow"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let income: f64 = ctx
            .transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let expenses: f64 = ctx
            .transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        if expenses > income {
            let deficit = expenses - income;
            return Ok(vec![Finding::new(
                InsightKind::CashFlow,
                "cashflow:deficit",
                Severity::Alert,
                "Spending Exceeds Income",
                format!(
                    "Expenses of ${:.2} exceed income of ${:.2} by ${:.2}",
                    expenses, income, deficit
                ),
            )
            .with_suggestion("Cut back on discretionary spending or find extra income")
            .with_data(serde_json::json!({
                "income": income,
                "expenses": expenses,
                "deficit": deficit,
            }))]);
        }

        if income <= 0.0 {
            return Ok(Vec::new());
        }

        let savings_rate = (income - expenses) / income * 100.0;
        if savings_rate >= ctx.config.insights.strong_savings_rate {
            return Ok(vec![Finding::new(
                InsightKind::CashFlow,
                "cashflow:strong_savings",
                Severity::Info,
                "Strong Savings Rate",
                format!("You kept {:.1}% of your income", savings_rate),
            )
            .with_data(serde_json::json!({
                "income": income,
                "expenses": expenses,
                "savingsRate": savings_rate,
            }))]);
        }

        Ok(Vec::new())
    }
}
