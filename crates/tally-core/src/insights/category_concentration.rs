//! Category Concentration Insight
//!
//! Reports when one category takes a large share of all expenses.

use crate::aggregate::category_breakdown;
use crate::error::Result;
use crate::models::TransactionType;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind, Severity};

pub struct CategoryConcentrationInsight;

impl CategoryConcentrationInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CategoryConcentrationInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for CategoryConcentrationInsight {
    fn id(&self) -> InsightKind {
        InsightKind::CategoryConcentration
    }

    fn name(&self) -> &'static str {
        "Category Concentration"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let breakdown = category_breakdown(ctx.transactions, TransactionType::Expense);

        // A single category is trivially 100% and says nothing
        if breakdown.categories.len() < 2 {
            return Ok(Vec::new());
        }
        let Some(top) = breakdown.top_category() else {
            return Ok(Vec::new());
        };

        if top.percentage < ctx.config.insights.category_concentration_percent {
            return Ok(Vec::new());
        }

        let finding = Finding::new(
            InsightKind::CategoryConcentration,
            format!("concentration:{}", top.category.to_lowercase()),
            Severity::Attention,
            "Spending Concentrated in One Category",
            format!(
                "{} accounts for {:.1}% of your expenses (${:.2} of ${:.2})",
                top.category, top.percentage, top.amount, breakdown.total
            ),
        )
        .with_suggestion(format!(
            "Check whether {} spending can be reduced or spread out",
            top.category
        ))
        .with_data(serde_json::json!({
            "category": top.category,
            "amount": top.amount,
            "percentage": top.percentage,
            "totalExpenses": breakdown.total,
        }));

        Ok(vec![finding])
    }
}
