//! Income Opportunity Insight
//!
//! Flags income transactions well above the average income, such as a bonus
//! or a tax refund, which are a chance to boost savings.

use crate::error::Result;
use crate::trend::mean;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind, Severity};

pub struct IncomeOpportunityInsight;

impl IncomeOpportunityInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IncomeOpportunityInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for IncomeOpportunityInsight {
    fn id(&self) -> InsightKind {
        InsightKind::IncomeOpportunity
    }

    fn name(&self) -> &'static str {
        "Income Opportunity"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let incomes: Vec<_> = ctx.transactions.iter().filter(|t| t.is_income()).collect();
        let amounts: Vec<f64> = incomes.iter().map(|t| t.amount).collect();
        let average = mean(&amounts);
        if average <= 0.0 {
            return Ok(Vec::new());
        }

        let cutoff = average * ctx.config.insights.large_income_multiple;
        let mut findings = Vec::new();

        for (index, tx) in incomes.iter().enumerate() {
            if tx.amount <= cutoff {
                continue;
            }

            let key = format!("opportunity:income:{}:{}", tx.date, index);
            let finding = Finding::new(
                InsightKind::IncomeOpportunity,
                key,
                Severity::Info,
                "Large Income Received",
                format!(
                    "{} income of ${:.2} on {} is {:.1}x your average income",
                    tx.category_label(),
                    tx.amount,
                    tx.date,
                    tx.amount / average
                ),
            )
            .with_suggestion(format!(
                "Consider putting ${:.2} of it toward savings or debt",
                tx.amount - average
            ))
            .with_data(serde_json::json!({
                "date": tx.date,
                "amount": tx.amount,
                "averageIncome": average,
                "category": tx.category_label(),
            }));

            findings.push(finding);
        }

        Ok(findings)
    }
}
