//! Spending Trend Insight
//!
//! Fits a trend line through monthly expense totals and reports when
//! spending is clearly rising or falling.

use crate::error::Result;
use crate::models::TrendDirection;
use crate::trend::calculate_trends;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind, Severity};

pub struct SpendingTrendInsight;

impl SpendingTrendInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpendingTrendInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for SpendingTrendInsight {
    fn id(&self) -> InsightKind {
        InsightKind::SpendingTrend
    }

    fn name(&self) -> &'static str {
        "Spending Trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let monthly = ctx.monthly_expenses();
        if monthly.len() < ctx.config.insights.min_periods {
            return Ok(Vec::new());
        }

        let series: Vec<f64> = monthly.iter().map(|(_, v)| *v).collect();
        let trend = calculate_trends(&series, &ctx.config.trend)?;

        let first = monthly.first().map(|(p, _)| p.as_str()).unwrap_or_default();
        let last = monthly.last().map(|(p, _)| p.as_str()).unwrap_or_default();
        let data = serde_json::json!({
            "from": first,
            "to": last,
            "months": monthly.len(),
            "percentage": trend.percentage,
            "slope": trend.slope,
            "stability": trend.stability,
        });

        let finding = match trend.direction {
            TrendDirection::Increasing => Finding::new(
                InsightKind::SpendingTrend,
                "trend:spending:increasing",
                Severity::Warning,
                "Spending Is Rising",
                format!(
                    "Monthly spending rose {:.1}% from {} to {} (about ${:.2} more each month)",
                    trend.percentage, first, last, trend.slope
                ),
            )
            .with_suggestion("Look at which categories grew and set a budget for them"),
            TrendDirection::Decreasing => Finding::new(
                InsightKind::SpendingTrend,
                "trend:spending:decreasing",
                Severity::Info,
                "Spending Is Falling",
                format!(
                    "Monthly spending fell {:.1}% from {} to {}",
                    trend.percentage.abs(),
                    first,
                    last
                ),
            ),
            TrendDirection::Stable => return Ok(Vec::new()),
        };

        Ok(vec![finding.with_data(data)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyticsConfig;
    use crate::models::Transaction;
    use chrono::NaiveDate;

    fn monthly(amounts: &[f64]) -> Vec<Transaction> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, a)| {
                Transaction::expense(
                    NaiveDate::from_ymd_opt(2024, i as u32 + 1, 10).unwrap(),
                    *a,
                    "Groceries",
                )
            })
            .collect()
    }

    #[test]
    fn test_rising_spending_warns() {
        let config = AnalyticsConfig::default();
        let txs = monthly(&[400.0, 450.0, 520.0, 600.0]);
        let findings = SpendingTrendInsight::new()
            .analyze(&AnalysisContext::new(&txs, &config))
            .unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].key, "trend:spending:increasing");
    }

    #[test]
    fn test_falling_spending_is_positive() {
        let config = AnalyticsConfig::default();
        let txs = monthly(&[600.0, 520.0, 450.0, 400.0]);
        let findings = SpendingTrendInsight::new()
            .analyze(&AnalysisContext::new(&txs, &config))
            .unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
        assert!(!findings[0].actionable);
    }

    #[test]
    fn test_needs_minimum_history() {
        let config = AnalyticsConfig::default();
        let txs = monthly(&[100.0, 900.0]);
        let findings = SpendingTrendInsight::new()
            .analyze(&AnalysisContext::new(&txs, &config))
            .unwrap();
        assert!(findings.is_empty());
    }
}
