//! Insight Engine - runs analyzers over a transaction set

use chrono::Months;

use crate::aggregate::aggregate_by_period;
use crate::config::AnalyticsConfig;
use crate::models::{Granularity, Transaction};
use crate::period::period_key;
use crate::Result;

use super::types::{Finding, InsightKind};
use super::{
    CashFlowInsight, CategoryConcentrationInsight, IncomeOpportunityInsight,
    SpendingAnomalyInsight, SpendingTrendInsight,
};

/// Context provided to insight analyzers
pub struct AnalysisContext<'a> {
    pub transactions: &'a [Transaction],
    pub config: &'a AnalyticsConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(transactions: &'a [Transaction], config: &'a AnalyticsConfig) -> Self {
        Self {
            transactions,
            config,
        }
    }

    /// Total expenses per calendar month, oldest first
    ///
    /// Months between the first and last transaction with no activity are
    /// included as 0, so the series has one point per calendar month.
    pub fn monthly_expenses(&self) -> Vec<(String, f64)> {
        let buckets = aggregate_by_period(self.transactions, Granularity::Monthly);
        let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
            return Vec::new();
        };
        let last_start = last.start;

        let mut series = Vec::with_capacity(buckets.len());
        let mut filled = buckets.iter().peekable();
        let mut month = Some(first.start);
        while let Some(start) = month.filter(|m| *m <= last_start) {
            let expenses = match filled.peek() {
                Some(bucket) if bucket.start == start => {
                    filled.next().map_or(0.0, |b| b.expenses)
                }
                _ => 0.0,
            };
            series.push((period_key(start, Granularity::Monthly), expenses));
            month = start.checked_add_months(Months::new(1));
        }
        series
    }
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze data and produce findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in insight types
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        engine.register(Box::new(IncomeOpportunityInsight::new()));
        engine.register(Box::new(SpendingTrendInsight::new()));
        engine.register(Box::new(SpendingAnomalyInsight::new()));
        engine.register(Box::new(CashFlowInsight::new()));
        engine.register(Box::new(CategoryConcentrationInsight::new()));

        engine
    }

    /// An engine with no analyzers registered
    pub fn empty() -> Self {
        Self { insights: vec![] }
    }

    /// Register an insight analyzer
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all insight analyzers and collect findings
    ///
    /// A failing analyzer is logged and skipped so the others still report.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let mut all_findings = vec![];

        for insight in &self.insights {
            match insight.analyze(ctx) {
                Ok(findings) => {
                    tracing::debug!(
                        insight = insight.id().as_str(),
                        count = findings.len(),
                        "Insight analysis complete"
                    );
                    all_findings.extend(findings);
                }
                Err(e) => {
                    tracing::warn!(
                        insight = insight.id().as_str(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        // Highest severity first, then by key so output is deterministic
        all_findings.sort_by(|a, b| {
            b.severity
                .priority()
                .cmp(&a.severity.priority())
                .then_with(|| a.key.cmp(&b.key))
        });

        all_findings
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightKind> {
        self.insights.iter().map(|i| i.id()).collect()
    }
}

/// Run the built-in analyzers over `transactions`
pub fn generate_insights(transactions: &[Transaction], config: &AnalyticsConfig) -> Vec<Finding> {
    let ctx = AnalysisContext::new(transactions, config);
    InsightEngine::new().analyze_all(&ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Severity;
    use crate::Error;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct FailingInsight;

    impl Insight for FailingInsight {
        fn id(&self) -> InsightKind {
            InsightKind::SpendingTrend
        }

        fn name(&self) -> &'static str {
            "Always Fails"
        }

        fn analyze(&self, _ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
            Err(Error::Validation("broken analyzer".into()))
        }
    }

    struct FixedInsight(Severity, &'static str);

    impl Insight for FixedInsight {
        fn id(&self) -> InsightKind {
            InsightKind::CashFlow
        }

        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn analyze(&self, _ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
            Ok(vec![Finding::new(
                InsightKind::CashFlow,
                self.1,
                self.0,
                "Fixed",
                "Fixed finding",
            )])
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::new();
        let types = engine.insight_types();

        assert_eq!(types.len(), 5);
        assert!(types.contains(&InsightKind::IncomeOpportunity));
        assert!(types.contains(&InsightKind::SpendingTrend));
        assert!(types.contains(&InsightKind::SpendingAnomaly));
        assert!(types.contains(&InsightKind::CashFlow));
        assert!(types.contains(&InsightKind::CategoryConcentration));
    }

    #[test]
    fn test_analyze_empty_transactions() {
        let config = AnalyticsConfig::default();
        assert!(generate_insights(&[], &config).is_empty());
    }

    #[test]
    fn test_failing_analyzer_is_skipped() {
        let config = AnalyticsConfig::default();
        let mut engine = InsightEngine::empty();
        engine.register(Box::new(FailingInsight));
        engine.register(Box::new(FixedInsight(Severity::Info, "fixed")));

        let findings = engine.analyze_all(&AnalysisContext::new(&[], &config));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].key, "fixed");
    }

    #[test]
    fn test_findings_sorted_by_severity_then_key() {
        let config = AnalyticsConfig::default();
        let mut engine = InsightEngine::empty();
        engine.register(Box::new(FixedInsight(Severity::Info, "a")));
        engine.register(Box::new(FixedInsight(Severity::Alert, "z")));
        engine.register(Box::new(FixedInsight(Severity::Alert, "b")));

        let keys: Vec<String> = engine
            .analyze_all(&AnalysisContext::new(&[], &config))
            .into_iter()
            .map(|f| f.key)
            .collect();
        assert_eq!(keys, vec!["b", "z", "a"]);
    }

    #[test]
    fn test_monthly_expenses() {
        let config = AnalyticsConfig::default();
        let txs = vec![
            Transaction::expense(date(2024, 2, 3), 30.0, "Food"),
            Transaction::expense(date(2024, 1, 3), 10.0, "Food"),
            Transaction::income(date(2024, 1, 1), 100.0, "Salary"),
        ];
        let ctx = AnalysisContext::new(&txs, &config);
        assert_eq!(
            ctx.monthly_expenses(),
            vec![("2024-01".to_string(), 10.0), ("2024-02".to_string(), 30.0)]
        );
    }

    #[test]
    fn test_monthly_expenses_fills_quiet_months() {
        let config = AnalyticsConfig::default();
        let txs = vec![
            Transaction::expense(date(2023, 11, 20), 50.0, "Food"),
            Transaction::income(date(2024, 1, 1), 100.0, "Salary"),
            Transaction::expense(date(2024, 3, 3), 70.0, "Food"),
        ];
        let ctx = AnalysisContext::new(&txs, &config);
        assert_eq!(
            ctx.monthly_expenses(),
            vec![
                ("2023-11".to_string(), 50.0),
                ("2023-12".to_string(), 0.0),
                ("2024-01".to_string(), 0.0),
                ("2024-02".to_string(), 0.0),
                ("2024-03".to_string(), 70.0),
            ]
        );
    }
}
