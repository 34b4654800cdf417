//! Spending Anomaly Insight
//!
//! Runs z-score detection over monthly expense totals.

use crate::anomaly::detect_anomalies;
use crate::error::Result;
use crate::trend::mean;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightKind, Severity};

pub struct SpendingAnomalyInsight;

impl SpendingAnomalyInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpendingAnomalyInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for SpendingAnomalyInsight {
    fn id(&self) -> InsightKind {
        InsightKind::SpendingAnomaly
    }

    fn name(&self) -> &'static str {
        "Spending Anomaly"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let monthly = ctx.monthly_expenses();
        if monthly.len() < ctx.config.insights.min_periods {
            return Ok(Vec::new());
        }

        let series: Vec<f64> = monthly.iter().map(|(_, v)| *v).collect();
        let typical = mean(&series);
        let records = detect_anomalies(&series, ctx.config.anomaly.threshold)?;

        let findings = records
            .iter()
            .filter(|r| r.is_anomaly)
            .map(|record| {
                let period = &monthly[record.index].0;
                let data = serde_json::json!({
                    "period": period,
                    "amount": record.value,
                    "average": typical,
                    "zScore": record.z_score,
                });

                if record.z_score > 0.0 {
                    Finding::new(
                        InsightKind::SpendingAnomaly,
                        format!("anomaly:spending:{}", period),
                        Severity::Attention,
                        "Unusually High Spending",
                        format!(
                            "You spent ${:.2} in {}, compared with a typical ${:.2}",
                            record.value, period, typical
                        ),
                    )
                    .with_suggestion(format!(
                        "Review the largest expenses from {} for one-off purchases",
                        period
                    ))
                    .with_data(data)
                } else {
                    Finding::new(
                        InsightKind::SpendingAnomaly,
                        format!("anomaly:spending:{}", period),
                        Severity::Info,
                        "Unusually Low Spending",
                        format!(
                            "You spent only ${:.2} in {}, compared with a typical ${:.2}",
                            record.value, period, typical
                        ),
                    )
                    .with_data(data)
                }
            })
            .collect();

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyticsConfig;
    use crate::models::Transaction;
    use chrono::NaiveDate;

    #[test]
    fn test_spike_month_flagged() {
        let config = AnalyticsConfig::default();
        let amounts = [300.0, 310.0, 290.0, 305.0, 295.0, 2500.0];
        let txs: Vec<Transaction> = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| {
                Transaction::expense(
                    NaiveDate::from_ymd_opt(2024, i as u32 + 1, 5).unwrap(),
                    *a,
                    "Shopping",
                )
            })
            .collect();

        let findings = SpendingAnomalyInsight::new()
            .analyze(&AnalysisContext::new(&txs, &config))
            .unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].key, "anomaly:spending:2024-06");
        assert_eq!(findings[0].severity, Severity::Attention);
    }

    #[test]
    fn test_steady_months_are_quiet() {
        let config = AnalyticsConfig::default();
        let txs: Vec<Transaction> = (1..=4)
            .map(|m| {
                Transaction::expense(NaiveDate::from_ymd_opt(2024, m, 5).unwrap(), 300.0, "Rent")
            })
            .collect();
        let findings = SpendingAnomalyInsight::new()
            .analyze(&AnalysisContext::new(&txs, &config))
            .unwrap();
        assert!(findings.is_empty());
    }
}
