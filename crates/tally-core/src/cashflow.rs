//! Cash-flow analysis and period summaries

use tracing::debug;

use crate::aggregate::aggregate_by_period;
use crate::config::TrendConfig;
use crate::error::Result;
use crate::models::{
    AggregationBucket, CashFlowAnalysis, CashFlowPeriod, Granularity, PeriodChange,
    PeriodSummary, Transaction,
};
use crate::period::{filter_by_range, DateRange};
use crate::trend::{calculate_trends, mean};

/// Net flow per period plus the trend of that net series
pub fn analyze_cash_flow(
    transactions: &[Transaction],
    granularity: Granularity,
    config: &TrendConfig,
) -> Result<CashFlowAnalysis> {
    let periods: Vec<CashFlowPeriod> = aggregate_by_period(transactions, granularity)
        .into_iter()
        .map(|bucket| CashFlowPeriod {
            net_flow: bucket.net(),
            period: bucket.period,
            income: bucket.income,
            expenses: bucket.expenses,
        })
        .collect();

    let net_series: Vec<f64> = periods.iter().map(|p| p.net_flow).collect();
    let trend = calculate_trends(&net_series, config)?;

    let analysis = CashFlowAnalysis {
        granularity,
        positive_periods: periods.iter().filter(|p| p.net_flow > 0.0).count(),
        negative_periods: periods.iter().filter(|p| p.net_flow < 0.0).count(),
        average_net_flow: mean(&net_series),
        total_income: periods.iter().map(|p| p.income).sum(),
        total_expenses: periods.iter().map(|p| p.expenses).sum(),
        trend,
        periods,
    };

    debug!(
        periods = analysis.periods.len(),
        positive = analysis.positive_periods,
        negative = analysis.negative_periods,
        "Analyzed cash flow"
    );

    Ok(analysis)
}

/// Totals for the transactions that fall inside `range`
pub fn summarize_period(transactions: &[Transaction], range: &DateRange) -> PeriodSummary {
    let in_range = filter_by_range(transactions, range);

    let total_income: f64 = in_range.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let total_expenses: f64 = in_range.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
    let net_savings = total_income - total_expenses;
    let count = in_range.len();

    PeriodSummary {
        total_income,
        total_expenses,
        net_savings,
        savings_rate: if total_income > 0.0 {
            net_savings / total_income * 100.0
        } else {
            0.0
        },
        transaction_count: count,
        average_transaction_amount: if count > 0 {
            in_range.iter().map(|t| t.amount).sum::<f64>() / count as f64
        } else {
            0.0
        },
        daily_average: total_expenses / range.days().max(1) as f64,
    }
}

/// Expense change between consecutive buckets
pub fn period_over_period_changes(buckets: &[AggregationBucket]) -> Vec<PeriodChange> {
    let mut changes = Vec::with_capacity(buckets.len());
    let mut previous: Option<f64> = None;

    for bucket in buckets {
        let change_percent = match previous {
            Some(prev) if prev > 0.0 => Some((bucket.expenses - prev) / prev * 100.0),
            _ => None,
        };
        changes.push(PeriodChange {
            period: bucket.period.clone(),
            expenses: bucket.expenses,
            change_percent,
        });
        previous = Some(bucket.expenses);
    }

    changes
}
