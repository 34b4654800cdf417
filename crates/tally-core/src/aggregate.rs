//! Transaction aggregation by period and by category
//!
//! Grouping always goes through a `BTreeMap`, so output order is a function of
//! the period or category alone and never of the input order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    AggregationBucket, CategoryBreakdown, CategoryGroup, CategoryShare, Granularity, Transaction,
    TransactionType,
};
use crate::period::{period_key, period_start};

/// Group transactions into period buckets, sorted by period start
pub fn aggregate_by_period(
    transactions: &[Transaction],
    granularity: Granularity,
) -> Vec<AggregationBucket> {
    let mut grouped: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        grouped
            .entry(period_start(tx.date, granularity))
            .or_default()
            .push(tx.clone());
    }

    // Sums run over sorted items so float totals don't depend on input order
    let result: Vec<AggregationBucket> = grouped
        .into_iter()
        .map(|(start, mut items)| {
            sort_items(&mut items);
            let income: f64 = items.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
            let expenses: f64 = items.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
            AggregationBucket {
                period: period_key(start, granularity),
                start,
                count: items.len(),
                total: items.iter().map(|t| t.amount).sum(),
                income,
                expenses,
                items,
            }
        })
        .collect();

    debug!(
        granularity = granularity.as_str(),
        transactions = transactions.len(),
        buckets = result.len(),
        "Aggregated transactions by period"
    );

    result
}

/// Group transactions by category ("Uncategorized" when missing)
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategoryGroup> {
    let mut grouped: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        grouped
            .entry(tx.category_label().to_string())
            .or_default()
            .push(tx.clone());
    }

    grouped
        .into_iter()
        .map(|(category, mut items)| {
            sort_items(&mut items);
            CategoryGroup {
                category,
                count: items.len(),
                total: items.iter().map(|t| t.amount).sum(),
                items,
            }
        })
        .collect()
}

/// Per-category share of one transaction type, largest first
pub fn category_breakdown(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> CategoryBreakdown {
    let matching: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| tx.transaction_type == transaction_type)
        .cloned()
        .collect();

    let groups = group_by_category(&matching);
    let total: f64 = groups.iter().map(|g| g.total).sum();

    let mut categories: Vec<CategoryShare> = groups
        .into_iter()
        .map(|g| CategoryShare {
            percentage: if total > 0.0 {
                g.total / total * 100.0
            } else {
                0.0
            },
            category: g.category,
            amount: g.total,
            transaction_count: g.count,
        })
        .collect();

    // Largest first; groups arrive name-sorted so ties stay alphabetical
    categories.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    CategoryBreakdown {
        transaction_type,
        total,
        categories,
    }
}

/// Deterministic order for items in a bucket
fn sort_items(items: &mut [Transaction]) {
    items.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.transaction_type.as_str().cmp(b.transaction_type.as_str()))
            .then_with(|| a.category_label().cmp(b.category_label()))
            .then_with(|| {
                a.amount
                    .partial_cmp(&b.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.description.cmp(&b.description))
    });
}
