//! Import transactions and budgets from CSV and JSON
//!
//! CSV files are matched by header name (case-insensitive), so column order
//! doesn't matter. Any unparseable row fails the whole import with an error
//! naming the row.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{BudgetCategory, Transaction, TransactionType};

/// Accepted header names for each transaction column
const DATE_HEADERS: &[&str] = &["date", "transaction date", "posted date"];
const AMOUNT_HEADERS: &[&str] = &["amount"];
const CATEGORY_HEADERS: &[&str] = &["category"];
const TYPE_HEADERS: &[&str] = &["type", "transaction type"];
const DESCRIPTION_HEADERS: &[&str] = &["description", "memo", "payee"];

/// Parse a transaction CSV
///
/// Requires `date` and `amount` columns; `category`, `type` and `description`
/// are optional. Without a type, the amount's sign decides (negative =
/// expense).
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_col = required_column(&headers, DATE_HEADERS, "date")?;
    let amount_col = required_column(&headers, AMOUNT_HEADERS, "amount")?;
    let category_col = find_column(&headers, CATEGORY_HEADERS);
    let type_col = find_column(&headers, TYPE_HEADERS);
    let description_col = find_column(&headers, DESCRIPTION_HEADERS);

    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let row = index + 1;
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let date = field(&record, date_col)
            .ok_or_else(|| Error::validation("missing date"))
            .and_then(parse_date)
            .map_err(|e| at_row(row, e))?;
        let amount = field(&record, amount_col)
            .ok_or_else(|| Error::validation("missing amount"))
            .and_then(parse_amount)
            .map_err(|e| at_row(row, e))?;

        let transaction_type = match type_col.and_then(|c| field(&record, c)) {
            Some(s) => s.parse::<TransactionType>().map_err(|e| at_row(row, e))?,
            None => TransactionType::from_sign(amount),
        };

        let mut tx = Transaction::new(
            date,
            amount,
            category_col.and_then(|c| field(&record, c)),
            transaction_type,
        );
        if let Some(description) = description_col.and_then(|c| field(&record, c)) {
            tx = tx.with_description(description);
        }
        transactions.push(tx);
    }

    debug!("Parsed {} transactions from CSV", transactions.len());
    Ok(transactions)
}

/// Parse a JSON array of transactions
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let raw: Vec<Transaction> = serde_json::from_reader(reader)?;
    let transactions = raw
        .into_iter()
        .enumerate()
        .map(|(index, tx)| {
            tx.normalized()
                .map_err(|e| match e {
                    Error::Validation(msg) => {
                        Error::Validation(format!("Entry {}: {}", index + 1, msg))
                    }
                    other => other,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} transactions from JSON", transactions.len());
    Ok(transactions)
}

/// Parse a budget CSV with `category`, `budgeted` and `spent` columns
pub fn parse_budget_csv<R: Read>(reader: R) -> Result<Vec<BudgetCategory>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let category_col = required_column(&headers, CATEGORY_HEADERS, "category")?;
    let budgeted_col = required_column(&headers, &["budgeted", "budget"], "budgeted")?;
    let spent_col = required_column(&headers, &["spent", "actual"], "spent")?;

    let mut categories = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let row = index + 1;
        let record = result?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let category = field(&record, category_col)
            .ok_or_else(|| at_row(row, Error::validation("missing category")))?;
        let budgeted = field(&record, budgeted_col)
            .map(parse_amount)
            .transpose()
            .map_err(|e| at_row(row, e))?
            .unwrap_or(0.0);
        let spent = field(&record, spent_col)
            .map(parse_amount)
            .transpose()
            .map_err(|e| at_row(row, e))?
            .unwrap_or(0.0);

        categories.push(BudgetCategory::new(category, budgeted, spent));
    }

    debug!("Parsed {} budget categories", categories.len());
    Ok(categories)
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

fn required_column(headers: &StringRecord, names: &[&str], label: &str) -> Result<usize> {
    find_column(headers, names)
        .ok_or_else(|| Error::Import(format!("CSV is missing a '{}' column", label)))
}

/// Non-empty field value
fn field(record: &StringRecord, col: usize) -> Option<&str> {
    record.get(col).map(str::trim).filter(|s| !s.is_empty())
}

/// Prefix a validation error with its data row (1-based, header excluded)
fn at_row(row: usize, err: Error) -> Error {
    match err {
        Error::Validation(msg) => Error::Validation(format!("Row {}: {}", row, msg)),
        other => other,
    }
}

/// Parse a date string in various common formats
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    // %Y would happily read "24" as year 24
    let two_digit_year = s.rsplit('/').next().is_some_and(|y| y.len() == 2) && s.contains('/');
    let formats: &[&str] = if two_digit_year {
        &["%m/%d/%y"]
    } else {
        &[
            "%Y-%m-%d", // 2024-01-15
            "%m/%d/%Y", // 01/15/2024
            "%m-%d-%Y", // 01-15-2024
        ]
    };

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Validation(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    let amount = cleaned
        .parse::<f64>()
        .map_err(|_| Error::Validation(format!("Unable to parse amount: {}", s)))?;
    if !amount.is_finite() {
        return Err(Error::Validation(format!("Amount is not finite: {}", s)));
    }
    Ok(amount)
}
