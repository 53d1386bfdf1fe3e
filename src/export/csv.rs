//! CSV export
//!
//! Transactions and one month of budget progress, written as
//! spreadsheet-friendly CSV with a header row.

use serde::Serialize;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Month};
use crate::services::BudgetService;
use crate::storage::Storage;

#[derive(Serialize)]
struct TransactionRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Amount")]
    amount: String,
}

#[derive(Serialize)]
struct BudgetRecord {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Budgeted")]
    budgeted: String,
    #[serde(rename = "Spent")]
    spent: String,
    #[serde(rename = "Remaining")]
    remaining: String,
    #[serde(rename = "Percentage")]
    percentage: String,
    #[serde(rename = "Status")]
    status: String,
}

/// Plain decimal, no currency symbol
fn decimal(amount: Money) -> String {
    amount.format_with_symbol("")
}

fn export_error(e: impl std::fmt::Display) -> FintrackError {
    FintrackError::Export(e.to_string())
}

/// Export all transactions, oldest first; returns the number of rows
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> FintrackResult<usize> {
    let mut transactions = storage.transactions.all()?;
    transactions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at)));

    let mut csv_writer = csv::Writer::from_writer(writer);
    for txn in &transactions {
        csv_writer
            .serialize(TransactionRecord {
                id: txn.id.as_uuid().to_string(),
                date: txn.date.format("%Y-%m-%d").to_string(),
                kind: txn.kind.to_string(),
                category: txn.category.to_string(),
                description: txn.description.clone(),
                amount: decimal(txn.signed_amount()),
            })
            .map_err(export_error)?;
    }
    csv_writer.flush().map_err(export_error)?;

    Ok(transactions.len())
}

/// Export budget progress for `month`; returns the number of rows
pub fn export_budget_csv<W: Write>(
    storage: &Storage,
    writer: W,
    month: Month,
    warning_threshold: u8,
) -> FintrackResult<usize> {
    let overview = BudgetService::new(storage).overview(month, warning_threshold)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    for item in &overview.items {
        csv_writer
            .serialize(BudgetRecord {
                month: item.month.to_string(),
                category: item.category.to_string(),
                budgeted: decimal(item.amount),
                spent: decimal(item.spent),
                remaining: decimal(item.remaining),
                percentage: format!("{:.2}", item.percentage),
                status: item.status.to_string(),
            })
            .map_err(export_error)?;
    }
    csv_writer.flush().map_err(export_error)?;

    Ok(overview.items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::{Category, TransactionKind};
    use crate::services::{CreateTransactionInput, TransactionService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(FintrackPaths::with_base_dir(temp_dir.path())).unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, kind: TransactionKind, category: Category, cents: i64, day: u32, desc: &str) {
        TransactionService::new(storage)
            .create(CreateTransactionInput {
                kind,
                category,
                amount: Money::from_cents(cents),
                date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
                description: desc.to_string(),
            })
            .unwrap();
    }

    #[test]
    fn test_export_transactions() {
        let (_temp, storage) = create_test_storage();
        add(&storage, TransactionKind::Expense, Category::Food, 4550, 14, "Market, farmers");
        add(&storage, TransactionKind::Income, Category::Salary, 300000, 1, "Salary");

        let mut output = Vec::new();
        let count = export_transactions_csv(&storage, &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(count, 2);
        assert_eq!(lines[0], "ID,Date,Type,Category,Description,Amount");
        assert!(lines[1].contains("2025-03-01,income,Salary,Salary,3000.00"));
        assert!(lines[2].contains("\"Market, farmers\",-45.50"));
    }

    #[test]
    fn test_export_budget() {
        let (_temp, storage) = create_test_storage();
        let march = Month::new(2025, 3).unwrap();
        BudgetService::new(&storage)
            .create(Category::Food, march, Money::from_units(600), None)
            .unwrap();
        add(&storage, TransactionKind::Expense, Category::Food, 55000, 10, "Groceries");

        let mut output = Vec::new();
        let count = export_budget_csv(&storage, &mut output, march, 90).unwrap();
        let csv = String::from_utf8(output).unwrap();

        assert_eq!(count, 1);
        assert!(csv.starts_with("Month,Category,Budgeted,Spent,Remaining,Percentage,Status\n"));
        assert!(csv.contains("2025-03,Food,600.00,550.00,50.00,91.67,near limit"));
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let (_temp, storage) = create_test_storage();

        let mut output = Vec::new();
        assert_eq!(export_transactions_csv(&storage, &mut output).unwrap(), 0);
        assert!(output.is_empty());
    }
}
