//! Report metrics
//!
//! Summaries over an arbitrary set of transactions: totals and savings
//! rate, per-category breakdowns, and month-by-month trends.

use serde::Serialize;
use std::collections::BTreeMap;

use super::chart::ChartData;
use super::round2;
use super::transactions::compute_totals;
use crate::models::{Category, Money, Month, Transaction, TransactionKind};

/// A category and the total filed under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryAmount {
    pub category: Category,
    pub amount: Money,
}

/// Headline figures for a reporting period
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_savings: Money,
    /// Percent of income kept, two decimals
    pub savings_rate: f64,
    pub largest_expense: Option<CategoryAmount>,
    pub largest_income: Option<CategoryAmount>,
}

/// Net savings as a percentage of income, two decimals; 0 without income
pub fn savings_rate(net: Money, income: Money) -> f64 {
    net.ratio_percent(income).map(round2).unwrap_or(0.0)
}

/// Per-category totals for one kind, in category declaration order
fn category_totals(transactions: &[Transaction], kind: TransactionKind) -> BTreeMap<Category, Money> {
    let mut totals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.kind == kind) {
        *totals.entry(txn.category).or_insert_with(Money::zero) += txn.amount;
    }
    totals
}

/// Highest category total; ties go to the category declared first
fn largest(totals: &BTreeMap<Category, Money>) -> Option<CategoryAmount> {
    totals
        .iter()
        .fold(None, |best: Option<CategoryAmount>, (&category, &amount)| match best {
            Some(b) if b.amount >= amount => Some(b),
            _ => Some(CategoryAmount { category, amount }),
        })
}

pub fn compute_report_summary(transactions: &[Transaction]) -> ReportSummary {
    let totals = compute_totals(transactions);

    ReportSummary {
        total_income: totals.income,
        total_expenses: totals.expense,
        net_savings: totals.balance,
        savings_rate: savings_rate(totals.balance, totals.income),
        largest_expense: largest(&category_totals(transactions, TransactionKind::Expense)),
        largest_income: largest(&category_totals(transactions, TransactionKind::Income)),
    }
}

/// One category's slice of a distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Money,
    /// Percent of the kind's total, two decimals
    pub percentage: f64,
}

/// Break down one kind of transaction by category
///
/// Sorted by amount, largest first. Equal amounts keep category
/// declaration order.
pub fn category_distribution(transactions: &[Transaction], kind: TransactionKind) -> Vec<CategoryShare> {
    let totals = category_totals(transactions, kind);
    let grand_total: Money = totals.values().sum();

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percentage: amount.ratio_percent(grand_total).map(round2).unwrap_or(0.0),
        })
        .collect();

    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

/// Income and spending for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month: Month,
    pub income: Money,
    pub expenses: Money,
    pub savings: Money,
    pub savings_rate: f64,
}

/// Longest window `monthly_trends` will cover, ten years
pub const MAX_TREND_MONTHS: usize = 120;

/// Month-by-month totals for the `count` months ending with `end`
///
/// Oldest month first. Months without transactions appear with zeros.
/// `count` is capped at [`MAX_TREND_MONTHS`].
pub fn monthly_trends(transactions: &[Transaction], end: Month, count: usize) -> Vec<MonthlyTrend> {
    let months = end.trailing(count.min(MAX_TREND_MONTHS));
    let Some(first) = months.first().copied() else {
        return Vec::new();
    };

    let mut by_month: BTreeMap<Month, Vec<Transaction>> = BTreeMap::new();
    for t in transactions {
        let month = Month::of(t.date);
        if month >= first && month <= end {
            by_month.entry(month).or_default().push(t.clone());
        }
    }

    months
        .into_iter()
        .map(|month| {
            let totals = by_month
                .get(&month)
                .map(|in_month| compute_totals(in_month))
                .unwrap_or_default();

            MonthlyTrend {
                month,
                income: totals.income,
                expenses: totals.expense,
                savings: totals.balance,
                savings_rate: savings_rate(totals.balance, totals.income),
            }
        })
        .collect()
}

/// Income, expenses and savings line chart series
pub fn trend_chart(trends: &[MonthlyTrend]) -> ChartData {
    ChartData::new(trends.iter().map(|t| t.month.label()).collect())
        .with_dataset("Income", trends.iter().map(|t| t.income.as_f64()).collect())
        .with_dataset("Expenses", trends.iter().map(|t| t.expenses.as_f64()).collect())
        .with_dataset("Savings", trends.iter().map(|t| t.savings.as_f64()).collect())
}
