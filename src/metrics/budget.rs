//! Budget progress
//!
//! Matches each budget allocation against the expenses filed under its
//! category.

use serde::Serialize;
use std::collections::HashMap;

use super::chart::ChartData;
use super::round2;
use crate::models::{BudgetAllocation, BudgetId, Category, Money, Month, Transaction};

/// Percentage of a budget at which it counts as close to the limit
pub const DEFAULT_WARNING_THRESHOLD: u8 = 90;

/// Where a budget stands relative to its ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    Exceeded,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::OnTrack => "on track",
            Self::NearLimit => "near limit",
            Self::Exceeded => "exceeded",
        })
    }
}

/// A budget allocation joined with its spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgressItem {
    pub budget_id: BudgetId,
    pub category: Category,
    pub month: Month,
    pub amount: Money,
    pub spent: Money,
    /// Negative when over budget
    pub remaining: Money,
    /// Share of the budget spent, clamped to 0..=100, two decimals
    pub percentage: f64,
    pub status: BudgetStatus,
}

/// Classify spending against a budget ceiling
///
/// Uses exact cent arithmetic, so a budget reads as exceeded only once
/// spending has actually reached the ceiling.
pub fn budget_status(spent: Money, amount: Money, warning_threshold: u8) -> BudgetStatus {
    if spent.is_positive() && spent >= amount {
        BudgetStatus::Exceeded
    } else if amount.is_positive()
        && i128::from(spent.cents()) * 100
            >= i128::from(warning_threshold) * i128::from(amount.cents())
    {
        BudgetStatus::NearLimit
    } else {
        BudgetStatus::OnTrack
    }
}

/// Compute progress for each budget using the default warning threshold
///
/// The output has the same length and order as `budgets`. Only
/// expense-kind transactions in `expenses` count toward spending.
pub fn compute_budget_progress(
    budgets: &[BudgetAllocation],
    expenses: &[Transaction],
) -> Vec<BudgetProgressItem> {
    compute_budget_progress_with_threshold(budgets, expenses, DEFAULT_WARNING_THRESHOLD)
}

/// Compute progress for each budget, classifying against `warning_threshold`
pub fn compute_budget_progress_with_threshold(
    budgets: &[BudgetAllocation],
    expenses: &[Transaction],
    warning_threshold: u8,
) -> Vec<BudgetProgressItem> {
    let mut spent_by_category: HashMap<Category, Money> = HashMap::new();
    for txn in expenses.iter().filter(|t| t.is_expense()) {
        *spent_by_category.entry(txn.category).or_default() += txn.amount;
    }

    budgets
        .iter()
        .map(|budget| {
            let spent = spent_by_category
                .get(&budget.category)
                .copied()
                .unwrap_or_default();
            let percentage = spent
                .ratio_percent(budget.amount)
                .map(|pct| round2(pct.clamp(0.0, 100.0)))
                .unwrap_or(0.0);

            BudgetProgressItem {
                budget_id: budget.id,
                category: budget.category,
                month: budget.month,
                amount: budget.amount,
                spent,
                remaining: budget.amount - spent,
                percentage,
                status: budget_status(spent, budget.amount, warning_threshold),
            }
        })
        .collect()
}

/// Totals across a set of budget progress items
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    /// Whole percent of the total budget spent; may exceed 100
    pub percent_used: i64,
}

impl BudgetSummary {
    pub fn from_items(items: &[BudgetProgressItem]) -> Self {
        let total_budgeted: Money = items.iter().map(|i| i.amount).sum();
        let total_spent: Money = items.iter().map(|i| i.spent).sum();
        let percent_used = total_spent
            .ratio_percent(total_budgeted)
            .map(|pct| pct.round() as i64)
            .unwrap_or(0);

        Self {
            total_budgeted,
            total_spent,
            total_remaining: total_budgeted - total_spent,
            percent_used,
        }
    }
}

/// "Budget vs Spent" bar chart series
pub fn budget_chart(items: &[BudgetProgressItem]) -> ChartData {
    ChartData::new(items.iter().map(|i| i.category.label().to_string()).collect())
        .with_dataset("Budget", items.iter().map(|i| i.amount.as_f64()).collect())
        .with_dataset("Spent", items.iter().map(|i| i.spent.as_f64()).collect())
}
