//! Budget display formatting
//!
//! A month's allocations as a plain table, and the progress view with
//! usage bars, status and alerts.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, heading, money, separator, WIDTH};
use crate::config::Settings;
use crate::metrics::{Alert, BudgetProgressItem, BudgetStatus, BudgetSummary};
use crate::models::{BudgetAllocation, Month};
use crate::services::BudgetOverview;

#[derive(Tabled)]
struct AllocationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    amount: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

/// Format the allocations for one month
pub fn format_budget_list(month: Month, budgets: &[BudgetAllocation], settings: &Settings) -> String {
    if budgets.is_empty() {
        return format!("No budgets set for {}.\n", month.label());
    }

    let rows = budgets.iter().map(|b| AllocationRow {
        id: b.id.to_string(),
        category: b.category.to_string(),
        amount: money(b.amount, settings),
        notes: b.notes.clone(),
    });

    let mut output = heading(&format!("Budgets for {}", month.label()));
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');
    output
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    amount: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status_marker(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::OnTrack => "✓",
        BudgetStatus::NearLimit => "!",
        BudgetStatus::Exceeded => "✗",
    }
}

impl ProgressRow {
    fn new(item: &BudgetProgressItem, settings: &Settings) -> Self {
        Self {
            category: item.category.to_string(),
            amount: money(item.amount, settings),
            spent: money(item.spent, settings),
            remaining: money(item.remaining, settings),
            used: format!(
                "{} {:>6.2}%",
                format_bar(item.percentage, 100.0, 10),
                item.percentage
            ),
            status: format!("{} {}", status_marker(item.status), item.status),
        }
    }
}

fn format_summary_line(summary: &BudgetSummary, settings: &Settings) -> String {
    format!(
        "Budgeted {}  Spent {}  Remaining {}  ({}% used)\n",
        money(summary.total_budgeted, settings),
        money(summary.total_spent, settings),
        money(summary.total_remaining, settings),
        summary.percent_used
    )
}

pub fn format_alerts(alerts: &[Alert]) -> String {
    alerts.iter().map(|a| format!("{}\n", a)).collect()
}

/// Format the progress view for one month
pub fn format_budget_overview(overview: &BudgetOverview, settings: &Settings) -> String {
    let mut output = heading(&format!("Budget Progress: {}", overview.month.label()));

    if !overview.items.is_empty() {
        let rows = overview.items.iter().map(|i| ProgressRow::new(i, settings));
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
        output.push_str(&format_summary_line(&overview.summary, settings));
        output.push_str(&format!("{}\n", separator(WIDTH)));
    }

    output.push_str(&format_alerts(&overview.alerts));
    output
}
