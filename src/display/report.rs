//! Report formatting for terminal output
//!
//! Shared helpers (percentages, bars, separators) plus the report views:
//! period summary, category breakdown and monthly trends.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::metrics::{CategoryShare, MonthlyTrend, ReportSummary};
use crate::models::{Money, TransactionKind};

pub const WIDTH: usize = 56;

/// Format an amount with the configured currency symbol
pub fn money(amount: Money, settings: &Settings) -> String {
    amount.format_with_symbol(&settings.currency_symbol)
}

/// Format a percentage with precision that suits its size
pub fn format_percentage(pct: f64) -> String {
    if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A fixed-width bar filled in proportion to `value / max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to at most `max_chars` characters, ending in "..." when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}

/// Title line with a double rule underneath
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, double_separator(WIDTH))
}

pub fn format_report_summary(title: &str, summary: &ReportSummary, settings: &Settings) -> String {
    let mut output = heading(title);

    output.push_str(&format!(
        "  Total income:    {:>14}\n",
        money(summary.total_income, settings)
    ));
    output.push_str(&format!(
        "  Total expenses:  {:>14}\n",
        money(summary.total_expenses, settings)
    ));
    output.push_str(&format!(
        "  Net savings:     {:>14}\n",
        money(summary.net_savings, settings)
    ));
    output.push_str(&format!(
        "  Savings rate:    {:>14}\n",
        format!("{:.2}%", summary.savings_rate)
    ));

    output.push_str(&format!("{}\n", separator(WIDTH)));
    match summary.largest_expense {
        Some(top) => output.push_str(&format!(
            "  Largest expense: {} ({})\n",
            top.category,
            money(top.amount, settings)
        )),
        None => output.push_str("  Largest expense: -\n"),
    }
    match summary.largest_income {
        Some(top) => output.push_str(&format!(
            "  Largest income:  {} ({})\n",
            top.category,
            money(top.amount, settings)
        )),
        None => output.push_str("  Largest income:  -\n"),
    }

    output
}

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

pub fn format_category_distribution(
    shares: &[CategoryShare],
    kind: TransactionKind,
    settings: &Settings,
) -> String {
    if shares.is_empty() {
        return format!("No {} transactions in this period.\n", kind);
    }

    let rows = shares.iter().map(|s| ShareRow {
        category: s.category.to_string(),
        amount: money(s.amount, settings),
        share: format!("{:.2}%", s.percentage),
        bar: format_bar(s.percentage, 100.0, 20),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

pub fn format_trends(trends: &[MonthlyTrend], settings: &Settings) -> String {
    let rows = trends.iter().map(|t| TrendRow {
        month: t.month.label(),
        income: money(t.income, settings),
        expenses: money(t.expenses, settings),
        savings: money(t.savings, settings),
        rate: format_percentage(t.savings_rate),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output
}
