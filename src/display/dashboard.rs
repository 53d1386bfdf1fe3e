//! Dashboard display formatting

use super::budget::format_alerts;
use super::goal::format_goals_summary;
use super::report::{format_bar, heading, money, separator, truncate, WIDTH};
use crate::config::Settings;
use crate::metrics::Dashboard;

pub fn format_dashboard(dashboard: &Dashboard, settings: &Settings) -> String {
    let mut output = heading(&format!("Dashboard: {}", dashboard.month.label()));

    output.push_str(&format!(
        "  Income:   {:>14}\n",
        money(dashboard.totals.income, settings)
    ));
    output.push_str(&format!(
        "  Expenses: {:>14}\n",
        money(dashboard.totals.expense, settings)
    ));
    output.push_str(&format!(
        "  Balance:  {:>14}   Savings rate {:.2}%\n",
        money(dashboard.totals.balance, settings),
        dashboard.savings_rate
    ));

    output.push_str(&format!("{}\nRecent transactions\n", separator(WIDTH)));
    if dashboard.recent.is_empty() {
        output.push_str("  None this month.\n");
    }
    for txn in &dashboard.recent {
        output.push_str(&format!(
            "  {}  {:<24} {:>12}\n",
            txn.date.format(&settings.date_format),
            truncate(&txn.description, 24),
            money(txn.signed_amount(), settings)
        ));
    }

    if !dashboard.budgets.is_empty() {
        output.push_str(&format!("{}\nBudgets\n", separator(WIDTH)));
        for item in &dashboard.budgets {
            output.push_str(&format!(
                "  {:<16} {} {:>6.2}%\n",
                truncate(item.category.label(), 16),
                format_bar(item.percentage, 100.0, 20),
                item.percentage
            ));
        }
        output.push_str(&format!(
            "  {} of {} spent ({}%)\n",
            money(dashboard.budget_summary.total_spent, settings),
            money(dashboard.budget_summary.total_budgeted, settings),
            dashboard.budget_summary.percent_used
        ));
    }

    output.push_str(&format!("{}\nGoals\n  ", separator(WIDTH)));
    if dashboard.goals.count == 0 {
        output.push_str("No savings goals yet.\n");
    } else {
        output.push_str(&format_goals_summary(&dashboard.goals, settings));
    }

    output.push_str(&format!("{}\n", separator(WIDTH)));
    output.push_str(&format_alerts(&dashboard.alerts));
    output
}
