//! Dashboard view-model
//!
//! Everything the overview screen shows for one month, computed from a
//! full snapshot of the user's records.

use chrono::NaiveDate;
use serde::Serialize;

use super::alerts::{budget_alerts, Alert};
use super::budget::{compute_budget_progress_with_threshold, BudgetProgressItem, BudgetSummary};
use super::goals::{compute_goal_progress, GoalsSummary};
use super::reports::savings_rate;
use super::transactions::{compute_totals, Totals};
use crate::models::{BudgetAllocation, Month, SavingsGoal, Transaction};

/// How many transactions the dashboard lists
pub const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub month: Month,
    pub totals: Totals,
    pub savings_rate: f64,
    /// Newest first
    pub recent: Vec<Transaction>,
    pub budgets: Vec<BudgetProgressItem>,
    pub budget_summary: BudgetSummary,
    pub goals: GoalsSummary,
    pub alerts: Vec<Alert>,
}

/// Build the dashboard for `month`
///
/// `transactions` may span any period; totals, recent activity and budget
/// spending only consider the ones dated inside `month`. Goals whose target
/// date is before `today` and that are not complete get an info alert.
pub fn build_dashboard(
    transactions: &[Transaction],
    budgets: &[BudgetAllocation],
    goals: &[SavingsGoal],
    month: Month,
    today: NaiveDate,
    warning_threshold: u8,
) -> Dashboard {
    let mut in_month: Vec<Transaction> = transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .cloned()
        .collect();
    let month_budgets: Vec<BudgetAllocation> = budgets
        .iter()
        .filter(|b| b.month == month)
        .cloned()
        .collect();

    let totals = compute_totals(&in_month);
    let rate = savings_rate(totals.balance, totals.income);
    let items = compute_budget_progress_with_threshold(&month_budgets, &in_month, warning_threshold);

    let mut alerts = budget_alerts(&items);
    if rate > 0.0 {
        alerts.push(Alert::success(format!(
            "You saved {}% of your income this month!",
            rate.round() as i64
        )));
    }
    for goal in goals {
        if goal.target_date < today && !compute_goal_progress(goal).is_complete {
            alerts.push(Alert::info(format!(
                "Goal '{}' passed its target date of {}",
                goal.name,
                goal.target_date.format("%Y-%m-%d")
            )));
        }
    }

    in_month.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    in_month.truncate(RECENT_TRANSACTIONS);

    Dashboard {
        month,
        totals,
        savings_rate: rate,
        recent: in_month,
        budget_summary: BudgetSummary::from_items(&items),
        budgets: items,
        goals: GoalsSummary::from_goals(goals),
        alerts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::AlertLevel;
    use crate::models::{Category, Money};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june() -> Month {
        Month::new(2025, 6).unwrap()
    }

    fn transactions() -> Vec<Transaction> {
        let mut txns = vec![Transaction::income(
            Category::Salary,
            Money::from_units(4000),
            date(2025, 6, 1),
            "June salary",
        )];
        for day in 2..=8 {
            txns.push(Transaction::expense(
                Category::Food,
                Money::from_units(50),
                date(2025, 6, day),
                format!("Lunch {}", day),
            ));
        }
        txns.push(Transaction::expense(
            Category::Housing,
            Money::from_units(900),
            date(2025, 5, 28),
            "May rent",
        ));
        txns
    }

    #[test]
    fn test_totals_only_cover_month() {
        let dash = build_dashboard(&transactions(), &[], &[], june(), date(2025, 6, 15), 90);
        assert_eq!(dash.totals.income, Money::from_units(4000));
        assert_eq!(dash.totals.expense, Money::from_units(350));
        assert_eq!(dash.savings_rate, 91.25);
    }

    #[test]
    fn test_recent_is_newest_first_and_capped() {
        let dash = build_dashboard(&transactions(), &[], &[], june(), date(2025, 6, 15), 90);
        assert_eq!(dash.recent.len(), RECENT_TRANSACTIONS);
        assert_eq!(dash.recent[0].date, date(2025, 6, 8));
        assert_eq!(dash.recent[4].date, date(2025, 6, 4));
    }

    #[test]
    fn test_budgets_and_alerts() {
        let budgets = vec![
            BudgetAllocation::new(Category::Food, june(), Money::from_units(300)),
            BudgetAllocation::new(Category::Food, june().prev(), Money::from_units(999)),
        ];
        let dash = build_dashboard(&transactions(), &budgets, &[], june(), date(2025, 6, 15), 90);

        assert_eq!(dash.budgets.len(), 1);
        assert_eq!(dash.budgets[0].spent, Money::from_units(350));
        assert_eq!(dash.budget_summary.total_budgeted, Money::from_units(300));
        assert_eq!(dash.alerts[0].level, AlertLevel::Error);
        assert!(dash
            .alerts
            .iter()
            .any(|a| a.message == "You saved 91% of your income this month!"));
    }

    #[test]
    fn test_no_savings_alert_without_income() {
        let spending = vec![Transaction::expense(
            Category::Food,
            Money::from_units(10),
            date(2025, 6, 3),
            "Coffee",
        )];
        let dash = build_dashboard(&spending, &[], &[], june(), date(2025, 6, 15), 90);
        assert_eq!(dash.alerts, vec![Alert::info("No budgets set for this month.")]);
    }

    #[test]
    fn test_overdue_goal_alert() {
        let goals = vec![
            SavingsGoal::new("Old Trip", Money::from_units(1000), date(2025, 5, 1))
                .with_current(Money::from_units(200)),
            SavingsGoal::new("Done Trip", Money::from_units(1000), date(2025, 5, 1))
                .with_current(Money::from_units(1000)),
            SavingsGoal::new("Future Car", Money::from_units(9000), date(2026, 1, 1)),
        ];
        let dash = build_dashboard(&[], &[], &goals, june(), date(2025, 6, 15), 90);

        let infos: Vec<&Alert> = dash
            .alerts
            .iter()
            .filter(|a| a.message.starts_with("Goal"))
            .collect();
        assert_eq!(infos.len(), 1);
        assert!(infos[0].message.contains("Old Trip"));
        assert_eq!(dash.goals.count, 3);
        assert_eq!(dash.goals.completed, 1);
    }
}
