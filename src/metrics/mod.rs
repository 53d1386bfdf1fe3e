//! Financial metrics
//!
//! Pure functions that turn record snapshots (transactions, budget
//! allocations, savings goals) into derived view-models: budget progress,
//! goal progress, totals, report summaries, chart series and alerts.
//!
//! Nothing in this module performs I/O, reads the clock or mutates its
//! inputs. "Today" is always passed in explicitly, so the same snapshot
//! always produces the same output, and every function can be called from
//! any thread.
//!
//! The only error raised here is [`ValidationError`], returned by
//! [`apply_contribution`] when its amount is out of range.

pub mod alerts;
pub mod budget;
pub mod chart;
pub mod dashboard;
pub mod goals;
pub mod reports;
pub mod transactions;

pub use alerts::{budget_alerts, Alert, AlertLevel};
pub use budget::{
    budget_chart, budget_status, compute_budget_progress, compute_budget_progress_with_threshold,
    BudgetProgressItem, BudgetStatus, BudgetSummary, DEFAULT_WARNING_THRESHOLD,
};
pub use chart::{ChartData, Dataset};
pub use dashboard::{build_dashboard, Dashboard, RECENT_TRANSACTIONS};
pub use goals::{
    apply_contribution, compute_goal_progress, monthly_contribution_needed, months_between,
    sort_goals, GoalProgress, GoalSort, GoalsSummary,
};
pub use reports::{
    category_distribution, compute_report_summary, monthly_trends, savings_rate, trend_chart,
    CategoryAmount, CategoryShare, MonthlyTrend, ReportSummary, MAX_TREND_MONTHS,
};
pub use transactions::{compute_totals, filter_transactions, paginate, Page, Totals, TransactionFilter};

use crate::models::Money;

/// Precondition violations on a single metrics call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Contribution amount must be positive, got {amount}")]
    NonPositiveContribution { amount: Money },

    #[error("Contribution of {amount} exceeds the remaining goal amount {remaining}")]
    ExceedsRemaining { amount: Money, remaining: Money },
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
