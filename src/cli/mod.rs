//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer. Each area has
//! a subcommand enum and a `handle_*_command` function; handlers print
//! their results and return errors to `main`.

pub mod budget;
pub mod export;
pub mod goal;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use goal::{handle_goal_command, GoalCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::models::Month;

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The requested month, or the current one
pub(crate) fn month_or_current(month: Option<Month>) -> Month {
    month.unwrap_or_else(|| Month::of(today()))
}
