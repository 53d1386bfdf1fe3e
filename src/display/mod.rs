//! Display formatting for terminal output
//!
//! Turns records and metrics view-models into text: tables built with
//! `tabled`, plus summary blocks, usage bars and alert lines.

pub mod audit;
pub mod budget;
pub mod dashboard;
pub mod goal;
pub mod report;
pub mod transaction;

pub use audit::format_audit_log;
pub use budget::{format_alerts, format_budget_list, format_budget_overview};
pub use dashboard::format_dashboard;
pub use goal::{format_goal_details, format_goal_list, format_goals_summary};
pub use report::{format_category_distribution, format_report_summary, format_trends};
pub use transaction::{format_totals, format_transaction_details, format_transaction_page};
