//! Service layer for fintrack
//!
//! Services sit on top of the storage layer. They validate input, persist
//! changes, write the audit log, and hand record snapshots to the metrics
//! functions.

pub mod budget;
pub mod goal;
pub mod transaction;

pub use budget::{BudgetOverview, BudgetService, BudgetUpdate};
pub use goal::{CreateGoalInput, GoalService, GoalUpdate};
pub use transaction::{CreateTransactionInput, TransactionService, TransactionUpdate};
