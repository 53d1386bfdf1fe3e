//! Core data models for fintrack
//!
//! Transactions, monthly budget allocations, savings goals and their
//! contributions, plus the value types they are built from.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{BudgetAllocation, BudgetValidationError};
pub use category::{Category, CategoryParseError, GoalCategory};
pub use goal::{Contribution, GoalValidationError, SavingsGoal};
pub use ids::{BudgetId, ContributionId, GoalId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{Month, PeriodParseError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
