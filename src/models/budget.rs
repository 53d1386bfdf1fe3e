//! Budget allocation model
//!
//! A planned spending ceiling for one expense category in one month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::BudgetId;
use super::money::Money;
use super::period::Month;

/// A budget allocation for a specific category in a specific month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub id: BudgetId,

    /// Unique per month
    pub category: Category,

    pub month: Month,

    /// Spending ceiling for the month
    pub amount: Money,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetAllocation {
    /// Create a new budget allocation
    pub fn new(category: Category, month: Month, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category,
            month,
            amount,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style notes setter
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.updated_at = Utc::now();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.updated_at = Utc::now();
    }

    /// Whether this allocation occupies the same slot as another
    pub fn same_slot(&self, category: Category, month: Month) -> bool {
        self.category == category && self.month == month
    }

    /// Validate the allocation
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        if !self.category.is_expense() {
            return Err(BudgetValidationError::NotAnExpenseCategory(self.category));
        }

        Ok(())
    }
}

impl fmt::Display for BudgetAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.month, self.category, self.amount)
    }
}

/// Validation errors for budget allocations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetValidationError {
    #[error("Budget amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    #[error("'{0}' is not an expense category")]
    NotAnExpenseCategory(Category),
}
