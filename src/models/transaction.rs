//! Transaction model
//!
//! A single dated income or expense record. Amounts are always stored as
//! non-negative values; the direction comes from the kind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Minimum description length, in characters, after trimming
pub const DESCRIPTION_MIN_LEN: usize = 3;
/// Maximum description length, in characters, after trimming
pub const DESCRIPTION_MAX_LEN: usize = 100;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Income => "income",
            Self::Expense => "expense",
        })
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}', expected income or expense",
                other
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub category: Category,

    /// Always non-negative
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        kind: TransactionKind,
        category: Category,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            kind,
            category,
            amount,
            date,
            description: description.into().trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Shorthand for an expense
    pub fn expense(
        category: Category,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self::new(TransactionKind::Expense, category, amount, date, description)
    }

    /// Shorthand for income
    pub fn income(
        category: Category,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self::new(TransactionKind::Income, category, amount, date, description)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with sign applied: positive for income, negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate user-supplied fields
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        let len = self.description.trim().chars().count();
        if !(DESCRIPTION_MIN_LEN..=DESCRIPTION_MAX_LEN).contains(&len) {
            return Err(TransactionValidationError::DescriptionLength(len));
        }

        if !self.category.allows(self.kind) {
            return Err(TransactionValidationError::CategoryKindMismatch {
                category: self.category,
                kind: self.kind,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.description,
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    #[error("Description must be between 3 and 100 characters, got {0}")]
    DescriptionLength(usize),

    #[error("Category '{category}' cannot be used for {kind}")]
    CategoryKindMismatch {
        category: Category,
        kind: TransactionKind,
    },
}
