//! Savings goal and contribution models
//!
//! A goal accumulates contributions toward a target amount by a target date.
//! Contributions are append-only events; the goal's current amount only grows
//! through them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::GoalCategory;
use super::ids::{ContributionId, GoalId};
use super::money::Money;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 50;

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: GoalId,

    pub name: String,

    pub target_amount: Money,

    pub current_amount: Money,

    pub target_date: NaiveDate,

    #[serde(default)]
    pub category: GoalCategory,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Create a new goal with nothing saved yet
    pub fn new(name: impl Into<String>, target_amount: Money, target_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            name: name.into().trim().to_string(),
            target_amount,
            current_amount: Money::zero(),
            target_date,
            category: GoalCategory::default(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_current(mut self, current_amount: Money) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_category(mut self, category: GoalCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Whether the saved amount has reached the target
    pub fn is_complete(&self) -> bool {
        self.target_amount.is_positive() && self.current_amount >= self.target_amount
    }

    /// Amount still to save (negative when over-contributed)
    pub fn remaining(&self) -> Money {
        self.target_amount - self.current_amount
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate user-supplied fields
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        let len = self.name.trim().chars().count();
        if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
            return Err(GoalValidationError::NameLength(len));
        }

        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }

        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(self.current_amount));
        }

        if self.current_amount > self.target_amount {
            return Err(GoalValidationError::CurrentExceedsTarget {
                current: self.current_amount,
                target: self.target_amount,
            });
        }

        Ok(())
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} of {} by {})",
            self.name,
            self.current_amount,
            self.target_amount,
            self.target_date.format("%Y-%m-%d")
        )
    }
}

/// A deposit applied to a savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: ContributionId,

    pub goal_id: GoalId,

    pub amount: Money,

    pub date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl Contribution {
    pub fn new(goal_id: GoalId, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: ContributionId::new(),
            goal_id,
            amount,
            date,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} +{}", self.date.format("%Y-%m-%d"), self.amount)
    }
}

/// Validation errors for savings goals
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GoalValidationError {
    #[error("Goal name must be between 3 and 50 characters, got {0}")]
    NameLength(usize),

    #[error("Target amount must be positive, got {0}")]
    NonPositiveTarget(Money),

    #[error("Current amount cannot be negative, got {0}")]
    NegativeCurrent(Money),

    #[error("Current amount {current} cannot exceed target amount {target}")]
    CurrentExceedsTarget { current: Money, target: Money },

    #[error("Target date {0} must be in the future")]
    TargetDateNotInFuture(NaiveDate),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
    }

    #[test]
    fn test_new_goal() {
        let goal = SavingsGoal::new(" Emergency Fund ", Money::from_units(10000), target_date())
            .with_current(Money::from_units(5000))
            .with_category(GoalCategory::EmergencyFund)
            .with_notes("6 months of expenses");

        assert_eq!(goal.name, "Emergency Fund");
        assert_eq!(goal.remaining(), Money::from_units(5000));
        assert!(!goal.is_complete());
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_is_complete() {
        let goal = SavingsGoal::new("Laptop", Money::from_units(1500), target_date())
            .with_current(Money::from_units(1500));
        assert!(goal.is_complete());
        assert!(goal.remaining().is_zero());
    }

    #[test]
    fn test_validation() {
        let short = SavingsGoal::new("TV", Money::from_units(100), target_date());
        assert_eq!(short.validate(), Err(GoalValidationError::NameLength(2)));

        let no_target = SavingsGoal::new("Nothing", Money::zero(), target_date());
        assert!(matches!(
            no_target.validate(),
            Err(GoalValidationError::NonPositiveTarget(_))
        ));

        let over = SavingsGoal::new("Vacation", Money::from_units(100), target_date())
            .with_current(Money::from_units(150));
        assert!(matches!(
            over.validate(),
            Err(GoalValidationError::CurrentExceedsTarget { .. })
        ));
    }

    #[test]
    fn test_serialization_defaults() {
        let goal = SavingsGoal::new("Car Down Payment", Money::from_units(5000), target_date());
        let mut json = serde_json::to_value(&goal).unwrap();
        json.as_object_mut().unwrap().remove("category");
        json.as_object_mut().unwrap().remove("notes");

        let back: SavingsGoal = serde_json::from_value(json).unwrap();
        assert_eq!(back.category, GoalCategory::Other);
        assert!(back.notes.is_empty());
    }
}
