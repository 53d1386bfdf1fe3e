//! Savings goal metrics
//!
//! Progress, required monthly contribution, ordering, and the contribution
//! rule for savings goals.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;
use crate::models::{Money, SavingsGoal};

/// Derived progress of one goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    /// Rounded whole percent; exceeds 100 when over-contributed
    pub percentage: i64,
    /// Not clamped; negative when over-contributed
    pub remaining: Money,
    pub is_complete: bool,
}

/// Compute progress toward a goal's target
pub fn compute_goal_progress(goal: &SavingsGoal) -> GoalProgress {
    let exact = goal.current_amount.ratio_percent(goal.target_amount);

    GoalProgress {
        percentage: exact.map(|pct| pct.round() as i64).unwrap_or(0),
        remaining: goal.target_amount - goal.current_amount,
        is_complete: exact.is_some_and(|pct| pct >= 100.0),
    }
}

/// Whole calendar months from `from` to `to`
///
/// A trailing partial month does not count. Negative when `to` is earlier
/// than `from`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months =
        (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;

    if months > 0 && to.day() < from.day() {
        months -= 1;
    } else if months < 0 && to.day() > from.day() {
        months += 1;
    }

    months
}

/// Amount to save each month to reach the target by the target date
///
/// A target date in the past or within the current month counts as one
/// month left. Returns zero once nothing is left to save.
pub fn monthly_contribution_needed(goal: &SavingsGoal, today: NaiveDate) -> Money {
    let months_left = months_between(today, goal.target_date).max(1);
    let amount_left = goal.target_amount - goal.current_amount;

    if amount_left.is_positive() {
        amount_left.split_even(months_left as u32)
    } else {
        Money::zero()
    }
}

/// Goal ordering options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalSort {
    /// Highest completion percentage first
    #[default]
    Progress,
    /// Soonest target date first
    Deadline,
    /// Largest target amount first
    Amount,
    /// Alphabetical
    Name,
}

impl fmt::Display for GoalSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Progress => "progress",
            Self::Deadline => "deadline",
            Self::Amount => "amount",
            Self::Name => "name",
        })
    }
}

impl FromStr for GoalSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "progress" => Ok(Self::Progress),
            "deadline" => Ok(Self::Deadline),
            "amount" => Ok(Self::Amount),
            "name" => Ok(Self::Name),
            other => Err(format!(
                "Unknown sort '{}', expected progress, deadline, amount or name",
                other
            )),
        }
    }
}

/// Return the goals in the requested order
///
/// The sort is stable: goals with equal keys keep their input order.
pub fn sort_goals(goals: &[SavingsGoal], sort: GoalSort) -> Vec<SavingsGoal> {
    let mut sorted = goals.to_vec();

    match sort {
        GoalSort::Progress => sorted.sort_by(|a, b| {
            compute_goal_progress(b)
                .percentage
                .cmp(&compute_goal_progress(a).percentage)
        }),
        GoalSort::Deadline => sorted.sort_by(|a, b| a.target_date.cmp(&b.target_date)),
        GoalSort::Amount => sorted.sort_by(|a, b| b.target_amount.cmp(&a.target_amount)),
        GoalSort::Name => sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }

    sorted
}

/// Apply a contribution, returning the updated goal
///
/// The input goal is left untouched. Fails when the amount is not positive
/// or would push the saved amount past the target.
pub fn apply_contribution(goal: &SavingsGoal, amount: Money) -> Result<SavingsGoal, ValidationError> {
    if !amount.is_positive() {
        return Err(ValidationError::NonPositiveContribution { amount });
    }

    let remaining = goal.target_amount - goal.current_amount;
    if amount > remaining {
        return Err(ValidationError::ExceedsRemaining { amount, remaining });
    }

    let mut updated = goal.clone();
    updated.current_amount += amount;
    updated.touch();
    Ok(updated)
}

/// Totals across all goals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoalsSummary {
    pub total_saved: Money,
    pub total_targeted: Money,
    /// Whole percent of all targets saved
    pub overall_percentage: i64,
    pub completed: usize,
    pub count: usize,
}

impl GoalsSummary {
    pub fn from_goals(goals: &[SavingsGoal]) -> Self {
        let total_saved: Money = goals.iter().map(|g| g.current_amount).sum();
        let total_targeted: Money = goals.iter().map(|g| g.target_amount).sum();

        Self {
            total_saved,
            total_targeted,
            overall_percentage: total_saved
                .ratio_percent(total_targeted)
                .map(|pct| pct.round() as i64)
                .unwrap_or(0),
            completed: goals
                .iter()
                .filter(|g| compute_goal_progress(g).is_complete)
                .count(),
            count: goals.len(),
        }
    }
}
