//! Savings goal service
//!
//! Goals grow only through contributions. Each contribution is stored as
//! its own record next to the updated goal.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::metrics::{apply_contribution, sort_goals, GoalSort, GoalsSummary};
use crate::models::{Contribution, GoalCategory, GoalValidationError, Money, SavingsGoal};
use crate::storage::Storage;

/// Service for savings goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new goal
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub name: String,
    pub target_amount: Money,
    pub target_date: NaiveDate,
    pub current_amount: Money,
    pub category: GoalCategory,
    pub notes: String,
}

impl CreateGoalInput {
    pub fn new(name: impl Into<String>, target_amount: Money, target_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            target_amount,
            target_date,
            current_amount: Money::zero(),
            category: GoalCategory::default(),
            notes: String::new(),
        }
    }
}

/// Fields to change on an existing goal
///
/// The saved amount is not editable here; it changes through
/// [`GoalService::contribute`].
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<Money>,
    pub target_date: Option<NaiveDate>,
    pub category: Option<GoalCategory>,
    pub notes: Option<String>,
}

fn validation(e: GoalValidationError) -> FintrackError {
    FintrackError::Validation(e.to_string())
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a goal; its target date must be after `today`
    pub fn create(&self, input: CreateGoalInput, today: NaiveDate) -> FintrackResult<SavingsGoal> {
        let goal = SavingsGoal::new(input.name, input.target_amount, input.target_date)
            .with_current(input.current_amount)
            .with_category(input.category)
            .with_notes(input.notes);

        goal.validate().map_err(validation)?;
        if goal.target_date <= today {
            return Err(validation(GoalValidationError::TargetDateNotInFuture(
                goal.target_date,
            )));
        }
        if self.find_by_name(&goal.name)?.is_some() {
            return Err(FintrackError::Duplicate {
                entity_type: "Goal",
                identifier: goal.name,
            });
        }

        self.storage.goals.insert(goal.clone())?;
        self.storage.goals.save()?;
        self.storage.log_create(&goal)?;

        Ok(goal)
    }

    fn find_by_name(&self, name: &str) -> FintrackResult<Option<SavingsGoal>> {
        let name = name.trim().to_lowercase();
        Ok(self
            .storage
            .goals
            .filter(|g| g.name.to_lowercase() == name)?
            .into_iter()
            .next())
    }

    /// Find a goal by id, short id, or name (case-insensitive)
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<SavingsGoal>> {
        match self.storage.goals.find(identifier)? {
            Some(goal) => Ok(Some(goal)),
            None => self.find_by_name(identifier),
        }
    }

    fn require(&self, identifier: &str) -> FintrackResult<SavingsGoal> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::goal_not_found(identifier))
    }

    pub fn list(&self, sort: GoalSort) -> FintrackResult<Vec<SavingsGoal>> {
        Ok(sort_goals(&self.storage.goals.all()?, sort))
    }

    pub fn update(&self, identifier: &str, update: GoalUpdate) -> FintrackResult<SavingsGoal> {
        let before = self.require(identifier)?;
        let mut goal = before.clone();

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if let Some(existing) = self.find_by_name(&name)? {
                if existing.id != before.id {
                    return Err(FintrackError::Duplicate {
                        entity_type: "Goal",
                        identifier: existing.name,
                    });
                }
            }
            goal.name = name;
        }
        if let Some(target) = update.target_amount {
            goal.target_amount = target;
        }
        if let Some(date) = update.target_date {
            goal.target_date = date;
        }
        if let Some(category) = update.category {
            goal.category = category;
        }
        if let Some(notes) = update.notes {
            goal.notes = notes;
        }

        if goal == before {
            return Ok(before);
        }

        goal.touch();
        goal.validate().map_err(validation)?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;
        self.storage.log_update(&before, &goal)?;

        Ok(goal)
    }

    /// Delete a goal together with its contributions
    pub fn delete(&self, identifier: &str) -> FintrackResult<SavingsGoal> {
        let goal = self.require(identifier)?;

        let removed = self.storage.contributions.remove_where(|c| c.goal_id == goal.id)?;
        self.storage.goals.remove(goal.id)?;
        self.storage.contributions.save()?;
        self.storage.goals.save()?;

        for contribution in &removed {
            self.storage.log_delete(contribution)?;
        }
        self.storage.log_delete(&goal)?;

        Ok(goal)
    }

    /// Add `amount` to a goal's saved amount
    ///
    /// Rejects non-positive amounts and amounts larger than what is left to
    /// save.
    pub fn contribute(
        &self,
        identifier: &str,
        amount: Money,
        date: NaiveDate,
    ) -> FintrackResult<(SavingsGoal, Contribution)> {
        let before = self.require(identifier)?;
        let goal = apply_contribution(&before, amount)?;
        let contribution = Contribution::new(goal.id, amount, date);

        self.storage.goals.upsert(goal.clone())?;
        self.storage.contributions.insert(contribution.clone())?;
        self.storage.goals.save()?;
        self.storage.contributions.save()?;
        self.storage.log_contribution(&before, &goal, &contribution)?;

        Ok((goal, contribution))
    }

    /// A goal's contributions, oldest first
    pub fn contributions(&self, goal: &SavingsGoal) -> FintrackResult<Vec<Contribution>> {
        let mut contributions = self.storage.contributions.filter(|c| c.goal_id == goal.id)?;
        contributions.sort_by_key(|c| (c.date, c.created_at));
        Ok(contributions)
    }

    pub fn summary(&self) -> FintrackResult<GoalsSummary> {
        Ok(GoalsSummary::from_goals(&self.storage.goals.all()?))
    }
}
