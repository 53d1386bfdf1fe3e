//! Budget service
//!
//! Monthly spending ceilings per expense category. At most one allocation
//! exists for each (category, month) pair.

use serde::Serialize;

use crate::error::{FintrackError, FintrackResult};
use crate::metrics::{
    budget_alerts, budget_chart, compute_budget_progress_with_threshold, filter_transactions,
    Alert, BudgetProgressItem, BudgetSummary, ChartData, TransactionFilter,
    DEFAULT_WARNING_THRESHOLD,
};
use crate::models::{BudgetAllocation, Category, Money, Month};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Everything the budget screen shows for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub month: Month,
    pub items: Vec<BudgetProgressItem>,
    pub summary: BudgetSummary,
    pub alerts: Vec<Alert>,
    pub chart: ChartData,
}

/// Fields to change on an existing allocation
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub category: Option<Category>,
    pub amount: Option<Money>,
    pub notes: Option<String>,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn ensure_slot_free(
        &self,
        category: Category,
        month: Month,
        except: Option<&BudgetAllocation>,
    ) -> FintrackResult<()> {
        let taken = self.storage.budgets.filter(|b| {
            b.same_slot(category, month) && except.map_or(true, |e| e.id != b.id)
        })?;

        if taken.is_empty() {
            Ok(())
        } else {
            Err(FintrackError::Duplicate {
                entity_type: "Budget",
                identifier: format!("{} {}", month, category),
            })
        }
    }

    /// Set a new budget for `category` in `month`
    pub fn create(
        &self,
        category: Category,
        month: Month,
        amount: Money,
        notes: Option<String>,
    ) -> FintrackResult<BudgetAllocation> {
        let mut budget = BudgetAllocation::new(category, month, amount);
        if let Some(notes) = notes {
            budget = budget.with_notes(notes);
        }

        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        self.ensure_slot_free(category, month, None)?;

        self.storage.budgets.insert(budget.clone())?;
        self.storage.budgets.save()?;
        self.storage.log_create(&budget)?;

        Ok(budget)
    }

    pub fn find(&self, identifier: &str) -> FintrackResult<Option<BudgetAllocation>> {
        self.storage.budgets.find(identifier)
    }

    fn require(&self, identifier: &str) -> FintrackResult<BudgetAllocation> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::budget_not_found(identifier))
    }

    pub fn update(&self, identifier: &str, update: BudgetUpdate) -> FintrackResult<BudgetAllocation> {
        let before = self.require(identifier)?;
        let mut budget = before.clone();

        if let Some(category) = update.category {
            budget.set_category(category);
        }
        if let Some(amount) = update.amount {
            budget.set_amount(amount);
        }
        if let Some(notes) = update.notes {
            budget.set_notes(notes);
        }

        if budget == before {
            return Ok(before);
        }

        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        if budget.category != before.category {
            self.ensure_slot_free(budget.category, budget.month, Some(&before))?;
        }

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        self.storage.log_update(&before, &budget)?;

        Ok(budget)
    }

    pub fn delete(&self, identifier: &str) -> FintrackResult<BudgetAllocation> {
        let budget = self.require(identifier)?;

        self.storage.budgets.remove(budget.id)?;
        self.storage.budgets.save()?;
        self.storage.log_delete(&budget)?;

        Ok(budget)
    }

    /// Allocations for `month` in the order they were created
    pub fn list(&self, month: Month) -> FintrackResult<Vec<BudgetAllocation>> {
        self.storage.budgets.filter(|b| b.month == month)
    }

    fn progress_with_threshold(
        &self,
        month: Month,
        warning_threshold: u8,
    ) -> FintrackResult<Vec<BudgetProgressItem>> {
        let budgets = self.list(month)?;
        let expenses = filter_transactions(
            &self.storage.transactions.all()?,
            &TransactionFilter::new().month(month),
        );
        Ok(compute_budget_progress_with_threshold(
            &budgets,
            &expenses,
            warning_threshold,
        ))
    }

    /// Spending against each of the month's budgets
    pub fn progress(&self, month: Month) -> FintrackResult<Vec<BudgetProgressItem>> {
        self.progress_with_threshold(month, DEFAULT_WARNING_THRESHOLD)
    }

    pub fn overview(&self, month: Month, warning_threshold: u8) -> FintrackResult<BudgetOverview> {
        let items = self.progress_with_threshold(month, warning_threshold)?;

        Ok(BudgetOverview {
            month,
            summary: BudgetSummary::from_items(&items),
            alerts: budget_alerts(&items),
            chart: budget_chart(&items),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::metrics::{AlertLevel, BudgetStatus};
    use crate::models::Transaction;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(FintrackPaths::with_base_dir(temp_dir.path())).unwrap();
        (temp_dir, storage)
    }

    fn january() -> Month {
        Month::new(2025, 1).unwrap()
    }

    #[test]
    fn test_create_and_list() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.create(Category::Housing, january(), Money::from_units(1200), None).unwrap();
        service
            .create(Category::Food, january(), Money::from_units(600), Some("Groceries and takeout".into()))
            .unwrap();
        service.create(Category::Food, january().next(), Money::from_units(650), None).unwrap();

        let budgets = service.list(january()).unwrap();
        let categories: Vec<Category> = budgets.iter().map(|b| b.category).collect();
        assert_eq!(categories, vec![Category::Housing, Category::Food]);
        assert_eq!(budgets[1].notes, "Groceries and takeout");
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.create(Category::Food, january(), Money::from_units(600), None).unwrap();
        let err = service
            .create(Category::Food, january(), Money::from_units(700), None)
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(err.to_string(), "Budget already exists: 2025-01 Food");
    }

    #[test]
    fn test_create_validates() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(service
            .create(Category::Salary, january(), Money::from_units(10), None)
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(Category::Food, january(), Money::zero(), None)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_update_amount_and_category() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let food = service.create(Category::Food, january(), Money::from_units(600), None).unwrap();
        service.create(Category::Utilities, january(), Money::from_units(200), None).unwrap();

        let updated = service
            .update(
                &food.id.to_string(),
                BudgetUpdate {
                    amount: Some(Money::from_units(650)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, Money::from_units(650));

        let clash = service.update(
            &food.id.to_string(),
            BudgetUpdate {
                category: Some(Category::Utilities),
                ..Default::default()
            },
        );
        assert!(clash.unwrap_err().is_duplicate());

        let moved = service
            .update(
                &food.id.to_string(),
                BudgetUpdate {
                    category: Some(Category::Entertainment),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(moved.category, Category::Entertainment);
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let b = service.create(Category::Food, january(), Money::from_units(600), None).unwrap();

        service.delete(&b.id.to_string()).unwrap();
        assert!(service.list(january()).unwrap().is_empty());
        assert!(service.delete(&b.id.to_string()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_progress_and_overview() {
        let (_temp, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.create(Category::Food, january(), Money::from_units(600), None).unwrap();

        let jan = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let feb = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        storage
            .transactions
            .insert(Transaction::expense(Category::Food, Money::from_units(550), jan, "Groceries"))
            .unwrap();
        storage
            .transactions
            .insert(Transaction::expense(Category::Food, Money::from_units(300), feb, "Groceries"))
            .unwrap();

        let items = service.progress(january()).unwrap();
        assert_eq!(items[0].spent, Money::from_units(550));
        assert_eq!(items[0].percentage, 91.67);
        assert_eq!(items[0].status, BudgetStatus::NearLimit);

        let relaxed = service.overview(january(), 95).unwrap();
        assert_eq!(relaxed.items[0].status, BudgetStatus::OnTrack);
        assert_eq!(relaxed.alerts[0].level, AlertLevel::Success);
        assert_eq!(relaxed.summary.total_spent, Money::from_units(550));
        assert_eq!(relaxed.chart.labels, vec!["Food"]);
    }
}
