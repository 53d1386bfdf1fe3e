//! Storage layer for fintrack
//!
//! One JSON file per record collection under the data directory, written
//! atomically, plus the audit log. Services make their changes in memory,
//! then call `save` on the touched collection and one of the `log_*`
//! helpers.

pub mod collection;
pub mod file_io;

pub use collection::{Collection, Record};
pub use file_io::{read_json, write_json_atomic};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::FintrackPaths;
use crate::error::FintrackResult;
use crate::models::{BudgetAllocation, Contribution, SavingsGoal, Transaction};

/// All collections plus the audit log
pub struct Storage {
    paths: FintrackPaths,
    pub transactions: Collection<Transaction>,
    pub budgets: Collection<BudgetAllocation>,
    pub goals: Collection<SavingsGoal>,
    pub contributions: Collection<Contribution>,
    audit: AuditLogger,
}

impl Storage {
    /// Open storage under `paths`, creating its directories
    ///
    /// Collections start empty; call [`Storage::load_all`] to read them.
    pub fn new(paths: FintrackPaths) -> FintrackResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: Collection::new(paths.transactions_file()),
            budgets: Collection::new(paths.budgets_file()),
            goals: Collection::new(paths.goals_file()),
            contributions: Collection::new(paths.contributions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open storage and load every collection
    pub fn open(paths: FintrackPaths) -> FintrackResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> FintrackResult<()> {
        self.transactions.load()?;
        self.budgets.load()?;
        self.goals.load()?;
        self.contributions.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> FintrackResult<()> {
        self.transactions.save()?;
        self.budgets.save()?;
        self.goals.save()?;
        self.contributions.save()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Record>(&self, record: &T) -> FintrackResult<()> {
        self.audit.log(&create_entry(record))
    }

    pub fn log_update<T: Record>(&self, before: &T, after: &T) -> FintrackResult<()> {
        self.audit.log(&update_entry(before, after))
    }

    pub fn log_delete<T: Record>(&self, record: &T) -> FintrackResult<()> {
        self.audit.log(&AuditEntry::delete(
            T::entity_type(),
            record.id().to_string(),
            record.audit_label(),
            record,
        ))
    }

    /// Log a goal contribution: the goal update and the new contribution
    pub fn log_contribution(
        &self,
        before: &SavingsGoal,
        after: &SavingsGoal,
        contribution: &Contribution,
    ) -> FintrackResult<()> {
        self.audit
            .log_batch(&[update_entry(before, after), create_entry(contribution)])
    }
}

fn create_entry<T: Record>(record: &T) -> AuditEntry {
    AuditEntry::create(
        T::entity_type(),
        record.id().to_string(),
        record.audit_label(),
        record,
    )
}

fn update_entry<T: Record>(before: &T, after: &T) -> AuditEntry {
    AuditEntry::update(
        T::entity_type(),
        after.id().to_string(),
        after.audit_label(),
        before,
        after,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{EntityType, Operation};
    use crate::models::{Category, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(FintrackPaths::with_base_dir(temp_dir.path())).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_creation() {
        let (storage, temp_dir) = storage();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
        assert!(storage.transactions.is_empty().unwrap());
    }

    #[test]
    fn test_save_all_and_reopen() {
        let (storage, temp_dir) = storage();
        let txn = Transaction::expense(
            Category::Food,
            Money::from_units(12),
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            "Lunch out",
        );
        storage.transactions.insert(txn.clone()).unwrap();
        storage.save_all().unwrap();

        let reopened = Storage::open(FintrackPaths::with_base_dir(temp_dir.path())).unwrap();
        assert_eq!(reopened.transactions.all().unwrap(), vec![txn]);
        assert!(temp_dir.path().join("data").join("goals.json").exists());
    }

    #[test]
    fn test_log_helpers() {
        let (storage, _temp) = storage();
        let goal = SavingsGoal::new(
            "Laptop",
            Money::from_units(1500),
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        );
        let mut after = goal.clone();
        after.current_amount = Money::from_units(100);
        let contribution = Contribution::new(goal.id, Money::from_units(100), after.updated_at.date_naive());

        storage.log_create(&goal).unwrap();
        storage.log_contribution(&goal, &after, &contribution).unwrap();
        storage.log_delete(&after).unwrap();

        let entries = storage.audit().read_all().unwrap();
        let ops: Vec<(Operation, EntityType)> =
            entries.iter().map(|e| (e.operation, e.entity_type)).collect();
        assert_eq!(
            ops,
            vec![
                (Operation::Create, EntityType::SavingsGoal),
                (Operation::Update, EntityType::SavingsGoal),
                (Operation::Create, EntityType::Contribution),
                (Operation::Delete, EntityType::SavingsGoal),
            ]
        );
        assert_eq!(entries[0].entity_name.as_deref(), Some("Laptop"));
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("current_amount: 0 -> 10000")
        );
    }
}
