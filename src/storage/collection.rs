//! Generic record collection backed by one JSON file
//!
//! Records keep their insertion order. The file holds a single object,
//! `{"records": [...]}`, rewritten atomically on every save.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::audit::EntityType;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{BudgetAllocation, Contribution, SavingsGoal, Transaction};

use super::file_io::{read_json, write_json_atomic};

/// A persisted record with a stable id
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + fmt::Display;

    /// Entity name used in not-found and duplicate errors
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    /// Whether user input (full UUID or short display id) names this record
    fn matches_id(&self, input: &str) -> bool;

    fn entity_type() -> EntityType;

    /// Human-readable label for the audit log
    fn audit_label(&self) -> Option<String>;
}

impl Record for Transaction {
    type Id = crate::models::TransactionId;
    const ENTITY: &'static str = "Transaction";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn entity_type() -> EntityType {
        EntityType::Transaction
    }

    fn audit_label(&self) -> Option<String> {
        Some(self.description.clone())
    }
}

impl Record for BudgetAllocation {
    type Id = crate::models::BudgetId;
    const ENTITY: &'static str = "Budget";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn entity_type() -> EntityType {
        EntityType::BudgetAllocation
    }

    fn audit_label(&self) -> Option<String> {
        Some(format!("{} {}", self.month, self.category))
    }
}

impl Record for SavingsGoal {
    type Id = crate::models::GoalId;
    const ENTITY: &'static str = "Goal";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn entity_type() -> EntityType {
        EntityType::SavingsGoal
    }

    fn audit_label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Record for Contribution {
    type Id = crate::models::ContributionId;
    const ENTITY: &'static str = "Contribution";

    fn id(&self) -> Self::Id {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn entity_type() -> EntityType {
        EntityType::Contribution
    }

    fn audit_label(&self) -> Option<String> {
        None
    }
}

/// On-disk layout of a collection file
#[derive(Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct RecordFile<T> {
    #[serde(default)]
    records: Vec<T>,
}

impl<T> Default for RecordFile<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

fn lock_error(e: impl fmt::Display) -> FintrackError {
    FintrackError::Storage(format!("Failed to acquire lock: {}", e))
}

/// In-memory copy of one collection file
pub struct Collection<T: Record> {
    path: PathBuf,
    records: RwLock<Vec<T>>,
}

impl<T: Record> Collection<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory records with the file's contents
    pub fn load(&self) -> FintrackResult<()> {
        let file: RecordFile<T> = read_json(&self.path)?;
        *self.records.write().map_err(lock_error)? = file.records;
        Ok(())
    }

    pub fn save(&self) -> FintrackResult<()> {
        let records = self.records.read().map_err(lock_error)?;
        write_json_atomic(
            &self.path,
            &RecordFile {
                records: records.clone(),
            },
        )
    }

    pub fn get(&self, id: T::Id) -> FintrackResult<Option<T>> {
        let records = self.records.read().map_err(lock_error)?;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    /// Look a record up by full UUID or short display id
    ///
    /// Fails when a short id is shared by more than one record.
    pub fn find(&self, input: &str) -> FintrackResult<Option<T>> {
        let records = self.records.read().map_err(lock_error)?;
        let mut matches = records.iter().filter(|r| r.matches_id(input));

        match (matches.next(), matches.next()) {
            (Some(_), Some(_)) => Err(FintrackError::Validation(format!(
                "{} id '{}' is ambiguous; use the full id",
                T::ENTITY,
                input
            ))),
            (found, _) => Ok(found.cloned()),
        }
    }

    /// All records in insertion order
    pub fn all(&self) -> FintrackResult<Vec<T>> {
        Ok(self.records.read().map_err(lock_error)?.clone())
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> FintrackResult<Vec<T>> {
        let records = self.records.read().map_err(lock_error)?;
        Ok(records.iter().filter(|r| predicate(r)).cloned().collect())
    }

    pub fn len(&self) -> FintrackResult<usize> {
        Ok(self.records.read().map_err(lock_error)?.len())
    }

    pub fn is_empty(&self) -> FintrackResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Append a new record; its id must not be present yet
    pub fn insert(&self, record: T) -> FintrackResult<()> {
        let mut records = self.records.write().map_err(lock_error)?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(FintrackError::Duplicate {
                entity_type: T::ENTITY,
                identifier: record.id().to_string(),
            });
        }
        records.push(record);
        Ok(())
    }

    /// Replace the record with the same id in place, or append it
    pub fn upsert(&self, record: T) -> FintrackResult<()> {
        let mut records = self.records.write().map_err(lock_error)?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    /// Remove and return the record with `id`
    pub fn remove(&self, id: T::Id) -> FintrackResult<Option<T>> {
        let mut records = self.records.write().map_err(lock_error)?;
        let index = records.iter().position(|r| r.id() == id);
        Ok(index.map(|index| records.remove(index)))
    }

    /// Remove and return every record matching `predicate`
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> FintrackResult<Vec<T>> {
        let mut records = self.records.write().map_err(lock_error)?;
        let (removed, kept): (Vec<T>, Vec<T>) = records.drain(..).partition(|r| predicate(r));
        *records = kept;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, GoalId, Money, Month};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn collection() -> (Collection<BudgetAllocation>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let collection = Collection::new(temp_dir.path().join("budgets.json"));
        (collection, temp_dir)
    }

    fn budget(category: Category) -> BudgetAllocation {
        BudgetAllocation::new(category, Month::new(2025, 1).unwrap(), Money::from_units(100))
    }

    #[test]
    fn test_insert_keeps_order() {
        let (budgets, _temp) = collection();
        let first = budget(Category::Housing);
        let second = budget(Category::Food);

        budgets.insert(first.clone()).unwrap();
        budgets.insert(second.clone()).unwrap();

        assert_eq!(budgets.all().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_insert_rejects_existing_id() {
        let (budgets, _temp) = collection();
        let b = budget(Category::Housing);
        budgets.insert(b.clone()).unwrap();

        let err = budgets.insert(b).unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_save_and_load() {
        let (budgets, temp) = collection();
        let b = budget(Category::Utilities);
        budgets.insert(b.clone()).unwrap();
        budgets.save().unwrap();

        let contents = std::fs::read_to_string(temp.path().join("budgets.json")).unwrap();
        assert!(contents.contains("\"records\""));

        let reloaded: Collection<BudgetAllocation> = Collection::new(temp.path().join("budgets.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(b.id).unwrap(), Some(b));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (budgets, _temp) = collection();
        budgets.load().unwrap();
        assert!(budgets.is_empty().unwrap());
    }

    #[test]
    fn test_find_by_short_and_full_id() {
        let (budgets, _temp) = collection();
        let b = budget(Category::Food);
        budgets.insert(b.clone()).unwrap();

        assert_eq!(budgets.find(&b.id.to_string()).unwrap(), Some(b.clone()));
        assert_eq!(budgets.find(&b.id.as_uuid().to_string()).unwrap(), Some(b.clone()));
        assert_eq!(budgets.find(&b.id.short()).unwrap(), Some(b));
        assert_eq!(budgets.find("bud-00000000").unwrap(), None);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let (budgets, _temp) = collection();
        let first = budget(Category::Housing);
        let second = budget(Category::Food);
        budgets.insert(first.clone()).unwrap();
        budgets.insert(second.clone()).unwrap();

        let mut changed = first.clone();
        changed.set_amount(Money::from_units(900));
        budgets.upsert(changed.clone()).unwrap();

        assert_eq!(budgets.all().unwrap(), vec![changed, second]);
    }

    #[test]
    fn test_remove() {
        let (budgets, _temp) = collection();
        let b = budget(Category::Housing);
        budgets.insert(b.clone()).unwrap();

        assert_eq!(budgets.remove(b.id).unwrap(), Some(b.clone()));
        assert_eq!(budgets.remove(b.id).unwrap(), None);
        assert_eq!(budgets.len().unwrap(), 0);
    }

    #[test]
    fn test_remove_where() {
        let temp_dir = TempDir::new().unwrap();
        let contributions: Collection<Contribution> =
            Collection::new(temp_dir.path().join("contributions.json"));
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let goal = GoalId::new();
        let other = GoalId::new();

        contributions.insert(Contribution::new(goal, Money::from_units(10), date)).unwrap();
        contributions.insert(Contribution::new(other, Money::from_units(20), date)).unwrap();
        contributions.insert(Contribution::new(goal, Money::from_units(30), date)).unwrap();

        let removed = contributions.remove_where(|c| c.goal_id == goal).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(contributions.all().unwrap()[0].goal_id, other);
    }
}
