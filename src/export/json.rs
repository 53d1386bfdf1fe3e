//! JSON export
//!
//! Full snapshot of every record with schema versioning.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{BudgetAllocation, Contribution, SavingsGoal, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,

    pub budgets: Vec<BudgetAllocation>,

    pub goals: Vec<SavingsGoal>,

    pub contributions: Vec<Contribution>,

    pub metadata: ExportMetadata,
}

/// Record counts and the transaction date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_count: usize,
    pub goal_count: usize,
    pub contribution_count: usize,
    pub earliest_transaction: Option<NaiveDate>,
    pub latest_transaction: Option<NaiveDate>,
}

impl FullExport {
    /// Snapshot everything in storage
    pub fn from_storage(storage: &Storage) -> FintrackResult<Self> {
        let transactions = storage.transactions.all()?;
        let budgets = storage.budgets.all()?;
        let goals = storage.goals.all()?;
        let contributions = storage.contributions.all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            goal_count: goals.len(),
            contribution_count: contributions.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min(),
            latest_transaction: transactions.iter().map(|t| t.date).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budgets,
            goals,
            contributions,
            metadata,
        })
    }

    /// Check the schema version and that every contribution belongs to a goal
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let goal_ids: HashSet<_> = self.goals.iter().map(|g| g.id).collect();
        for contribution in &self.contributions {
            if !goal_ids.contains(&contribution.goal_id) {
                return Err(format!(
                    "Contribution {} references unknown goal {}",
                    contribution.id, contribution.goal_id
                ));
            }
        }

        Ok(())
    }
}

/// Export all data to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;
    export.validate().map_err(FintrackError::Export)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FintrackError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::{Category, GoalId, Money, Month};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(FintrackPaths::with_base_dir(temp_dir.path())).unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn populate(storage: &Storage) {
        storage
            .transactions
            .insert(Transaction::expense(Category::Food, Money::from_units(20), date(3), "Lunch"))
            .unwrap();
        storage
            .transactions
            .insert(Transaction::expense(Category::Food, Money::from_units(35), date(17), "Dinner"))
            .unwrap();
        storage
            .budgets
            .insert(BudgetAllocation::new(
                Category::Food,
                Month::new(2025, 2).unwrap(),
                Money::from_units(300),
            ))
            .unwrap();

        let goal = SavingsGoal::new("Vacation", Money::from_units(2000), date(28))
            .with_current(Money::from_units(100));
        storage
            .contributions
            .insert(Contribution::new(goal.id, Money::from_units(100), date(5)))
            .unwrap();
        storage.goals.insert(goal).unwrap();
    }

    #[test]
    fn test_full_export() {
        let (_temp, storage) = create_test_storage();
        populate(&storage);

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.goal_count, 1);
        assert_eq!(export.metadata.earliest_transaction, Some(date(3)));
        assert_eq!(export.metadata.latest_transaction, Some(date(17)));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_orphan_contribution_fails_validation() {
        let (_temp, storage) = create_test_storage();
        storage
            .contributions
            .insert(Contribution::new(GoalId::new(), Money::from_units(5), date(1)))
            .unwrap();

        let export = FullExport::from_storage(&storage).unwrap();
        assert!(export.validate().unwrap_err().contains("unknown goal"));

        let mut output = Vec::new();
        let err = export_full_json(&storage, &mut output, true).unwrap_err();
        assert!(matches!(err, FintrackError::Export(_)));
    }

    #[test]
    fn test_json_output_parses_back() {
        let (_temp, storage) = create_test_storage();
        populate(&storage);

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, false).unwrap();

        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.budgets.len(), 1);
        assert_eq!(parsed.goals[0].name, "Vacation");
        assert_eq!(parsed.contributions[0].goal_id, parsed.goals[0].id);
    }
}
