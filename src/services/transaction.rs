//! Transaction service
//!
//! Create, edit and delete income and expense records, and query them
//! through the metrics filters.

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::metrics::{compute_totals, filter_transactions, Totals, TransactionFilter};
use crate::models::{Category, Money, Transaction, TransactionId, TransactionKind};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: String,
}

/// Fields to change on an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FintrackResult<Transaction> {
        let txn = Transaction::new(
            input.kind,
            input.category,
            input.amount,
            input.date,
            input.description,
        );

        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.transactions.insert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_create(&txn)?;

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> FintrackResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full or short id
    pub fn find(&self, identifier: &str) -> FintrackResult<Option<Transaction>> {
        self.storage.transactions.find(identifier)
    }

    fn require(&self, identifier: &str) -> FintrackResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| FintrackError::transaction_not_found(identifier))
    }

    /// Matching transactions, newest first
    pub fn list(&self, filter: &TransactionFilter) -> FintrackResult<Vec<Transaction>> {
        let mut transactions = filter_transactions(&self.storage.transactions.all()?, filter);
        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(transactions)
    }

    /// Income, expense and balance over the matching transactions
    pub fn totals(&self, filter: &TransactionFilter) -> FintrackResult<Totals> {
        Ok(compute_totals(&filter_transactions(
            &self.storage.transactions.all()?,
            filter,
        )))
    }

    /// Apply an update; the edited record must still validate
    pub fn update(&self, identifier: &str, update: TransactionUpdate) -> FintrackResult<Transaction> {
        let before = self.require(identifier)?;

        if update.is_empty() {
            return Ok(before);
        }

        let mut txn = before.clone();
        if let Some(kind) = update.kind {
            txn.kind = kind;
        }
        if let Some(category) = update.category {
            txn.category = category;
        }
        if let Some(amount) = update.amount {
            txn.amount = amount;
        }
        if let Some(date) = update.date {
            txn.date = date;
        }
        if let Some(description) = update.description {
            txn.description = description.trim().to_string();
        }
        txn.touch();

        txn.validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_update(&before, &txn)?;

        Ok(txn)
    }

    pub fn delete(&self, identifier: &str) -> FintrackResult<Transaction> {
        let txn = self.require(identifier)?;

        self.storage.transactions.remove(txn.id)?;
        self.storage.transactions.save()?;
        self.storage.log_delete(&txn)?;

        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FintrackPaths;
    use crate::models::Month;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(FintrackPaths::with_base_dir(temp_dir.path())).unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(kind: TransactionKind, category: Category, units: i64, day: u32, desc: &str) -> CreateTransactionInput {
        CreateTransactionInput {
            kind,
            category,
            amount: Money::from_units(units),
            date: date(2025, 1, day),
            description: desc.to_string(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .create(input(TransactionKind::Expense, Category::Food, 45, 3, "  Groceries  "))
            .unwrap();

        assert_eq!(txn.description, "Groceries");
        assert_eq!(service.find(&txn.id.to_string()).unwrap(), Some(txn.clone()));
        assert_eq!(service.get(txn.id).unwrap(), Some(txn));
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_create_validates() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let short = service.create(input(TransactionKind::Expense, Category::Food, 5, 1, "ab"));
        assert!(short.unwrap_err().is_validation());

        let zero = service.create(input(TransactionKind::Expense, Category::Food, 0, 1, "Nothing"));
        assert!(zero.unwrap_err().is_validation());

        let mismatch = service.create(input(TransactionKind::Income, Category::Housing, 5, 1, "Rent back"));
        assert!(mismatch.unwrap_err().is_validation());

        assert!(storage.transactions.is_empty().unwrap());
        assert_eq!(storage.audit().entry_count().unwrap(), 0);
    }

    #[test]
    fn test_list_newest_first_with_filter() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(input(TransactionKind::Income, Category::Salary, 3000, 1, "Salary")).unwrap();
        service.create(input(TransactionKind::Expense, Category::Food, 40, 9, "Pizza night")).unwrap();
        service.create(input(TransactionKind::Expense, Category::Food, 60, 4, "Groceries")).unwrap();

        let all = service.list(&TransactionFilter::new()).unwrap();
        let days: Vec<u32> = all.iter().map(|t| chrono::Datelike::day(&t.date)).collect();
        assert_eq!(days, vec![9, 4, 1]);

        let food = service
            .list(&TransactionFilter::new().category(Category::Food))
            .unwrap();
        assert_eq!(food.len(), 2);

        let totals = service
            .totals(&TransactionFilter::new().month(Month::new(2025, 1).unwrap()))
            .unwrap();
        assert_eq!(totals.income, Money::from_units(3000));
        assert_eq!(totals.expense, Money::from_units(100));
        assert_eq!(totals.balance, Money::from_units(2900));
    }

    #[test]
    fn test_update() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(input(TransactionKind::Expense, Category::Food, 45, 3, "Groceries"))
            .unwrap();

        let updated = service
            .update(
                &txn.id.to_string(),
                TransactionUpdate {
                    amount: Some(Money::from_units(50)),
                    description: Some("Weekly groceries".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.amount, Money::from_units(50));
        assert_eq!(updated.id, txn.id);
        assert_eq!(storage.transactions.len().unwrap(), 1);

        let log = storage.audit().read_all().unwrap();
        let diff = log[1].diff_summary.as_deref().unwrap();
        assert!(diff.contains("amount: 4500 -> 5000"));
    }

    #[test]
    fn test_update_rejects_invalid_result() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(input(TransactionKind::Expense, Category::Food, 45, 3, "Groceries"))
            .unwrap();

        let err = service
            .update(
                &txn.id.to_string(),
                TransactionUpdate {
                    kind: Some(TransactionKind::Income),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(txn.id).unwrap(), Some(txn));
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(input(TransactionKind::Expense, Category::Food, 45, 3, "Groceries"))
            .unwrap();

        service.delete(&txn.id.short()).unwrap();
        assert!(service.get(txn.id).unwrap().is_none());
        assert!(service.delete(&txn.id.short()).unwrap_err().is_not_found());
    }
}
