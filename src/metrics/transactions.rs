//! Transaction totals, filtering and pagination

use serde::Serialize;

use crate::models::{Category, Money, Month, Transaction, TransactionKind};

/// Income, expense and balance over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
}

/// Sum income and expense amounts; balance is income minus expense
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();

    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => totals.income += txn.amount,
            TransactionKind::Expense => totals.expense += txn.amount,
        }
    }

    totals.balance = totals.income - totals.expense;
    totals
}

/// Criteria for narrowing a transaction list
///
/// Every criterion left unset matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description or category label
    pub search: Option<String>,
    pub category: Option<Category>,
    pub kind: Option<TransactionKind>,
    pub month: Option<Month>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// True when no criterion would exclude anything
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.category.is_none()
            && self.kind.is_none()
            && self.month.is_none()
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(term) = self.search_term() {
            let in_description = txn.description.to_lowercase().contains(&term);
            let in_category = txn.category.label().to_lowercase().contains(&term);
            if !in_description && !in_category {
                return false;
            }
        }

        self.category.map_or(true, |c| txn.category == c)
            && self.kind.map_or(true, |k| txn.kind == k)
            && self.month.map_or(true, |m| m.contains(txn.date))
    }
}

/// Transactions matching `filter`, in input order
pub fn filter_transactions(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

/// One page of a longer list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    /// At least 1, even for an empty list
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Slice out page `page` (1-based) of `items`
///
/// Out-of-range pages are clamped to the nearest valid page, and a
/// `per_page` of zero is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}
