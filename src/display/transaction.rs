//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{money, truncate};
use crate::config::Settings;
use crate::metrics::{Page, Totals};
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, settings: &Settings) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format(&settings.date_format).to_string(),
            kind: txn.kind.to_string(),
            category: txn.category.to_string(),
            description: truncate(&txn.description, 32),
            amount: money(txn.signed_amount(), settings),
        }
    }
}

/// Format one page of transactions as a table with a page footer
pub fn format_transaction_page(page: &Page<Transaction>, settings: &Settings) -> String {
    if page.total_items == 0 {
        return "No transactions found.\n".to_string();
    }

    let rows = page.items.iter().map(|t| TransactionRow::new(t, settings));
    let mut output = Table::new(rows).with(Style::rounded()).to_string();

    output.push_str(&format!(
        "\nPage {} of {} ({} transactions)\n",
        page.page, page.total_pages, page.total_items
    ));
    output
}

pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Date:        {}\n", txn.date.format(&settings.date_format)));
    output.push_str(&format!("  Type:        {}\n", txn.kind));
    output.push_str(&format!("  Category:    {}\n", txn.category));
    output.push_str(&format!("  Amount:      {}\n", money(txn.amount, settings)));
    output.push_str(&format!("  Description: {}\n", txn.description));

    output
}

pub fn format_totals(totals: &Totals, settings: &Settings) -> String {
    format!(
        "Income:   {:>14}\nExpenses: {:>14}\nBalance:  {:>14}\n",
        money(totals.income, settings),
        money(totals.expense, settings),
        money(totals.balance, settings)
    )
}
