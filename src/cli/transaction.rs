//! Transaction CLI commands

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::today;
use crate::config::Settings;
use crate::display::{format_totals, format_transaction_details, format_transaction_page};
use crate::error::{FintrackError, FintrackResult};
use crate::metrics::{paginate, TransactionFilter};
use crate::models::{Category, Money, Month, TransactionKind};
use crate::services::{CreateTransactionInput, TransactionService, TransactionUpdate};
use crate::storage::Storage;

/// Filters shared by `list` and `totals`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Match text in the description or category
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only this category
    #[arg(short = 'C', long)]
    pub category: Option<Category>,
    /// Only income or only expenses
    #[arg(short, long)]
    pub kind: Option<TransactionKind>,
    /// Only this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<Month>,
}

impl FilterArgs {
    fn into_filter(self) -> TransactionFilter {
        let mut filter = TransactionFilter::new();
        if let Some(search) = self.search {
            filter = filter.search(search);
        }
        if let Some(category) = self.category {
            filter = filter.category(category);
        }
        if let Some(kind) = self.kind {
            filter = filter.kind(kind);
        }
        if let Some(month) = self.month {
            filter = filter.month(month);
        }
        filter
    }
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record income or an expense
    Add {
        /// income or expense
        kind: TransactionKind,
        /// Category name (e.g. "Food", "Salary")
        category: Category,
        /// Amount (e.g. "12", "12.50", "$12.50")
        amount: Money,
        /// What the money was for
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// List transactions, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(short, long)]
        kind: Option<TransactionKind>,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short, long)]
        amount: Option<Money>,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Income, expense and balance totals
    Totals {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FintrackResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            category,
            amount,
            description,
            date,
        } => {
            let txn = service.create(CreateTransactionInput {
                kind,
                category,
                amount,
                date: date.unwrap_or_else(today),
                description,
            })?;
            println!("Recorded {}: {}", txn.id, txn);
        }

        TransactionCommands::List { filter, page } => {
            let transactions = service.list(&filter.into_filter())?;
            let page = paginate(&transactions, page, settings.page_size);
            print!("{}", format_transaction_page(&page, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FintrackError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Edit {
            id,
            kind,
            category,
            amount,
            description,
            date,
        } => {
            let update = TransactionUpdate {
                kind,
                category,
                amount,
                date,
                description,
            };
            if update.is_empty() {
                println!("Nothing to change. Pass at least one of --kind, --category, --amount, --description, --date.");
                return Ok(());
            }

            let txn = service.update(&id, update)?;
            println!("Updated {}", txn.id);
            print!("{}", format_transaction_details(&txn, settings));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(&id)?;
            println!("Deleted {}: {}", txn.id, txn);
        }

        TransactionCommands::Totals { filter } => {
            let totals = service.totals(&filter.into_filter())?;
            print!("{}", format_totals(&totals, settings));
        }
    }

    Ok(())
}
