//! Budget CLI commands
//!
//! Monthly spending ceilings per category, and progress against them.

use clap::Subcommand;

use super::month_or_current;
use crate::config::Settings;
use crate::display::{format_budget_list, format_budget_overview};
use crate::error::FintrackResult;
use crate::models::{Category, Money, Month};
use crate::services::{BudgetService, BudgetUpdate};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set a budget for a category
    Set {
        /// Expense category
        category: Category,
        /// Monthly ceiling (e.g. "600" or "600.00")
        amount: Money,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Change a budget
    Edit {
        /// Budget ID
        id: String,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short, long)]
        amount: Option<Money>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: String,
    },
    /// List the budgets set for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Show spending against each budget
    Progress {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
        /// Print items, summary, alerts and chart series as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FintrackResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
            notes,
        } => {
            let budget = service.create(category, month_or_current(month), amount, notes)?;
            println!("Budget set {}: {}", budget.id, budget);
        }

        BudgetCommands::Edit {
            id,
            category,
            amount,
            notes,
        } => {
            if category.is_none() && amount.is_none() && notes.is_none() {
                println!("Nothing to change. Pass at least one of --category, --amount, --notes.");
                return Ok(());
            }

            let budget = service.update(
                &id,
                BudgetUpdate {
                    category,
                    amount,
                    notes,
                },
            )?;
            println!("Updated {}: {}", budget.id, budget);
        }

        BudgetCommands::Delete { id } => {
            let budget = service.delete(&id)?;
            println!("Deleted {}: {}", budget.id, budget);
        }

        BudgetCommands::List { month } => {
            let month = month_or_current(month);
            let budgets = service.list(month)?;
            print!("{}", format_budget_list(month, &budgets, settings));
        }

        BudgetCommands::Progress { month, json } => {
            let overview =
                service.overview(month_or_current(month), settings.budget_warning_threshold)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
            } else {
                print!("{}", format_budget_overview(&overview, settings));
            }
        }
    }

    Ok(())
}
