//! Savings goal CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::today;
use crate::config::Settings;
use crate::display::{format_goal_details, format_goal_list};
use crate::error::{FintrackError, FintrackResult};
use crate::metrics::{compute_goal_progress, GoalSort};
use crate::models::{GoalCategory, Money};
use crate::services::{CreateGoalInput, GoalService, GoalUpdate};
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Goal name (3-50 characters)
        name: String,
        /// Amount to save
        target: Money,
        /// Date to reach it by (YYYY-MM-DD)
        target_date: NaiveDate,
        /// Amount already saved
        #[arg(long)]
        current: Option<Money>,
        /// Goal category (e.g. "Emergency Fund", "Vacation")
        #[arg(short, long)]
        category: Option<GoalCategory>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List goals
    List {
        /// progress, deadline, amount or name
        #[arg(short, long)]
        sort: Option<GoalSort>,
    },
    /// Show a goal with its contributions
    Show {
        /// Goal ID or name
        goal: String,
    },
    /// Add money to a goal
    Contribute {
        /// Goal ID or name
        goal: String,
        amount: Money,
        /// Contribution date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Change a goal
    Edit {
        /// Goal ID or name
        goal: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<Money>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        category: Option<GoalCategory>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a goal and its contributions
    Delete {
        /// Goal ID or name
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FintrackResult<()> {
    let service = GoalService::new(storage);

    match cmd {
        GoalCommands::Add {
            name,
            target,
            target_date,
            current,
            category,
            notes,
        } => {
            let mut input = CreateGoalInput::new(name, target, target_date);
            if let Some(current) = current {
                input.current_amount = current;
            }
            if let Some(category) = category {
                input.category = category;
            }
            if let Some(notes) = notes {
                input.notes = notes;
            }

            let goal = service.create(input, today())?;
            println!("Created goal {}: {}", goal.id, goal);
        }

        GoalCommands::List { sort } => {
            let goals = service.list(sort.unwrap_or(settings.default_goal_sort))?;
            print!("{}", format_goal_list(&goals, today(), settings));
        }

        GoalCommands::Show { goal } => {
            let goal = service
                .find(&goal)?
                .ok_or_else(|| FintrackError::goal_not_found(&goal))?;
            let contributions = service.contributions(&goal)?;
            print!("{}", format_goal_details(&goal, &contributions, today(), settings));
        }

        GoalCommands::Contribute { goal, amount, date } => {
            let (goal, contribution) = service.contribute(&goal, amount, date.unwrap_or_else(today))?;
            let progress = compute_goal_progress(&goal);

            println!("Added {} to '{}'", contribution.amount, goal.name);
            if progress.is_complete {
                println!("Goal reached! {} saved.", goal.current_amount);
            } else {
                println!(
                    "{} of {} saved ({}%)",
                    goal.current_amount, goal.target_amount, progress.percentage
                );
            }
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            date,
            category,
            notes,
        } => {
            let update = GoalUpdate {
                name,
                target_amount: target,
                target_date: date,
                category,
                notes,
            };
            let updated = service.update(&goal, update)?;
            println!("Updated goal {}: {}", updated.id, updated);
        }

        GoalCommands::Delete { goal } => {
            let goal = service.delete(&goal)?;
            println!("Deleted goal '{}'", goal.name);
        }
    }

    Ok(())
}
