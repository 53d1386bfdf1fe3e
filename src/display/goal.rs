//! Savings goal display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, heading, money, separator, WIDTH};
use crate::config::Settings;
use crate::metrics::{compute_goal_progress, monthly_contribution_needed, GoalsSummary};
use crate::models::{Contribution, SavingsGoal};

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Per month")]
    monthly: String,
}

impl GoalRow {
    fn new(goal: &SavingsGoal, today: NaiveDate, settings: &Settings) -> Self {
        let progress = compute_goal_progress(goal);
        let monthly = if progress.is_complete {
            "done".to_string()
        } else {
            money(monthly_contribution_needed(goal, today), settings)
        };

        Self {
            id: goal.id.to_string(),
            name: goal.name.clone(),
            saved: money(goal.current_amount, settings),
            target: money(goal.target_amount, settings),
            progress: format!(
                "{} {:>3}%",
                format_bar(progress.percentage as f64, 100.0, 10),
                progress.percentage
            ),
            due: goal.target_date.format(&settings.date_format).to_string(),
            monthly,
        }
    }
}

/// Format goals as a table, in the order given
pub fn format_goal_list(goals: &[SavingsGoal], today: NaiveDate, settings: &Settings) -> String {
    if goals.is_empty() {
        return "No savings goals found.\n".to_string();
    }

    let rows = goals.iter().map(|g| GoalRow::new(g, today, settings));
    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');
    output.push_str(&format_goals_summary(&GoalsSummary::from_goals(goals), settings));
    output
}

pub fn format_goals_summary(summary: &GoalsSummary, settings: &Settings) -> String {
    format!(
        "{} of {} saved ({}%), {} of {} goals complete\n",
        money(summary.total_saved, settings),
        money(summary.total_targeted, settings),
        summary.overall_percentage,
        summary.completed,
        summary.count
    )
}

/// Format one goal with its contribution history
pub fn format_goal_details(
    goal: &SavingsGoal,
    contributions: &[Contribution],
    today: NaiveDate,
    settings: &Settings,
) -> String {
    let progress = compute_goal_progress(goal);
    let mut output = heading(&format!("Goal: {}", goal.name));

    output.push_str(&format!("  ID:          {}\n", goal.id));
    output.push_str(&format!("  Category:    {}\n", goal.category));
    output.push_str(&format!("  Target:      {}\n", money(goal.target_amount, settings)));
    output.push_str(&format!("  Saved:       {}\n", money(goal.current_amount, settings)));
    output.push_str(&format!("  Remaining:   {}\n", money(progress.remaining, settings)));
    output.push_str(&format!(
        "  Progress:    {} {}%\n",
        format_bar(progress.percentage as f64, 100.0, 20),
        progress.percentage
    ));
    output.push_str(&format!(
        "  Target date: {}\n",
        goal.target_date.format(&settings.date_format)
    ));

    if progress.is_complete {
        output.push_str("  Status:      Complete\n");
    } else {
        output.push_str(&format!(
            "  Needed:      {} per month\n",
            money(monthly_contribution_needed(goal, today), settings)
        ));
        if goal.target_date < today {
            output.push_str("  Status:      Past due\n");
        }
    }

    if !goal.notes.is_empty() {
        output.push_str(&format!("  Notes:       {}\n", goal.notes));
    }

    output.push_str(&format!("{}\n", separator(WIDTH)));
    if contributions.is_empty() {
        output.push_str("No contributions yet.\n");
    } else {
        output.push_str("Contributions:\n");
        for c in contributions {
            output.push_str(&format!(
                "  {}  {:>12}  {}\n",
                c.date.format(&settings.date_format),
                money(c.amount, settings),
                c.id
            ));
        }
    }

    output
}
