//! Report CLI commands

use clap::Subcommand;

use super::month_or_current;
use crate::config::Settings;
use crate::display::{format_category_distribution, format_report_summary, format_trends};
use crate::error::FintrackResult;
use crate::metrics::{
    category_distribution, compute_report_summary, filter_transactions, monthly_trends,
    trend_chart, TransactionFilter, MAX_TREND_MONTHS,
};
use crate::models::{Month, TransactionKind};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses, savings rate and largest categories
    Summary {
        /// Month (YYYY-MM); all time when omitted
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Share of each category in income or expenses
    Categories {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
        /// income or expense
        #[arg(short, long, default_value = "expense")]
        kind: TransactionKind,
    },
    /// Month-by-month income, expenses and savings
    Trends {
        /// Number of months, ending with --end (1 to 120)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=MAX_TREND_MONTHS as i64))]
        months: Option<u16>,
        /// Last month shown (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        end: Option<Month>,
        /// Print the chart series as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FintrackResult<()> {
    let transactions = storage.transactions.all()?;

    match cmd {
        ReportCommands::Summary { month } => {
            let (title, selected) = match month {
                Some(month) => (
                    format!("Summary: {}", month.label()),
                    filter_transactions(&transactions, &TransactionFilter::new().month(month)),
                ),
                None => ("Summary: all time".to_string(), transactions),
            };
            let summary = compute_report_summary(&selected);
            print!("{}", format_report_summary(&title, &summary, settings));
        }

        ReportCommands::Categories { month, kind } => {
            let month = month_or_current(month);
            let in_month =
                filter_transactions(&transactions, &TransactionFilter::new().month(month));
            let shares = category_distribution(&in_month, kind);

            println!("{} by category: {}", capitalize(&kind.to_string()), month.label());
            print!("{}", format_category_distribution(&shares, kind, settings));
        }

        ReportCommands::Trends { months, end, json } => {
            let count = months
                .map(usize::from)
                .unwrap_or(settings.trend_months)
                .max(1);
            let trends = monthly_trends(&transactions, month_or_current(end), count);
            if json {
                println!("{}", serde_json::to_string_pretty(&trend_chart(&trends))?);
            } else {
                print!("{}", format_trends(&trends, settings));
            }
        }
    }

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
