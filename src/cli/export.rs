//! CLI commands for data export

use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::month_or_current;
use crate::config::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::export::{csv, json, yaml};
use crate::models::Month;
use crate::storage::Storage;

/// Format for a full export
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Machine-readable
    Json,
    /// Human-readable
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },
    /// Export one month of budget progress to CSV
    Budget {
        /// Output file path
        output: PathBuf,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Export every record to one file
    All {
        /// Output file path, defaults to a timestamped file in the export directory
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show what an export would contain without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> FintrackResult<()> {
    match cmd {
        ExportCommands::Transactions { output } => {
            let mut writer = create_output(&output)?;
            let count = csv::export_transactions_csv(storage, &mut writer)?;
            finish(writer)?;
            println!("Exported {} transactions to: {}", count, output.display());
        }

        ExportCommands::Budget { output, month } => {
            let month = month_or_current(month);
            let mut writer = create_output(&output)?;
            let count = csv::export_budget_csv(
                storage,
                &mut writer,
                month,
                settings.budget_warning_threshold,
            )?;
            finish(writer)?;
            println!(
                "Exported {} budgets for {} to: {}",
                count,
                month.label(),
                output.display()
            );
        }

        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let output = output.unwrap_or_else(|| default_export_path(storage, format));
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
            }
            finish(writer)?;
            println!("Full export written to: {}", output.display());
        }

        ExportCommands::Info => {
            let export = json::FullExport::from_storage(storage)?;

            println!("Export Information");
            println!("==================");
            println!("Schema version: {}", export.schema_version);
            println!("App version:    {}", export.app_version);
            println!();
            println!("  Transactions:  {}", export.metadata.transaction_count);
            println!("  Budgets:       {}", export.metadata.budget_count);
            println!("  Goals:         {}", export.metadata.goal_count);
            println!("  Contributions: {}", export.metadata.contribution_count);

            if let (Some(earliest), Some(latest)) = (
                export.metadata.earliest_transaction,
                export.metadata.latest_transaction,
            ) {
                println!();
                println!("Transactions from {} to {}", earliest, latest);
            }
        }
    }

    Ok(())
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

fn default_export_path(storage: &Storage, format: ExportFormat) -> PathBuf {
    storage.paths().export_dir().join(format!(
        "fintrack-{}.{}",
        chrono::Local::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    ))
}

fn create_output(path: &Path) -> FintrackResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        FintrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> FintrackResult<()> {
    writer
        .flush()
        .map_err(|e| FintrackError::Export(e.to_string()))
}
