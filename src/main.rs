use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fintrack::cli::{
    handle_budget_command, handle_export_command, handle_goal_command, handle_report_command,
    handle_transaction_command, today, BudgetCommands, ExportCommands, GoalCommands,
    ReportCommands, TransactionCommands,
};
use fintrack::config::paths::DATA_DIR_ENV;
use fintrack::config::{FintrackPaths, Settings};
use fintrack::display::{format_audit_log, format_dashboard};
use fintrack::metrics::build_dashboard;
use fintrack::models::Month;
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Terminal personal finance tracker",
    long_about = "fintrack records income and expenses, tracks monthly budgets per \
                  category and follows savings goals, with reports and a dashboard \
                  computed from your own data."
)]
struct Cli {
    /// Directory holding fintrack's data and settings
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Show recent audit log entries
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Overview of one month: totals, budgets, goals and alerts
    Dashboard {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<Month>,
    },

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Financial reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show paths and settings
    Show,
    /// Change a setting
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => FintrackPaths::with_base_dir(dir),
        None => FintrackPaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing fintrack at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Record your first transaction with:");
            println!("  fintrack transaction add income Salary 3000 \"Monthly salary\"");
        }
        Some(Commands::Config { action }) => match action.unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => print_config(&paths, &settings),
            ConfigCommands::Set { key, value } => {
                settings.set(&key, &value)?;
                settings.save(&paths)?;
                println!("Set {} = {}", key, value);
            }
        },
        Some(Commands::Log { count }) => {
            let entries = storage.audit().read_recent(count)?;
            print!("{}", format_audit_log(&entries));
        }
        Some(Commands::Dashboard { month }) => {
            let today = today();
            let dashboard = build_dashboard(
                &storage.transactions.all()?,
                &storage.budgets.all()?,
                &storage.goals.all()?,
                month.unwrap_or_else(|| Month::of(today)),
                today,
                settings.budget_warning_threshold,
            );
            print!("{}", format_dashboard(&dashboard, &settings));
        }
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&storage, &settings, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        None => {
            println!("fintrack - Terminal personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack dashboard' for this month's overview.");
        }
    }

    Ok(())
}

fn print_config(paths: &FintrackPaths, settings: &Settings) {
    println!("fintrack Configuration");
    println!("======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Export directory: {}", paths.export_dir().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!(
        "Initialized:      {}",
        if paths.is_initialized() { "yes" } else { "no" }
    );
    println!();
    println!("Settings:");
    println!("  currency_symbol:          {}", settings.currency_symbol);
    println!("  date_format:              {}", settings.date_format);
    println!("  budget_warning_threshold: {}", settings.budget_warning_threshold);
    println!("  default_goal_sort:        {}", settings.default_goal_sort);
    println!("  page_size:                {}", settings.page_size);
    println!("  trend_months:             {}", settings.trend_months);
}
