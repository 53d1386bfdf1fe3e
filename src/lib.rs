//! fintrack - Terminal personal finance tracker
//!
//! This library provides the core of the fintrack application: income and
//! expense tracking, monthly category budgets and savings goals, plus the
//! metrics that turn those records into progress figures, reports,
//! dashboard data and alerts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, goals, money, months)
//! - `metrics`: Pure aggregation functions over record snapshots
//! - `storage`: JSON file storage layer
//! - `services`: Validation, persistence and auditing of changes
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{FintrackPaths, Settings};
//! use fintrack::metrics::compute_budget_progress;
//! use fintrack::storage::Storage;
//!
//! let paths = FintrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//!
//! let progress = compute_budget_progress(
//!     &storage.budgets.all()?,
//!     &storage.transactions.all()?,
//! );
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
