//! Configuration for fintrack
//!
//! Path resolution for the data directory and the user's settings file.

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::Settings;
