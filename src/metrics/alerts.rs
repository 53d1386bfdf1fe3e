//! User-facing alerts derived from budget progress

use serde::Serialize;
use std::fmt;

use super::budget::{BudgetProgressItem, BudgetStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertLevel::Error, message)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

fn categories_with(items: &[BudgetProgressItem], status: BudgetStatus) -> Vec<&'static str> {
    items
        .iter()
        .filter(|i| i.status == status)
        .map(|i| i.category.label())
        .collect()
}

/// Summarize budget progress as alerts
///
/// Exceeded budgets produce one error alert and near-limit budgets one
/// warning alert, each naming the categories involved. When neither
/// applies a single success alert is returned.
pub fn budget_alerts(items: &[BudgetProgressItem]) -> Vec<Alert> {
    if items.is_empty() {
        return vec![Alert::info("No budgets set for this month.")];
    }

    let mut alerts = Vec::new();

    let exceeded = categories_with(items, BudgetStatus::Exceeded);
    if !exceeded.is_empty() {
        alerts.push(Alert::error(format!(
            "You've exceeded your budget in: {}",
            exceeded.join(", ")
        )));
    }

    let near = categories_with(items, BudgetStatus::NearLimit);
    if !near.is_empty() {
        alerts.push(Alert::warning(format!(
            "You're close to exceeding your budget in: {}",
            near.join(", ")
        )));
    }

    if alerts.is_empty() {
        alerts.push(Alert::success("All budgets are on track."));
    }

    alerts
}
