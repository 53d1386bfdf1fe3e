//! Chart-ready series
//!
//! Labels plus named numeric datasets, the shape charting front-ends
//! consume. Amounts are in currency units, not cents.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            datasets: Vec::new(),
        }
    }

    /// Append a dataset; `data` should line up with the labels
    pub fn with_dataset(mut self, label: impl Into<String>, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), self.labels.len());
        self.datasets.push(Dataset {
            label: label.into(),
            data,
        });
        self
    }

    /// Look up a dataset by label
    pub fn dataset(&self, label: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}
