//! YAML export
//!
//! Same content as the JSON export, in a form that is easier to read.

use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export all data to YAML, preceded by a comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;
    export.validate().map_err(FintrackError::Export)?;

    let header = format!(
        "# fintrack data export\n# Generated: {}\n# App version: {}\n\n",
        export.exported_at.to_rfc3339(),
        export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FintrackError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FintrackError::Export(e.to_string()))
}
