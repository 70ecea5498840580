use crate::data::datatable::DataTable;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Handles writing cleaned tables and run reports to disk
pub struct TableExporter;

impl TableExporter {
    /// Write a DataTable to CSV at the given path. Returns rows written.
    pub fn write_csv(table: &DataTable, path: &Path) -> Result<usize> {
        if table.column_count() == 0 {
            return Err(anyhow!("No data to export"));
        }

        let mut file = File::create(path)
            .with_context(|| format!("Cannot write output file {}", path.display()))?;

        // Write headers
        let headers = table.column_names();
        let header_line = headers
            .iter()
            .map(|h| Self::escape_csv_field(h))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(file, "{}", header_line)
            .with_context(|| format!("Cannot write output file {}", path.display()))?;

        // Write data rows; Null cells serialize as empty fields
        let mut row_count = 0;
        for row_data in table.to_string_table() {
            let row: Vec<String> = row_data.iter().map(|s| Self::escape_csv_field(s)).collect();
            writeln!(file, "{}", row.join(","))
                .with_context(|| format!("Cannot write output file {}", path.display()))?;
            row_count += 1;
        }

        info!("Exported {} rows to {}", row_count, path.display());
        Ok(row_count)
    }

    /// Serialize a run summary to a timestamped JSON file next to the cwd.
    /// Returns the path written.
    pub fn write_json_report<T: Serialize>(report: &T, prefix: &str) -> Result<PathBuf> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}_{}.json", prefix, timestamp);
        let path = PathBuf::from(filename);

        let file = File::create(&path)
            .with_context(|| format!("Cannot write report file {}", path.display()))?;
        serde_json::to_writer_pretty(file, report)
            .with_context(|| format!("Cannot write report file {}", path.display()))?;

        info!("Wrote run report to {}", path.display());
        Ok(path)
    }

    /// Helper to escape CSV fields that contain special characters
    fn escape_csv_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            // Escape quotes by doubling them and wrap field in quotes
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}
