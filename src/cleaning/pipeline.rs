use crate::cleaning::filler::{fill_missing, SidePicker};
use crate::cleaning::scanner::scan_missing;
use crate::cleaning::sorter::sort_rows;
use crate::config::config::SortConfig;
use crate::data::exporter::TableExporter;
use crate::data::loader::TableLoader;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Per-column view of what the run found and fixed
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub missing: usize,
    pub filled: usize,
}

/// Everything one cleaning run did, for the console report and the
/// optional JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct CleanSummary {
    pub input: String,
    pub output: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    pub missing_before: usize,
    pub missing_after: usize,
    pub filled: usize,
    pub unresolved: usize,
    pub per_column: Vec<ColumnReport>,
    pub sort_key: String,
}

/// Run the whole pipeline over one file: load, scan for missing cells,
/// fill from neighbors, sort, write the cleaned table to `output`.
/// Stages run strictly in that order on the single in-memory table.
pub fn clean_file(
    input: &Path,
    output: &Path,
    sort_column: Option<&str>,
    sort_config: &SortConfig,
    picker: &mut dyn SidePicker,
) -> Result<CleanSummary> {
    let mut table = TableLoader::load(input)?;
    let rows = table.row_count();
    let columns = table.column_count();
    let column_names = table.column_names();

    let scan = scan_missing(&table);
    let outcome = fill_missing(&mut table, &scan, picker)?;

    // Column metadata should describe the cleaned data, not the raw load
    table.infer_column_types();

    let applied = sort_rows(&mut table, sort_column, sort_config)?;

    TableExporter::write_csv(&table, output)?;

    let per_column = column_names
        .iter()
        .enumerate()
        .map(|(i, name)| ColumnReport {
            name: name.clone(),
            missing: scan.column_counts[i],
            filled: outcome.filled_per_column[i],
        })
        .collect();

    info!(
        "Cleaned {}: {} missing, {} filled, {} unresolved, sort: {}",
        input.display(),
        scan.total,
        outcome.filled,
        outcome.unresolved,
        applied
    );

    Ok(CleanSummary {
        input: input.display().to_string(),
        output: output.display().to_string(),
        rows,
        columns,
        column_names,
        missing_before: scan.total,
        missing_after: outcome.unresolved,
        filled: outcome.filled,
        unresolved: outcome.unresolved,
        per_column,
        sort_key: applied.to_string(),
    })
}

impl CleanSummary {
    /// Columns that had missing cells, for the per-column report lines
    pub fn columns_with_missing(&self) -> impl Iterator<Item = &ColumnReport> {
        self.per_column.iter().filter(|c| c.missing > 0)
    }
}
