use crate::config::config::SortConfig;
use crate::data::datatable::{DataTable, DataValue};
use crate::data::datavalue_compare::compare_optional_datavalues;
use anyhow::{anyhow, Result};
use std::fmt;
use tracing::info;

/// The ordering that ended up applied to the table, for the run report.
#[derive(Debug, Clone, PartialEq)]
pub enum SortApplied {
    Column { name: String, descending: bool },
    Chronological { year: String, month: String },
    Unsorted,
}

impl fmt::Display for SortApplied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortApplied::Column { name, descending } => {
                let direction = if *descending { "descending" } else { "ascending" };
                write!(f, "column '{}' ({})", name, direction)
            }
            SortApplied::Chronological { year, month } => {
                write!(f, "chronological ({} then {})", year, month)
            }
            SortApplied::Unsorted => write!(f, "none"),
        }
    }
}

/// Sort the table in place. An explicit column sorts descending when the
/// column is numeric and ascending otherwise; without one, the configured
/// year/month columns trigger the chronological default. Stable throughout,
/// so tied rows keep their original relative order.
pub fn sort_rows(
    table: &mut DataTable,
    explicit: Option<&str>,
    config: &SortConfig,
) -> Result<SortApplied> {
    if let Some(name) = explicit {
        let col = table.get_column_index(name).ok_or_else(|| {
            anyhow!(
                "Sort column '{}' not found (available: {})",
                name,
                table.column_names().join(", ")
            )
        })?;

        // Numeric columns rank high-to-low; everything else lexicographic.
        // Cells that failed numeric parsing compare as text, never an error.
        let descending = table.columns[col].data_type.is_numeric();
        table.rows.sort_by(|a, b| {
            let cmp = compare_optional_datavalues(a.get(col), b.get(col));
            if descending {
                cmp.reverse()
            } else {
                cmp
            }
        });

        info!("Sorted by column '{}' (descending: {})", name, descending);
        return Ok(SortApplied::Column {
            name: name.to_string(),
            descending,
        });
    }

    // No explicit column: fall back to year/month ordering when the table
    // carries recognizable date columns
    let year = config
        .year_columns
        .iter()
        .find(|n| table.get_column_index(n.as_str()).is_some());
    let month = config
        .month_columns
        .iter()
        .find(|n| table.get_column_index(n.as_str()).is_some());

    if let (Some(year), Some(month)) = (year, month) {
        let year_col = table.get_column_index(year).unwrap_or_default();
        let month_col = table.get_column_index(month).unwrap_or_default();

        table.rows.sort_by(|a, b| {
            compare_optional_datavalues(a.get(year_col), b.get(year_col))
                .then_with(|| month_rank(a.get(month_col)).cmp(&month_rank(b.get(month_col))))
        });

        info!("Sorted chronologically by '{}' then '{}'", year, month);
        return Ok(SortApplied::Chronological {
            year: year.clone(),
            month: month.clone(),
        });
    }

    info!("No sort column given and no date columns found; order unchanged");
    Ok(SortApplied::Unsorted)
}

/// Calendar position of a full English month name, case-insensitive.
pub fn month_ordinal(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    MONTHS
        .iter()
        .position(|m| name.eq_ignore_ascii_case(m))
        .map(|p| p as u32 + 1)
}

// Unrecognized or missing month names sort after December
fn month_rank(value: Option<&DataValue>) -> u32 {
    value
        .map(|v| v.to_string())
        .and_then(|s| month_ordinal(&s))
        .unwrap_or(13)
}
