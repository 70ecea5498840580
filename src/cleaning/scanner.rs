use crate::data::datatable::{DataTable, DataValue};
use tracing::debug;

/// Result of a read-only pass over the table looking for absent cells.
#[derive(Debug, Clone)]
pub struct MissingScan {
    /// Missing-cell count per column, parallel to the table's columns
    pub column_counts: Vec<usize>,
    /// Locations of missing cells as (column, row), column-major so the
    /// filler walks each column top to bottom
    pub cells: Vec<(usize, usize)>,
    pub total: usize,
}

impl MissingScan {
    pub fn is_clean(&self) -> bool {
        self.total == 0
    }
}

/// A cell counts as missing when it holds the Null marker or a NaN float.
pub fn is_missing(value: &DataValue) -> bool {
    match value {
        DataValue::Null => true,
        DataValue::Float(f) => f.is_nan(),
        _ => false,
    }
}

/// Scan every cell of the table for missing values. Read-only.
pub fn scan_missing(table: &DataTable) -> MissingScan {
    let mut column_counts = vec![0usize; table.column_count()];
    let mut cells = Vec::new();

    for col in 0..table.column_count() {
        for row in 0..table.row_count() {
            if let Some(value) = table.get_value(row, col) {
                if is_missing(value) {
                    column_counts[col] += 1;
                    cells.push((col, row));
                }
            }
        }
    }

    let total = cells.len();
    debug!(
        "Missing-value scan: {} missing cells across {} columns",
        total,
        column_counts.iter().filter(|&&c| c > 0).count()
    );

    MissingScan {
        column_counts,
        cells,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::datatable::{DataColumn, DataRow, DataTable};

    fn table_with_gaps() -> DataTable {
        let mut table = DataTable::new("gaps");
        table.add_column(DataColumn::new("a"));
        table.add_column(DataColumn::new("b"));
        table
            .add_row(DataRow::new(vec![
                DataValue::Integer(1),
                DataValue::Null,
            ]))
            .unwrap();
        table
            .add_row(DataRow::new(vec![DataValue::Null, DataValue::Null]))
            .unwrap();
        table
            .add_row(DataRow::new(vec![
                DataValue::Integer(3),
                DataValue::String("x".to_string()),
            ]))
            .unwrap();
        table
    }

    #[test]
    fn test_scan_counts_and_locations() {
        let table = table_with_gaps();
        let scan = scan_missing(&table);

        assert_eq!(scan.total, 3);
        assert_eq!(scan.column_counts, vec![1, 2]);
        // Column-major: column 0 first, rows ascending within each column
        assert_eq!(scan.cells, vec![(0, 1), (1, 0), (1, 1)]);
        assert!(!scan.is_clean());
    }

    #[test]
    fn test_scan_all_present() {
        let mut table = DataTable::new("full");
        table.add_column(DataColumn::new("a"));
        table
            .add_row(DataRow::new(vec![DataValue::Integer(1)]))
            .unwrap();

        let scan = scan_missing(&table);
        assert_eq!(scan.total, 0);
        assert_eq!(scan.column_counts, vec![0]);
        assert!(scan.is_clean());
    }

    #[test]
    fn test_nan_float_counts_as_missing() {
        assert!(is_missing(&DataValue::Float(f64::NAN)));
        assert!(is_missing(&DataValue::Null));
        assert!(!is_missing(&DataValue::Float(0.0)));
        assert!(!is_missing(&DataValue::String(String::new())));
    }
}
