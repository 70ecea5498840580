use crate::cleaning::scanner::{is_missing, MissingScan};
use crate::data::datatable::{DataTable, DataValue};
use anyhow::Result;
use rand::Rng;
use tracing::debug;

/// Which neighboring row to draw a replacement value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

/// Decides the side when both neighbors of a missing cell hold usable values.
/// Injected so tests can force either branch.
pub trait SidePicker {
    fn pick(&mut self) -> Side;
}

impl<F: FnMut() -> Side> SidePicker for F {
    fn pick(&mut self) -> Side {
        self()
    }
}

/// Production picker: uniform coin flip per cell.
pub struct RandomSidePicker;

impl SidePicker for RandomSidePicker {
    fn pick(&mut self) -> Side {
        if rand::thread_rng().gen_bool(0.5) {
            Side::Above
        } else {
            Side::Below
        }
    }
}

/// What the fill pass accomplished.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    /// Cells filled per column, parallel to the table's columns
    pub filled_per_column: Vec<usize>,
    pub filled: usize,
    /// Missing cells with no usable neighbor on either side; left as-is
    pub unresolved: usize,
}

/// Replace missing cells with a value from the row above or below in the same
/// column. Cells are processed in scan order (each column top to bottom), and
/// replacements land immediately, so a cell filled earlier in the pass can act
/// as a neighbor for a later one. Cells with no usable neighbor stay missing.
pub fn fill_missing(
    table: &mut DataTable,
    scan: &MissingScan,
    picker: &mut dyn SidePicker,
) -> Result<FillOutcome> {
    let mut filled_per_column = vec![0usize; table.column_count()];
    let mut unresolved = 0usize;

    for &(col, row) in &scan.cells {
        let above = if row > 0 {
            table
                .get_value(row - 1, col)
                .filter(|v| !is_missing(v))
                .cloned()
        } else {
            None
        };
        let below = if row + 1 < table.row_count() {
            table
                .get_value(row + 1, col)
                .filter(|v| !is_missing(v))
                .cloned()
        } else {
            None
        };

        let replacement: Option<DataValue> = match (above, below) {
            (Some(a), Some(b)) => Some(match picker.pick() {
                Side::Above => a,
                Side::Below => b,
            }),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };

        match replacement {
            Some(value) => {
                table.set_value(row, col, value)?;
                filled_per_column[col] += 1;
            }
            None => unresolved += 1,
        }
    }

    let filled = filled_per_column.iter().sum();
    debug!(
        "Neighbor fill: {} cells filled, {} left unresolved",
        filled, unresolved
    );

    Ok(FillOutcome {
        filled_per_column,
        filled,
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::scanner::scan_missing;
    use crate::data::datatable::{DataColumn, DataRow, DataTable};

    fn single_column(values: Vec<DataValue>) -> DataTable {
        let mut table = DataTable::new("t");
        table.add_column(DataColumn::new("v"));
        for value in values {
            table.add_row(DataRow::new(vec![value])).unwrap();
        }
        table
    }

    #[test]
    fn test_fill_takes_above_when_picked() {
        let mut table = single_column(vec![
            DataValue::Integer(1),
            DataValue::Null,
            DataValue::Integer(3),
        ]);
        let scan = scan_missing(&table);

        let mut pick_above = || Side::Above;
        let outcome = fill_missing(&mut table, &scan, &mut pick_above).unwrap();

        assert_eq!(outcome.filled, 1);
        assert_eq!(outcome.unresolved, 0);
        assert_eq!(table.get_value(1, 0), Some(&DataValue::Integer(1)));
    }

    #[test]
    fn test_fill_takes_below_when_picked() {
        let mut table = single_column(vec![
            DataValue::Integer(1),
            DataValue::Null,
            DataValue::Integer(3),
        ]);
        let scan = scan_missing(&table);

        let mut pick_below = || Side::Below;
        fill_missing(&mut table, &scan, &mut pick_below).unwrap();

        assert_eq!(table.get_value(1, 0), Some(&DataValue::Integer(3)));
    }

    #[test]
    fn test_fill_single_sided_ignores_picker() {
        // Missing cell at the top: only the row below is usable
        let mut table = single_column(vec![DataValue::Null, DataValue::Integer(9)]);
        let scan = scan_missing(&table);

        let mut pick_above = || Side::Above;
        let outcome = fill_missing(&mut table, &scan, &mut pick_above).unwrap();

        assert_eq!(outcome.filled, 1);
        assert_eq!(table.get_value(0, 0), Some(&DataValue::Integer(9)));
    }

    #[test]
    fn test_unresolved_when_no_neighbor_usable() {
        // Two missing rows and nothing else: nothing to draw from
        let mut table = single_column(vec![DataValue::Null, DataValue::Null]);
        let scan = scan_missing(&table);

        let mut picker = RandomSidePicker;
        let outcome = fill_missing(&mut table, &scan, &mut picker).unwrap();

        assert_eq!(outcome.filled, 0);
        assert_eq!(outcome.unresolved, 2);
        assert_eq!(table.get_value(0, 0), Some(&DataValue::Null));
        assert_eq!(table.get_value(1, 0), Some(&DataValue::Null));
    }

    #[test]
    fn test_earlier_fill_feeds_later_cell() {
        // Rows 1 and 2 both missing: row 1 fills from row 0, then row 2 can
        // borrow the freshly filled row 1
        let mut table = single_column(vec![
            DataValue::Integer(5),
            DataValue::Null,
            DataValue::Null,
        ]);
        let scan = scan_missing(&table);

        let mut pick_above = || Side::Above;
        let outcome = fill_missing(&mut table, &scan, &mut pick_above).unwrap();

        assert_eq!(outcome.filled, 2);
        assert_eq!(outcome.unresolved, 0);
        assert_eq!(table.get_value(1, 0), Some(&DataValue::Integer(5)));
        assert_eq!(table.get_value(2, 0), Some(&DataValue::Integer(5)));
    }

    #[test]
    fn test_fill_never_touches_present_cells() {
        let mut table = single_column(vec![
            DataValue::Integer(1),
            DataValue::Null,
            DataValue::Integer(3),
        ]);
        let scan = scan_missing(&table);

        let mut picker = RandomSidePicker;
        fill_missing(&mut table, &scan, &mut picker).unwrap();

        assert_eq!(table.get_value(0, 0), Some(&DataValue::Integer(1)));
        assert_eq!(table.get_value(2, 0), Some(&DataValue::Integer(3)));
        // The filled cell came from one of its neighbors
        let filled = table.get_value(1, 0).unwrap();
        assert!(
            *filled == DataValue::Integer(1) || *filled == DataValue::Integer(3),
            "filled value should come from a neighbor, got {:?}",
            filled
        );
    }

    #[test]
    fn test_per_column_counts() {
        let mut table = DataTable::new("t");
        table.add_column(DataColumn::new("a"));
        table.add_column(DataColumn::new("b"));
        table
            .add_row(DataRow::new(vec![
                DataValue::Integer(1),
                DataValue::Integer(10),
            ]))
            .unwrap();
        table
            .add_row(DataRow::new(vec![DataValue::Null, DataValue::Null]))
            .unwrap();
        table
            .add_row(DataRow::new(vec![
                DataValue::Integer(3),
                DataValue::Integer(30),
            ]))
            .unwrap();

        let scan = scan_missing(&table);
        let mut pick_below = || Side::Below;
        let outcome = fill_missing(&mut table, &scan, &mut pick_below).unwrap();

        assert_eq!(outcome.filled_per_column, vec![1, 1]);
        assert_eq!(outcome.filled, 2);
    }
}
