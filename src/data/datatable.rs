use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::Write as _;

/// Cell texts treated as absent data: the empty string, NULL in any case,
/// and the literal None. NaN is caught separately once a field parses as
/// a float.
pub fn is_missing_marker(text: &str) -> bool {
    text.is_empty() || text.eq_ignore_ascii_case("null") || text == "None"
}

/// A single cell. Null is the in-memory missing marker; every missing
/// representation in the input collapses to it at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(String), // kept as the original text, compared lexically
    Null,
}

impl DataValue {
    /// Turn a raw input field into a typed cell. Missing markers and NaN
    /// floats become Null; otherwise the narrowest matching type wins.
    pub fn parse(field: &str) -> Self {
        if is_missing_marker(field) {
            return DataValue::Null;
        }
        if let Ok(b) = field.parse::<bool>() {
            return DataValue::Boolean(b);
        }
        if let Ok(i) = field.parse::<i64>() {
            return DataValue::Integer(i);
        }
        if let Ok(f) = field.parse::<f64>() {
            return if f.is_nan() {
                DataValue::Null
            } else {
                DataValue::Float(f)
            };
        }
        if looks_like_date(field) {
            return DataValue::DateTime(field.to_string());
        }
        DataValue::String(field.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    pub fn data_type(&self) -> DataType {
        match self {
            DataValue::String(_) => DataType::String,
            DataValue::Integer(_) => DataType::Integer,
            DataValue::Float(_) => DataType::Float,
            DataValue::Boolean(_) => DataType::Boolean,
            DataValue::DateTime(_) => DataType::DateTime,
            DataValue::Null => DataType::Null,
        }
    }
}

// Dash-separated and long enough to plausibly be a date, e.g. 2017-03-09
fn looks_like_date(field: &str) -> bool {
    field.contains('-') && field.len() >= 8 && field.len() <= 30
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) | DataValue::DateTime(s) => f.write_str(s),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(x) => write!(f, "{}", x),
            DataValue::Boolean(b) => write!(f, "{}", b),
            DataValue::Null => Ok(()),
        }
    }
}

/// The type a whole column settles on once every cell has been seen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Null,
    Mixed,
}

impl DataType {
    /// Combine the types of two cells in the same column. Nulls defer to
    /// the other side, integers widen to floats, anything else is Mixed.
    pub fn merge(&self, other: &DataType) -> DataType {
        match (self, other) {
            (a, b) if a == b => a.clone(),
            (DataType::Null, t) | (t, DataType::Null) => t.clone(),
            (DataType::Integer, DataType::Float) | (DataType::Float, DataType::Integer) => {
                DataType::Float
            }
            _ => DataType::Mixed,
        }
    }

    /// Whether values of this type rank numerically when sorting
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }
}

/// Column name plus the statistics the cleaning run cares about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataColumn {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    pub unique_values: Option<usize>,
    pub null_count: usize,
}

impl DataColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::String,
            nullable: true,
            unique_values: None,
            null_count: 0,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRow {
    pub values: Vec<DataValue>,
}

impl DataRow {
    pub fn new(values: Vec<DataValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&DataValue> {
        self.values.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DataValue> {
        self.values.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The in-memory dataset: named, typed columns over a vector of rows.
/// Created once by the loader, mutated in place by the filler (cell
/// values) and the sorter (row order), then written out exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTable {
    pub name: String,
    pub columns: Vec<DataColumn>,
    pub rows: Vec<DataRow>,
    pub metadata: HashMap<String, String>,
}

impl DataTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn add_column(&mut self, column: DataColumn) -> &mut Self {
        self.columns.push(column);
        self
    }

    /// Append a row; its width must match the column set fixed at load
    pub fn add_row(&mut self, row: DataRow) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(anyhow!(
                "Row has {} values but table has {} columns",
                row.len(),
                self.columns.len()
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn get_column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn get_value(&self, row: usize, col: usize) -> Option<&DataValue> {
        self.rows.get(row)?.get(col)
    }

    pub fn get_value_by_name(&self, row: usize, col_name: &str) -> Option<&DataValue> {
        self.get_value(row, self.get_column_index(col_name)?)
    }

    /// Replace one cell in place
    pub fn set_value(&mut self, row: usize, col: usize, value: DataValue) -> Result<()> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or_else(|| anyhow!("Cell ({}, {}) out of bounds", row, col))?;
        *cell = value;
        Ok(())
    }

    /// Recompute each column's type and statistics from its cells. Run
    /// after loading and again after filling, so the metadata describes
    /// the data as it currently stands.
    pub fn infer_column_types(&mut self) {
        for (idx, column) in self.columns.iter_mut().enumerate() {
            let mut merged = DataType::Null;
            let mut nulls = 0usize;
            let mut distinct: HashSet<String> = HashSet::new();

            for value in self.rows.iter().filter_map(|r| r.get(idx)) {
                if value.is_null() {
                    nulls += 1;
                } else {
                    merged = merged.merge(&value.data_type());
                    distinct.insert(value.to_string());
                }
            }

            column.data_type = merged;
            column.null_count = nulls;
            column.nullable = nulls > 0;
            column.unique_values = Some(distinct.len());
        }
    }

    /// Rows rendered as plain strings, one Vec per row, Null as ""
    pub fn to_string_table(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.values.iter().map(DataValue::to_string).collect())
            .collect()
    }

    /// Multi-line description of the table for debug logging
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "DataTable: {}", self.name);
        let _ = writeln!(
            out,
            "Rows: {} | Columns: {}",
            self.row_count(),
            self.column_count()
        );

        for (key, value) in &self.metadata {
            let _ = writeln!(out, "  {}: {}", key, value);
        }

        for column in &self.columns {
            let _ = write!(out, "  {} ({:?})", column.name, column.data_type);
            if column.nullable {
                let _ = write!(out, ", {} nulls", column.null_count);
            }
            if let Some(unique) = column.unique_values {
                let _ = write!(out, ", {} unique", unique);
            }
            out.push('\n');
        }

        for (i, row) in self.rows.iter().take(5).enumerate() {
            let cells: Vec<String> = row.values.iter().map(DataValue::to_string).collect();
            let _ = writeln!(out, "  [{}]: {}", i, cells.join(", "));
        }

        out
    }

    /// Rough in-memory footprint, for the post-load log line
    pub fn estimate_memory_size(&self) -> usize {
        let columns: usize = self
            .columns
            .iter()
            .map(|c| std::mem::size_of::<DataColumn>() + c.name.len())
            .sum();

        let cells: usize = self
            .rows
            .iter()
            .flat_map(|r| r.values.iter())
            .map(|v| {
                std::mem::size_of::<DataValue>()
                    + match v {
                        DataValue::String(s) | DataValue::DateTime(s) => s.len(),
                        _ => 0,
                    }
            })
            .sum();

        std::mem::size_of::<Self>()
            + columns
            + self.rows.len() * std::mem::size_of::<DataRow>()
            + cells
    }
}
