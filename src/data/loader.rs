use crate::data::datatable::{DataColumn, DataRow, DataTable, DataValue};
use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Loads a delimited or JSON dataset into a DataTable. Dispatch by extension.
pub struct TableLoader;

impl TableLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataTable> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Self::load_csv(path),
            "json" => Self::load_json(path),
            other => bail!(
                "Unsupported file type '.{}' for {} (expected .csv or .json)",
                other,
                path.display()
            ),
        }
    }

    /// Load a CSV file directly into a DataTable
    pub fn load_csv(path: &Path) -> Result<DataTable> {
        info!("Loading {} into DataTable", path.display());

        let file = File::open(path)
            .with_context(|| format!("Cannot open input file {}", path.display()))?;
        let mut reader = csv::Reader::from_reader(file);

        // Get headers and create columns
        let headers = reader
            .headers()
            .with_context(|| format!("Cannot read CSV header from {}", path.display()))?
            .clone(); // Clone to release the borrow

        let mut table = DataTable::new(table_name(path));
        for header in headers.iter() {
            table.add_column(DataColumn::new(header.to_string()));
        }

        for result in reader.records() {
            let record =
                result.with_context(|| format!("Malformed CSV record in {}", path.display()))?;
            let mut values = Vec::with_capacity(headers.len());
            for field in record.iter() {
                values.push(DataValue::parse(field));
            }
            table.add_row(DataRow::new(values))?;
        }

        Self::finish(&mut table, path);
        Ok(table)
    }

    /// Load a JSON file (top-level array of objects) into a DataTable
    pub fn load_json(path: &Path) -> Result<DataTable> {
        info!("Loading {} into DataTable", path.display());

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open input file {}", path.display()))?;
        let root: JsonValue = serde_json::from_str(&text)
            .with_context(|| format!("Cannot parse {} as JSON", path.display()))?;

        let records = match root.as_array() {
            Some(arr) => arr,
            None => bail!(
                "Expected a top-level JSON array of objects in {}",
                path.display()
            ),
        };

        let mut table = DataTable::new(table_name(path));

        if let Some(first) = records.first() {
            let obj = match first.as_object() {
                Some(obj) => obj,
                None => bail!("Row 0 of {} is not a JSON object", path.display()),
            };
            for key in obj.keys() {
                table.add_column(DataColumn::new(key.clone()));
            }

            for (i, record) in records.iter().enumerate() {
                let obj = record
                    .as_object()
                    .with_context(|| format!("Row {} of {} is not a JSON object", i, path.display()))?;

                // Ensure we get values in the same order as columns
                let values: Vec<DataValue> = table
                    .columns
                    .iter()
                    .map(|column| {
                        obj.get(&column.name)
                            .map(json_value_to_data_value)
                            .unwrap_or(DataValue::Null)
                    })
                    .collect();
                table.add_row(DataRow::new(values))?;
            }
        }

        Self::finish(&mut table, path);
        Ok(table)
    }

    fn finish(table: &mut DataTable, path: &Path) {
        table.infer_column_types();
        table
            .metadata
            .insert("source".to_string(), path.display().to_string());

        info!(
            "Load complete: {} rows, {} columns, ~{} KB",
            table.row_count(),
            table.column_count(),
            table.estimate_memory_size() / 1024
        );
        debug!("{}", table.debug_dump());
    }
}

/// Helper function to convert a JSON value to a DataValue
fn json_value_to_data_value(json: &JsonValue) -> DataValue {
    match json {
        JsonValue::Null => DataValue::Null,
        JsonValue::Bool(b) => DataValue::Boolean(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                if f.is_nan() {
                    DataValue::Null
                } else {
                    DataValue::Float(f)
                }
            } else {
                DataValue::String(n.to_string())
            }
        }
        JsonValue::String(s) => {
            if crate::data::datatable::is_missing_marker(s) {
                DataValue::Null
            } else if s.contains('-') && s.len() >= 8 && s.len() <= 30 {
                // Simple heuristic for dates
                DataValue::DateTime(s.clone())
            } else {
                DataValue::String(s.clone())
            }
        }
        JsonValue::Array(_) | JsonValue::Object(_) => {
            // Store complex types as JSON string
            DataValue::String(json.to_string())
        }
    }
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}
