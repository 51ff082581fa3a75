use serde_json::{Map, Value};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::column::Column;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected a JSON array of records")]
    NotAnArray,
}

/// Load grid rows from a file
///
/// Files ending in `.csv` are read as CSV with a header line; anything else is
/// read as a JSON array.
///
/// # Arguments
/// * `path` - Path to the data file
///
/// # Returns
/// * `Result<Vec<Value>, LoadError>` - One record per row, or an error
///
/// # Examples
/// ```no_run
/// use datagrid::loader::load_rows;
///
/// match load_rows("products.json") {
///     Ok(rows) => println!("Loaded {} rows", rows.len()),
///     Err(e) => eprintln!("Error loading rows: {}", e),
/// }
/// ```
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Value>, LoadError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        let file = fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        from_csv_reader(file)
    } else {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        from_json_str(&text)
    }
}

/// Parse a JSON array; each element becomes one row.
pub fn from_json_str(text: &str) -> Result<Vec<Value>, LoadError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(rows) => Ok(rows),
        _ => Err(LoadError::NotAnArray),
    }
}

/// Parse headed CSV; each line becomes a record of string fields keyed by header.
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Value>, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(name, field)| (name.to_string(), Value::String(field.to_string())))
            .collect();
        rows.push(Value::Object(fields));
    }

    Ok(rows)
}

/// One sortable column per top-level key of the first record, titled by the key.
pub fn infer_columns(rows: &[Value]) -> Vec<Column<Value>> {
    rows.first()
        .and_then(Value::as_object)
        .map(|first| {
            first
                .keys()
                .map(|key| Column::new(key.as_str(), key.as_str()).sortable())
                .collect()
        })
        .unwrap_or_default()
}
