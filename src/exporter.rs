use crate::column::Column;
use crate::value::{self, Record};

/// File name offered for the download.
pub const EXPORT_FILE_NAME: &str = "data-export.csv";

/// Content type of the download.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// Convert rows to CSV format
///
/// This function exports rows to CSV (Comma-Separated Values) text where:
/// - The first line is the column titles joined with commas
/// - Each following line is one row, one field per column in column order
/// - Every field is wrapped in double quotes, embedded quotes are doubled
/// - Missing and null values become empty fields
/// - Lines are joined with `\n`, without a trailing newline
///
/// Custom `render` functions are not applied; fields carry the raw value.
///
/// # Arguments
/// * `rows` - Rows to write, in order (normally the whole filtered view)
/// * `columns` - Column descriptors giving titles and field paths
///
/// # Returns
/// * `String` - CSV content
///
/// # Examples
/// ```
/// use datagrid::column::Column;
/// use datagrid::exporter::to_csv;
/// use serde_json::json;
///
/// let columns = vec![Column::new("name", "Name"), Column::new("qty", "Qty")];
/// let rows = vec![json!({"name": "A \"B\"", "qty": 5})];
/// assert_eq!(to_csv(&rows, &columns), "Name,Qty\n\"A \"\"B\"\"\",\"5\"");
/// ```
pub fn to_csv<'a, T, I>(rows: I, columns: &[Column<T>]) -> String
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let header = columns
        .iter()
        .map(|column| column.title.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = vec![header];
    for row in rows {
        let line = columns
            .iter()
            .map(|column| {
                let value = column.value(row);
                quote_field(&value::display(value.as_deref()))
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    lines.join("\n")
}

/// Wrap a field in double quotes, doubling any quotes inside it.
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
