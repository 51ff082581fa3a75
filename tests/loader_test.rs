use datagrid::loader::{LoadError, from_csv_reader, from_json_str, infer_columns, load_rows};
use serde_json::json;
use std::io::Write;
use tempfile::Builder;

#[test]
fn test_load_json_array() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"[{{"name": "Chair", "price": 120}}, {{"name": "Desk", "price": 300}}]"#).unwrap();

    let rows = load_rows(file.path()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], json!({"name": "Desk", "price": 300}));
    println!("✓ loaded {} rows from JSON", rows.len());
}

#[test]
fn test_load_csv_with_header() {
    let mut file = Builder::new().suffix(".CSV").tempfile().unwrap();
    writeln!(file, "name,price").unwrap();
    writeln!(file, "Chair,120").unwrap();
    writeln!(file, "\"Desk, oak\",300").unwrap();

    let rows = load_rows(file.path()).unwrap();
    assert_eq!(
        rows,
        vec![
            json!({"name": "Chair", "price": "120"}),
            json!({"name": "Desk, oak", "price": "300"}),
        ]
    );
}

#[test]
fn test_json_must_be_an_array() {
    let err = from_json_str(r#"{"name": "Chair"}"#).unwrap_err();
    assert!(matches!(err, LoadError::NotAnArray));

    let err = from_json_str("[1, 2").unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[test]
fn test_missing_file_reports_path() {
    let err = load_rows("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn test_csv_reader_without_rows() {
    let rows = from_csv_reader("name,price\n".as_bytes()).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_infer_columns_follow_first_record() {
    let rows = vec![json!({"sku": "A1", "name": "Chair", "price": 120}), json!({"other": 1})];
    let columns = infer_columns(&rows);

    let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["sku", "name", "price"]);
    assert!(columns.iter().all(|c| c.sortable));

    assert!(infer_columns(&[]).is_empty());
    assert!(infer_columns(&[json!(5)]).is_empty());
}
