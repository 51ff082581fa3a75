#![cfg(feature = "web")]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use datagrid::app::{AppState, router, spawn_reload};
use datagrid::column::Column;
use datagrid::grid::{DataGrid, GridOptions, GridStatus};
use serde_json::{Value, json};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn products(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"name": format!("product {}", i), "qty": i}))
        .collect()
}

fn state_with(rows: Vec<Value>, options: GridOptions, source: Option<PathBuf>) -> Arc<AppState> {
    let columns = vec![
        Column::new("name", "Name").sortable(),
        Column::new("qty", "Qty").sortable(),
    ];
    let grid = DataGrid::new(rows, columns).with_options(options);
    Arc::new(AppState::new(grid, source).unwrap())
}

// Helper sending a request through a fresh router over the shared state
async fn send(state: &Arc<AppState>, method: &str, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router(Arc::clone(state)).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_renders_table() {
    let state = state_with(products(3), GridOptions::default(), None);
    let (status, _, html) = send(&state, "GET", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("product 2"));
    assert!(html.contains("href=\"/export\""));
    assert!(html.contains("name=\"q\""));
}

#[tokio::test]
async fn test_index_renders_empty_state() {
    let options = GridOptions {
        empty_state: Some("No orders yet".to_string()),
        ..GridOptions::default()
    };
    let state = state_with(Vec::new(), options, None);
    let (_, _, html) = send(&state, "GET", "/").await;

    assert!(html.contains("No orders yet"));
    assert!(!html.contains("class=\"bar\""));
}

#[tokio::test]
async fn test_index_renders_skeleton_while_loading() {
    let options = GridOptions {
        loading: true,
        page_size: 4,
        ..GridOptions::default()
    };
    let state = state_with(products(3), options, None);
    let (_, _, html) = send(&state, "GET", "/").await;

    // 4 placeholder rows of 2 bars each
    assert_eq!(html.matches("class=\"bar\"").count(), 8);
    assert!(!html.contains("product 1"));
}

#[tokio::test]
async fn test_pagination_stays_visible_while_loading() {
    let options = GridOptions {
        loading: true,
        ..GridOptions::default()
    };
    let state = state_with(products(25), options, None);
    let (_, _, html) = send(&state, "GET", "/").await;

    assert!(html.contains("Showing 1 to 10 of 25 results"));
    assert!(html.contains("href=\"/next\""));
}

#[tokio::test]
async fn test_events_redirect_and_update_view() {
    let options = GridOptions {
        selectable: true,
        ..GridOptions::default()
    };
    let state = state_with(products(25), options, None);

    let (status, headers, _) = send(&state, "GET", "/sort/1").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/");

    send(&state, "GET", "/sort/1").await;
    send(&state, "GET", "/next").await;
    send(&state, "GET", "/select-all").await;

    let (_, _, body) = send(&state, "GET", "/api/view").await;
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["pagination"]["page"], 2);
    assert_eq!(view["headers"][1]["sorted"], "desc");
    assert_eq!(view["rows"][0]["index"], 14);
    assert_eq!(view["selected_count"], 10);
    assert_eq!(view["all_selected"], true);
    assert_eq!(view["status"], "populated");
}

#[tokio::test]
async fn test_search_and_page_routes() {
    let state = state_with(products(25), GridOptions::default(), None);

    send(&state, "GET", "/page/3").await;
    assert_eq!(state.lock_grid().page(), 3);

    send(&state, "GET", "/search?q=PRODUCT%202").await;
    let grid = state.lock_grid();
    assert_eq!(grid.search_term(), "PRODUCT 2");
    // "product 2" and "product 20".."product 24"
    assert_eq!(grid.filtered_count(), 6);
    assert_eq!(grid.page(), 1);
}

#[tokio::test]
async fn test_export_download() {
    let state = state_with(products(12), GridOptions::default(), None);
    let (status, headers, body) = send(&state, "GET", "/export").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv;charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"data-export.csv\""
    );
    assert_eq!(body.lines().count(), 13);
    assert!(body.starts_with("Name,Qty\n\"product 0\",\"0\""));
}

#[tokio::test]
async fn test_export_disabled_is_not_found() {
    let options = GridOptions {
        exportable: false,
        ..GridOptions::default()
    };
    let state = state_with(products(2), options, None);
    let (status, _, _) = send(&state, "GET", "/export").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reload_replaces_rows() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"[{{"name": "fresh", "qty": 1}}]"#).unwrap();

    let state = state_with(products(5), GridOptions::default(), Some(file.path().to_path_buf()));
    let handle = spawn_reload(Arc::clone(&state), file.path().to_path_buf());
    handle.await.unwrap();

    let grid = state.lock_grid();
    assert_eq!(grid.rows().len(), 1);
    assert_eq!(grid.status(), GridStatus::Populated);
}

#[tokio::test]
async fn test_failed_reload_keeps_rows() {
    let state = state_with(products(5), GridOptions::default(), None);
    let handle = spawn_reload(Arc::clone(&state), PathBuf::from("/missing/rows.json"));
    handle.await.unwrap();

    let grid = state.lock_grid();
    assert_eq!(grid.rows().len(), 5);
    assert!(!grid.options().loading);
}

#[tokio::test]
async fn test_overlapping_reloads_keep_only_the_latest() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"[{{"name": "stale", "qty": 1}}]"#).unwrap();

    let state = state_with(products(5), GridOptions::default(), None);
    let older = spawn_reload(Arc::clone(&state), file.path().to_path_buf());
    let newer = spawn_reload(Arc::clone(&state), PathBuf::from("/missing/rows.json"));
    older.await.unwrap();
    newer.await.unwrap();

    // The older read succeeded but was superseded; the newer one failed
    let grid = state.lock_grid();
    assert_eq!(grid.rows().len(), 5);
    assert!(!grid.options().loading);
    println!("✓ superseded reload discarded");
}
