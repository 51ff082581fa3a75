#![cfg(feature = "web")]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use handlebars::TemplateError;
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::exporter::{EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use crate::grid::{DataGrid, GridView};
use crate::loader;
use crate::shell::Shell;

pub struct AppState {
    grid: Mutex<DataGrid<Value>>,
    shell: Shell,
    source: Option<PathBuf>,
    // Bumped by every reload; only the latest one may touch the grid
    reload_generation: AtomicU64,
}

impl AppState {
    /// Wrap a grid for serving. `source` is the file `/reload` reads rows from.
    pub fn new(grid: DataGrid<Value>, source: Option<PathBuf>) -> Result<Self, TemplateError> {
        Ok(AppState {
            grid: Mutex::new(grid),
            shell: Shell::new()?,
            source,
            reload_generation: AtomicU64::new(0),
        })
    }

    pub fn lock_grid(&self) -> MutexGuard<'_, DataGrid<Value>> {
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Build the router serving the grid shell and its event endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_grid))
        .route("/api/view", get(get_view))
        .route("/search", get(search))
        .route("/sort/:column", get(sort_column))
        .route("/page/:page", get(go_to_page))
        .route("/previous", get(previous_page))
        .route("/next", get(next_page))
        .route("/select/:index", get(toggle_row))
        .route("/select-all", get(toggle_select_all))
        .route("/row/:index", get(click_row))
        .route("/export", get(export_csv))
        .route("/reload", post(reload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the grid on `addr` until the server stops.
pub async fn run(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Put the grid into its loading state and read the rows again in the background.
///
/// When reloads overlap only the most recently started one applies its rows and
/// leaves the loading state; older ones are discarded when they finish.
pub fn spawn_reload(state: Arc<AppState>, path: PathBuf) -> JoinHandle<()> {
    let generation = {
        let mut grid = state.lock_grid();
        grid.set_loading(true);
        state.reload_generation.fetch_add(1, Ordering::SeqCst) + 1
    };

    tokio::spawn(async move {
        let display = path.display().to_string();
        let result = tokio::task::spawn_blocking(move || loader::load_rows(&path)).await;

        let mut grid = state.lock_grid();
        if state.reload_generation.load(Ordering::SeqCst) != generation {
            debug!("discarding reload {} of {}, a newer one is running", generation, display);
            return;
        }
        match result {
            Ok(Ok(rows)) => {
                info!("loaded {} rows from {}", rows.len(), display);
                grid.set_rows(rows);
            }
            Ok(Err(e)) => warn!("failed to reload {}: {}", display, e),
            Err(e) => warn!("reload task for {} did not finish: {}", display, e),
        }
        grid.set_loading(false);
    })
}

async fn serve_grid(State(state): State<Arc<AppState>>) -> Response {
    let view = state.lock_grid().view();

    match state.shell.render(&view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("failed to render grid: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn get_view(State(state): State<Arc<AppState>>) -> Json<GridView> {
    Json(state.lock_grid().view())
}

async fn search(
    Query(params): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> Redirect {
    state.lock_grid().set_search(params.q);
    Redirect::to("/")
}

async fn sort_column(Path(column): Path<usize>, State(state): State<Arc<AppState>>) -> Redirect {
    state.lock_grid().click_header(column);
    Redirect::to("/")
}

async fn go_to_page(Path(page): Path<usize>, State(state): State<Arc<AppState>>) -> Redirect {
    state.lock_grid().go_to_page(page);
    Redirect::to("/")
}

async fn previous_page(State(state): State<Arc<AppState>>) -> Redirect {
    state.lock_grid().previous_page();
    Redirect::to("/")
}

async fn next_page(State(state): State<Arc<AppState>>) -> Redirect {
    state.lock_grid().next_page();
    Redirect::to("/")
}

async fn toggle_row(Path(index): Path<usize>, State(state): State<Arc<AppState>>) -> Redirect {
    state.lock_grid().toggle_row(index);
    Redirect::to("/")
}

async fn toggle_select_all(State(state): State<Arc<AppState>>) -> Redirect {
    state.lock_grid().toggle_select_all();
    Redirect::to("/")
}

async fn click_row(Path(index): Path<usize>, State(state): State<Arc<AppState>>) -> Redirect {
    state.lock_grid().click_row(index);
    Redirect::to("/")
}

async fn export_csv(State(state): State<Arc<AppState>>) -> Response {
    let csv = state.lock_grid().export_csv();

    match csv {
        Some(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                ),
            ],
            csv,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn reload(State(state): State<Arc<AppState>>) -> Redirect {
    if let Some(path) = state.source.clone() {
        spawn_reload(state, path);
    }
    Redirect::to("/")
}
