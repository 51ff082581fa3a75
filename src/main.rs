use clap::Parser;
use datagrid::app::{self, AppState};
use datagrid::column::{Column, FieldPath};
use datagrid::grid::{DataGrid, GridOptions};
use datagrid::loader;
use datagrid::paginator::DEFAULT_PAGE_SIZE;
use log::{debug, info};
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Serve a searchable, sortable, paginated grid over a JSON or CSV file.
#[derive(Parser, Debug)]
#[command(name = "datagrid", version)]
struct Cli {
    /// Rows to show: a JSON array of records, or CSV with a header line
    #[arg(long)]
    data: Option<PathBuf>,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 3000)]
    port: u16,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Show the checkbox column
    #[arg(long)]
    selectable: bool,

    /// Hide the search box
    #[arg(long)]
    no_search: bool,

    /// Hide the export button
    #[arg(long)]
    no_export: bool,

    /// Message shown when no rows match
    #[arg(long)]
    empty_message: Option<String>,

    /// Column as `key[:title][:sortable]`; dots in the key address nested fields.
    /// Defaults to every key of the first record.
    #[arg(long = "column")]
    columns: Vec<ColumnArg>,
}

#[derive(Clone, Debug)]
struct ColumnArg {
    key: String,
    title: Option<String>,
    sortable: bool,
}

impl FromStr for ColumnArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let key = parts.next().unwrap_or_default().trim();
        if key.is_empty() {
            return Err(format!("column `{}` has no key", s));
        }
        let title = parts
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let sortable = match parts.next().map(str::trim) {
            None | Some("") => false,
            Some("sortable") => true,
            Some(other) => return Err(format!("unknown column flag `{}`", other)),
        };

        Ok(ColumnArg {
            key: key.to_string(),
            title,
            sortable,
        })
    }
}

impl From<ColumnArg> for Column<Value> {
    fn from(arg: ColumnArg) -> Self {
        let title = arg.title.unwrap_or_else(|| arg.key.clone());
        let column = Column::new(FieldPath::parse(&arg.key), title);
        if arg.sortable { column.sortable() } else { column }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let rows = match &cli.data {
        Some(path) => loader::load_rows(path)?,
        None => Vec::new(),
    };
    info!("starting grid with {} rows", rows.len());

    let columns = if cli.columns.is_empty() {
        loader::infer_columns(&rows)
    } else {
        cli.columns.into_iter().map(Column::from).collect()
    };

    let options = GridOptions {
        page_size: cli.page_size,
        searchable: !cli.no_search,
        exportable: !cli.no_export,
        selectable: cli.selectable,
        empty_state: cli.empty_message,
        ..GridOptions::default()
    };

    let grid = DataGrid::new(rows, columns)
        .with_options(options)
        .on_row_click(|row, _index| debug!("clicked {}", row))
        .on_selection_change(|selected| debug!("selected {:?}", selected));

    let state = Arc::new(AppState::new(grid, cli.data)?);
    app::run(&format!("{}:{}", cli.host, cli.port), state).await
}
