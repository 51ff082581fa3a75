/*!
# Data Grid

A generic client-side data grid for back-office list pages, built in Rust.

## Overview

List pages of an administrative back office (products, orders, promotions,
FAQs, testimonials...) all show the same kind of table: a free-text search box,
sortable column headers, fixed-size pages, optional row checkboxes and a CSV
export of everything that matches the search. This crate implements that grid
once, independent of any UI toolkit, and ships a small HTML shell that serves it
over HTTP.

## Architecture

### Core (always built)
- **Row Pipeline** (`pipeline`) - Case-insensitive substring search across all
  columns, then a stable single-column sort
- **Paginator** (`paginator`) - Page slicing, page count, and the five-button page window
- **Selection Tracker** (`selection`) - Selected rows by absolute index, independent of paging
- **Exporter** (`exporter`) - CSV of the whole filtered view
- **Grid** (`grid`) - Owns the state, handles events, derives a render-ready `GridView`

### Web shell (feature `web`)
- **Shell** (`shell`) - Handlebars rendering of a `GridView` (loading skeleton,
  empty state, table, pagination)
- **App** (`app`) - axum routes turning HTTP requests into grid events

## Data Model

- Rows are any type implementing `Record` (`serde_json::Value` out of the box) and
  are identified by their position in the original rows ("absolute index")
- Columns read a `FieldPath`: a single field or an ordered list of nested fields
- Everything shown is recomputed from `(rows, columns, search, sort, page)` on
  demand; nothing is cached

## REST API Endpoints

- `/` - Rendered grid
- `/api/view` - Current view as JSON
- `/search?q=`, `/sort/{column}`, `/page/{n}`, `/previous`, `/next` - View changes
- `/select/{index}`, `/select-all`, `/row/{index}` - Selection and row clicks
- `/export` - `data-export.csv` download
- `/reload` - Read the rows again from the data file
*/

pub mod app;
pub mod column;
pub mod exporter;
pub mod grid;
pub mod loader;
pub mod paginator;
pub mod pipeline;
pub mod selection;
pub mod shell;
pub mod value;

/// Re-export the core types to make them easier to use
pub use column::{Column, FieldPath};
pub use grid::{DataGrid, GridOptions, GridStatus, GridView};
pub use pipeline::{SortDirection, SortState};
pub use selection::Selection;
pub use value::Record;
