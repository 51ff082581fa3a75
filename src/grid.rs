use log::{debug, info};
use serde::Serialize;

use crate::column::Column;
use crate::exporter;
use crate::paginator::{self, DEFAULT_PAGE_SIZE, PageInfo};
use crate::pipeline::{self, SortDirection, SortState};
use crate::selection::Selection;
use crate::value::Record;

/// Called with the clicked row and its absolute index.
pub type RowClickFn<T> = Box<dyn FnMut(&T, usize) + Send>;

/// Called with the selected rows every time the selection changes.
pub type SelectionChangeFn<T> = Box<dyn FnMut(&[&T]) + Send>;

/// Caller-controlled switches of a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridOptions {
    pub page_size: usize,
    pub loading: bool,
    pub searchable: bool,
    pub exportable: bool,
    pub selectable: bool,
    /// Replaces the default "no data" message.
    pub empty_state: Option<String>,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            page_size: DEFAULT_PAGE_SIZE,
            loading: false,
            searchable: true,
            exportable: true,
            selectable: false,
            empty_state: None,
        }
    }
}

/// Which body the grid shows; decided only by the loading flag and the filtered count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStatus {
    Loading,
    Empty,
    Populated,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub index: usize,
    pub title: String,
    pub width: Option<String>,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Absolute index into the original rows.
    pub index: usize,
    pub selected: bool,
    pub cells: Vec<String>,
}

/// Everything a shell needs to draw the grid once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GridView {
    pub status: GridStatus,
    pub search_term: String,
    pub searchable: bool,
    pub exportable: bool,
    pub selectable: bool,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub all_selected: bool,
    pub selected_count: usize,
    pub pagination: PageInfo,
    pub empty_state: Option<String>,
}

/// Client-side data grid
///
/// Owns the view state (search term, sort, page cursor, selection) over rows
/// and columns supplied by the caller. Every derived value is recomputed from
/// the current state on demand, so there is no cached view to go stale.
pub struct DataGrid<T> {
    rows: Vec<T>,
    columns: Vec<Column<T>>,
    options: GridOptions,
    search_term: String,
    sort: Option<SortState>,
    page: usize,
    selection: Selection,
    on_row_click: Option<RowClickFn<T>>,
    on_selection_change: Option<SelectionChangeFn<T>>,
}

impl<T: Record> DataGrid<T> {
    pub fn new(rows: Vec<T>, columns: Vec<Column<T>>) -> Self {
        DataGrid {
            rows,
            columns,
            options: GridOptions::default(),
            search_term: String::new(),
            sort: None,
            page: 1,
            selection: Selection::new(),
            on_row_click: None,
            on_selection_change: None,
        }
    }

    pub fn with_options(mut self, mut options: GridOptions) -> Self {
        options.page_size = options.page_size.max(1);
        self.options = options;
        self
    }

    pub fn on_row_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&T, usize) + Send + 'static,
    {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    pub fn on_selection_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&[&T]) + Send + 'static,
    {
        self.on_selection_change = Some(Box::new(callback));
        self
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_rows(&self) -> Vec<&T> {
        self.selection.resolve(&self.rows)
    }

    // -------------------------------------------------------------------------
    // Derived view
    // -------------------------------------------------------------------------

    /// Absolute indices of the filtered and sorted rows.
    pub fn visible_indices(&self) -> Vec<usize> {
        pipeline::derive(
            &self.rows,
            &self.columns,
            &self.search_term,
            self.sort.as_ref(),
        )
    }

    pub fn filtered_rows(&self) -> Vec<&T> {
        self.visible_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.visible_indices().len()
    }

    pub fn total_pages(&self) -> usize {
        paginator::total_pages(self.filtered_count(), self.options.page_size)
    }

    /// Absolute indices of the rows on the current page.
    pub fn page_indices(&self) -> Vec<usize> {
        let visible = self.visible_indices();
        let range = paginator::page_range(self.page, self.options.page_size, visible.len());
        visible[range].to_vec()
    }

    pub fn page_rows(&self) -> Vec<&T> {
        self.page_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    pub fn status(&self) -> GridStatus {
        if self.options.loading {
            GridStatus::Loading
        } else if self.filtered_count() == 0 {
            GridStatus::Empty
        } else {
            GridStatus::Populated
        }
    }

    pub fn view(&self) -> GridView {
        let visible = self.visible_indices();
        let pagination = PageInfo::compute(self.page, self.options.page_size, visible.len());
        let status = self.status();

        let headers = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, column)| HeaderView {
                index,
                title: column.title.clone(),
                width: column.width.clone(),
                sortable: column.sortable,
                sorted: self
                    .sort
                    .as_ref()
                    .filter(|sort| sort.key == column.sort_key())
                    .map(|sort| sort.direction),
            })
            .collect();

        let range = paginator::page_range(self.page, self.options.page_size, visible.len());
        let page = &visible[range];
        let rows = if status == GridStatus::Populated {
            page.iter()
                .map(|&index| RowView {
                    index,
                    selected: self.selection.contains(index),
                    cells: self
                        .columns
                        .iter()
                        .map(|column| column.cell_text(&self.rows[index], index))
                        .collect(),
                })
                .collect()
        } else {
            Vec::new()
        };

        GridView {
            status,
            search_term: self.search_term.clone(),
            searchable: self.options.searchable,
            exportable: self.options.exportable,
            selectable: self.options.selectable,
            headers,
            rows,
            all_selected: self.selection.covers_page(page),
            selected_count: self.selection.len(),
            pagination,
            empty_state: self.options.empty_state.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn set_search(&mut self, term: impl Into<String>) {
        if !self.options.searchable {
            return;
        }
        self.search_term = term.into();
        debug!("search term set to {:?}", self.search_term);
        self.clamp_page();
    }

    /// Header click on the column at `column_index`. Returns whether the sort changed.
    pub fn click_header(&mut self, column_index: usize) -> bool {
        let Some(column) = self.columns.get(column_index) else {
            return false;
        };
        if !column.sortable {
            return false;
        }
        let next = SortState::toggle(self.sort.as_ref(), &column.sort_key());
        debug!("sorting by {} {:?}", next.key, next.direction);
        self.sort = Some(next);
        self.clamp_page();
        true
    }

    /// Jump to a 1-based page; out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) {
        if (1..=self.total_pages()).contains(&page) {
            self.page = page;
        }
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.total_pages().max(1));
    }

    /// Toggle the row at an absolute index.
    pub fn toggle_row(&mut self, index: usize) {
        if !self.options.selectable || index >= self.rows.len() {
            return;
        }
        self.selection.toggle(index);
        self.notify_selection();
    }

    /// Header checkbox: select the current page, or clear everything.
    pub fn toggle_select_all(&mut self) {
        if !self.options.selectable {
            return;
        }
        let page = self.page_indices();
        self.selection.toggle_page(&page);
        self.notify_selection();
    }

    /// Click on a rendered row; rows not on the current page are ignored.
    pub fn click_row(&mut self, index: usize) {
        if !self.page_indices().contains(&index) {
            return;
        }
        info!("row {} clicked", index);
        if let Some(callback) = self.on_row_click.as_mut() {
            callback(&self.rows[index], index);
        }
    }

    /// CSV of the whole filtered view, or `None` when export is disabled.
    pub fn export_csv(&self) -> Option<String> {
        if !self.options.exportable {
            return None;
        }
        let rows = self.filtered_rows();
        info!("exporting {} rows", rows.len());
        Some(exporter::to_csv(rows, &self.columns))
    }

    /// Replace the rows. The selection is cleared because its indices referred
    /// to the old rows.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.clamp_page();
        if !self.selection.is_empty() {
            self.selection.clear();
            self.notify_selection();
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    fn clamp_page(&mut self) {
        let clamped = paginator::clamp_page(self.page, self.total_pages());
        if clamped != self.page {
            debug!("page {} out of range, moving to {}", self.page, clamped);
            self.page = clamped;
        }
    }

    fn notify_selection(&mut self) {
        info!("{} rows selected", self.selection.len());
        if let Some(callback) = self.on_selection_change.as_mut() {
            let selected = self.selection.resolve(&self.rows);
            callback(&selected);
        }
    }
}
