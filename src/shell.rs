#![cfg(feature = "web")]

use handlebars::{Handlebars, RenderError, TemplateError};
use rand::Rng;
use serde::Serialize;

use crate::grid::{GridStatus, GridView};
use crate::pipeline::SortDirection;

const GRID_TEMPLATE: &str = "grid";

// Skeleton bar widths in pixels, max exclusive
const SKELETON_MIN_WIDTH: u32 = 50;
const SKELETON_MAX_WIDTH: u32 = 150;

#[derive(Serialize)]
struct HeaderCell<'a> {
    index: usize,
    title: &'a str,
    width: Option<&'a str>,
    sortable: bool,
    indicator: &'static str,
}

#[derive(Serialize)]
struct PageButton {
    number: usize,
    current: bool,
}

#[derive(Serialize)]
struct ShellContext<'a> {
    #[serde(flatten)]
    view: &'a GridView,
    header_cells: Vec<HeaderCell<'a>>,
    pages: Vec<PageButton>,
    show_pagination: bool,
    skeleton: Vec<Vec<u32>>,
    column_span: usize,
    loading: bool,
    empty: bool,
    populated: bool,
}

/// HTML presentation of a grid view
///
/// Holds the compiled page template. Rendering is a pure function of the view
/// apart from the skeleton bar widths, which are random.
pub struct Shell {
    registry: Handlebars<'static>,
}

impl Shell {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(GRID_TEMPLATE, include_str!("./static/grid.hbs"))?;
        Ok(Shell { registry })
    }

    pub fn render(&self, view: &GridView) -> Result<String, RenderError> {
        let loading = view.status == GridStatus::Loading;
        let column_count = view.headers.len();

        let header_cells = view
            .headers
            .iter()
            .map(|header| HeaderCell {
                index: header.index,
                title: &header.title,
                width: header.width.as_deref(),
                sortable: header.sortable,
                indicator: match (header.sortable, header.sorted) {
                    (false, _) => "",
                    (true, None) => "\u{2195}",
                    (true, Some(SortDirection::Asc)) => "\u{25b2}",
                    (true, Some(SortDirection::Desc)) => "\u{25bc}",
                },
            })
            .collect();

        let pages = view
            .pagination
            .window
            .iter()
            .map(|&number| PageButton {
                number,
                current: number == view.pagination.page,
            })
            .collect();

        let skeleton = if loading {
            skeleton_widths(view.pagination.page_size, column_count)
        } else {
            Vec::new()
        };

        let context = ShellContext {
            view,
            header_cells,
            pages,
            show_pagination: view.pagination.is_visible(),
            skeleton,
            column_span: column_count + usize::from(view.selectable),
            loading,
            empty: view.status == GridStatus::Empty,
            populated: view.status == GridStatus::Populated,
        };

        self.registry.render(GRID_TEMPLATE, &context)
    }
}

/// Placeholder bar widths: `rows` lines of `columns` random widths.
pub fn skeleton_widths(rows: usize, columns: usize) -> Vec<Vec<u32>> {
    let mut rng = rand::thread_rng();
    (0..rows)
        .map(|_| {
            (0..columns)
                .map(|_| rng.gen_range(SKELETON_MIN_WIDTH..SKELETON_MAX_WIDTH))
                .collect()
        })
        .collect()
}
