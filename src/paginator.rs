use serde::Serialize;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Most page-number buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Number of pages needed for `count` rows; zero rows means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Positions (within the filtered view) shown on a 1-based `page`.
pub fn page_range(page: usize, page_size: usize, count: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

/// Keep a page cursor inside `[1, max(1, total_pages)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Page numbers to draw as buttons
///
/// Shows every page when there are at most five; otherwise a window of five
/// pinned to the start, pinned to the end, or centered on `page`.
pub fn page_window(page: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= PAGE_WINDOW {
        (1..=total_pages).collect()
    } else if page <= 3 {
        (1..=PAGE_WINDOW).collect()
    } else if page >= total_pages - 2 {
        (total_pages - PAGE_WINDOW + 1..=total_pages).collect()
    } else {
        (page - 2..=page + 2).collect()
    }
}

/// Pagination summary for one render of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    /// 1-based position of the first row on the page (0 when there are none).
    pub range_start: usize,
    pub range_end: usize,
    pub window: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    pub fn compute(page: usize, page_size: usize, filtered_count: usize) -> Self {
        let total = total_pages(filtered_count, page_size);
        let range = page_range(page, page_size, filtered_count);
        PageInfo {
            page,
            page_size,
            total_pages: total,
            filtered_count,
            range_start: if range.is_empty() { 0 } else { range.start + 1 },
            range_end: range.end,
            window: page_window(page, total),
            has_previous: page > 1,
            has_next: page < total,
        }
    }

    /// Pagination controls are only drawn when there is more than one page.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}
