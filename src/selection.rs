use std::collections::BTreeSet; // ordered so notifications list rows in input order

/// Selected rows, tracked by absolute index into the original rows.
///
/// The selection does not depend on which page is showing: toggling single rows
/// accumulates across pages, while "select all" replaces the whole selection
/// with the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `index` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    /// Header checkbox behaviour
    ///
    /// When the selection is exactly the rows of this page it is cleared.
    /// Otherwise it becomes exactly `page_indices`, dropping anything selected
    /// elsewhere.
    pub fn toggle_page(&mut self, page_indices: &[usize]) {
        if self.covers_page(page_indices) {
            self.indices.clear();
        } else {
            self.indices = page_indices.iter().copied().collect();
        }
    }

    /// Whether the selection is exactly the (non-empty) page, i.e. the header
    /// checkbox shows as checked.
    pub fn covers_page(&self, page_indices: &[usize]) -> bool {
        !page_indices.is_empty()
            && self.indices.len() == page_indices.len()
            && page_indices.iter().all(|i| self.indices.contains(i))
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Materialize the selected rows from the original `rows`.
    pub fn resolve<'a, T>(&self, rows: &'a [T]) -> Vec<&'a T> {
        self.indices.iter().filter_map(|&i| rows.get(i)).collect()
    }
}
