use serde::{Deserialize, Serialize};

use crate::column::{Column, FieldPath};
use crate::value::{self, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort: a dot-joined field key and a direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(key: impl Into<String>) -> Self {
        SortState {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        SortState {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Sort state after a header click on the column with sort key `key`.
    ///
    /// Clicking the active column flips its direction; any other column starts
    /// ascending.
    pub fn toggle(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(active) if active.key == key => SortState {
                key: key.to_string(),
                direction: active.direction.flip(),
            },
            _ => SortState::ascending(key),
        }
    }

    fn path(&self) -> FieldPath {
        FieldPath::parse(&self.key)
    }
}

/// Check whether any column of `row` contains `needle`
///
/// `needle` must already be lower-cased.
pub fn matches_search<T: Record>(row: &T, columns: &[Column<T>], needle: &str) -> bool {
    columns.iter().any(|column| {
        let value = column.value(row);
        value::display(value.as_deref())
            .to_lowercase()
            .contains(needle)
    })
}

/// Derive the filtered and sorted view of `rows`
///
/// The result lists absolute indices into `rows` in display order. An empty
/// search term keeps every row; without a sort the input order is kept. The
/// sort is stable, so rows with equal keys stay in input order in either
/// direction.
///
/// # Arguments
/// * `rows` - The caller's rows, never modified
/// * `columns` - Column descriptors searched by the filter
/// * `search_term` - Case-insensitive substring to look for
/// * `sort` - Optional active sort
///
/// # Returns
/// * `Vec<usize>` - Absolute indices of the visible rows, in order
pub fn derive<T: Record>(
    rows: &[T],
    columns: &[Column<T>],
    search_term: &str,
    sort: Option<&SortState>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = if search_term.is_empty() {
        (0..rows.len()).collect()
    } else {
        let needle = search_term.to_lowercase();
        (0..rows.len())
            .filter(|&i| matches_search(&rows[i], columns, &needle))
            .collect()
    };

    if let Some(sort) = sort {
        let path = sort.path();
        indices.sort_by(|&a, &b| {
            let a_value = value::lookup(&rows[a], &path);
            let b_value = value::lookup(&rows[b], &path);
            let ordering = value::compare(a_value.as_deref(), b_value.as_deref());
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    indices
}

/// Same as [`derive`], resolved to row references.
pub fn derive_rows<'a, T: Record>(
    rows: &'a [T],
    columns: &[Column<T>],
    search_term: &str,
    sort: Option<&SortState>,
) -> Vec<&'a T> {
    derive(rows, columns, search_term, sort)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}
