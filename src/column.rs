use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::value::{self, Record};

/// Separator used when a nested path is flattened into a sort key.
pub const PATH_SEPARATOR: &str = ".";

/// Where a column reads its value from.
///
/// Field names must not contain `.`: nested paths are joined with it to form the
/// sort key and split on it again when sorting.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldPath {
    Single(String),
    Nested(Vec<String>),
}

impl FieldPath {
    pub fn single(name: impl Into<String>) -> Self {
        FieldPath::Single(name.into())
    }

    pub fn nested<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldPath::Nested(names.into_iter().map(Into::into).collect())
    }

    /// Split a dot-joined key back into a path.
    pub fn parse(key: &str) -> Self {
        if key.contains(PATH_SEPARATOR) {
            FieldPath::nested(key.split(PATH_SEPARATOR))
        } else {
            FieldPath::single(key)
        }
    }

    pub fn segments(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            FieldPath::Single(name) => Box::new(std::iter::once(name.as_str())),
            FieldPath::Nested(names) => Box::new(names.iter().map(String::as_str)),
        }
    }

    /// Dot-joined form used as the sort key.
    pub fn sort_key(&self) -> String {
        match self {
            FieldPath::Single(name) => name.clone(),
            FieldPath::Nested(names) => names.join(PATH_SEPARATOR),
        }
    }
}

impl From<&str> for FieldPath {
    fn from(name: &str) -> Self {
        FieldPath::single(name)
    }
}

impl From<String> for FieldPath {
    fn from(name: String) -> Self {
        FieldPath::Single(name)
    }
}

impl From<Vec<&str>> for FieldPath {
    fn from(names: Vec<&str>) -> Self {
        FieldPath::nested(names)
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(names: Vec<String>) -> Self {
        FieldPath::Nested(names)
    }
}

/// Caller-supplied cell formatter: `(value, row, absolute index) -> display text`.
pub type RenderFn<T> = Arc<dyn Fn(Option<&Value>, &T, usize) -> String + Send + Sync>;

/// Column descriptor
///
/// Columns are built once by the caller and handed to the grid, which never
/// changes them.
pub struct Column<T> {
    pub key: FieldPath,
    pub title: String,
    pub sortable: bool,
    pub width: Option<String>,
    render: Option<RenderFn<T>>,
}

impl<T> Column<T> {
    pub fn new(key: impl Into<FieldPath>, title: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            title: title.into(),
            sortable: false,
            width: None,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &T, usize) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }

    pub fn sort_key(&self) -> String {
        self.key.sort_key()
    }
}

impl<T: Record> Column<T> {
    pub fn value<'a>(&self, row: &'a T) -> Option<Cow<'a, Value>> {
        value::lookup(row, &self.key)
    }

    /// Text for this column's cell in `row`, which sits at `index` in the original rows.
    pub fn cell_text(&self, row: &T, index: usize) -> String {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(value.as_deref(), row, index),
            None => value::display(value.as_deref()),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Column {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            width: self.width.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("render", &self.render.is_some())
            .finish()
    }
}
