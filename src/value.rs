use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::cmp::Ordering;

use crate::column::FieldPath;

/// A row the grid can read fields from.
///
/// The grid never imposes an identity on rows; it only needs to read a top-level
/// field by name. Nested paths descend from there through plain JSON values.
pub trait Record {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>>;
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }
}

/// Resolve a field path against a row
///
/// Descends field by field, short-circuiting to `None` as soon as an
/// intermediate value is absent (or is not an object).
///
/// # Arguments
/// * `row` - The record to read from
/// * `path` - Single field name or ordered list of nested field names
///
/// # Returns
/// * `Option<Cow<Value>>` - The value at the end of the path, if every step exists
pub fn lookup<'a, T: Record + ?Sized>(row: &'a T, path: &FieldPath) -> Option<Cow<'a, Value>> {
    let mut segments = path.segments();
    let first = segments.next()?;
    let mut current = row.field(first)?;

    for name in segments {
        current = match current {
            Cow::Borrowed(value) => Cow::Borrowed(value.get(name)?),
            Cow::Owned(value) => Cow::Owned(value.get(name)?.clone()),
        };
    }

    Some(current)
}

/// String form of a value as shown in cells, searched, and exported.
///
/// Strings are used as-is, missing and null become the empty string, whole
/// floats drop their `.0`, everything else uses its JSON text.
pub fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => display_number(n),
        Some(other) => other.to_string(),
    }
}

// Whole floats print without a fraction (`10.0` -> `10`) like integers do
fn display_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 { "0".to_string() } else { format!("{}", f) }
        }
        _ => n.to_string(),
    }
}

// Missing/null < bool < number < string < array/object
fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
    }
}

/// Total order over extracted values.
///
/// Numbers compare numerically and strings by code point. Values of different
/// kinds are ordered by kind so that sorting never sees an inconsistent
/// comparator.
pub fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
