//! Classify an export-map node before walking it.

use serde_json::{Map, Value};

use super::context::PathContext;

/// What a node in the export map is, decided once per node.
#[derive(Debug, PartialEq)]
pub enum Shape<'v> {
    /// Non-empty array; only the first item is used.
    Alternatives(&'v [Value]),
    /// Object whose keys all start with `.`.
    Specifiers(&'v Map<String, Value>),
    /// Object whose keys never start with `.`.
    Conditions(&'v Map<String, Value>),
    /// String path or `null`.
    Leaf(Option<&'v str>),
    /// A node that cannot be walked.
    Rejected(Rejection),
}

/// Why a node cannot be walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptyAlternatives,
    EmptyObject,
    MixedObject,
    /// Specifier keys below an already chosen specifier.
    NestedSpecifiers(Vec<String>),
    /// Number or boolean.
    InvalidValue,
}

impl<'v> Shape<'v> {
    /// Classify `value` in the context of `path`.
    #[must_use]
    pub fn classify(value: &'v Value, path: &PathContext) -> Self {
        match value {
            Value::Array(items) if items.is_empty() => Self::Rejected(Rejection::EmptyAlternatives),
            Value::Array(items) => Self::Alternatives(items),
            Value::Object(map) => Self::classify_object(map, path),
            Value::String(s) => Self::Leaf(Some(s)),
            Value::Null => Self::Leaf(None),
            Value::Bool(_) | Value::Number(_) => Self::Rejected(Rejection::InvalidValue),
        }
    }

    fn classify_object(map: &'v Map<String, Value>, path: &PathContext) -> Self {
        if map.is_empty() {
            return Self::Rejected(Rejection::EmptyObject);
        }

        let dotted = map.keys().filter(|k| k.starts_with('.')).count();
        if dotted == 0 {
            return Self::Conditions(map);
        }
        if dotted != map.len() {
            return Self::Rejected(Rejection::MixedObject);
        }
        if path.specifier.is_some() {
            return Self::Rejected(Rejection::NestedSpecifiers(map.keys().cloned().collect()));
        }
        Self::Specifiers(map)
    }
}
