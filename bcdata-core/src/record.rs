//! Raw table rows, keyed by header name.

use std::collections::HashMap;

use crate::schema::FieldSpec;

/// One input row: header name to raw cell text.
///
/// Records are built per row by the loader, consumed by validation, and then
/// dropped. Cell text is kept verbatim; coercion happens in the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(header, cell)` pairs. Later duplicates overwrite earlier ones.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Raw cell stored under exactly this key.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Cell for a schema field, looked up by alias first, then canonical name.
    ///
    /// Blank cells are treated as absent.
    pub fn value_for(&self, spec: &FieldSpec) -> Option<&str> {
        let filled = |key: &str| self.get_raw(key).filter(|v| !v.trim().is_empty());
        filled(spec.source_alias).or_else(|| filled(spec.canonical_name))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
