use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Per-field error messages for one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors<F: Ord>(BTreeMap<F, String>);

impl<F: Ord> FieldErrors<F> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &F) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&F, &str)> {
        self.0.iter().map(|(f, m)| (f, m.as_str()))
    }

    /// Keep only the errors for fields the user has already touched.
    pub fn visible_for(mut self, touched: &BTreeSet<F>) -> Self {
        self.0.retain(|field, _| touched.contains(field));
        self
    }
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}
