//! Caller-supplied field values.

use model_core::FieldValue;
use std::collections::BTreeMap;

/// Field values that replace generated ones.
///
/// Overrides are merged after generation, so they always win. Overriding a
/// foreign-key field also stops the related entity from being built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    values: BTreeMap<String, FieldValue>,
}

impl Overrides {
    /// Create an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override, builder style.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Add or replace an override.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl IntoIterator for Overrides {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (field, value) in iter {
            overrides.insert(field, value);
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_set_wins() {
        let overrides = Overrides::new().set("name", "Alice").set("name", "Bob");

        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("name"), Some(&FieldValue::from("Bob")));
    }

    #[test]
    fn test_collect() {
        let overrides: Overrides = [("b", 2), ("a", 1)].into_iter().collect();

        assert!(overrides.contains("a"));
        assert_eq!(overrides.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(overrides.get("b"), Some(&FieldValue::Int32(2)));
    }
}
