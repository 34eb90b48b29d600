//! An insertion-ordered set, used for `usings` and `classes`:
//! semantically a set, but must iterate in first-insertion order so
//! generated `using`/`import` statements stay stable across re-runs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` if not already present. Returns `true` when the value
    /// was newly inserted.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.seen.insert(value.clone()) {
            self.order.push(value);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.order.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

impl<'a> IntoIterator for &'a OrderedSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl Serialize for OrderedSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.order.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OrderedSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<String>::deserialize(deserializer)?;
        let mut set = Self::new();
        for item in items {
            set.insert(item);
        }
        Ok(set)
    }
}
