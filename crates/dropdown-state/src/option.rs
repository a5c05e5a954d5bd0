//! Selectable options
//!
//! An [`OptionSet`] is the caller's list of `(value, label)` pairs. It is
//! immutable and shared: clones point at the same storage, which lets the
//! filter cache detect "same data" by identity instead of comparing items.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// A single selectable entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionItem {
    /// Key, expected to be unique within its option set
    pub value: String,
    /// Display text
    pub label: String,
}

impl OptionItem {
    /// Create a new option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// An option as shown in the open panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    /// The option
    pub item: OptionItem,
    /// Whether it is part of the current selection
    pub selected: bool,
}

/// Immutable, shared list of options
///
/// Duplicate values are not rejected; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSet {
    items: Arc<[OptionItem]>,
}

impl OptionSet {
    /// Create an option set from a list of items
    pub fn new(items: Vec<OptionItem>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// An option set with no items
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Whether both handles share the same storage
    pub fn ptr_eq(&self, other: &OptionSet) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// All items, in caller order
    pub fn items(&self) -> &[OptionItem] {
        &self.items
    }

    /// Find the first item with `value`
    pub fn find(&self, value: &str) -> Option<&OptionItem> {
        self.items.iter().find(|item| item.value == value)
    }

    /// Label for `value`, if present
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.find(value).map(|item| item.label.as_str())
    }

    /// Whether any item has `value`
    pub fn contains_value(&self, value: &str) -> bool {
        self.find(value).is_some()
    }
}

impl Default for OptionSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for OptionSet {
    type Target = [OptionItem];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl From<Vec<OptionItem>> for OptionSet {
    fn from(items: Vec<OptionItem>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<OptionItem> for OptionSet {
    fn from_iter<I: IntoIterator<Item = OptionItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for OptionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<OptionItem>::deserialize(deserializer).map(Self::new)
    }
}
