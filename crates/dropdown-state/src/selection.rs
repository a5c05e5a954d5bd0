//! Selection state
//!
//! Who owns the selection is decided once, when the widget is created:
//!
//! - **Controlled**: the caller passed a `value`. The widget renders exactly
//!   what the caller last pushed and never writes it; selection operations
//!   only compute the value the caller should store next.
//! - **Uncontrolled**: the widget keeps a local copy, seeded from
//!   `defaultValue`, and writes every change into it.
//!
//! Selections are never validated against the option set. A stale value
//! stays selected until the owner replaces it.

use crate::option::{OptionItem, OptionSet};

/// Ownership of a selection value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership<T> {
    /// Caller-owned value, replaced only through [`Ownership::sync`]
    Controlled(T),
    /// Widget-owned value, replaced through [`Ownership::commit`]
    Uncontrolled(T),
}

impl<T> Ownership<T> {
    /// Controlled when `value` is present, otherwise uncontrolled with `default()`
    ///
    /// `default` only runs for an uncontrolled value.
    pub fn from_props<F>(value: Option<T>, default: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match value {
            Some(value) => Ownership::Controlled(value),
            None => Ownership::Uncontrolled(default()),
        }
    }

    /// Whether the caller owns the value
    pub fn is_controlled(&self) -> bool {
        matches!(self, Ownership::Controlled(_))
    }

    /// The value to render
    pub fn current(&self) -> &T {
        match self {
            Ownership::Controlled(value) | Ownership::Uncontrolled(value) => value,
        }
    }

    /// Store the result of a selection operation
    ///
    /// Returns `false` (and stores nothing) for a controlled value.
    pub fn commit(&mut self, next: T) -> bool {
        match self {
            Ownership::Controlled(_) => false,
            Ownership::Uncontrolled(value) => {
                *value = next;
                true
            }
        }
    }

    /// Accept a new value pushed by the caller
    ///
    /// Returns `false` (and stores nothing) for an uncontrolled value.
    pub fn sync(&mut self, value: T) -> bool {
        match self {
            Ownership::Controlled(current) => {
                *current = value;
                true
            }
            Ownership::Uncontrolled(_) => {
                tracing::warn!("Ignoring controlled value pushed to an uncontrolled selection");
                false
            }
        }
    }
}

/// At most one selected value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSelection {
    state: Ownership<Option<String>>,
}

impl SingleSelection {
    /// Create from the `value` / `defaultValue` props
    pub fn new(value: Option<String>, default_value: Option<String>) -> Self {
        Self {
            state: Ownership::from_props(value.map(Some), || default_value),
        }
    }

    /// A caller-owned selection that currently has nothing selected
    pub fn controlled_empty() -> Self {
        Self {
            state: Ownership::Controlled(None),
        }
    }

    /// Whether the caller owns the value
    pub fn is_controlled(&self) -> bool {
        self.state.is_controlled()
    }

    /// Currently selected value
    pub fn selected_value(&self) -> Option<&str> {
        self.state.current().as_deref()
    }

    /// Whether `value` is the selected one
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected_value() == Some(value)
    }

    /// Select `item`, returning the item the change callback receives
    pub fn select(&mut self, item: &OptionItem) -> OptionItem {
        self.state.commit(Some(item.value.clone()));
        item.clone()
    }

    /// Accept a controlled value from the caller
    pub fn sync(&mut self, value: Option<String>) -> bool {
        self.state.sync(value)
    }

    /// Trigger text: the selected label, the stale raw value, or `None`
    pub fn display_label<'a>(&'a self, data: &'a OptionSet) -> Option<&'a str> {
        let value = self.selected_value().filter(|value| !value.is_empty())?;
        Some(data.label_for(value).unwrap_or(value))
    }
}

/// Ordered set of selected items (selection order, unique values)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelection {
    state: Ownership<Vec<OptionItem>>,
}

impl MultiSelection {
    /// Create from the `value` / `defaultValue` props
    ///
    /// An uncontrolled seed keeps only the first item for each value.
    pub fn new(value: Option<Vec<OptionItem>>, default_value: Vec<OptionItem>) -> Self {
        Self {
            state: Ownership::from_props(value, || dedup_by_value(default_value)),
        }
    }

    /// Whether the caller owns the value
    pub fn is_controlled(&self) -> bool {
        self.state.is_controlled()
    }

    /// Selected items in selection order
    pub fn selected(&self) -> &[OptionItem] {
        self.state.current()
    }

    /// Whether an item with `value` is selected
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected().iter().any(|item| item.value == value)
    }

    /// Whether every option is selected (false for an empty option set)
    pub fn is_all_selected(&self, data: &OptionSet) -> bool {
        !data.is_empty() && self.selected().len() == data.len()
    }

    /// Add `item` if absent, remove it if present
    ///
    /// Returns the full next selection.
    pub fn toggle(&mut self, item: &OptionItem) -> Vec<OptionItem> {
        let next = if self.is_selected(&item.value) {
            self.without(&item.value)
        } else {
            let mut next = self.selected().to_vec();
            next.push(item.clone());
            next
        };
        self.apply(next)
    }

    /// Remove `item` (no change if it is not selected)
    ///
    /// Returns the full next selection.
    pub fn remove(&mut self, item: &OptionItem) -> Vec<OptionItem> {
        let next = self.without(&item.value);
        self.apply(next)
    }

    /// Select every option, or clear when the count already matches
    ///
    /// Compares against the whole option set, not a filtered view of it.
    pub fn select_all(&mut self, data: &OptionSet) -> Vec<OptionItem> {
        let next = if self.selected().len() == data.len() {
            Vec::new()
        } else {
            data.to_vec()
        };
        self.apply(next)
    }

    /// Accept a controlled value from the caller
    pub fn sync(&mut self, value: Vec<OptionItem>) -> bool {
        self.state.sync(value)
    }

    /// Selected labels joined for the collapsed trigger
    pub fn joined_labels(&self, separator: &str) -> Option<String> {
        if self.selected().is_empty() {
            return None;
        }
        let labels: Vec<&str> = self.selected().iter().map(|item| item.label.as_str()).collect();
        Some(labels.join(separator))
    }

    fn without(&self, value: &str) -> Vec<OptionItem> {
        self.selected()
            .iter()
            .filter(|item| item.value != value)
            .cloned()
            .collect()
    }

    fn apply(&mut self, next: Vec<OptionItem>) -> Vec<OptionItem> {
        self.state.commit(next.clone());
        next
    }
}

fn dedup_by_value(items: Vec<OptionItem>) -> Vec<OptionItem> {
    let before = items.len();
    let mut seen = std::collections::HashSet::new();
    let unique: Vec<OptionItem> = items
        .into_iter()
        .filter(|item| seen.insert(item.value.clone()))
        .collect();

    if unique.len() != before {
        tracing::debug!(dropped = before - unique.len(), "Dropped duplicate default selections");
    }
    unique
}
