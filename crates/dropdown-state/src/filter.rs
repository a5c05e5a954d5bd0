//! Search filtering of the option list
//!
//! Filtering never touches the source set or the selection; it only decides
//! which rows the open panel shows. [`FilteredOptions`] caches the last
//! result so unrelated re-renders (a selection change, say) reuse it.

use crate::option::OptionSet;

/// Items whose label contains `query`, ignoring case
///
/// A blank query returns `data` itself (same storage), not a copy.
///
/// # Example
///
/// ```rust
/// use dropdown_state::filter::filter_options;
/// use dropdown_state::option::{OptionItem, OptionSet};
///
/// let data = OptionSet::new(vec![OptionItem::new("1", "React"), OptionItem::new("2", "Vue")]);
/// let visible = filter_options(&data, "rea");
/// assert_eq!(visible.items(), &[OptionItem::new("1", "React")]);
/// ```
pub fn filter_options(data: &OptionSet, query: &str) -> OptionSet {
    if query.trim().is_empty() {
        return data.clone();
    }

    let needle = query.to_lowercase();
    data.iter()
        .filter(|item| item.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[derive(Debug)]
struct CachedFilter {
    source: OptionSet,
    query: String,
    result: OptionSet,
}

/// Memoized filter over `(option set, query)`
///
/// The cache key is the option set's identity plus the query text, so a
/// caller that rebuilds its data (even with equal contents) gets a fresh
/// result, while one that keeps passing the same set does not pay again.
#[derive(Debug, Default)]
pub struct FilteredOptions {
    cached: Option<CachedFilter>,
    computations: u64,
}

impl FilteredOptions {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible rows for `data` under `query`
    pub fn get(&mut self, data: &OptionSet, query: &str) -> OptionSet {
        if let Some(cached) = &self.cached {
            if cached.source.ptr_eq(data) && cached.query == query {
                return cached.result.clone();
            }
        }

        let result = filter_options(data, query);
        self.computations += 1;
        tracing::trace!(
            query,
            total = data.len(),
            visible = result.len(),
            "Recomputed filtered options"
        );

        self.cached = Some(CachedFilter {
            source: data.clone(),
            query: query.to_string(),
            result: result.clone(),
        });
        result
    }

    /// Number of times the filter actually ran
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
