//! Multi-select dropdown engine
//!
//! Unlike the single-select variant, choosing options keeps the panel open.
//! The panel can be narrowed with a search query, which only affects the
//! visible rows: "select all" still acts on the full option set.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::config::{DropdownConfig, DEFAULT_MULTI_MAX_HEIGHT};
use crate::filter::FilteredOptions;
use crate::geometry::GeometrySnapshot;
use crate::lifecycle::{complete_open, OverlayHost, PlatformContext};
use crate::option::{OptionItem, OptionRow, OptionSet};
use crate::overlay::{CloseReason, OverlayController};
use crate::selection::MultiSelection;

/// Change callback for multi-select dropdowns; receives the full selection
pub type MultiSelectCallback = Arc<dyn Fn(&[OptionItem]) + Send + Sync>;

struct MultiState {
    data: OptionSet,
    selection: MultiSelection,
    overlay: OverlayController,
    config: DropdownConfig,
    search: String,
    filtered: FilteredOptions,
    on_change: Option<MultiSelectCallback>,
}

impl MultiState {
    fn visible(&mut self) -> OptionSet {
        let query = if self.config.searchable {
            self.search.as_str()
        } else {
            ""
        };
        self.filtered.get(&self.data, query)
    }
}

impl OverlayHost for MultiState {
    fn overlay(&mut self) -> &mut OverlayController {
        &mut self.overlay
    }

    fn max_height(&self) -> f32 {
        self.config.max_height_or(DEFAULT_MULTI_MAX_HEIGHT)
    }
}

/// Point-in-time view of a multi-select dropdown, for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelectSnapshot {
    /// Whether the panel is open
    pub expanded: bool,
    /// Whether the trigger ignores presses
    pub disabled: bool,
    /// Panel placement (open only)
    pub geometry: Option<GeometrySnapshot>,
    /// Maximum panel height
    pub max_height: f32,
    /// Whether the search box is shown
    pub searchable: bool,
    /// Current search text
    pub search: String,
    /// Selected items in selection order
    pub selected: Vec<OptionItem>,
    /// Selected labels joined by the separator; `None` means placeholder
    pub display_label: Option<String>,
    /// Whether every option is selected
    pub all_selected: bool,
    /// Visible panel rows (empty while closed)
    pub rows: Vec<OptionRow>,
    /// Whether the option list scrolls
    pub scroll_enabled: bool,
}

/// Multi-select dropdown
pub struct MultiSelectDropdown {
    shared: Arc<Mutex<MultiState>>,
    platform: PlatformContext,
}

impl MultiSelectDropdown {
    /// Mount a multi-select dropdown
    pub fn new(
        data: OptionSet,
        selection: MultiSelection,
        config: DropdownConfig,
        platform: PlatformContext,
    ) -> Self {
        Self {
            shared: Arc::new(Mutex::new(MultiState {
                data,
                selection,
                overlay: OverlayController::new(false),
                config,
                search: String::new(),
                filtered: FilteredOptions::new(),
                on_change: None,
            })),
            platform,
        }
    }

    /// Set the change callback
    pub fn with_on_change<F>(self, on_change: F) -> Self
    where
        F: Fn(&[OptionItem]) + Send + Sync + 'static,
    {
        self.set_on_change(Some(Arc::new(on_change)));
        self
    }

    /// Replace (or clear) the change callback
    pub fn set_on_change(&self, on_change: Option<MultiSelectCallback>) {
        self.shared.lock().on_change = on_change;
    }

    /// Press the trigger: open when closed, close when open
    ///
    /// Returns whether the panel is open afterwards.
    pub fn toggle(&self) -> bool {
        let ticket = self.shared.lock().overlay.toggle();
        if let Some(ticket) = ticket {
            complete_open(&self.shared, &self.platform, ticket);
        }
        self.is_expanded()
    }

    /// Close the panel; a no-op when already closed
    pub fn close(&self, reason: CloseReason) -> bool {
        self.shared.lock().overlay.close(reason)
    }

    /// Add or remove `item`; the panel stays open
    pub fn toggle_item(&self, item: &OptionItem) {
        self.update(|state| state.selection.toggle(item));
    }

    /// Toggle the option with `value`; returns `false` if there is none
    pub fn toggle_value(&self, value: &str) -> bool {
        let item = self.shared.lock().data.find(value).cloned();
        match item {
            Some(item) => {
                self.toggle_item(&item);
                true
            }
            None => false,
        }
    }

    /// Remove `item` from the selection (chip dismiss)
    pub fn remove(&self, item: &OptionItem) {
        self.update(|state| state.selection.remove(item));
    }

    /// Remove the selected item with `value`; returns `false` if none is selected
    ///
    /// Looks in the selection rather than the option set, so stale
    /// selections can still be dismissed.
    pub fn remove_value(&self, value: &str) -> bool {
        let item = self
            .shared
            .lock()
            .selection
            .selected()
            .iter()
            .find(|item| item.value == value)
            .cloned();
        match item {
            Some(item) => {
                self.remove(&item);
                true
            }
            None => false,
        }
    }

    /// Select every option, or clear when everything is already selected
    pub fn select_all(&self) {
        self.update(|state| {
            let data = state.data.clone();
            state.selection.select_all(&data)
        });
    }

    /// Update the search text (ignored when search is disabled)
    pub fn set_search(&self, text: impl Into<String>) -> bool {
        let mut state = self.shared.lock();
        if !state.config.searchable {
            return false;
        }
        state.search = text.into();
        true
    }

    /// Current search text
    pub fn search(&self) -> String {
        self.shared.lock().search.clone()
    }

    /// Options matching the current search
    pub fn visible_options(&self) -> OptionSet {
        self.shared.lock().visible()
    }

    /// How many times filtering actually ran
    pub fn filter_computations(&self) -> u64 {
        self.shared.lock().filtered.computations()
    }

    /// Accept a new controlled selection from the caller
    pub fn set_value(&self, value: Vec<OptionItem>) -> bool {
        self.shared.lock().selection.sync(value)
    }

    /// Replace the option set (the selection is kept as is)
    pub fn set_data(&self, data: OptionSet) {
        self.shared.lock().data = data;
    }

    /// Enable or disable the trigger
    pub fn set_disabled(&self, disabled: bool) {
        self.shared.lock().overlay.set_disabled(disabled);
    }

    /// Replace the configuration (takes effect on the next render)
    pub fn set_config(&self, config: DropdownConfig) {
        self.shared.lock().config = config;
    }

    /// Whether the panel is open
    pub fn is_expanded(&self) -> bool {
        self.shared.lock().overlay.is_expanded()
    }

    /// Whether the selection is caller-owned
    pub fn is_controlled(&self) -> bool {
        self.shared.lock().selection.is_controlled()
    }

    /// Panel placement (open only)
    pub fn geometry(&self) -> Option<GeometrySnapshot> {
        self.shared.lock().overlay.geometry()
    }

    /// Selected items in selection order
    pub fn selected(&self) -> Vec<OptionItem> {
        self.shared.lock().selection.selected().to_vec()
    }

    /// Whether the option with `value` is selected
    pub fn is_selected(&self, value: &str) -> bool {
        self.shared.lock().selection.is_selected(value)
    }

    /// Trigger text, falling back to `placeholder`
    pub fn display_label(&self, placeholder: &str) -> String {
        let state = self.shared.lock();
        state
            .selection
            .joined_labels(&state.config.separator)
            .unwrap_or_else(|| placeholder.to_string())
    }

    /// Capture everything needed to render
    pub fn snapshot(&self) -> MultiSelectSnapshot {
        let mut state = self.shared.lock();
        let expanded = state.overlay.is_expanded();
        let rows = if expanded {
            let visible = state.visible();
            visible
                .iter()
                .map(|item| OptionRow {
                    selected: state.selection.is_selected(&item.value),
                    item: item.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        MultiSelectSnapshot {
            expanded,
            disabled: state.overlay.is_disabled(),
            geometry: state.overlay.geometry(),
            max_height: state.max_height(),
            searchable: state.config.searchable,
            search: state.search.clone(),
            selected: state.selection.selected().to_vec(),
            display_label: state.selection.joined_labels(&state.config.separator),
            all_selected: state.selection.is_all_selected(&state.data),
            rows,
            scroll_enabled: state.config.scroll_enabled(state.data.len()),
        }
    }

    /// Unmount, closing the panel and releasing platform handlers
    pub fn unmount(self) {
        drop(self);
    }

    fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut MultiState) -> Vec<OptionItem>,
    {
        let (next, on_change) = {
            let mut state = self.shared.lock();
            let next = change(&mut *state);
            (next, state.on_change.clone())
        };

        tracing::debug!(selected = next.len(), "Selection changed");
        if let Some(on_change) = on_change {
            on_change(&next);
        }
    }
}

impl Drop for MultiSelectDropdown {
    fn drop(&mut self) {
        self.shared.lock().overlay.close(CloseReason::Unmount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropdown_platform::back_handler::{BackHandlerRegistry, BackPress};
    use dropdown_platform::layout::{DeferredMeasurer, LayoutRect, WindowMetrics};

    fn frameworks() -> OptionSet {
        OptionSet::new(vec![
            OptionItem::new("react", "React"),
            OptionItem::new("vue", "Vue"),
            OptionItem::new("svelte", "Svelte"),
            OptionItem::new("preact", "Preact"),
        ])
    }

    type Calls = Arc<Mutex<Vec<Vec<String>>>>;

    fn mount(selection: MultiSelection) -> (MultiSelectDropdown, BackHandlerRegistry, Calls) {
        let registry = BackHandlerRegistry::new();
        let platform = PlatformContext::new(
            Arc::new(DeferredMeasurer::with_rect(LayoutRect::new(0.0, 100.0, 300.0, 48.0))),
            registry.clone(),
            WindowMetrics::new(390.0, 844.0),
        );
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let dropdown = MultiSelectDropdown::new(frameworks(), selection, DropdownConfig::multi_select(), platform)
            .with_on_change(move |items: &[OptionItem]| {
                sink.lock().push(items.iter().map(|item| item.value.clone()).collect());
            });
        (dropdown, registry, calls)
    }

    fn values(items: &[OptionItem]) -> Vec<String> {
        items.iter().map(|item| item.value.clone()).collect()
    }

    #[test]
    fn test_toggle_item_keeps_panel_open() {
        let (dropdown, _registry, calls) = mount(MultiSelection::new(None, Vec::new()));
        dropdown.toggle();

        assert!(dropdown.toggle_value("vue"));
        assert!(dropdown.toggle_value("react"));
        assert!(dropdown.is_expanded());
        assert_eq!(values(&dropdown.selected()), vec!["vue", "react"]);
        assert_eq!(
            *calls.lock(),
            vec![vec!["vue".to_string()], vec!["vue".to_string(), "react".to_string()]]
        );
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let data = frameworks();
        let (dropdown, _registry, _calls) = mount(MultiSelection::new(None, vec![data[2].clone()]));

        dropdown.toggle_item(&data[0]);
        dropdown.toggle_item(&data[0]);
        assert_eq!(values(&dropdown.selected()), vec!["svelte"]);
    }

    #[test]
    fn test_select_all_against_full_data_while_filtered() {
        let (dropdown, _registry, calls) = mount(MultiSelection::new(None, Vec::new()));
        dropdown.toggle();
        dropdown.set_search("vue");
        assert_eq!(dropdown.visible_options().len(), 1);

        dropdown.select_all();
        assert_eq!(values(&dropdown.selected()), vec!["react", "vue", "svelte", "preact"]);

        dropdown.select_all();
        assert!(dropdown.selected().is_empty());
        assert_eq!(calls.lock().len(), 2);
        assert!(dropdown.is_expanded());
    }

    #[test]
    fn test_remove_value_from_chip() {
        let data = frameworks();
        let stale = OptionItem::new("angular", "Angular");
        let (dropdown, _registry, calls) =
            mount(MultiSelection::new(None, vec![data[0].clone(), stale, data[1].clone()]));

        assert!(dropdown.remove_value("angular"));
        assert_eq!(values(&dropdown.selected()), vec!["react", "vue"]);
        assert!(!dropdown.remove_value("angular"));
        assert_eq!(calls.lock().len(), 1);
    }

    #[test]
    fn test_controlled_selection_is_read_only() {
        let data = frameworks();
        let (dropdown, _registry, calls) =
            mount(MultiSelection::new(Some(vec![data[1].clone()]), Vec::new()));

        dropdown.toggle_item(&data[0]);
        dropdown.remove(&data[1]);
        dropdown.select_all();
        assert_eq!(values(&dropdown.selected()), vec!["vue"]);
        assert_eq!(calls.lock().len(), 3);
        assert_eq!(calls.lock()[0], vec!["vue".to_string(), "react".to_string()]);

        dropdown.set_value(vec![data[3].clone()]);
        assert_eq!(values(&dropdown.selected()), vec!["preact"]);
    }

    #[test]
    fn test_search_memoized_across_selection_changes() {
        let (dropdown, _registry, _calls) = mount(MultiSelection::new(None, Vec::new()));
        dropdown.toggle();
        dropdown.set_search("act");

        let first = dropdown.snapshot();
        dropdown.toggle_value("react");
        let second = dropdown.snapshot();

        assert_eq!(dropdown.filter_computations(), 1);
        assert_eq!(first.rows.len(), 2);
        assert!(second.rows.iter().any(|row| row.item.value == "react" && row.selected));

        dropdown.set_search("sv");
        dropdown.snapshot();
        assert_eq!(dropdown.filter_computations(), 2);
    }

    #[test]
    fn test_search_persists_across_close() {
        let (dropdown, _registry, _calls) = mount(MultiSelection::new(None, Vec::new()));
        dropdown.toggle();
        dropdown.set_search("pre");
        dropdown.close(CloseReason::Backdrop);
        dropdown.toggle();

        assert_eq!(dropdown.search(), "pre");
        assert_eq!(values(&dropdown.visible_options()), vec!["preact"]);
    }

    #[test]
    fn test_search_disabled() {
        let (dropdown, _registry, _calls) = mount(MultiSelection::new(None, Vec::new()));
        dropdown.set_config(DropdownConfig::multi_select().with_searchable(false));

        assert!(!dropdown.set_search("vue"));
        assert_eq!(dropdown.visible_options().len(), 4);
    }

    #[test]
    fn test_display_label_uses_separator() {
        let data = frameworks();
        let (dropdown, _registry, _calls) = mount(MultiSelection::new(None, Vec::new()));
        assert_eq!(dropdown.display_label("Frameworks"), "Frameworks");

        dropdown.toggle_item(&data[1]);
        dropdown.toggle_item(&data[0]);
        assert_eq!(dropdown.display_label("Frameworks"), "Vue, React");

        dropdown.set_config(DropdownConfig::multi_select().with_separator(" + "));
        assert_eq!(dropdown.display_label("Frameworks"), "Vue + React");
    }

    #[test]
    fn test_back_navigation_closes_multi() {
        let (dropdown, registry, _calls) = mount(MultiSelection::new(None, Vec::new()));
        dropdown.toggle();
        dropdown.toggle_value("vue");

        assert_eq!(registry.dispatch(), BackPress::Handled);
        assert!(!dropdown.is_expanded());
        assert_eq!(registry.stats().outstanding(), 0);
    }

    #[test]
    fn test_snapshot_all_selected() {
        let data = frameworks();
        let (dropdown, _registry, _calls) = mount(MultiSelection::new(None, data.to_vec()));
        dropdown.toggle();

        let snapshot = dropdown.snapshot();
        assert!(snapshot.all_selected);
        assert!(snapshot.rows.iter().all(|row| row.selected));
        assert_eq!(snapshot.display_label.as_deref(), Some("React, Vue, Svelte, Preact"));
        assert_eq!(snapshot.max_height, 350.0);
    }

    #[test]
    fn test_shared_json_config_keeps_multi_height() {
        let (dropdown, _registry, _calls) = mount(MultiSelection::new(None, Vec::new()));
        dropdown.set_config(DropdownConfig::from_json(r#"{"separator": " / "}"#).unwrap());
        dropdown.toggle();

        assert_eq!(dropdown.snapshot().max_height, 350.0);

        dropdown.set_config(DropdownConfig::from_json(r#"{"maxHeight": 120}"#).unwrap());
        assert_eq!(dropdown.snapshot().max_height, 120.0);
    }
}
