//! Single-select dropdown engine
//!
//! Combines the overlay lifecycle with a [`SingleSelection`]. Choosing an
//! option always reports it to the change callback and always closes the
//! panel; whether the selection is stored locally depends on ownership.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::config::{DropdownConfig, DEFAULT_MAX_HEIGHT};
use crate::geometry::GeometrySnapshot;
use crate::lifecycle::{complete_open, OverlayHost, PlatformContext};
use crate::option::{OptionItem, OptionRow, OptionSet};
use crate::overlay::{CloseReason, OverlayController};
use crate::selection::SingleSelection;

/// Change callback for single-select dropdowns
pub type SelectCallback = Arc<dyn Fn(&OptionItem) + Send + Sync>;

struct SingleState {
    data: OptionSet,
    selection: SingleSelection,
    overlay: OverlayController,
    config: DropdownConfig,
    on_change: Option<SelectCallback>,
}

impl OverlayHost for SingleState {
    fn overlay(&mut self) -> &mut OverlayController {
        &mut self.overlay
    }

    fn max_height(&self) -> f32 {
        self.config.max_height_or(DEFAULT_MAX_HEIGHT)
    }
}

/// Point-in-time view of a single-select dropdown, for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownSnapshot {
    /// Whether the panel is open
    pub expanded: bool,
    /// Whether the trigger ignores presses
    pub disabled: bool,
    /// Panel placement (open only)
    pub geometry: Option<GeometrySnapshot>,
    /// Maximum panel height
    pub max_height: f32,
    /// Selected value, if any
    pub selected_value: Option<String>,
    /// Trigger text for the selection; `None` means show the placeholder
    pub display_label: Option<String>,
    /// Panel rows (empty while closed)
    pub rows: Vec<OptionRow>,
    /// Whether the option list scrolls
    pub scroll_enabled: bool,
}

/// Single-select dropdown
///
/// # Example
///
/// ```rust
/// use dropdown_platform::{BackHandlerRegistry, DeferredMeasurer, LayoutRect, WindowMetrics};
/// use dropdown_state::config::DropdownConfig;
/// use dropdown_state::dropdown::Dropdown;
/// use dropdown_state::lifecycle::PlatformContext;
/// use dropdown_state::option::{OptionItem, OptionSet};
/// use dropdown_state::selection::SingleSelection;
/// use std::sync::Arc;
///
/// let platform = PlatformContext::new(
///     Arc::new(DeferredMeasurer::with_rect(LayoutRect::new(0.0, 100.0, 300.0, 50.0))),
///     BackHandlerRegistry::new(),
///     WindowMetrics::new(390.0, 800.0),
/// );
/// let data = OptionSet::new(vec![OptionItem::new("1", "One"), OptionItem::new("2", "Two")]);
/// let dropdown = Dropdown::new(data, SingleSelection::new(None, None), DropdownConfig::default(), platform);
///
/// dropdown.toggle();
/// assert!(dropdown.is_expanded());
/// dropdown.select_value("2");
/// assert!(!dropdown.is_expanded());
/// assert_eq!(dropdown.selected_value().as_deref(), Some("2"));
/// ```
pub struct Dropdown {
    shared: Arc<Mutex<SingleState>>,
    platform: PlatformContext,
}

impl Dropdown {
    /// Mount a dropdown
    pub fn new(
        data: OptionSet,
        selection: SingleSelection,
        config: DropdownConfig,
        platform: PlatformContext,
    ) -> Self {
        Self {
            shared: Arc::new(Mutex::new(SingleState {
                data,
                selection,
                overlay: OverlayController::new(false),
                config,
                on_change: None,
            })),
            platform,
        }
    }

    /// Set the change callback
    pub fn with_on_change<F>(self, on_change: F) -> Self
    where
        F: Fn(&OptionItem) + Send + Sync + 'static,
    {
        self.set_on_change(Some(Arc::new(on_change)));
        self
    }

    /// Replace (or clear) the change callback
    pub fn set_on_change(&self, on_change: Option<SelectCallback>) {
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

    /// Choose `item`
    pub fn select(&self, item: &OptionItem) {
        let (emitted, on_change) = {
            let mut state = self.shared.lock();
            let emitted = state.selection.select(item);
            state.overlay.close(CloseReason::Selection);
            (emitted, state.on_change.clone())
        };

        tracing::debug!(value = %emitted.value, "Option selected");
        if let Some(on_change) = on_change {
            on_change(&emitted);
        }
    }

    /// Choose the option with `value`; returns `false` if there is none
    pub fn select_value(&self, value: &str) -> bool {
        let item = self.shared.lock().data.find(value).cloned();
        match item {
            Some(item) => {
                self.select(&item);
                true
            }
            None => false,
        }
    }

    /// Accept a new controlled value from the caller
    pub fn set_value(&self, value: Option<String>) -> bool {
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

    /// Replace the configuration (takes effect on the next open)
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

    /// Currently selected value
    pub fn selected_value(&self) -> Option<String> {
        self.shared.lock().selection.selected_value().map(str::to_string)
    }

    /// Trigger text, falling back to `placeholder`
    pub fn display_label(&self, placeholder: &str) -> String {
        let state = self.shared.lock();
        state
            .selection
            .display_label(&state.data)
            .unwrap_or(placeholder)
            .to_string()
    }

    /// Capture everything needed to render
    pub fn snapshot(&self) -> DropdownSnapshot {
        let state = self.shared.lock();
        let expanded = state.overlay.is_expanded();
        let rows = if expanded {
            state
                .data
                .iter()
                .map(|item| OptionRow {
                    selected: state.selection.is_selected(&item.value),
                    item: item.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        DropdownSnapshot {
            expanded,
            disabled: state.overlay.is_disabled(),
            geometry: state.overlay.geometry(),
            max_height: state.max_height(),
            selected_value: state.selection.selected_value().map(str::to_string),
            display_label: state.selection.display_label(&state.data).map(str::to_string),
            rows,
            scroll_enabled: state.config.scroll_enabled(state.data.len()),
        }
    }

    /// Unmount, closing the panel and releasing platform handlers
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for Dropdown {
    fn drop(&mut self) {
        self.shared.lock().overlay.close(CloseReason::Unmount);
    }
}
