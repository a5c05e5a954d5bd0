//! Render output
//!
//! Views are plain serializable trees handed to the host renderer. They
//! carry everything needed to draw a frame and nothing that reacts to
//! input; events go back through the component methods.

use serde::Serialize;

use dropdown_state::geometry::{Direction, GeometrySnapshot};
use dropdown_state::option::{OptionItem, OptionRow};

/// The always-visible trigger button
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerView {
    /// Text shown on the trigger
    pub label: String,
    /// Whether `label` is the placeholder
    pub is_placeholder: bool,
    /// Icon name (expanded or collapsed variant)
    pub icon: String,
    /// Whether the panel is open
    pub expanded: bool,
    /// Whether presses are ignored
    pub disabled: bool,
}

/// A row in the option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRowView {
    /// Stable list key (the option value)
    pub key: String,
    /// Display text
    pub label: String,
    /// Whether the row shows as selected
    pub selected: bool,
}

impl From<&OptionRow> for OptionRowView {
    fn from(row: &OptionRow) -> Self {
        Self {
            key: row.item.value.clone(),
            label: row.item.label.clone(),
            selected: row.selected,
        }
    }
}

/// A dismissible chip for one selected item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipView {
    /// Selected value
    pub key: String,
    /// Display text
    pub label: String,
}

impl From<&OptionItem> for ChipView {
    fn from(item: &OptionItem) -> Self {
        Self {
            key: item.value.clone(),
            label: item.label.clone(),
        }
    }
}

/// The "select all" row above a multi-select list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAllRowView {
    /// Row text
    pub label: String,
    /// Whether every option is selected
    pub checked: bool,
}

/// Search box at the top of a multi-select panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBoxView {
    /// Hint text
    pub placeholder: String,
    /// Current query
    pub value: String,
}

/// The floating panel, positioned in window coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    /// Panel top edge
    pub top: f32,
    /// Panel left edge
    pub left: f32,
    /// Panel width (the trigger's width)
    pub width: f32,
    /// Height cap; the list scrolls past it
    pub max_height: f32,
    /// Which side of the trigger the panel sits on
    pub direction: Direction,
    /// Search box, when search is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchBoxView>,
    /// Select-all row (multi-select only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_all: Option<SelectAllRowView>,
    /// Visible option rows
    pub rows: Vec<OptionRowView>,
    /// Whether the list scrolls
    pub scroll_enabled: bool,
}

impl PanelView {
    /// Lay out a panel at `geometry`
    pub fn new(
        geometry: GeometrySnapshot,
        max_height: f32,
        rows: &[OptionRow],
        scroll_enabled: bool,
    ) -> Self {
        Self {
            top: geometry.top,
            left: geometry.left,
            width: geometry.width,
            max_height,
            direction: geometry.direction,
            search: None,
            select_all: None,
            rows: rows.iter().map(OptionRowView::from).collect(),
            scroll_enabled,
        }
    }

    /// Add a search box
    pub fn with_search(mut self, search: SearchBoxView) -> Self {
        self.search = Some(search);
        self
    }

    /// Add a select-all row
    pub fn with_select_all(mut self, select_all: SelectAllRowView) -> Self {
        self.select_all = Some(select_all);
        self
    }
}

/// A rendered single-select dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownView {
    /// Trigger button
    pub trigger: TriggerView,
    /// Open panel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelView>,
}

/// A rendered multi-select dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSelectDropdownView {
    /// Trigger button
    pub trigger: TriggerView,
    /// Chips for the selected items, in selection order
    pub chips: Vec<ChipView>,
    /// Open panel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelView>,
}
