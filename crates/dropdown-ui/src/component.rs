//! Mounted dropdown components
//!
//! A component owns one engine and translates host events (presses, text
//! changes, re-renders with new props) into engine calls. Rendering reads an
//! engine snapshot and turns it into a view tree.

use dropdown_state::config::DropdownConfig;
use dropdown_state::dropdown::Dropdown;
use dropdown_state::lifecycle::PlatformContext;
use dropdown_state::multi_select::MultiSelectDropdown;
use dropdown_state::overlay::CloseReason;
use dropdown_state::selection::{MultiSelection, SingleSelection};

use crate::props::{DropdownProps, MultiSelectDropdownProps};
use crate::view::{
    ChipView, DropdownView, MultiSelectDropdownView, PanelView, SearchBoxView, SelectAllRowView,
    TriggerView,
};

fn trigger_icon(config: &DropdownConfig, expanded: bool) -> String {
    if expanded {
        config.expanded_icon_name.clone()
    } else {
        config.icon_name.clone()
    }
}

/// A mounted single-select dropdown
pub struct DropdownComponent {
    engine: Dropdown,
    placeholder: String,
    config: DropdownConfig,
}

impl DropdownComponent {
    pub(crate) fn mount(props: DropdownProps, platform: PlatformContext) -> Self {
        let config = props.resolved_config();
        let selection = SingleSelection::new(props.value, props.default_value);
        let engine = Dropdown::new(props.data, selection, config.clone(), platform);
        engine.set_on_change(props.on_change);
        engine.set_disabled(props.disabled);

        tracing::debug!(controlled = engine.is_controlled(), "Mounted dropdown");
        Self {
            engine,
            placeholder: props.placeholder,
            config,
        }
    }

    /// The underlying engine
    pub fn engine(&self) -> &Dropdown {
        &self.engine
    }

    /// Build the current view
    pub fn render(&self) -> DropdownView {
        let snapshot = self.engine.snapshot();
        let trigger = TriggerView {
            is_placeholder: snapshot.display_label.is_none(),
            label: snapshot
                .display_label
                .unwrap_or_else(|| self.placeholder.clone()),
            icon: trigger_icon(&self.config, snapshot.expanded),
            expanded: snapshot.expanded,
            disabled: snapshot.disabled,
        };
        let panel = snapshot.geometry.map(|geometry| {
            PanelView::new(
                geometry,
                snapshot.max_height,
                &snapshot.rows,
                snapshot.scroll_enabled,
            )
        });

        DropdownView { trigger, panel }
    }

    /// Trigger pressed
    pub fn press_trigger(&self) -> bool {
        self.engine.toggle()
    }

    /// Option row pressed; returns `false` for an unknown value
    pub fn press_option(&self, value: &str) -> bool {
        self.engine.select_value(value)
    }

    /// Area outside the panel pressed
    pub fn press_backdrop(&self) -> bool {
        self.engine.close(CloseReason::Backdrop)
    }

    /// The modal host asked to close (platform back gesture)
    pub fn request_close(&self) -> bool {
        self.engine.close(CloseReason::BackNavigation)
    }

    /// Re-render with new props
    ///
    /// Ownership is fixed at mount: switching between controlled and
    /// uncontrolled is ignored.
    pub fn update(&mut self, props: DropdownProps) {
        let config = props.resolved_config();
        self.engine.set_data(props.data);
        self.engine.set_config(config.clone());
        self.engine.set_disabled(props.disabled);
        self.engine.set_on_change(props.on_change);

        match (self.engine.is_controlled(), props.value) {
            (true, Some(value)) => {
                self.engine.set_value(Some(value));
            }
            (false, None) => {}
            (controlled, _) => {
                tracing::warn!(
                    controlled,
                    "Dropdown switched between controlled and uncontrolled; keeping initial mode"
                );
            }
        }

        self.placeholder = props.placeholder;
        self.config = config;
    }

    /// Unmount, closing the panel and releasing platform handlers
    pub fn unmount(self) {
        self.engine.unmount();
    }
}

/// A mounted multi-select dropdown
pub struct MultiSelectDropdownComponent {
    engine: MultiSelectDropdown,
    placeholder: String,
    config: DropdownConfig,
}

impl MultiSelectDropdownComponent {
    pub(crate) fn mount(props: MultiSelectDropdownProps, platform: PlatformContext) -> Self {
        let config = props.resolved_config();
        let selection = MultiSelection::new(props.value, props.default_value);
        let engine = MultiSelectDropdown::new(props.data, selection, config.clone(), platform);
        engine.set_on_change(props.on_change);
        engine.set_disabled(props.disabled);

        tracing::debug!(controlled = engine.is_controlled(), "Mounted multi-select dropdown");
        Self {
            engine,
            placeholder: props.placeholder,
            config,
        }
    }

    /// The underlying engine
    pub fn engine(&self) -> &MultiSelectDropdown {
        &self.engine
    }

    /// Build the current view
    pub fn render(&self) -> MultiSelectDropdownView {
        let snapshot = self.engine.snapshot();
        let trigger = TriggerView {
            is_placeholder: snapshot.display_label.is_none(),
            label: snapshot
                .display_label
                .unwrap_or_else(|| self.placeholder.clone()),
            icon: trigger_icon(&self.config, snapshot.expanded),
            expanded: snapshot.expanded,
            disabled: snapshot.disabled,
        };
        let chips = snapshot.selected.iter().map(ChipView::from).collect();

        let panel = snapshot.geometry.map(|geometry| {
            let panel = PanelView::new(
                geometry,
                snapshot.max_height,
                &snapshot.rows,
                snapshot.scroll_enabled,
            )
            .with_select_all(SelectAllRowView {
                label: self.config.select_all_label.clone(),
                checked: snapshot.all_selected,
            });

            if snapshot.searchable {
                panel.with_search(SearchBoxView {
                    placeholder: self.config.search_placeholder.clone(),
                    value: snapshot.search.clone(),
                })
            } else {
                panel
            }
        });

        MultiSelectDropdownView {
            trigger,
            chips,
            panel,
        }
    }

    /// Trigger pressed
    pub fn press_trigger(&self) -> bool {
        self.engine.toggle()
    }

    /// Option row pressed; returns `false` for an unknown value
    pub fn press_option(&self, value: &str) -> bool {
        self.engine.toggle_value(value)
    }

    /// Select-all row pressed
    pub fn press_select_all(&self) {
        self.engine.select_all();
    }

    /// Chip close button pressed; returns `false` if `value` is not selected
    pub fn remove_chip(&self, value: &str) -> bool {
        self.engine.remove_value(value)
    }

    /// Search text edited
    pub fn change_search(&self, text: impl Into<String>) -> bool {
        self.engine.set_search(text)
    }

    /// Area outside the panel pressed
    pub fn press_backdrop(&self) -> bool {
        self.engine.close(CloseReason::Backdrop)
    }

    /// The modal host asked to close (platform back gesture)
    pub fn request_close(&self) -> bool {
        self.engine.close(CloseReason::BackNavigation)
    }

    /// Re-render with new props
    ///
    /// Ownership is fixed at mount: switching between controlled and
    /// uncontrolled is ignored.
    pub fn update(&mut self, props: MultiSelectDropdownProps) {
        let config = props.resolved_config();
        self.engine.set_data(props.data);
        self.engine.set_config(config.clone());
        self.engine.set_disabled(props.disabled);
        self.engine.set_on_change(props.on_change);

        match (self.engine.is_controlled(), props.value) {
            (true, Some(value)) => {
                self.engine.set_value(value);
            }
            (false, None) => {}
            (controlled, _) => {
                tracing::warn!(
                    controlled,
                    "Multi-select switched between controlled and uncontrolled; keeping initial mode"
                );
            }
        }

        self.placeholder = props.placeholder;
        self.config = config;
    }

    /// Unmount, closing the panel and releasing platform handlers
    pub fn unmount(self) {
        self.engine.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropdown_platform::back_handler::{BackHandlerRegistry, BackPress};
    use dropdown_platform::layout::{DeferredMeasurer, LayoutRect, WindowMetrics};
    use dropdown_state::geometry::Direction;
    use dropdown_state::option::{OptionItem, OptionSet};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn frameworks() -> OptionSet {
        OptionSet::new(vec![
            OptionItem::new("1", "React"),
            OptionItem::new("2", "Vue"),
            OptionItem::new("3", "Svelte"),
        ])
    }

    fn platform(trigger: LayoutRect) -> (PlatformContext, Arc<DeferredMeasurer>, BackHandlerRegistry) {
        let measurer = Arc::new(DeferredMeasurer::with_rect(trigger));
        let registry = BackHandlerRegistry::new();
        let context = PlatformContext::new(
            measurer.clone(),
            registry.clone(),
            WindowMetrics::new(390.0, 800.0),
        );
        (context, measurer, registry)
    }

    // ==========================================================================
    // Single-select
    // ==========================================================================

    #[test]
    fn test_render_closed() {
        let (platform, _measurer, _registry) = platform(LayoutRect::new(16.0, 100.0, 300.0, 48.0));
        let component = DropdownProps::new(frameworks(), "Pick one").mount(platform);

        let view = component.render();
        assert_eq!(view.trigger.label, "Pick one");
        assert!(view.trigger.is_placeholder);
        assert_eq!(view.trigger.icon, "expand-more");
        assert!(view.panel.is_none());
    }

    #[test]
    fn test_open_measure_select_flow() {
        let (platform, measurer, registry) = platform(LayoutRect::new(16.0, 100.0, 300.0, 48.0));
        let chosen = Arc::new(Mutex::new(Vec::new()));
        let sink = chosen.clone();
        let component = DropdownProps::new(frameworks(), "Pick one")
            .on_change(move |item| sink.lock().push(item.value.clone()))
            .mount(platform);

        assert!(component.press_trigger());
        assert_eq!(measurer.flush(), 1);

        let view = component.render();
        assert_eq!(view.trigger.icon, "expand-less");
        let panel = view.panel.unwrap();
        assert_eq!(panel.top, 148.0);
        assert_eq!(panel.left, 16.0);
        assert_eq!(panel.width, 300.0);
        assert_eq!(panel.direction, Direction::Down);
        assert_eq!(panel.rows.len(), 3);
        assert!(!panel.scroll_enabled);

        assert!(component.press_option("2"));
        let view = component.render();
        assert!(view.panel.is_none());
        assert_eq!(view.trigger.label, "Vue");
        assert_eq!(*chosen.lock(), vec!["2".to_string()]);
        assert_eq!(registry.active_handlers(), 0);
    }

    #[test]
    fn test_panel_opens_upward_near_bottom() {
        let (platform, measurer, _registry) = platform(LayoutRect::new(0.0, 600.0, 300.0, 48.0));
        let component = DropdownProps::new(frameworks(), "Pick one").mount(platform);

        component.press_trigger();
        measurer.flush();

        let panel = component.render().panel.unwrap();
        assert_eq!(panel.direction, Direction::Up);
        assert_eq!(panel.top, 350.0);
    }

    #[test]
    fn test_disabled_trigger() {
        let (platform, measurer, registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let component = DropdownProps::new(frameworks(), "Pick one")
            .disabled(true)
            .mount(platform);

        assert!(!component.press_trigger());
        assert_eq!(measurer.pending(), 0);
        assert_eq!(registry.stats().registrations, 0);
        assert!(component.render().trigger.disabled);
    }

    #[test]
    fn test_request_close_and_backdrop() {
        let (platform, _measurer, registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let component = DropdownProps::new(frameworks(), "Pick one").mount(platform);

        component.press_trigger();
        assert!(component.request_close());
        assert!(!component.request_close());

        component.press_trigger();
        assert!(component.press_backdrop());
        assert_eq!(registry.stats().outstanding(), 0);
        assert_eq!(registry.dispatch(), BackPress::Unhandled);
    }

    #[test]
    fn test_update_controlled_value() {
        let (platform, _measurer, _registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let mut component = DropdownProps::new(frameworks(), "Pick one")
            .with_value("1")
            .mount(platform);

        component.press_trigger();
        component.press_option("3");
        assert_eq!(component.render().trigger.label, "React");

        component.update(DropdownProps::new(frameworks(), "Pick one").with_value("3"));
        assert_eq!(component.render().trigger.label, "Svelte");
    }

    #[test]
    fn test_update_ignores_ownership_switch() {
        let (platform, _measurer, _registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let mut component = DropdownProps::new(frameworks(), "Pick one")
            .with_default_value("1")
            .mount(platform);

        component.update(DropdownProps::new(frameworks(), "Choose").with_value("2"));
        assert!(!component.engine().is_controlled());
        assert_eq!(component.render().trigger.label, "React");

        component.press_option("3");
        assert_eq!(component.render().trigger.label, "Svelte");
    }

    #[test]
    fn test_update_placeholder_and_icon() {
        let (platform, _measurer, _registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let mut component = DropdownProps::new(frameworks(), "Pick one").mount(platform);

        component.update(
            DropdownProps::new(frameworks(), "Choose a framework").with_icon_name("arrow-drop-down"),
        );
        let view = component.render();
        assert_eq!(view.trigger.label, "Choose a framework");
        assert_eq!(view.trigger.icon, "arrow-drop-down");
    }

    // ==========================================================================
    // Multi-select
    // ==========================================================================

    #[test]
    fn test_multi_render_chips_and_panel() {
        let (platform, measurer, _registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let data = frameworks();
        let component = MultiSelectDropdownProps::new(data.clone(), "Frameworks")
            .with_default_value(vec![data[1].clone()])
            .mount(platform);

        component.press_trigger();
        measurer.flush();
        component.press_option("1");

        let view = component.render();
        assert_eq!(view.trigger.label, "Vue, React");
        assert_eq!(view.chips.len(), 2);
        assert_eq!(view.chips[0].key, "2");

        let panel = view.panel.unwrap();
        assert_eq!(panel.max_height, 350.0);
        assert_eq!(panel.search.as_ref().map(|s| s.placeholder.as_str()), Some("Search..."));
        let select_all = panel.select_all.unwrap();
        assert_eq!(select_all.label, "Select All");
        assert!(!select_all.checked);
        assert!(panel.rows.iter().filter(|row| row.selected).count() == 2);
    }

    #[test]
    fn test_multi_search_and_select_all() {
        let (platform, _measurer, _registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let component = MultiSelectDropdownProps::new(frameworks(), "Frameworks").mount(platform);

        component.press_trigger();
        assert!(component.change_search("vu"));
        let panel = component.render().panel.unwrap();
        assert_eq!(panel.rows.len(), 1);
        assert_eq!(panel.rows[0].label, "Vue");

        component.press_select_all();
        let view = component.render();
        assert_eq!(view.chips.len(), 3);
        assert!(view.panel.unwrap().select_all.unwrap().checked);
    }

    #[test]
    fn test_multi_remove_chip_while_closed() {
        let (platform, _measurer, _registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let data = frameworks();
        let removed = Arc::new(Mutex::new(0));
        let counter = removed.clone();
        let component = MultiSelectDropdownProps::new(data.clone(), "Frameworks")
            .with_default_value(data.to_vec())
            .on_change(move |_| *counter.lock() += 1)
            .mount(platform);

        assert!(component.remove_chip("3"));
        assert!(!component.remove_chip("3"));

        let view = component.render();
        assert!(view.panel.is_none());
        assert_eq!(view.trigger.label, "React, Vue");
        assert_eq!(*removed.lock(), 1);
    }

    #[test]
    fn test_multi_not_searchable() {
        let (platform, _measurer, _registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let component = MultiSelectDropdownProps::new(frameworks(), "Frameworks")
            .searchable(false)
            .mount(platform);

        component.press_trigger();
        assert!(!component.change_search("vu"));
        let panel = component.render().panel.unwrap();
        assert!(panel.search.is_none());
        assert_eq!(panel.rows.len(), 3);
    }

    #[test]
    fn test_multi_view_serializes_camel_case() {
        let (platform, _measurer, _registry) = platform(LayoutRect::new(0.0, 100.0, 300.0, 48.0));
        let component = MultiSelectDropdownProps::new(frameworks(), "Frameworks").mount(platform);
        component.press_trigger();

        let json = serde_json::to_value(component.render()).unwrap();
        assert_eq!(json["trigger"]["isPlaceholder"], true);
        assert_eq!(json["panel"]["selectAll"]["label"], "Select All");
        assert!(json["panel"]["scrollEnabled"].is_boolean());
    }
}
