//! Component props
//!
//! Builder-style prop structs for the two dropdown components. Optional
//! props fall back to a [`DropdownConfig`], which can itself be loaded from
//! JSON and shared by every dropdown in an app.

use std::sync::Arc;

use dropdown_state::config::DropdownConfig;
use dropdown_state::dropdown::SelectCallback;
use dropdown_state::lifecycle::PlatformContext;
use dropdown_state::multi_select::MultiSelectCallback;
use dropdown_state::option::{OptionItem, OptionSet};

use crate::component::{DropdownComponent, MultiSelectDropdownComponent};

/// Props for a single-select dropdown
#[derive(Clone)]
pub struct DropdownProps {
    /// Options to choose from
    pub data: OptionSet,
    /// Trigger text when nothing is selected
    pub placeholder: String,
    /// Caller-owned selected value (makes the component controlled)
    pub value: Option<String>,
    /// Initial value for an uncontrolled component
    pub default_value: Option<String>,
    /// Ignore trigger presses
    pub disabled: bool,
    /// Panel height override
    pub max_height: Option<f32>,
    /// Closed-state icon override
    pub icon_name: Option<String>,
    /// Defaults for everything not overridden
    pub config: DropdownConfig,
    /// Called with the chosen item
    pub on_change: Option<SelectCallback>,
}

impl DropdownProps {
    /// Create props with the required fields
    pub fn new(data: impl Into<OptionSet>, placeholder: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            placeholder: placeholder.into(),
            value: None,
            default_value: None,
            disabled: false,
            max_height: None,
            icon_name: None,
            config: DropdownConfig::single_select(),
            on_change: None,
        }
    }

    /// Control the selected value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Seed an uncontrolled selection
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Override the panel height
    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Override the closed-state icon
    pub fn with_icon_name(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = Some(icon_name.into());
        self
    }

    /// Use a shared configuration
    pub fn with_config(mut self, config: DropdownConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the change callback
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&OptionItem) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    /// Configuration with the prop overrides applied
    pub fn resolved_config(&self) -> DropdownConfig {
        let mut config = self.config.clone();
        if let Some(max_height) = self.max_height {
            config = config.with_max_height(max_height);
        }
        if let Some(icon_name) = &self.icon_name {
            config = config.with_icon_name(icon_name.clone());
        }
        config
    }

    /// Mount a component on `platform`
    pub fn mount(self, platform: PlatformContext) -> DropdownComponent {
        DropdownComponent::mount(self, platform)
    }
}

impl std::fmt::Debug for DropdownProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownProps")
            .field("data", &self.data)
            .field("placeholder", &self.placeholder)
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("disabled", &self.disabled)
            .field("max_height", &self.max_height)
            .field("icon_name", &self.icon_name)
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

/// Props for a multi-select dropdown
#[derive(Clone)]
pub struct MultiSelectDropdownProps {
    /// Options to choose from
    pub data: OptionSet,
    /// Trigger text when nothing is selected
    pub placeholder: String,
    /// Caller-owned selection (makes the component controlled)
    pub value: Option<Vec<OptionItem>>,
    /// Initial selection for an uncontrolled component
    pub default_value: Vec<OptionItem>,
    /// Ignore trigger presses
    pub disabled: bool,
    /// Panel height override
    pub max_height: Option<f32>,
    /// Search box override
    pub searchable: Option<bool>,
    /// Label separator override
    pub separator: Option<String>,
    /// Closed-state icon override
    pub icon_name: Option<String>,
    /// Defaults for everything not overridden
    pub config: DropdownConfig,
    /// Called with the full next selection
    pub on_change: Option<MultiSelectCallback>,
}

impl MultiSelectDropdownProps {
    /// Create props with the required fields
    pub fn new(data: impl Into<OptionSet>, placeholder: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            placeholder: placeholder.into(),
            value: None,
            default_value: Vec::new(),
            disabled: false,
            max_height: None,
            searchable: None,
            separator: None,
            icon_name: None,
            config: DropdownConfig::multi_select(),
            on_change: None,
        }
    }

    /// Control the selection
    pub fn with_value(mut self, value: Vec<OptionItem>) -> Self {
        self.value = Some(value);
        self
    }

    /// Seed an uncontrolled selection
    pub fn with_default_value(mut self, value: Vec<OptionItem>) -> Self {
        self.default_value = value;
        self
    }

    /// Set disabled state
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Override the panel height
    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Show or hide the search box
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = Some(searchable);
        self
    }

    /// Override the label separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Override the closed-state icon
    pub fn with_icon_name(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = Some(icon_name.into());
        self
    }

    /// Use a shared configuration
    pub fn with_config(mut self, config: DropdownConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the change callback
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&[OptionItem]) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    /// Configuration with the prop overrides applied
    pub fn resolved_config(&self) -> DropdownConfig {
        let mut config = self.config.clone();
        if let Some(max_height) = self.max_height {
            config = config.with_max_height(max_height);
        }
        if let Some(searchable) = self.searchable {
            config = config.with_searchable(searchable);
        }
        if let Some(separator) = &self.separator {
            config = config.with_separator(separator.clone());
        }
        if let Some(icon_name) = &self.icon_name {
            config = config.with_icon_name(icon_name.clone());
        }
        config
    }

    /// Mount a component on `platform`
    pub fn mount(self, platform: PlatformContext) -> MultiSelectDropdownComponent {
        MultiSelectDropdownComponent::mount(self, platform)
    }
}

impl std::fmt::Debug for MultiSelectDropdownProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSelectDropdownProps")
            .field("data", &self.data)
            .field("placeholder", &self.placeholder)
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("disabled", &self.disabled)
            .field("searchable", &self.searchable)
            .field("separator", &self.separator)
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}
