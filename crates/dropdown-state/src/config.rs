//! Dropdown configuration
//!
//! Defaults for the optional widget props, loadable from JSON so a host app
//! can ship one configuration for every dropdown it mounts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default panel height for single-select dropdowns
pub const DEFAULT_MAX_HEIGHT: f32 = 250.0;

/// Default panel height for multi-select dropdowns (room for the search box)
pub const DEFAULT_MULTI_MAX_HEIGHT: f32 = 350.0;

/// Option count above which the list scrolls
pub const DEFAULT_SCROLL_THRESHOLD: usize = 6;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Panel height must be a positive, finite number
    #[error("Invalid max height: {0}")]
    InvalidMaxHeight(f32),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Shared settings for dropdown widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownConfig {
    /// Maximum height of the option panel
    ///
    /// `None` leaves it to the widget kind: [`DEFAULT_MAX_HEIGHT`] for
    /// single-select, [`DEFAULT_MULTI_MAX_HEIGHT`] for multi-select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f32>,

    /// Joins selected labels on a collapsed multi-select trigger
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Trigger icon while closed
    #[serde(default = "default_icon_name")]
    pub icon_name: String,

    /// Trigger icon while open
    #[serde(default = "default_expanded_icon_name")]
    pub expanded_icon_name: String,

    /// The list scrolls only with more options than this
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: usize,

    /// Placeholder of the search box
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,

    /// Label of the select-all row
    #[serde(default = "default_select_all_label")]
    pub select_all_label: String,

    /// Show the search box on multi-select panels
    #[serde(default = "default_true")]
    pub searchable: bool,
}

fn default_separator() -> String {
    ", ".to_string()
}

fn default_icon_name() -> String {
    "expand-more".to_string()
}

fn default_expanded_icon_name() -> String {
    "expand-less".to_string()
}

fn default_scroll_threshold() -> usize {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_search_placeholder() -> String {
    "Search...".to_string()
}

fn default_select_all_label() -> String {
    "Select All".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self::single_select()
    }
}

impl DropdownConfig {
    /// Defaults for a single-select dropdown
    pub fn single_select() -> Self {
        Self {
            max_height: Some(DEFAULT_MAX_HEIGHT),
            separator: default_separator(),
            icon_name: default_icon_name(),
            expanded_icon_name: default_expanded_icon_name(),
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            search_placeholder: default_search_placeholder(),
            select_all_label: default_select_all_label(),
            searchable: true,
        }
    }

    /// Defaults for a multi-select dropdown
    pub fn multi_select() -> Self {
        Self {
            max_height: Some(DEFAULT_MULTI_MAX_HEIGHT),
            ..Self::single_select()
        }
    }

    /// Parse and validate a JSON configuration
    ///
    /// A missing `maxHeight` stays unset, so one shared configuration
    /// keeps the per-kind panel heights.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dropdown_state::config::DropdownConfig;
    ///
    /// let config = DropdownConfig::from_json(r#"{"maxHeight": 300, "separator": " / "}"#).unwrap();
    /// assert_eq!(config.max_height, Some(300.0));
    /// assert_eq!(config.icon_name, "expand-more");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DropdownConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if let Some(max_height) = self.max_height {
            if !max_height.is_finite() || max_height <= 0.0 {
                return Err(ConfigError::InvalidMaxHeight(max_height));
            }
        }
        Ok(())
    }

    /// Panel height, falling back to the widget kind's `default`
    pub fn max_height_or(&self, default: f32) -> f32 {
        self.max_height.unwrap_or(default)
    }

    /// Override the panel height
    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Override the label separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Override the closed-state icon
    pub fn with_icon_name(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = icon_name.into();
        self
    }

    /// Enable or disable the search box
    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Whether a list of `option_count` rows scrolls
    pub fn scroll_enabled(&self, option_count: usize) -> bool {
        option_count > self.scroll_threshold
    }
}
