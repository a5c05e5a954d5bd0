//! Dropdown components
//!
//! The component layer on top of `dropdown-state`: props with builder
//! methods, mounted components that accept host events, and serializable
//! view trees for the host renderer.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use dropdown_platform::{BackHandlerRegistry, DeferredMeasurer, LayoutRect, WindowMetrics};
//! use dropdown_state::{OptionItem, PlatformContext};
//! use dropdown_ui::DropdownProps;
//!
//! let measurer = Arc::new(DeferredMeasurer::with_rect(LayoutRect::new(16.0, 120.0, 320.0, 48.0)));
//! let platform = PlatformContext::new(measurer.clone(), BackHandlerRegistry::new(), WindowMetrics::default());
//!
//! let data = vec![OptionItem::new("1", "React"), OptionItem::new("2", "Vue")];
//! let dropdown = DropdownProps::new(data, "Select a framework")
//!     .on_change(|item| println!("picked {}", item.label))
//!     .mount(platform);
//!
//! dropdown.press_trigger();
//! measurer.flush();
//! assert!(dropdown.render().panel.is_some());
//!
//! dropdown.press_option("2");
//! assert_eq!(dropdown.render().trigger.label, "Vue");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod component;
pub mod props;
pub mod view;

pub use component::{DropdownComponent, MultiSelectDropdownComponent};
pub use props::{DropdownProps, MultiSelectDropdownProps};
pub use view::{
    ChipView, DropdownView, MultiSelectDropdownView, OptionRowView, PanelView, SearchBoxView,
    SelectAllRowView, TriggerView,
};
