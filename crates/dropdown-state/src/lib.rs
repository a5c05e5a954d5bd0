//! Dropdown state engines
//!
//! Headless state for single-select and multi-select dropdowns. The
//! rendering layer owns nothing but these engines and draws from their
//! snapshots.
//!
//! # Modules
//!
//! - [`option`] - option items and shared option sets
//! - [`geometry`] - panel placement above or below the trigger
//! - [`overlay`] - open/close lifecycle, measurement tickets, back handling
//! - [`selection`] - controlled and uncontrolled selection values
//! - [`filter`] - memoized label search
//! - [`config`] - presentation defaults and JSON configuration
//! - [`dropdown`] / [`multi_select`] - the two widget engines

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dropdown;
pub mod filter;
pub mod geometry;
pub mod lifecycle;
pub mod multi_select;
pub mod option;
pub mod overlay;
pub mod selection;

pub use config::{ConfigError, DropdownConfig};
pub use dropdown::{Dropdown, DropdownSnapshot, SelectCallback};
pub use filter::{filter_options, FilteredOptions};
pub use geometry::{resolve_geometry, Direction, GeometrySnapshot};
pub use lifecycle::PlatformContext;
pub use multi_select::{MultiSelectCallback, MultiSelectDropdown, MultiSelectSnapshot};
pub use option::{OptionItem, OptionRow, OptionSet};
pub use overlay::{CloseReason, MeasureTicket, OverlayController, OverlayPhase};
pub use selection::{MultiSelection, Ownership, SingleSelection};
