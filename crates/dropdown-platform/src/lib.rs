//! Host platform seams for the dropdown widgets
//!
//! This crate models the two asynchronous boundaries a dropdown overlay
//! depends on:
//!
//! - [`layout`] - window metrics and the "measure my on-screen position" query,
//!   answered through a completion callback
//! - [`back_handler`] - the hardware back-navigation channel, exposed as a
//!   subscribe/unsubscribe registry with scoped subscriptions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod back_handler;
pub mod layout;

pub use back_handler::{
    run_back_pump, BackHandlerRegistry, BackPress, BackSubscription, HardwareBackPress,
    PumpSummary, RegistryStats,
};
pub use layout::{
    DeferredMeasurer, LayoutMeasurer, LayoutRect, MeasureCallback, MeasureError, WindowMetrics,
};
