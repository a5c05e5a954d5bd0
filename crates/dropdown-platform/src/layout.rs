//! Layout measurement
//!
//! The host answers "where is this element on screen" asynchronously, after
//! the current paint. Measurement is therefore expressed as a one-shot
//! completion callback rather than a return value.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layout measurement errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// The element is not mounted in the view hierarchy
    #[error("Element is not mounted")]
    NotMounted,

    /// The host could not answer the query
    #[error("Measurement unavailable: {0}")]
    Unavailable(String),
}

/// Result type for layout measurement
pub type Result<T> = std::result::Result<T, MeasureError>;

/// Window-relative rectangle of a measured element
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl LayoutRect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Y coordinate of the bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Size of the application window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowMetrics {
    /// Window width
    pub width: f32,
    /// Window height
    pub height: f32,
}

impl WindowMetrics {
    /// Create window metrics
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for WindowMetrics {
    fn default() -> Self {
        // Common phone portrait viewport
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

/// Completion callback for a measurement request
pub type MeasureCallback = Box<dyn FnOnce(Result<LayoutRect>) + Send>;

/// Source of on-screen geometry for a single element (usually a trigger)
///
/// Implementations may call `done` before returning or at any later point.
/// Each request must be answered at most once.
pub trait LayoutMeasurer: Send + Sync {
    /// Measure the element relative to the window
    fn measure_in_window(&self, done: MeasureCallback);
}

#[derive(Default)]
struct DeferredState {
    rect: Option<LayoutRect>,
    pending: Vec<MeasureCallback>,
}

/// Measurer that answers queued requests when the host flushes layout
///
/// Requests are held until [`DeferredMeasurer::flush`] runs, mirroring a
/// platform that answers measurement after the next paint. With no
/// rectangle set the element counts as unmounted.
///
/// # Example
///
/// ```rust
/// use dropdown_platform::layout::{DeferredMeasurer, LayoutMeasurer, LayoutRect};
/// use std::sync::{Arc, Mutex};
///
/// let measurer = DeferredMeasurer::new();
/// measurer.set_rect(Some(LayoutRect::new(10.0, 100.0, 200.0, 50.0)));
///
/// let seen = Arc::new(Mutex::new(None));
/// let slot = seen.clone();
/// measurer.measure_in_window(Box::new(move |rect| {
///     *slot.lock().unwrap() = Some(rect);
/// }));
///
/// assert!(seen.lock().unwrap().is_none());
/// assert_eq!(measurer.flush(), 1);
/// assert!(seen.lock().unwrap().is_some());
/// ```
#[derive(Default)]
pub struct DeferredMeasurer {
    state: Mutex<DeferredState>,
}

impl DeferredMeasurer {
    /// Create a measurer for an unmounted element
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a measurer for an element already laid out at `rect`
    pub fn with_rect(rect: LayoutRect) -> Self {
        let measurer = Self::new();
        measurer.set_rect(Some(rect));
        measurer
    }

    /// Update the element's position (`None` = unmounted)
    pub fn set_rect(&self, rect: Option<LayoutRect>) {
        self.state.lock().rect = rect;
    }

    /// Number of requests waiting for a flush
    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Answer every queued request, returning how many were answered
    pub fn flush(&self) -> usize {
        let (rect, pending) = {
            let mut state = self.state.lock();
            (state.rect, std::mem::take(&mut state.pending))
        };

        let answered = pending.len();
        for done in pending {
            done(rect.ok_or(MeasureError::NotMounted));
        }
        answered
    }
}

impl LayoutMeasurer for DeferredMeasurer {
    fn measure_in_window(&self, done: MeasureCallback) {
        self.state.lock().pending.push(done);
    }
}
