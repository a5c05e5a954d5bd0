//! Platform wiring for the open transition
//!
//! Opening a dropdown must, in the same call, register a back handler and
//! request the trigger's measurement. Both callbacks hold only a weak
//! reference to the widget state, so neither the platform registry nor a
//! slow measurement keeps an unmounted widget alive.

use parking_lot::Mutex;
use std::sync::Arc;

use dropdown_platform::back_handler::{BackHandlerRegistry, BackPress};
use dropdown_platform::layout::{LayoutMeasurer, WindowMetrics};

use crate::overlay::{CloseReason, MeasureTicket, OverlayController};

/// Platform services a mounted dropdown talks to
#[derive(Clone)]
pub struct PlatformContext {
    /// Measures the widget's trigger
    pub trigger: Arc<dyn LayoutMeasurer>,
    /// Hardware back-navigation channel
    pub back_handler: BackHandlerRegistry,
    /// Window size at mount time
    pub window: WindowMetrics,
}

impl PlatformContext {
    /// Create a platform context
    pub fn new(
        trigger: Arc<dyn LayoutMeasurer>,
        back_handler: BackHandlerRegistry,
        window: WindowMetrics,
    ) -> Self {
        Self {
            trigger,
            back_handler,
            window,
        }
    }
}

impl std::fmt::Debug for PlatformContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformContext")
            .field("back_handler", &self.back_handler)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

/// Widget state that embeds an overlay
pub(crate) trait OverlayHost: Send + 'static {
    fn overlay(&mut self) -> &mut OverlayController;
    fn max_height(&self) -> f32;
}

/// Finish a Closed -> Open transition started under `ticket`
///
/// Must be called without holding the state lock: the measurer is allowed
/// to answer synchronously.
pub(crate) fn complete_open<H: OverlayHost>(
    shared: &Arc<Mutex<H>>,
    platform: &PlatformContext,
    ticket: MeasureTicket,
) {
    let weak = Arc::downgrade(shared);
    let subscription = platform.back_handler.subscribe(move || match weak.upgrade() {
        Some(host) => BackPress::from(host.lock().overlay().close(CloseReason::BackNavigation)),
        None => BackPress::Unhandled,
    });
    shared.lock().overlay().attach_back_subscription(ticket, subscription);

    let weak = Arc::downgrade(shared);
    let screen_height = platform.window.height;
    platform.trigger.measure_in_window(Box::new(move |measured| {
        if let Some(host) = weak.upgrade() {
            let mut host = host.lock();
            let max_height = host.max_height();
            host.overlay()
                .apply_measurement(ticket, measured, max_height, screen_height);
        }
    }));
}
