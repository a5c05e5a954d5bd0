//! Overlay lifecycle
//!
//! [`OverlayController`] owns the open/closed flag and everything that must
//! exist exactly while the panel is visible: the placement snapshot and the
//! back-navigation subscription.
//!
//! ```text
//!            toggle() (not disabled)
//!   Closed ---------------------------> Open
//!     ^                                   |
//!     |  toggle / backdrop / selection /  |
//!     +---- back navigation / unmount ----+
//! ```
//!
//! Opening hands out a [`MeasureTicket`]. The measurement answer must come
//! back with that ticket; an answer for an earlier open (a rapid second
//! toggle, or a reply that arrives after close) is discarded.

use dropdown_platform::back_handler::BackSubscription;
use dropdown_platform::layout::{LayoutRect, MeasureError};

use crate::geometry::{resolve_measurement, GeometrySnapshot};

/// Overlay visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    /// Panel hidden
    #[default]
    Closed,
    /// Panel visible
    Open,
}

/// What closed the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// The trigger was pressed again
    Toggle,
    /// The backdrop outside the panel was tapped
    Backdrop,
    /// An option was chosen in single-select mode
    Selection,
    /// The hardware back button was pressed
    BackNavigation,
    /// The widget was unmounted
    Unmount,
}

/// Proof of a specific open transition, redeemed by the measurement answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureTicket {
    generation: u64,
}

impl MeasureTicket {
    /// Open transition this ticket belongs to
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Open/closed state machine for a dropdown panel
#[derive(Debug)]
pub struct OverlayController {
    phase: OverlayPhase,
    disabled: bool,
    generation: u64,
    geometry: GeometrySnapshot,
    measured: bool,
    back_subscription: Option<BackSubscription>,
    last_close: Option<CloseReason>,
}

impl OverlayController {
    /// Create a closed overlay
    pub fn new(disabled: bool) -> Self {
        Self {
            phase: OverlayPhase::Closed,
            disabled,
            generation: 0,
            geometry: GeometrySnapshot::default(),
            measured: false,
            back_subscription: None,
            last_close: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Whether the panel is visible
    pub fn is_expanded(&self) -> bool {
        self.phase == OverlayPhase::Open
    }

    /// Whether toggling is blocked
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Block or allow toggling
    ///
    /// Disabling an open overlay leaves it open; it still closes through
    /// the backdrop, back navigation, selection or unmount.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Flip between closed and open
    ///
    /// Returns a ticket only when this call opened the overlay. Does
    /// nothing at all while disabled.
    pub fn toggle(&mut self) -> Option<MeasureTicket> {
        if self.disabled {
            return None;
        }

        match self.phase {
            OverlayPhase::Open => {
                self.close(CloseReason::Toggle);
                None
            }
            OverlayPhase::Closed => self.open(),
        }
    }

    /// Open the overlay if it is closed and enabled
    pub fn open(&mut self) -> Option<MeasureTicket> {
        if self.disabled || self.is_expanded() {
            return None;
        }

        self.generation += 1;
        self.phase = OverlayPhase::Open;
        self.geometry = GeometrySnapshot::default();
        self.measured = false;
        tracing::debug!(generation = self.generation, "Overlay opened");

        Some(MeasureTicket {
            generation: self.generation,
        })
    }

    /// Close the overlay
    ///
    /// Returns `false` when it was already closed. Releases the back
    /// subscription, if any, exactly once.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_expanded() {
            return false;
        }

        self.phase = OverlayPhase::Closed;
        self.measured = false;
        self.last_close = Some(reason);
        if let Some(subscription) = self.back_subscription.take() {
            subscription.remove();
        }
        tracing::debug!(generation = self.generation, ?reason, "Overlay closed");
        true
    }

    /// Panel placement, only available while open
    pub fn geometry(&self) -> Option<GeometrySnapshot> {
        self.is_expanded().then_some(self.geometry)
    }

    /// Whether the current open has received its measurement
    pub fn is_measured(&self) -> bool {
        self.is_expanded() && self.measured
    }

    /// Why the overlay last closed
    pub fn last_close_reason(&self) -> Option<CloseReason> {
        self.last_close
    }

    /// Whether a back handler is currently held
    pub fn has_back_subscription(&self) -> bool {
        self.back_subscription.is_some()
    }

    /// Whether `ticket` belongs to the current open
    pub fn is_current(&self, ticket: MeasureTicket) -> bool {
        self.is_expanded() && ticket.generation == self.generation
    }

    /// Hold the back subscription for the open that issued `ticket`
    ///
    /// A subscription for a stale open is released immediately.
    pub fn attach_back_subscription(
        &mut self,
        ticket: MeasureTicket,
        subscription: BackSubscription,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                "Releasing back handler for an overlay that already closed"
            );
            subscription.remove();
            return false;
        }

        if let Some(previous) = self.back_subscription.replace(subscription) {
            previous.remove();
        }
        true
    }

    /// Apply a measurement answer
    ///
    /// Answers for a stale ticket, or a second answer for the current one,
    /// are ignored.
    pub fn apply_measurement(
        &mut self,
        ticket: MeasureTicket,
        measured: Result<LayoutRect, MeasureError>,
        max_height: f32,
        screen_height: f32,
    ) -> bool {
        if !self.is_current(ticket) || self.measured {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale measurement"
            );
            return false;
        }

        self.geometry = resolve_measurement(measured, max_height, screen_height);
        self.measured = true;
        true
    }
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Drop for OverlayController {
    fn drop(&mut self) {
        self.close(CloseReason::Unmount);
    }
}
