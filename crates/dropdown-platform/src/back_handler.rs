//! Hardware back-navigation handling
//!
//! Handlers are registered against a shared [`BackHandlerRegistry`] and stay
//! registered for exactly as long as their [`BackSubscription`] lives. The
//! most recently registered handler sees a back press first; the first one
//! that reports [`BackPress::Handled`] stops propagation.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;

/// Outcome of offering a back press to a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackPress {
    /// The press was consumed; stop propagation
    Handled,
    /// The press was not consumed; offer it to the next handler
    Unhandled,
}

impl BackPress {
    /// Whether the press was consumed
    pub fn is_handled(&self) -> bool {
        matches!(self, BackPress::Handled)
    }
}

impl From<bool> for BackPress {
    fn from(handled: bool) -> Self {
        if handled {
            BackPress::Handled
        } else {
            BackPress::Unhandled
        }
    }
}

/// A hardware back press delivered by the host's event loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardwareBackPress;

/// Registration counters, used to detect leaked or doubled handlers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Total handlers ever registered
    pub registrations: u64,
    /// Total handlers ever deregistered
    pub deregistrations: u64,
}

impl RegistryStats {
    /// Handlers currently registered
    pub fn outstanding(&self) -> u64 {
        self.registrations - self.deregistrations
    }
}

type Handler = Arc<dyn Fn() -> BackPress + Send + Sync>;

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
    stats: RegistryStats,
}

impl RegistryInner {
    fn contains(&self, id: u64) -> bool {
        self.handlers.iter().any(|(handler_id, _)| *handler_id == id)
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        let removed = self.handlers.len() != before;
        if removed {
            self.stats.deregistrations += 1;
        }
        removed
    }
}

/// Registry of back-navigation handlers
///
/// Cloning yields another handle to the same registry.
///
/// # Example
///
/// ```rust
/// use dropdown_platform::back_handler::{BackHandlerRegistry, BackPress};
///
/// let registry = BackHandlerRegistry::new();
/// assert_eq!(registry.dispatch(), BackPress::Unhandled);
///
/// let subscription = registry.subscribe(|| BackPress::Handled);
/// assert_eq!(registry.dispatch(), BackPress::Handled);
///
/// drop(subscription);
/// assert_eq!(registry.active_handlers(), 0);
/// ```
#[derive(Clone, Default)]
pub struct BackHandlerRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl BackHandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; it stays registered while the subscription lives
    pub fn subscribe<F>(&self, handler: F) -> BackSubscription
    where
        F: Fn() -> BackPress + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.handlers.push((id, Arc::new(handler)));
        inner.stats.registrations += 1;
        tracing::debug!(id, active = inner.handlers.len(), "Back handler registered");

        BackSubscription {
            id,
            registry: Arc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Offer a back press to the registered handlers, newest first
    ///
    /// Handlers run without the registry lock held, so a handler may drop
    /// its own subscription while running. A handler deregistered by an
    /// earlier handler in the same dispatch is skipped.
    pub fn dispatch(&self) -> BackPress {
        let handlers: Vec<(u64, Handler)> = {
            let inner = self.inner.lock();
            inner
                .handlers
                .iter()
                .rev()
                .map(|(id, handler)| (*id, handler.clone()))
                .collect()
        };

        for (id, handler) in handlers {
            if !self.inner.lock().contains(id) {
                tracing::trace!(id, "Skipping back handler removed during dispatch");
                continue;
            }
            if handler().is_handled() {
                return BackPress::Handled;
            }
        }
        BackPress::Unhandled
    }

    /// Number of handlers currently registered
    pub fn active_handlers(&self) -> usize {
        self.inner.lock().handlers.len()
    }

    /// Registration counters
    pub fn stats(&self) -> RegistryStats {
        self.inner.lock().stats
    }
}

impl std::fmt::Debug for BackHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BackHandlerRegistry")
            .field("active", &inner.handlers.len())
            .field("stats", &inner.stats)
            .finish()
    }
}

/// Scoped registration of a back handler
///
/// Dropping the subscription deregisters the handler. Deregistration happens
/// at most once, however the subscription is released.
#[must_use = "dropping the subscription deregisters the handler immediately"]
pub struct BackSubscription {
    id: u64,
    registry: Weak<Mutex<RegistryInner>>,
    active: bool,
}

impl BackSubscription {
    /// Identifier of the registered handler
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the handler is still registered
    pub fn is_active(&self) -> bool {
        self.active && self.registry.strong_count() > 0
    }

    /// Deregister the handler now
    pub fn remove(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            let mut inner = registry.lock();
            if inner.remove(self.id) {
                tracing::debug!(id = self.id, active = inner.handlers.len(), "Back handler removed");
            }
        }
    }
}

impl Drop for BackSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for BackSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackSubscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

/// Summary returned when the back-event pump stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpSummary {
    /// Presses consumed by a registered handler
    pub handled: u64,
    /// Presses no handler consumed
    pub unhandled: u64,
}

/// Forward hardware back presses from the host's event channel
///
/// Runs until every sender is dropped. `on_unhandled` is invoked for each
/// press no handler consumed, so the host can run its default action
/// (pop a screen, exit the app).
pub async fn run_back_pump<F>(
    registry: BackHandlerRegistry,
    mut events: mpsc::Receiver<HardwareBackPress>,
    mut on_unhandled: F,
) -> PumpSummary
where
    F: FnMut(),
{
    let mut summary = PumpSummary::default();

    while let Some(HardwareBackPress) = events.recv().await {
        match registry.dispatch() {
            BackPress::Handled => summary.handled += 1,
            BackPress::Unhandled => {
                summary.unhandled += 1;
                on_unhandled();
            }
        }
    }

    tracing::debug!(
        handled = summary.handled,
        unhandled = summary.unhandled,
        "Back event channel closed"
    );
    summary
}
