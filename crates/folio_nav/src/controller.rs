//! Section controller and its window attachment
//!
//! A [`SectionController`] shares one [`SectionNavigator`] between the
//! window-level listeners it registers and the code that renders the strip.
//!
//! # Locking
//!
//! The dispatcher lock is held while listeners run, and each listener takes the
//! navigator lock. Do not dispatch from inside [`SectionController::with`], and
//! do not drop an [`Attachment`] from inside a listener.
//!
//! # Timing
//!
//! Every cooldown and settle decision is made on the controller's clock.
//! Attached listeners restamp each event with `clock.now()` before handing it
//! to the navigator, so window events and direct requests share one timeline.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use smallvec::SmallVec;

use folio_core::events::{event_types, EventDispatcher, EventType, ListenerId, SharedDispatcher};
use folio_core::modal::ModalGate;
use folio_core::time::{Clock, SystemClock, Timestamp};

use crate::arbiter::InputOutcome;
use crate::config::NavConfig;
use crate::error::Result;
use crate::navigator::SectionNavigator;
use crate::section::SectionCollection;
use crate::viewport::ViewportMetrics;

/// Window events a controller listens to
const LISTENED: [EventType; 5] = [
    event_types::WHEEL,
    event_types::TOUCH_START,
    event_types::TOUCH_END,
    event_types::KEY_DOWN,
    event_types::RESIZE,
];

/// Shared handle to a navigator plus the clock used for direct requests
pub struct SectionController<S> {
    navigator: Arc<Mutex<SectionNavigator<S>>>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for SectionController<S> {
    fn clone(&self) -> Self {
        Self {
            navigator: Arc::clone(&self.navigator),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: Send + 'static> SectionController<S> {
    /// Controller on the wall clock
    pub fn new(sections: SectionCollection<S>, config: &NavConfig, modal: ModalGate) -> Result<Self> {
        Self::with_clock(sections, config, modal, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(
        sections: SectionCollection<S>,
        config: &NavConfig,
        modal: ModalGate,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let navigator = SectionNavigator::new(sections, config, modal)?;
        Ok(Self::from_navigator(navigator, clock))
    }

    /// Wrap an already configured navigator
    pub fn from_navigator(navigator: SectionNavigator<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            navigator: Arc::new(Mutex::new(navigator)),
            clock,
        }
    }

    /// Register input and resize listeners on `window`
    ///
    /// Listeners stay registered until the returned [`Attachment`] is detached
    /// or dropped. Each event is restamped with the controller's clock.
    pub fn attach(&self, window: &SharedDispatcher) -> Attachment {
        let mut dispatcher = window.lock();
        let listeners: SmallVec<[ListenerId; 5]> = LISTENED
            .iter()
            .map(|&event_type| {
                let navigator = Arc::clone(&self.navigator);
                let clock = Arc::clone(&self.clock);
                dispatcher.register(event_type, move |event| {
                    event.timestamp = clock.now();
                    navigator.lock().handle_event(event);
                })
            })
            .collect();
        tracing::debug!(listeners = listeners.len(), "section controller attached");

        Attachment {
            window: Arc::downgrade(window),
            listeners,
        }
    }

    /// Current time on the controller's clock
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Direct navigation at the controller's current time
    pub fn navigate_to(&self, index: usize) -> InputOutcome {
        let now = self.clock.now();
        self.navigator.lock().navigate_to(index, now)
    }

    /// Advance the settle lock and strip animation by one frame
    pub fn tick(&self, dt: Duration) -> bool {
        let now = self.clock.now();
        self.navigator.lock().tick(now, dt)
    }

    pub fn active_index(&self) -> usize {
        self.navigator.lock().active_index()
    }

    pub fn rendered_offset(&self) -> f32 {
        self.navigator.lock().rendered_offset()
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.navigator.lock().metrics()
    }

    /// Run `f` with the navigator locked
    pub fn with<R>(&self, f: impl FnOnce(&mut SectionNavigator<S>) -> R) -> R {
        f(&mut *self.navigator.lock())
    }
}

/// Live listener registrations on a window dispatcher
///
/// Dropping the attachment deregisters every listener.
#[must_use = "dropping an Attachment detaches the controller immediately"]
pub struct Attachment {
    window: Weak<Mutex<EventDispatcher>>,
    listeners: SmallVec<[ListenerId; 5]>,
}

impl Attachment {
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty() && self.window.strong_count() > 0
    }

    /// Remove every listener this attachment registered
    pub fn detach(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let Some(window) = self.window.upgrade() else {
            self.listeners.clear();
            return;
        };
        let mut dispatcher = window.lock();
        let removed = self
            .listeners
            .drain(..)
            .filter(|id| dispatcher.unregister(*id))
            .count();
        tracing::debug!(listeners = removed, "section controller detached");
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("listeners", &self.listeners.len())
            .field("attached", &self.is_attached())
            .finish()
    }
}
