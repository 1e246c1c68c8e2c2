//! Window-level input events
//!
//! Raw wheel, touch, keyboard and resize input is normalized into [`Event`]
//! values and fanned out by an [`EventDispatcher`]. Registrations return a
//! [`ListenerId`] so that owners can remove exactly the handlers they added.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::time::Timestamp;

/// Event type identifier
pub type EventType = u32;

/// Event types delivered at window level
pub mod event_types {
    use super::EventType;

    /// Mouse wheel or trackpad scroll
    pub const WHEEL: EventType = 1;
    /// A finger touched the screen
    pub const TOUCH_START: EventType = 2;
    /// A finger left the screen
    pub const TOUCH_END: EventType = 3;
    pub const KEY_DOWN: EventType = 10;
    pub const RESIZE: EventType = 20;
}

/// An input event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub timestamp: Timestamp,
    /// Set by a handler that consumed the event's native behavior
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Wheel {
        delta_x: f32,
        /// Positive values scroll down
        delta_y: f32,
    },
    Touch {
        /// Screen-space x of the changed touch point
        screen_x: f32,
        screen_y: f32,
    },
    Key {
        key: KeyCode,
    },
    Resize {
        width: u32,
        height: u32,
    },
    None,
}

impl Event {
    fn new(event_type: EventType, data: EventData, timestamp: Timestamp) -> Self {
        Self {
            event_type,
            data,
            timestamp,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn wheel(delta_x: f32, delta_y: f32, timestamp: Timestamp) -> Self {
        Self::new(
            event_types::WHEEL,
            EventData::Wheel { delta_x, delta_y },
            timestamp,
        )
    }

    pub fn touch_start(screen_x: f32, screen_y: f32, timestamp: Timestamp) -> Self {
        Self::new(
            event_types::TOUCH_START,
            EventData::Touch { screen_x, screen_y },
            timestamp,
        )
    }

    pub fn touch_end(screen_x: f32, screen_y: f32, timestamp: Timestamp) -> Self {
        Self::new(
            event_types::TOUCH_END,
            EventData::Touch { screen_x, screen_y },
            timestamp,
        )
    }

    pub fn key_down(key: KeyCode, timestamp: Timestamp) -> Self {
        Self::new(
            event_types::KEY_DOWN,
            EventData::Key { key },
            timestamp,
        )
    }

    pub fn resize(width: u32, height: u32, timestamp: Timestamp) -> Self {
        Self::new(
            event_types::RESIZE,
            EventData::Resize { width, height },
            timestamp,
        )
    }

    /// Suppress the platform's default handling of this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    // Navigation keys
    pub const HOME: KeyCode = KeyCode(0x24);
    pub const END: KeyCode = KeyCode(0x23);
    pub const PAGE_UP: KeyCode = KeyCode(0x21);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x22);

    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Map a DOM `KeyboardEvent.key` name to a key code
    ///
    /// Unrecognized names map to [`KeyCode::UNKNOWN`].
    pub fn from_dom_key(name: &str) -> KeyCode {
        match name {
            "ArrowLeft" => KeyCode::LEFT,
            "ArrowRight" => KeyCode::RIGHT,
            "ArrowUp" => KeyCode::UP,
            "ArrowDown" => KeyCode::DOWN,
            "Home" => KeyCode::HOME,
            "End" => KeyCode::END,
            "PageUp" => KeyCode::PAGE_UP,
            "PageDown" => KeyCode::PAGE_DOWN,
            "Tab" => KeyCode::TAB,
            "Enter" => KeyCode::ENTER,
            "Escape" => KeyCode::ESCAPE,
            " " => KeyCode::SPACE,
            _ => KeyCode::UNKNOWN,
        }
    }
}

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerId;
}

/// Event handler function type
pub type EventHandler = Box<dyn FnMut(&mut Event) + Send>;

struct Listener {
    event_type: EventType,
    handler: EventHandler,
}

/// Window-level event dispatcher
///
/// Handlers for one event type run in registration order. A handler may stop
/// propagation to skip the remaining handlers for that event.
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    by_type: FxHashMap<EventType, SmallVec<[ListenerId; 4]>>,
}

/// Dispatcher shared between the platform layer and attached controllers
pub type SharedDispatcher = Arc<Mutex<EventDispatcher>>;

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            by_type: FxHashMap::default(),
        }
    }

    /// Create a dispatcher wrapped for sharing
    pub fn shared() -> SharedDispatcher {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Register a handler for an event type
    pub fn register<F>(&mut self, event_type: EventType, handler: F) -> ListenerId
    where
        F: FnMut(&mut Event) + Send + 'static,
    {
        let id = self.listeners.insert(Listener {
            event_type,
            handler: Box::new(handler),
        });
        self.by_type.entry(event_type).or_default().push(id);
        id
    }

    /// Remove a handler. Returns false if it was already removed.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_type.get_mut(&listener.event_type) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_type.remove(&listener.event_type);
            }
        }
        true
    }

    /// Dispatch an event to every handler registered for its type
    pub fn dispatch(&mut self, event: &mut Event) {
        let Some(ids) = self.by_type.get(&event.event_type).cloned() else {
            return;
        };
        for id in ids {
            if event.propagation_stopped {
                break;
            }
            if let Some(listener) = self.listeners.get_mut(id) {
                (listener.handler)(event);
            }
        }
    }

    /// Total number of live registrations
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of live registrations for one event type
    pub fn listener_count_for(&self, event_type: EventType) -> usize {
        self.by_type.get(&event_type).map_or(0, |ids| ids.len())
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_dispatch_reaches_matching_type_only() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut window = EventDispatcher::new();

        let counter = hits.clone();
        window.register(event_types::KEY_DOWN, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut wheel = Event::wheel(0.0, 10.0, Timestamp::zero());
        window.dispatch(&mut wheel);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let mut key = Event::key_down(KeyCode::RIGHT, Timestamp::zero());
        window.dispatch(&mut key);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_removes_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut window = EventDispatcher::new();

        let counter = hits.clone();
        let id = window.register(event_types::WHEEL, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(window.listener_count_for(event_types::WHEEL), 1);

        assert!(window.unregister(id));
        assert!(!window.unregister(id));
        assert_eq!(window.listener_count(), 0);
        assert_eq!(window.listener_count_for(event_types::WHEEL), 0);

        let mut wheel = Event::wheel(0.0, 10.0, Timestamp::zero());
        window.dispatch(&mut wheel);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stop_propagation_skips_later_handlers() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut window = EventDispatcher::new();

        window.register(event_types::WHEEL, |event| {
            event.prevent_default();
            event.stop_propagation();
        });
        let counter = hits.clone();
        window.register(event_types::WHEEL, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut wheel = Event::wheel(0.0, 10.0, Timestamp::zero());
        window.dispatch(&mut wheel);
        assert!(wheel.default_prevented);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dom_key_names() {
        assert_eq!(KeyCode::from_dom_key("ArrowRight"), KeyCode::RIGHT);
        assert_eq!(KeyCode::from_dom_key("ArrowLeft"), KeyCode::LEFT);
        assert_eq!(KeyCode::from_dom_key("q"), KeyCode::UNKNOWN);
    }

    #[test]
    fn test_key_down_carries_key_only() {
        let event = Event::key_down(KeyCode::LEFT, Timestamp::from_millis(7));
        assert_eq!(event.event_type, event_types::KEY_DOWN);
        assert!(matches!(event.data, EventData::Key { key } if key == KeyCode::LEFT));
        assert_eq!(event.timestamp, Timestamp::from_millis(7));
    }
}
