//! Folio Core
//!
//! Foundational primitives shared by the section-navigation crates:
//!
//! - **Input Events**: Wheel, touch, keyboard and resize events with a
//!   window-level dispatcher that hands out removable listener registrations
//! - **State Transitions**: A small trait for enum-based state machines
//! - **Modal Gate**: A shared flag that blocks gesture input while an overlay is open
//! - **Time**: Millisecond timestamps and injectable clocks
//!
//! # Example
//!
//! ```rust
//! use folio_core::events::{event_types, Event, EventDispatcher};
//! use folio_core::time::Timestamp;
//!
//! let mut window = EventDispatcher::new();
//! let id = window.register(event_types::WHEEL, |event| event.prevent_default());
//!
//! let mut wheel = Event::wheel(0.0, 120.0, Timestamp::from_millis(0));
//! window.dispatch(&mut wheel);
//! assert!(wheel.default_prevented);
//!
//! assert!(window.unregister(id));
//! ```

pub mod events;
pub mod fsm;
pub mod modal;
pub mod time;

pub use events::{Event, EventData, EventDispatcher, EventType, KeyCode, ListenerId};
pub use fsm::StateTransitions;
pub use modal::{ModalGate, ModalScope};
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
