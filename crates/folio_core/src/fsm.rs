//! Enum-based state machines
//!
//! State types implement [`StateTransitions`] to map `(state, event)` pairs to
//! the next state. Events without a matching transition leave the state as is.
//!
//! ```rust
//! use folio_core::fsm::{EventId, StateTransitions};
//!
//! const OPEN: EventId = 1;
//! const CLOSE: EventId = 2;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Door {
//!     Closed,
//!     Open,
//! }
//!
//! impl StateTransitions for Door {
//!     fn on_event(&self, event: EventId) -> Option<Self> {
//!         match (self, event) {
//!             (Door::Closed, OPEN) => Some(Door::Open),
//!             (Door::Open, CLOSE) => Some(Door::Closed),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut door = Door::Closed;
//! assert!(door.apply(OPEN));
//! assert!(!door.apply(OPEN));
//! assert_eq!(door, Door::Open);
//! ```

use std::hash::Hash;

/// Identifier for a state machine event
pub type EventId = u32;

/// Trait for state types that handle event transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;

    /// Apply an event in place. Returns true if the state changed.
    fn apply(&mut self, event: EventId) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                tracing::trace!(from = ?*self, to = ?next, event, "state transition");
                *self = next;
                true
            }
            _ => false,
        }
    }
}
