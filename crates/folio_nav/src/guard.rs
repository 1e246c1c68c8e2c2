//! Cooldown guard shared by every navigation input
//!
//! Two gates must both be open before a transition is accepted:
//!
//! - **Spacing**: more than `cooldown` must have passed since the previous
//!   accepted transition started.
//! - **Lock**: the guard must be `Idle`. Accepting moves it to `Cooling`, and it
//!   returns to `Idle` once `settle` has elapsed.
//!
//! The settle deadline is checked whenever the guard is consulted or ticked, so
//! no timer thread is involved. Events arriving while a gate is closed are
//! dropped, never queued.

use std::time::Duration;

use folio_core::fsm::{EventId, StateTransitions};
use folio_core::time::Timestamp;

use crate::config::NavConfig;

/// Events driving [`GuardState`]
pub mod guard_events {
    use folio_core::fsm::EventId;

    pub const ACCEPT: EventId = 1;
    pub const SETTLED: EventId = 2;
    pub const RESET: EventId = 3;
}

/// Whether a transition may start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GuardState {
    #[default]
    Idle,
    /// A transition was accepted and its animation lock is held
    Cooling,
}

impl StateTransitions for GuardState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use guard_events::*;
        match (self, event) {
            (GuardState::Idle, ACCEPT) => Some(GuardState::Cooling),
            (GuardState::Cooling, SETTLED) => Some(GuardState::Idle),
            (GuardState::Cooling, RESET) => Some(GuardState::Idle),
            _ => None,
        }
    }
}

/// Shared cooldown state for wheel, touch, keyboard and direct requests
#[derive(Debug, Clone)]
pub struct ScrollGuard {
    state: GuardState,
    last_transition: Option<Timestamp>,
    settle_at: Option<Timestamp>,
    cooldown: Duration,
    settle: Duration,
}

impl ScrollGuard {
    pub fn new(cooldown: Duration, settle: Duration) -> Self {
        Self {
            state: GuardState::Idle,
            last_transition: None,
            settle_at: None,
            cooldown,
            settle,
        }
    }

    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(config.cooldown(), config.settle())
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_transitioning(&self) -> bool {
        self.state == GuardState::Cooling
    }

    /// Start time of the most recent accepted transition
    pub fn last_transition(&self) -> Option<Timestamp> {
        self.last_transition
    }

    /// Release the animation lock if its deadline has passed
    ///
    /// Returns true if the guard went back to `Idle`.
    pub fn settle(&mut self, now: Timestamp) -> bool {
        match self.settle_at {
            Some(deadline) if now >= deadline => {
                self.settle_at = None;
                self.state.apply(guard_events::SETTLED)
            }
            _ => false,
        }
    }

    /// Would a transition be accepted at `now`?
    pub fn is_open(&self, now: Timestamp) -> bool {
        let locked = match self.settle_at {
            Some(deadline) => now < deadline,
            None => self.is_transitioning(),
        };
        let spaced = self
            .last_transition
            .map_or(true, |last| now.since(last) > self.cooldown);
        !locked && spaced
    }

    /// Accept a transition at `now` if both gates are open
    pub fn try_acquire(&mut self, now: Timestamp) -> bool {
        self.settle(now);
        if !self.is_open(now) {
            return false;
        }
        self.last_transition = Some(now);
        self.settle_at = Some(now + self.settle);
        self.state.apply(guard_events::ACCEPT);
        true
    }

    /// Drop any pending lock and forget the last transition
    pub fn reset(&mut self) {
        self.settle_at = None;
        self.last_transition = None;
        self.state.apply(guard_events::RESET);
    }
}
