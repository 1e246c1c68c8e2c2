//! Input arbitration
//!
//! The [`InputArbiter`] is the single authority deciding whether a raw wheel,
//! touch or keyboard event changes the active section. Every decision goes
//! through the shared [`NavState`], whose [`ScrollGuard`] enforces one global
//! cooldown across all input sources.
//!
//! | Input | Scroll-boundary check | Navigates when | Suppresses default |
//! |---|---|---|---|
//! | Wheel | yes (active section) | section is at its edge in the travel direction | when navigating or dropped by cooldown |
//! | Touch | no | horizontal travel exceeds `min_swipe_px` | never |
//! | Keyboard | no | `ArrowRight` / `ArrowLeft` | never |
//!
//! While the modal gate is open every handler returns immediately without
//! touching state or suppressing anything.

use folio_core::events::{event_types, Event, EventData, KeyCode};
use folio_core::modal::ModalGate;
use folio_core::time::Timestamp;

use crate::config::NavConfig;
use crate::guard::ScrollGuard;
use crate::section::{ActiveIndex, Direction};
use crate::scroll::SectionScroll;

/// What an input did to navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not a navigation input, or navigation is disabled
    Ignored,
    /// The active section can still scroll; native scrolling proceeds
    PassThrough,
    /// A navigation request arrived while the cooldown was closed
    Dropped,
    /// A navigation request was accepted. `from == to` at either end.
    Navigated { from: usize, to: usize },
}

impl InputOutcome {
    /// True if the active index actually moved
    pub fn changed(&self) -> bool {
        matches!(self, InputOutcome::Navigated { from, to } if from != to)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, InputOutcome::Navigated { .. })
    }
}

/// Navigation state owned by the controller and lent to each handler
#[derive(Debug, Clone)]
pub struct NavState {
    pub index: ActiveIndex,
    pub guard: ScrollGuard,
}

impl NavState {
    pub fn new(index: ActiveIndex, guard: ScrollGuard) -> Self {
        Self { index, guard }
    }

    /// Move to `target` (clamped) if the cooldown allows it
    ///
    /// Every accepted request starts the cooldown, including clamped no-ops
    /// at either end of the strip.
    pub fn try_navigate(&mut self, target: usize, now: Timestamp) -> InputOutcome {
        if !self.guard.try_acquire(now) {
            tracing::trace!(target, now = now.as_millis(), "navigation dropped by cooldown");
            return InputOutcome::Dropped;
        }
        let from = self.index.get();
        let to = self.index.set(target);
        tracing::debug!(from, to, now = now.as_millis(), "navigation accepted");
        InputOutcome::Navigated { from, to }
    }

    /// Step one section in `direction` if the cooldown allows it
    pub fn try_step(&mut self, direction: Direction, now: Timestamp) -> InputOutcome {
        let target = self.index.stepped(direction);
        self.try_navigate(target, now)
    }
}

/// Translates raw input into navigation requests
#[derive(Debug, Clone)]
pub struct InputArbiter {
    modal: ModalGate,
    min_swipe_px: f32,
    scroll_tolerance_px: f32,
    touch_start_x: Option<f32>,
}

impl InputArbiter {
    pub fn new(config: &NavConfig, modal: ModalGate) -> Self {
        Self {
            modal,
            min_swipe_px: config.min_swipe_px,
            scroll_tolerance_px: config.scroll_tolerance_px,
            touch_start_x: None,
        }
    }

    /// Route a window event to the matching handler
    ///
    /// Marks the event's default as prevented when the wheel was consumed.
    pub fn handle(
        &mut self,
        event: &mut Event,
        state: &mut NavState,
        scroll: &dyn SectionScroll,
    ) -> InputOutcome {
        let now = event.timestamp;
        let outcome = match (event.event_type, &event.data) {
            (event_types::WHEEL, EventData::Wheel { delta_y, .. }) => {
                self.on_wheel(*delta_y, now, state, scroll)
            }
            (event_types::TOUCH_START, EventData::Touch { screen_x, .. }) => {
                self.on_touch_start(*screen_x)
            }
            (event_types::TOUCH_END, EventData::Touch { screen_x, .. }) => {
                self.on_touch_end(*screen_x, now, state)
            }
            (event_types::KEY_DOWN, EventData::Key { key }) => self.on_key(*key, now, state),
            _ => InputOutcome::Ignored,
        };

        if event.event_type == event_types::WHEEL
            && matches!(outcome, InputOutcome::Navigated { .. } | InputOutcome::Dropped)
        {
            event.prevent_default();
        }
        outcome
    }

    /// Wheel: scroll inside the section first, navigate at its edge
    pub fn on_wheel(
        &mut self,
        delta_y: f32,
        now: Timestamp,
        state: &mut NavState,
        scroll: &dyn SectionScroll,
    ) -> InputOutcome {
        if self.modal.is_open() {
            return InputOutcome::Ignored;
        }

        let direction = if delta_y > 0.0 {
            Direction::Forward
        } else if delta_y < 0.0 {
            Direction::Backward
        } else {
            return InputOutcome::PassThrough;
        };

        let can_scroll = scroll
            .scroll_metrics(state.index.get())
            .is_some_and(|metrics| match direction {
                Direction::Forward => metrics.can_scroll_down(self.scroll_tolerance_px),
                Direction::Backward => metrics.can_scroll_up(),
            });
        if can_scroll {
            tracing::trace!(delta_y, "wheel scrolls within section");
            return InputOutcome::PassThrough;
        }

        state.try_step(direction, now)
    }

    /// Touch start: remember where the finger landed
    pub fn on_touch_start(&mut self, screen_x: f32) -> InputOutcome {
        if self.modal.is_open() {
            return InputOutcome::Ignored;
        }
        self.touch_start_x = Some(screen_x);
        InputOutcome::Ignored
    }

    /// Touch end: navigate if the finger travelled far enough horizontally
    pub fn on_touch_end(
        &mut self,
        screen_x: f32,
        now: Timestamp,
        state: &mut NavState,
    ) -> InputOutcome {
        if self.modal.is_open() {
            return InputOutcome::Ignored;
        }
        let Some(start_x) = self.touch_start_x.take() else {
            return InputOutcome::Ignored;
        };

        // Positive when the finger moved right-to-left
        let distance = start_x - screen_x;
        if distance.abs() <= self.min_swipe_px {
            tracing::trace!(distance, "touch below swipe threshold");
            return InputOutcome::Ignored;
        }

        let direction = if distance > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        state.try_step(direction, now)
    }

    /// Keyboard: arrow keys always navigate
    pub fn on_key(&mut self, key: KeyCode, now: Timestamp, state: &mut NavState) -> InputOutcome {
        if self.modal.is_open() {
            return InputOutcome::Ignored;
        }
        let direction = match key {
            KeyCode::RIGHT => Direction::Forward,
            KeyCode::LEFT => Direction::Backward,
            _ => return InputOutcome::Ignored,
        };
        state.try_step(direction, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::{NoScroll, ScrollMetrics, ScrollRegistry};

    fn setup(count: usize) -> (InputArbiter, NavState, ModalGate) {
        let config = NavConfig::default();
        let modal = ModalGate::new();
        let arbiter = InputArbiter::new(&config, modal.clone());
        let state = NavState::new(
            ActiveIndex::new(count).unwrap(),
            ScrollGuard::from_config(&config),
        );
        (arbiter, state, modal)
    }

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn test_wheel_cooldown() {
        let (mut arbiter, mut state, _) = setup(5);

        let first = arbiter.on_wheel(100.0, at(0), &mut state, &NoScroll);
        assert_eq!(first, InputOutcome::Navigated { from: 0, to: 1 });

        let second = arbiter.on_wheel(100.0, at(100), &mut state, &NoScroll);
        assert_eq!(second, InputOutcome::Dropped);
        assert_eq!(state.index.get(), 1);

        let third = arbiter.on_wheel(100.0, at(900), &mut state, &NoScroll);
        assert_eq!(third, InputOutcome::Navigated { from: 1, to: 2 });
    }

    #[test]
    fn test_wheel_defers_to_section_scroll() {
        let (mut arbiter, mut state, _) = setup(5);
        state.index.set(2);

        let registry = ScrollRegistry::new(5);
        registry.set(2, ScrollMetrics::new(120.0, 1200.0, 500.0));

        // Scrolling up while not at the top stays inside the section
        let outcome = arbiter.on_wheel(-40.0, at(0), &mut state, &registry);
        assert_eq!(outcome, InputOutcome::PassThrough);
        assert_eq!(state.index.get(), 2);
        assert!(!state.guard.is_transitioning());

        // Once at the top the same wheel retreats
        registry.set(2, ScrollMetrics::new(0.0, 1200.0, 500.0));
        let outcome = arbiter.on_wheel(-40.0, at(10), &mut state, &registry);
        assert_eq!(outcome, InputOutcome::Navigated { from: 2, to: 1 });
    }

    #[test]
    fn test_wheel_down_navigates_within_tolerance_of_bottom() {
        let (mut arbiter, mut state, _) = setup(5);
        let registry = ScrollRegistry::new(5);

        registry.set(0, ScrollMetrics::new(300.0, 1000.0, 400.0));
        let outcome = arbiter.on_wheel(40.0, at(0), &mut state, &registry);
        assert_eq!(outcome, InputOutcome::PassThrough);

        registry.set(0, ScrollMetrics::new(597.0, 1000.0, 400.0));
        let outcome = arbiter.on_wheel(40.0, at(10), &mut state, &registry);
        assert_eq!(outcome, InputOutcome::Navigated { from: 0, to: 1 });
    }

    #[test]
    fn test_wheel_prevents_default_only_when_consumed() {
        let (mut arbiter, mut state, _) = setup(5);
        let registry = ScrollRegistry::new(5);
        registry.set(0, ScrollMetrics::new(0.0, 1000.0, 400.0));

        let mut scrolling = Event::wheel(0.0, 40.0, at(0));
        let outcome = arbiter.handle(&mut scrolling, &mut state, &registry);
        assert_eq!(outcome, InputOutcome::PassThrough);
        assert!(!scrolling.default_prevented);

        registry.clear(0);
        let mut navigating = Event::wheel(0.0, 40.0, at(10));
        arbiter.handle(&mut navigating, &mut state, &registry);
        assert!(navigating.default_prevented);

        let mut cooling = Event::wheel(0.0, 40.0, at(20));
        let outcome = arbiter.handle(&mut cooling, &mut state, &registry);
        assert_eq!(outcome, InputOutcome::Dropped);
        assert!(cooling.default_prevented);
    }

    #[test]
    fn test_zero_delta_wheel_passes_through() {
        let (mut arbiter, mut state, _) = setup(5);
        let mut sideways = Event::wheel(30.0, 0.0, at(0));
        let outcome = arbiter.handle(&mut sideways, &mut state, &NoScroll);
        assert_eq!(outcome, InputOutcome::PassThrough);
        assert!(!sideways.default_prevented);
        assert!(!state.guard.is_transitioning());
    }

    #[test]
    fn test_swipe_threshold() {
        let (mut arbiter, mut state, _) = setup(5);

        arbiter.on_touch_start(300.0);
        let short = arbiter.on_touch_end(251.0, at(0), &mut state);
        assert_eq!(short, InputOutcome::Ignored);
        assert_eq!(state.index.get(), 0);

        arbiter.on_touch_start(300.0);
        let swipe_left = arbiter.on_touch_end(249.0, at(10), &mut state);
        assert_eq!(swipe_left, InputOutcome::Navigated { from: 0, to: 1 });

        arbiter.on_touch_start(100.0);
        let swipe_right = arbiter.on_touch_end(151.0, at(1_000), &mut state);
        assert_eq!(swipe_right, InputOutcome::Navigated { from: 1, to: 0 });
    }

    #[test]
    fn test_touch_end_without_start_is_ignored() {
        let (mut arbiter, mut state, _) = setup(5);
        assert_eq!(
            arbiter.on_touch_end(0.0, at(0), &mut state),
            InputOutcome::Ignored
        );

        arbiter.on_touch_start(400.0);
        arbiter.on_touch_end(100.0, at(0), &mut state);
        // The start point is consumed by the first touch end
        assert_eq!(
            arbiter.on_touch_end(0.0, at(2_000), &mut state),
            InputOutcome::Ignored
        );
    }

    #[test]
    fn test_keys() {
        let (mut arbiter, mut state, _) = setup(3);

        assert_eq!(
            arbiter.on_key(KeyCode::LEFT, at(0), &mut state),
            InputOutcome::Navigated { from: 0, to: 0 }
        );
        assert_eq!(
            arbiter.on_key(KeyCode::RIGHT, at(900), &mut state),
            InputOutcome::Navigated { from: 0, to: 1 }
        );
        assert_eq!(
            arbiter.on_key(KeyCode::DOWN, at(1_800), &mut state),
            InputOutcome::Ignored
        );
        assert!(!state.guard.is_open(at(1_000)));
    }

    #[test]
    fn test_modal_blocks_everything_without_touching_guard() {
        let (mut arbiter, mut state, modal) = setup(5);
        modal.set_open(true);

        let mut wheel = Event::wheel(0.0, 100.0, at(0));
        assert_eq!(
            arbiter.handle(&mut wheel, &mut state, &NoScroll),
            InputOutcome::Ignored
        );
        assert!(!wheel.default_prevented);

        assert_eq!(arbiter.on_touch_start(400.0), InputOutcome::Ignored);
        assert_eq!(
            arbiter.on_touch_end(0.0, at(0), &mut state),
            InputOutcome::Ignored
        );
        assert_eq!(
            arbiter.on_key(KeyCode::RIGHT, at(0), &mut state),
            InputOutcome::Ignored
        );

        assert_eq!(state.index.get(), 0);
        assert_eq!(state.guard.last_transition(), None);

        // A touch that started under the modal does not complete after it closes
        modal.set_open(false);
        assert_eq!(
            arbiter.on_touch_end(0.0, at(10), &mut state),
            InputOutcome::Ignored
        );
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(InputOutcome::Navigated { from: 0, to: 1 }.changed());
        assert!(!InputOutcome::Navigated { from: 4, to: 4 }.changed());
        assert!(InputOutcome::Navigated { from: 4, to: 4 }.is_accepted());
        assert!(!InputOutcome::Dropped.is_accepted());
    }
}
