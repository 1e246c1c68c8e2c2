//! Section navigator
//!
//! Composes the input arbiter, navigation surface, viewport tracker and layout
//! engine around one [`NavState`]. After every accepted navigation or resize the
//! layout is retargeted so the rendered offset converges on
//! `-active_index * section_width`.

use std::time::Duration;

use folio_core::events::{event_types, Event, EventData};
use folio_core::modal::ModalGate;
use folio_core::time::Timestamp;

use crate::arbiter::{InputArbiter, InputOutcome, NavState};
use crate::config::NavConfig;
use crate::error::Result;
use crate::guard::{GuardState, ScrollGuard};
use crate::layout::LayoutEngine;
use crate::scroll::{NoScroll, SectionScroll};
use crate::section::{ActiveIndex, Section, SectionCollection};
use crate::surface::{Indicator, NavLink, NavigationSurface};
use crate::viewport::{ViewportMetrics, ViewportTracker};

/// Navigation state machine for one strip of sections
pub struct SectionNavigator<S> {
    surface: NavigationSurface<S>,
    state: NavState,
    arbiter: InputArbiter,
    viewport: ViewportTracker,
    layout: LayoutEngine,
    scroll: Box<dyn SectionScroll>,
    modal: ModalGate,
    sized: bool,
}

impl<S> SectionNavigator<S> {
    /// Build a navigator at the first section
    ///
    /// Fails if `config` does not validate.
    pub fn new(sections: SectionCollection<S>, config: &NavConfig, modal: ModalGate) -> Result<Self> {
        config.validate()?;
        let count = sections.len();
        let state = NavState::new(ActiveIndex::new(count)?, ScrollGuard::from_config(config));

        tracing::debug!(
            sections = count,
            cooldown_ms = config.cooldown_ms,
            settle_ms = config.settle_ms,
            "navigator created"
        );

        Ok(Self {
            surface: NavigationSurface::new(sections, modal.clone()),
            state,
            arbiter: InputArbiter::new(config, modal.clone()),
            viewport: ViewportTracker::new(count, config),
            layout: LayoutEngine::new(config.transition.curve()),
            scroll: Box::new(NoScroll),
            modal,
            sized: false,
        })
    }

    /// Read section scroll positions from `scroll` for wheel deference
    pub fn with_scroll(mut self, scroll: impl SectionScroll + 'static) -> Self {
        self.scroll = Box::new(scroll);
        self
    }

    /// Handle one window event
    ///
    /// Resize events update the viewport and report `Ignored`.
    pub fn handle_event(&mut self, event: &mut Event) -> InputOutcome {
        if event.event_type == event_types::RESIZE {
            if let EventData::Resize { width, height } = event.data {
                self.on_resize(width as f32, height as f32);
            }
            return InputOutcome::Ignored;
        }

        let outcome = self
            .arbiter
            .handle(event, &mut self.state, self.scroll.as_ref());
        self.after(outcome);
        outcome
    }

    /// Direct request from an indicator or nav link
    pub fn navigate_to(&mut self, index: usize, now: Timestamp) -> InputOutcome {
        let outcome = self.surface.request(index, now, &mut self.state);
        self.after(outcome);
        outcome
    }

    /// Recompute the viewport and retarget the strip
    ///
    /// The first resize places the strip without animating.
    pub fn on_resize(&mut self, width: f32, height: f32) -> ViewportMetrics {
        let metrics = self.viewport.on_resize(width, height);
        let index = self.state.index.get();
        if self.sized {
            self.layout.animate_to(index, &metrics);
        } else {
            self.layout.jump_to(index, &metrics);
            self.sized = true;
        }
        metrics
    }

    /// Advance time: release the settle lock and step the strip animation
    ///
    /// Returns true while the strip is still moving.
    pub fn tick(&mut self, now: Timestamp, dt: Duration) -> bool {
        if self.state.guard.settle(now) {
            tracing::trace!(now = now.as_millis(), "transition settled");
        }
        self.layout.tick(dt.as_secs_f32())
    }

    fn after(&mut self, outcome: InputOutcome) {
        if outcome.is_accepted() {
            let metrics = self.viewport.current_metrics();
            self.layout.animate_to(self.state.index.get(), &metrics);
        }
    }

    pub fn active_index(&self) -> usize {
        self.state.index.get()
    }

    pub fn section_count(&self) -> usize {
        self.state.index.count()
    }

    pub fn sections(&self) -> &SectionCollection<S> {
        self.surface.sections()
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.viewport.current_metrics()
    }

    pub fn rendered_offset(&self) -> f32 {
        self.layout.rendered_offset()
    }

    pub fn target_offset(&self) -> f32 {
        self.layout.target_offset()
    }

    pub fn is_animating(&self) -> bool {
        self.layout.is_animating()
    }

    pub fn guard_state(&self) -> GuardState {
        self.state.guard.state()
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.guard.is_transitioning()
    }

    pub fn modal(&self) -> &ModalGate {
        &self.modal
    }

    pub fn indicators(&self) -> Vec<Indicator> {
        self.surface.indicators(self.active_index())
    }

    pub fn menu_open(&self) -> bool {
        self.surface.menu_open()
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.surface.toggle_menu()
    }
}

impl<S: Section> SectionNavigator<S> {
    pub fn nav_links(&self) -> Vec<NavLink> {
        self.surface.nav_links(self.active_index())
    }

    /// Navigate to the section with this title, if any
    pub fn navigate_to_title(&mut self, title: &str, now: Timestamp) -> Option<InputOutcome> {
        let index = self.surface.sections().position_of(title)?;
        Some(self.navigate_to(index, now))
    }
}

impl<S> std::fmt::Debug for SectionNavigator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionNavigator")
            .field("active_index", &self.active_index())
            .field("sections", &self.section_count())
            .field("guard", &self.guard_state())
            .field("rendered_offset", &self.rendered_offset())
            .field("target_offset", &self.target_offset())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavError;
    use crate::scroll::{ScrollMetrics, ScrollRegistry};
    use crate::section::PortfolioSection;
    use folio_core::events::KeyCode;

    const FRAME: Duration = Duration::from_millis(16);

    fn navigator() -> SectionNavigator<PortfolioSection> {
        let mut nav = SectionNavigator::new(
            SectionCollection::portfolio(),
            &NavConfig::default(),
            ModalGate::new(),
        )
        .unwrap();
        nav.on_resize(800.0, 600.0);
        nav
    }

    fn settle(nav: &mut SectionNavigator<PortfolioSection>, from_ms: u64) {
        let mut now = from_ms;
        for _ in 0..300 {
            now += 16;
            if !nav.tick(Timestamp::from_millis(now), FRAME) {
                break;
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = NavConfig {
            settle_ms: 900,
            ..NavConfig::default()
        };
        let err = SectionNavigator::new(SectionCollection::portfolio(), &config, ModalGate::new())
            .unwrap_err();
        assert!(matches!(err, NavError::InvalidConfig(_)));
    }

    #[test]
    fn test_first_resize_places_strip_without_animation() {
        let mut nav = SectionNavigator::new(
            SectionCollection::portfolio(),
            &NavConfig::default(),
            ModalGate::new(),
        )
        .unwrap();
        nav.navigate_to(2, Timestamp::from_millis(0));
        nav.on_resize(800.0, 600.0);
        assert!(!nav.is_animating());
        assert_eq!(nav.rendered_offset(), -1600.0);
    }

    #[test]
    fn test_key_navigation_moves_strip() {
        let mut nav = navigator();
        let mut key = Event::key_down(KeyCode::RIGHT, Timestamp::from_millis(0));
        let outcome = nav.handle_event(&mut key);

        assert_eq!(outcome, InputOutcome::Navigated { from: 0, to: 1 });
        assert_eq!(nav.target_offset(), -800.0);
        assert!(nav.is_animating());

        settle(&mut nav, 0);
        assert_eq!(nav.rendered_offset(), -800.0);
        assert_eq!(nav.guard_state(), GuardState::Idle);
    }

    #[test]
    fn test_resize_retargets_offset() {
        let mut nav = navigator();
        nav.navigate_to(2, Timestamp::from_millis(0));
        settle(&mut nav, 0);

        let mut resize = Event::resize(1000, 700, Timestamp::from_millis(5_000));
        assert_eq!(nav.handle_event(&mut resize), InputOutcome::Ignored);
        assert_eq!(nav.metrics().section_width_px, 1000.0);
        assert_eq!(nav.target_offset(), -2000.0);
        assert_eq!(nav.active_index(), 2);
    }

    #[test]
    fn test_wheel_reads_registered_scroll() {
        let registry = ScrollRegistry::new(5);
        let mut nav = navigator().with_scroll(registry.clone());
        registry.set(0, ScrollMetrics::new(0.0, 2000.0, 528.0));

        let mut wheel = Event::wheel(0.0, 60.0, Timestamp::from_millis(0));
        assert_eq!(nav.handle_event(&mut wheel), InputOutcome::PassThrough);
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn test_navigate_by_title() {
        let mut nav = navigator();
        let outcome = nav.navigate_to_title("Contact", Timestamp::from_millis(0));
        assert_eq!(outcome, Some(InputOutcome::Navigated { from: 0, to: 4 }));
        assert!(nav.nav_links()[4].active);
        assert_eq!(nav.navigate_to_title("Blog", Timestamp::from_millis(1_000)), None);
    }
}
