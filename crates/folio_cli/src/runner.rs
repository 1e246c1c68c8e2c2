//! Headless scenario replay
//!
//! Builds a controller on a [`ManualClock`], attaches it to a window
//! dispatcher, then feeds each step through the dispatcher the way a platform
//! layer would. `wait` advances the clock in fixed frames and ticks the strip
//! animation after each one.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use folio_core::events::{Event, EventDispatcher, KeyCode, SharedDispatcher};
use folio_core::modal::ModalGate;
use folio_core::time::{Clock, ManualClock};
use folio_nav::{
    Attachment, NavConfig, ScrollMetrics, ScrollRegistry, SectionCollection, SectionController,
    SectionNavigator,
};

use crate::report::{FinalState, ScenarioReport};
use crate::scenario::{Scenario, ScenarioStep};

/// Frame length used while waiting
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Replay settings
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub nav: NavConfig,
    pub frame_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

struct Session {
    window: SharedDispatcher,
    controller: SectionController<String>,
    modal: ModalGate,
    scroll: ScrollRegistry,
    clock: ManualClock,
    frame_ms: u64,
    elapsed_frames: u64,
    _attachment: Attachment,
}

impl Session {
    fn start(scenario: &Scenario, config: &RunConfig) -> Result<Self> {
        let modal = ModalGate::new();
        let clock = ManualClock::new();

        let sections = SectionCollection::new(scenario.sections.titles())
            .context("scenario must define at least one section")?;
        let scroll = ScrollRegistry::new(sections.len());
        let navigator = SectionNavigator::new(sections, &config.nav, modal.clone())
            .context("navigation config rejected")?
            .with_scroll(scroll.clone());
        let controller = SectionController::from_navigator(navigator, Arc::new(clock.clone()));

        let window = EventDispatcher::shared();
        let attachment = controller.attach(&window);

        let session = Self {
            window,
            controller,
            modal,
            scroll,
            clock,
            frame_ms: config.frame_ms.max(1),
            elapsed_frames: 0,
            _attachment: attachment,
        };
        session.dispatch(Event::resize(
            scenario.viewport.width,
            scenario.viewport.height,
            session.clock.now(),
        ));
        Ok(session)
    }

    fn dispatch(&self, mut event: Event) {
        self.window.lock().dispatch(&mut event);
    }

    fn wait(&mut self, ms: u64) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(self.frame_ms);
            remaining -= step;
            let dt = Duration::from_millis(step);
            self.clock.advance(dt);
            self.controller.tick(dt);
            self.elapsed_frames += 1;
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.clock.now().as_millis()
    }

    fn final_state(&self) -> FinalState {
        FinalState {
            index: self.controller.active_index(),
            offset: self.controller.rendered_offset(),
        }
    }

    /// Apply one step; `Err` carries an expectation failure message
    fn apply(&mut self, step: &ScenarioStep) -> std::result::Result<(), String> {
        let now = self.clock.now();
        match step {
            ScenarioStep::Wheel { delta_y } => self.dispatch(Event::wheel(0.0, *delta_y, now)),
            ScenarioStep::TouchSwipe { from_x, to_x } => {
                self.dispatch(Event::touch_start(*from_x, 0.0, now));
                self.dispatch(Event::touch_end(*to_x, 0.0, now));
            }
            ScenarioStep::Key { key } => {
                self.dispatch(Event::key_down(KeyCode::from_dom_key(key), now));
            }
            ScenarioStep::ClickIndicator { index } => {
                self.controller.navigate_to(*index);
            }
            ScenarioStep::ClickLink { title } => {
                let outcome = self
                    .controller
                    .with(|nav| nav.navigate_to_title(title, now));
                if outcome.is_none() {
                    return Err(format!("no section titled '{title}'"));
                }
            }
            ScenarioStep::ToggleMenu => {
                self.controller.with(|nav| nav.toggle_menu());
            }
            ScenarioStep::Resize { width, height } => {
                self.dispatch(Event::resize(*width, *height, now));
            }
            ScenarioStep::Modal { open } => self.modal.set_open(*open),
            ScenarioStep::Scroll {
                section,
                scroll_top,
                scroll_height,
                client_height,
            } => {
                let metrics = ScrollMetrics::new(*scroll_top, *scroll_height, *client_height);
                if !self.scroll.set(*section, metrics) {
                    return Err(format!(
                        "scroll step targets section {section} but the scenario has {} sections",
                        self.scroll.section_count()
                    ));
                }
            }
            ScenarioStep::Wait { ms } => self.wait(*ms),
            ScenarioStep::ExpectIndex { index } => {
                let actual = self.controller.active_index();
                if actual != *index {
                    return Err(format!("expected index {index}, got {actual}"));
                }
            }
            ScenarioStep::ExpectOffset { offset, tolerance } => {
                let actual = self.controller.rendered_offset();
                if (actual - offset).abs() > *tolerance {
                    return Err(format!(
                        "expected offset {offset} (±{tolerance}), got {actual}"
                    ));
                }
            }
            ScenarioStep::ExpectMenu { open } => {
                let actual = self.controller.with(|nav| nav.menu_open());
                if actual != *open {
                    return Err(format!("expected menu open = {open}, got {actual}"));
                }
            }
        }
        Ok(())
    }
}

/// Replay a parsed scenario
///
/// Setup problems are errors; a failed expectation is a failed report.
pub fn run_loaded_scenario(scenario: &Scenario, config: &RunConfig) -> Result<ScenarioReport> {
    let mut session = Session::start(scenario, config)?;
    tracing::info!(
        sections = session.controller.with(|nav| nav.section_count()),
        steps = scenario.steps.len(),
        "replaying scenario"
    );

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(step_index, step = step.name(), "step");
        if let Err(message) = session.apply(step) {
            tracing::warn!(step_index, step = step.name(), %message, "expectation failed");
            return Ok(ScenarioReport::failed(
                step.name(),
                step_index,
                message,
                session.elapsed_frames,
                session.elapsed_ms(),
                session.final_state(),
            ));
        }
    }

    Ok(ScenarioReport::passed(
        session.elapsed_frames,
        session.elapsed_ms(),
        session.final_state(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_scenario(input: &str) -> Result<ScenarioReport> {
        let scenario = Scenario::from_json(input)?;
        run_loaded_scenario(&scenario, &RunConfig::default())
    }

    #[test]
    fn test_arrow_keys_modal_and_clamp() {
        let report = run_scenario(
            r#"{
                "sections": 5,
                "viewport": { "width": 800, "height": 600 },
                "steps": [
                    { "type": "key", "key": "ArrowRight" },
                    { "type": "wait", "ms": 801 },
                    { "type": "key", "key": "ArrowRight" },
                    { "type": "wait", "ms": 801 },
                    { "type": "key", "key": "ArrowRight" },
                    { "type": "wait", "ms": 801 },
                    { "type": "expect_index", "index": 3 },
                    { "type": "modal", "open": true },
                    { "type": "key", "key": "ArrowRight" },
                    { "type": "expect_index", "index": 3 },
                    { "type": "modal", "open": false },
                    { "type": "key", "key": "ArrowRight" },
                    { "type": "expect_index", "index": 4 },
                    { "type": "wait", "ms": 900 },
                    { "type": "key", "key": "ArrowRight" },
                    { "type": "expect_index", "index": 4 },
                    { "type": "wait", "ms": 2000 },
                    { "type": "expect_offset", "offset": -3200 }
                ]
            }"#,
        )
        .unwrap();

        assert!(!report.is_failed(), "{:?}", report.message);
        assert_eq!(report.final_state.index, 4);
        assert_eq!(report.elapsed_ms, 801 * 3 + 900 + 2000);
    }

    #[test]
    fn test_failed_expectation_reports_step() {
        let report = run_scenario(
            r#"{
                "steps": [
                    { "type": "key", "key": "ArrowRight" },
                    { "type": "key", "key": "ArrowRight" },
                    { "type": "expect_index", "index": 2 }
                ]
            }"#,
        )
        .unwrap();

        assert!(report.is_failed());
        assert_eq!(report.failed_step_index, Some(2));
        assert_eq!(report.step.as_deref(), Some("expect_index"));
        assert_eq!(report.final_state.index, 1);
    }

    #[test]
    fn test_wheel_defers_to_section_scroll() {
        let report = run_scenario(
            r#"{
                "steps": [
                    { "type": "scroll", "section": 0, "scroll_top": 0, "scroll_height": 1600, "client_height": 728 },
                    { "type": "wheel", "delta_y": 100 },
                    { "type": "expect_index", "index": 0 },
                    { "type": "scroll", "section": 0, "scroll_top": 872, "scroll_height": 1600, "client_height": 728 },
                    { "type": "wheel", "delta_y": 100 },
                    { "type": "expect_index", "index": 1 }
                ]
            }"#,
        )
        .unwrap();
        assert!(!report.is_failed(), "{:?}", report.message);
    }

    #[test]
    fn test_nav_link_closes_menu() {
        let report = run_scenario(
            r#"{
                "steps": [
                    { "type": "resize", "width": 390, "height": 844 },
                    { "type": "toggle_menu" },
                    { "type": "expect_menu", "open": true },
                    { "type": "click_link", "title": "Projects" },
                    { "type": "expect_menu", "open": false },
                    { "type": "expect_index", "index": 2 },
                    { "type": "click_link", "title": "Blog" }
                ]
            }"#,
        )
        .unwrap();

        assert!(report.is_failed());
        assert_eq!(report.failed_step_index, Some(6));
    }

    #[test]
    fn test_bundled_scenarios_pass() {
        let config = RunConfig {
            nav: NavConfig::from_toml_str(include_str!("../folio.toml")).unwrap(),
            ..RunConfig::default()
        };
        for input in [
            include_str!("../scenarios/portfolio.json"),
            include_str!("../scenarios/scroll_and_swipe.json"),
        ] {
            let scenario = Scenario::from_json(input).unwrap();
            let report = run_loaded_scenario(&scenario, &config).unwrap();
            assert!(!report.is_failed(), "{:?}", report.message);
        }
    }

    #[test]
    fn test_scroll_step_outside_section_range_fails() {
        let report = run_scenario(
            r#"{
                "sections": 3,
                "steps": [
                    { "type": "scroll", "section": 2, "scroll_top": 0, "scroll_height": 1600, "client_height": 728 },
                    { "type": "scroll", "section": 18446744073709551615, "scroll_top": 0, "scroll_height": 1600, "client_height": 728 },
                    { "type": "expect_index", "index": 0 }
                ]
            }"#,
        )
        .unwrap();

        assert!(report.is_failed());
        assert_eq!(report.failed_step_index, Some(1));
        assert_eq!(report.step.as_deref(), Some("scroll"));
        assert!(report
            .message
            .as_deref()
            .is_some_and(|message| message.contains("has 3 sections")));
    }

    #[test]
    fn test_empty_section_list_is_an_error() {
        let err = run_scenario(r#"{ "sections": [], "steps": [] }"#).unwrap_err();
        assert!(err.to_string().contains("at least one section"));
    }
}
