//! Strip layout
//!
//! Sections sit side by side in one strip. Showing section `i` means
//! translating the strip by `-i * section_width`. The [`LayoutEngine`] owns the
//! motion that carries the rendered offset toward that target.

use folio_animation::{Easing, Spring, SpringConfig, Tween};

use crate::viewport::ViewportMetrics;

/// Horizontal translation that brings section `index` into view
pub fn compute_offset(index: usize, metrics: &ViewportMetrics) -> f32 {
    -(index as f32) * metrics.section_width_px
}

/// How the strip moves between offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionCurve {
    Spring(SpringConfig),
    Eased { duration_ms: u32, easing: Easing },
}

impl Default for TransitionCurve {
    fn default() -> Self {
        TransitionCurve::Spring(SpringConfig::default())
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Spring(Spring),
    Tween(Tween),
}

impl Motion {
    fn at_rest(curve: TransitionCurve, value: f32) -> Self {
        match curve {
            TransitionCurve::Spring(config) => Motion::Spring(Spring::new(config, value)),
            TransitionCurve::Eased {
                duration_ms,
                easing,
            } => Motion::Tween(Tween::at_rest(value, duration_ms, easing)),
        }
    }

    fn value(&self) -> f32 {
        match self {
            Motion::Spring(spring) => spring.value(),
            Motion::Tween(tween) => tween.value(),
        }
    }

    fn retarget(&mut self, target: f32) {
        match self {
            Motion::Spring(spring) => spring.set_target(target),
            Motion::Tween(tween) => tween.retarget(target),
        }
    }

    fn snap_to(&mut self, value: f32) {
        match self {
            Motion::Spring(spring) => spring.snap_to(value),
            Motion::Tween(tween) => tween.snap_to(value),
        }
    }

    fn step(&mut self, dt_secs: f32) {
        match self {
            Motion::Spring(spring) => spring.step(dt_secs),
            Motion::Tween(tween) => tween.tick(dt_secs * 1000.0),
        }
    }

    fn is_at_rest(&self) -> bool {
        match self {
            Motion::Spring(spring) => spring.is_settled(),
            Motion::Tween(tween) => tween.is_finished(),
        }
    }
}

/// Drives the rendered strip offset toward the active section
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    curve: TransitionCurve,
    motion: Motion,
    target: f32,
}

impl LayoutEngine {
    pub fn new(curve: TransitionCurve) -> Self {
        Self {
            curve,
            motion: Motion::at_rest(curve, 0.0),
            target: 0.0,
        }
    }

    pub fn curve(&self) -> TransitionCurve {
        self.curve
    }

    /// Start moving toward section `index`
    ///
    /// Retargeting to the offset already being approached leaves an in-flight
    /// motion untouched.
    pub fn animate_to(&mut self, index: usize, metrics: &ViewportMetrics) -> f32 {
        let target = compute_offset(index, metrics);
        if target != self.target {
            tracing::trace!(index, from = self.motion.value(), to = target, "strip retarget");
            self.target = target;
            self.motion.retarget(target);
        }
        target
    }

    /// Show section `index` immediately
    pub fn jump_to(&mut self, index: usize, metrics: &ViewportMetrics) -> f32 {
        let target = compute_offset(index, metrics);
        self.target = target;
        self.motion.snap_to(target);
        target
    }

    /// Advance the motion by `dt_secs`
    ///
    /// Returns true while the strip is still moving.
    pub fn tick(&mut self, dt_secs: f32) -> bool {
        if self.motion.is_at_rest() {
            self.motion.snap_to(self.target);
            return false;
        }
        self.motion.step(dt_secs);
        if self.motion.is_at_rest() {
            self.motion.snap_to(self.target);
            return false;
        }
        true
    }

    /// Offset currently applied to the strip
    pub fn rendered_offset(&self) -> f32 {
        self.motion.value()
    }

    /// Offset the strip is heading toward
    pub fn target_offset(&self) -> f32 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        !self.motion.is_at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(width: f32, count: usize) -> ViewportMetrics {
        ViewportMetrics {
            section_width_px: width,
            total_width_px: width * count as f32,
            section_height_px: 600.0,
            is_mobile: false,
        }
    }

    fn run(engine: &mut LayoutEngine, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            if !engine.tick(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn test_offset_formula() {
        let m = metrics(800.0, 5);
        assert_eq!(compute_offset(0, &m), 0.0);
        assert_eq!(compute_offset(2, &m), -1600.0);
        assert_eq!(compute_offset(4, &m), -3200.0);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut engine = LayoutEngine::new(TransitionCurve::default());
        let m = metrics(800.0, 5);

        assert_eq!(engine.animate_to(2, &m), -1600.0);
        assert!(engine.is_animating());
        assert!(engine.tick(1.0 / 60.0));
        assert!(engine.rendered_offset() < 0.0);

        run(&mut engine, 3.0);
        assert!(!engine.is_animating());
        assert_eq!(engine.rendered_offset(), -1600.0);
    }

    #[test]
    fn test_eased_curve_finishes_after_duration() {
        let mut engine = LayoutEngine::new(TransitionCurve::Eased {
            duration_ms: 400,
            easing: Easing::EaseOutCubic,
        });
        let m = metrics(1000.0, 3);

        engine.animate_to(1, &m);
        engine.tick(0.2);
        let midway = engine.rendered_offset();
        assert!(midway < 0.0 && midway > -1000.0);

        assert!(!engine.tick(0.2));
        assert_eq!(engine.rendered_offset(), -1000.0);
    }

    #[test]
    fn test_same_target_keeps_motion() {
        let mut engine = LayoutEngine::new(TransitionCurve::Eased {
            duration_ms: 400,
            easing: Easing::Linear,
        });
        let m = metrics(1000.0, 3);

        engine.animate_to(1, &m);
        engine.tick(0.1);
        let before = engine.rendered_offset();
        engine.animate_to(1, &m);
        assert_eq!(engine.rendered_offset(), before);
        engine.tick(0.1);
        assert!(engine.rendered_offset() < before);
    }

    #[test]
    fn test_jump_skips_animation() {
        let mut engine = LayoutEngine::new(TransitionCurve::default());
        engine.jump_to(3, &metrics(500.0, 5));
        assert!(!engine.is_animating());
        assert_eq!(engine.rendered_offset(), -1500.0);
        assert!(!engine.tick(1.0 / 60.0));
    }
}
