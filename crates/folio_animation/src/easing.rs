//! Easing functions for tweens

use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuart,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map progress in `0.0..=1.0` to eased progress
    ///
    /// Input outside the unit range is clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::CubicBezier(x1, y1, x2, y2) => bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// Solve `x(p) = t` for the curve parameter, then evaluate `y(p)`.
///
/// Bisection is enough here: x(p) is monotonic for x1, x2 in `0..=1`.
fn bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    let target = f64::from(t);
    let (x1, y1, x2, y2) = (f64::from(x1), f64::from(y1), f64::from(x2), f64::from(y2));

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    let mut p = target;
    for _ in 0..32 {
        let x = bezier_axis(p, x1, x2);
        if (x - target).abs() < 1e-6 {
            break;
        }
        if x < target {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_axis(p, y1, y2) as f32
}

/// One axis of a cubic bezier anchored at 0 and 1
#[inline]
fn bezier_axis(p: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - p;
    3.0 * inv * inv * p * c1 + 3.0 * inv * p * p * c2 + p * p * p
}
