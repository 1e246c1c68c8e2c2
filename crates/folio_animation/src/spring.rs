//! Spring physics
//!
//! A damped harmonic oscillator integrated with fourth-order Runge-Kutta.
//! Large frame deltas are split into fixed substeps so a dropped frame does not
//! destabilize stiff springs. A single step never simulates more than
//! [`MAX_FRAME`] seconds.

use serde::{Deserialize, Serialize};

/// Longest integration step in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Longest frame delta one `step` simulates, in seconds
pub const MAX_FRAME: f32 = 0.25;

/// Distance from target below which a spring may rest
const REST_DELTA: f32 = 0.01;

/// Speed below which a spring may rest
const REST_SPEED: f32 = 0.01;

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Fast with a barely visible overshoot
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Slow and soft
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Noticeable bounce
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Damping that just prevents oscillation for this stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// `damping / critical_damping`; 1.0 is critically damped
    pub fn damping_ratio(&self) -> f32 {
        let critical = self.critical_damping();
        if critical <= 0.0 {
            return 0.0;
        }
        self.damping / critical
    }
}

impl Default for SpringConfig {
    /// Section-strip spring: stiffness 300, damping 30
    fn default() -> Self {
        Self::new(300.0, 30.0, 1.0)
    }
}

/// An animated value pulled toward a target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Change the target, keeping current value and velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` and rest there
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    /// Advance the simulation by `dt` seconds, clamped to [`MAX_FRAME`]
    ///
    /// Non-finite or non-positive deltas are ignored.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 || self.config.mass <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME);
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.rk4(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, position: f32, velocity: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (position - self.target) - damping * velocity) / mass
    }

    fn rk4(&mut self, h: f32) {
        let x = self.value;
        let v = self.velocity;

        let k1_x = v;
        let k1_v = self.acceleration(x, v);

        let k2_x = v + 0.5 * h * k1_v;
        let k2_v = self.acceleration(x + 0.5 * h * k1_x, k2_x);

        let k3_x = v + 0.5 * h * k2_v;
        let k3_v = self.acceleration(x + 0.5 * h * k2_x, k3_x);

        let k4_x = v + h * k3_v;
        let k4_v = self.acceleration(x + h * k3_x, k4_x);

        self.value = x + h / 6.0 * (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x);
        self.velocity = v + h / 6.0 * (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v);
    }
}
