//! Fixed-duration tweens

use crate::easing::Easing;

/// Interpolates from one value to another over a fixed duration
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    /// Create a finished tween resting at `value`
    pub fn at_rest(value: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            duration_ms,
            elapsed_ms: duration_ms as f32,
            easing,
        }
    }

    /// Restart toward `to` from the current interpolated value
    pub fn retarget(&mut self, to: f32) {
        self.from = self.value();
        self.to = to;
        self.elapsed_ms = 0.0;
    }

    /// Jump to `value` and finish
    pub fn snap_to(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.elapsed_ms = self.duration_ms as f32;
    }

    /// Advance by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if self.is_finished() || dt_ms <= 0.0 {
            return;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms as f32);
    }

    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn value(&self) -> f32 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms as f32
    }
}
