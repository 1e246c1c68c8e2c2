//! Navigation configuration (`folio.toml`)
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! cooldown_ms = 800
//! settle_ms = 500
//! min_swipe_px = 50.0
//!
//! [transition]
//! kind = "spring"
//! stiffness = 300.0
//! damping = 30.0
//! ```

use std::path::Path;
use std::time::Duration;

use folio_animation::{Easing, SpringConfig};
use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};
use crate::layout::TransitionCurve;

/// Timing, gesture and layout parameters for section navigation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavConfig {
    /// Minimum spacing between the starts of two accepted transitions
    pub cooldown_ms: u64,
    /// Animation lock held after each accepted transition
    pub settle_ms: u64,
    /// Horizontal travel a touch must exceed to count as a swipe
    pub min_swipe_px: f32,
    /// Slack at the bottom edge when deciding whether a section can still scroll
    pub scroll_tolerance_px: f32,
    /// Height reserved for the fixed navbar above the section strip
    pub navbar_height_px: f32,
    /// Viewports narrower than this are treated as mobile
    pub mobile_breakpoint_px: f32,
    pub transition: TransitionConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 800,
            settle_ms: 500,
            min_swipe_px: 50.0,
            scroll_tolerance_px: 5.0,
            navbar_height_px: 72.0,
            mobile_breakpoint_px: 768.0,
            transition: TransitionConfig::default(),
        }
    }
}

impl NavConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Reject combinations the input arbiter cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.settle_ms >= self.cooldown_ms {
            return Err(NavError::InvalidConfig(format!(
                "settle_ms ({}) must be shorter than cooldown_ms ({})",
                self.settle_ms, self.cooldown_ms
            )));
        }
        for (name, value) in [
            ("min_swipe_px", self.min_swipe_px),
            ("scroll_tolerance_px", self.scroll_tolerance_px),
            ("navbar_height_px", self.navbar_height_px),
            ("mobile_breakpoint_px", self.mobile_breakpoint_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(NavError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        self.transition.validate()
    }
}

/// Which motion drives the strip between offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    #[default]
    Spring,
    Eased,
}

/// Strip transition parameters
///
/// Spring fields apply to `kind = "spring"`, `duration_ms` and `easing` to
/// `kind = "eased"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub kind: TransitionKind,
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        let spring = SpringConfig::default();
        Self {
            kind: TransitionKind::Spring,
            stiffness: spring.stiffness,
            damping: spring.damping,
            mass: spring.mass,
            duration_ms: 400,
            easing: Easing::EaseOutCubic,
        }
    }
}

impl TransitionConfig {
    pub fn curve(&self) -> TransitionCurve {
        match self.kind {
            TransitionKind::Spring => {
                TransitionCurve::Spring(SpringConfig::new(self.stiffness, self.damping, self.mass))
            }
            TransitionKind::Eased => TransitionCurve::Eased {
                duration_ms: self.duration_ms,
                easing: self.easing,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.kind == TransitionKind::Spring {
            let positive = |value: f32| value.is_finite() && value > 0.0;
            if !positive(self.stiffness) || !positive(self.mass) {
                return Err(NavError::InvalidConfig(
                    "spring stiffness and mass must be positive".to_string(),
                ));
            }
            if !self.damping.is_finite() || self.damping < 0.0 {
                return Err(NavError::InvalidConfig(
                    "spring damping must not be negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}
