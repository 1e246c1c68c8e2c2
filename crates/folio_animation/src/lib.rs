//! Folio Animation
//!
//! Motion primitives used to move the section strip between offsets.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Fixed-duration interpolation with easing curves
//! - **Interruptible**: Retargeting keeps the current value (and spring velocity)

pub mod easing;
pub mod spring;
pub mod tween;

pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
