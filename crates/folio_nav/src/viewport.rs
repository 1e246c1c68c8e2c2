//! Viewport tracking
//!
//! Each section is exactly one viewport wide. The tracker recomputes section
//! and strip widths on every resize and whenever the section count changes.

use crate::config::NavConfig;

/// Derived sizes for the section strip
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    /// Width of one section (the full viewport width)
    pub section_width_px: f32,
    /// Width of the whole strip
    pub total_width_px: f32,
    /// Height available to a section below the navbar
    pub section_height_px: f32,
    pub is_mobile: bool,
}

/// Recomputes [`ViewportMetrics`] from the window size
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    width: f32,
    height: f32,
    section_count: usize,
    navbar_height_px: f32,
    mobile_breakpoint_px: f32,
    metrics: ViewportMetrics,
}

impl ViewportTracker {
    /// Tracker for `section_count` sections, unsized until the first resize
    pub fn new(section_count: usize, config: &NavConfig) -> Self {
        let mut tracker = Self {
            width: 0.0,
            height: 0.0,
            section_count,
            navbar_height_px: config.navbar_height_px,
            mobile_breakpoint_px: config.mobile_breakpoint_px,
            metrics: ViewportMetrics::default(),
        };
        tracker.recompute();
        tracker
    }

    pub fn current_metrics(&self) -> ViewportMetrics {
        self.metrics
    }

    /// Window size as last reported
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Handle a window resize
    pub fn on_resize(&mut self, width: f32, height: f32) -> ViewportMetrics {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.recompute();
        tracing::debug!(
            width = self.width,
            height = self.height,
            section_width = self.metrics.section_width_px,
            mobile = self.metrics.is_mobile,
            "viewport resized"
        );
        self.metrics
    }

    pub fn set_section_count(&mut self, count: usize) -> ViewportMetrics {
        if count != self.section_count {
            self.section_count = count;
            self.recompute();
        }
        self.metrics
    }

    fn recompute(&mut self) {
        self.metrics = ViewportMetrics {
            section_width_px: self.width,
            total_width_px: self.width * self.section_count as f32,
            section_height_px: (self.height - self.navbar_height_px).max(0.0),
            is_mobile: self.width < self.mobile_breakpoint_px,
        };
    }
}
