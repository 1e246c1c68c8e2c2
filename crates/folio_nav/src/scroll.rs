//! Per-section vertical scroll introspection
//!
//! The wheel handler asks whether the active section can still scroll in the
//! direction of travel before treating the wheel as navigation. Renderers
//! publish each section's scroll position through a [`ScrollRegistry`].

use std::sync::Arc;

use parking_lot::Mutex;

/// Vertical scroll position of one section's content
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top
    pub scroll_top: f32,
    /// Full content height
    pub scroll_height: f32,
    /// Visible height
    pub client_height: f32,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    pub fn can_scroll_up(&self) -> bool {
        self.scroll_top > 0.0
    }

    /// True while more than `tolerance` pixels remain below the fold
    pub fn can_scroll_down(&self, tolerance: f32) -> bool {
        self.scroll_top < self.scroll_height - self.client_height - tolerance
    }
}

/// Source of scroll metrics by section index
///
/// `None` means the section is not mounted; callers treat that as already
/// at the boundary.
pub trait SectionScroll: Send {
    fn scroll_metrics(&self, index: usize) -> Option<ScrollMetrics>;
}

/// Sections with no scrollable content
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScroll;

impl SectionScroll for NoScroll {
    fn scroll_metrics(&self, _index: usize) -> Option<ScrollMetrics> {
        None
    }
}

/// Shared table of section scroll positions
///
/// Sized once for a fixed number of sections. Clones share the same table, so
/// the renderer can keep one handle while the navigator reads through another.
#[derive(Debug, Clone)]
pub struct ScrollRegistry {
    entries: Arc<Mutex<Vec<Option<ScrollMetrics>>>>,
}

impl ScrollRegistry {
    /// Empty table for `section_count` sections
    pub fn new(section_count: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![None; section_count])),
        }
    }

    pub fn section_count(&self) -> usize {
        self.entries.lock().len()
    }

    /// Record the current scroll position of a section
    ///
    /// Returns false, leaving the table unchanged, if `index` is out of range.
    pub fn set(&self, index: usize, metrics: ScrollMetrics) -> bool {
        let mut entries = self.entries.lock();
        let count = entries.len();
        match entries.get_mut(index) {
            Some(slot) => {
                *slot = Some(metrics);
                true
            }
            None => {
                tracing::trace!(index, sections = count, "scroll metrics for unknown section ignored");
                false
            }
        }
    }

    /// Forget a section, e.g. when it unmounts
    pub fn clear(&self, index: usize) {
        if let Some(slot) = self.entries.lock().get_mut(index) {
            *slot = None;
        }
    }

    pub fn get(&self, index: usize) -> Option<ScrollMetrics> {
        self.entries.lock().get(index).copied().flatten()
    }
}

impl SectionScroll for ScrollRegistry {
    fn scroll_metrics(&self, index: usize) -> Option<ScrollMetrics> {
        self.get(index)
    }
}
