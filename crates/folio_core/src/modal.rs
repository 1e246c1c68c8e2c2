//! Modal gate
//!
//! A shared boolean that says whether a blocking overlay (a project detail
//! dialog, for example) currently owns input. Every clone of a [`ModalGate`]
//! reads and writes the same flag, so a write is visible to every holder
//! before the next input event is handled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared modal-open flag
#[derive(Clone, Debug, Default)]
pub struct ModalGate {
    open: Arc<AtomicBool>,
}

impl ModalGate {
    /// Create a closed gate
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Set the flag. Last write wins.
    pub fn set_open(&self, open: bool) {
        let previous = self.open.swap(open, Ordering::SeqCst);
        if previous != open {
            tracing::debug!(open, "modal gate changed");
        }
    }

    /// Open the gate for the lifetime of the returned scope
    ///
    /// Mirrors an overlay mounting and unmounting: the flag is cleared when
    /// the scope is dropped.
    pub fn scope(&self) -> ModalScope {
        self.set_open(true);
        ModalScope { gate: self.clone() }
    }
}

/// Keeps a [`ModalGate`] open until dropped
#[derive(Debug)]
pub struct ModalScope {
    gate: ModalGate,
}

impl Drop for ModalScope {
    fn drop(&mut self) {
        self.gate.set_open(false);
    }
}
