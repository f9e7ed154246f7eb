//! Suppression gate for side-effect handlers.
//!
//! While the gate is stopped every registered handler is a no-op. Used
//! during bulk document load: close the gate, tag and initialize every
//! slice, reopen, then one explicit sync (or the next natural transition)
//! renders the full document in a single pass instead of element by
//! element.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Shared start/stop switch. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    stopped: Arc<AtomicBool>,
}

impl Gate {
    /// A running gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate created stopped, for wiring handlers up before a bulk load.
    pub fn stopped() -> Self {
        let gate = Self::new();
        gate.stop();
        gate
    }

    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            debug!("sync gate closed");
        }
    }

    pub fn start(&self) {
        if self.stopped.swap(false, Ordering::SeqCst) {
            debug!("sync gate opened");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
