//! # Undo/Redo History
//!
//! Wraps the root state in `{past, present, future}` snapshots.
//!
//! ## Design
//!
//! - Only CHANGE actions may push a checkpoint; RESET actions (document
//!   load) clear both stacks entirely — history from a previous document
//!   is meaningless, and any pending past/future is discarded silently.
//! - Consecutive CHANGE actions landing in the same wall-clock second are
//!   coalesced into one undo step. The second of the last action is kept
//!   and compared against the second of the incoming one, so a burst of
//!   keystrokes produces a single step while the first action of a new
//!   second opens a new one. Coarse on purpose; see DESIGN.md.
//! - `undo` moves present to future and pops the most recent past entry;
//!   `redo` is the mirror. Both are no-ops, not errors, on empty stacks.
//! - Depth is bounded: past the cap the oldest checkpoint is dropped.

use std::sync::atomic::{AtomicI64, Ordering};

use tracing::debug;

/// Wall clock feeding the coalescing window. Injectable so tests drive
/// time explicitly.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now_second(&self) -> i64;
}

/// Production clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_second(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Hand-driven clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(second: i64) -> Self {
        Self(AtomicI64::new(second))
    }

    pub fn set(&self, second: i64) {
        self.0.store(second, Ordering::Relaxed);
    }

    pub fn advance(&self, seconds: i64) {
        self.0.fetch_add(seconds, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_second(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Snapshot history around a present state.
#[derive(Debug)]
pub struct History<S> {
    past: Vec<S>,
    present: S,
    future: Vec<S>,
    /// Second of the last committed change; `None` forces the next change
    /// to open a fresh step.
    last_second: Option<i64>,
    /// Maximum undo depth; 0 = unlimited.
    max_depth: usize,
}

impl<S: Clone> History<S> {
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    pub fn new(present: S) -> Self {
        Self::with_max_depth(present, Self::DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(present: S, max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
            last_second: None,
            max_depth,
        }
    }

    pub fn present(&self) -> &S {
        &self.present
    }

    /// Commit a CHANGE transition, checkpointing the outgoing state unless
    /// it coalesces into the current step.
    pub fn commit_change(&mut self, next: S, second: i64) {
        if self.last_second != Some(second) {
            self.past.push(self.present.clone());
            if self.max_depth > 0 && self.past.len() > self.max_depth {
                self.past.remove(0);
            }
            debug!(depth = self.past.len(), "history checkpoint");
        }
        self.last_second = Some(second);
        self.present = next;
        // New change invalidates the redo branch, coalesced or not.
        self.future.clear();
    }

    /// Commit a RESET transition: replace present, discard all history.
    pub fn commit_reset(&mut self, next: S) {
        if !self.past.is_empty() || !self.future.is_empty() {
            debug!(
                discarded_past = self.past.len(),
                discarded_future = self.future.len(),
                "history cleared by reset"
            );
        }
        self.past.clear();
        self.future.clear();
        self.last_second = None;
        self.present = next;
    }

    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                let present = std::mem::replace(&mut self.present, previous);
                self.future.push(present);
                self.last_second = None;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let present = std::mem::replace(&mut self.present, next);
                self.past.push(present);
                self.last_second = None;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}
