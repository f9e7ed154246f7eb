//! Dirty-state tracking: "unsaved changes since last load/save".

use crate::actions::ActionKind;

/// Flips on every CHANGE action, clears on RESET or an explicit
/// [`DirtyTracker::mark_clean`]. No bearing on undo/redo; exists so the
/// save-prompt collaborator can query it.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    dirty: bool,
}

impl DirtyTracker {
    pub fn note(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::Change => self.dirty = true,
            ActionKind::Reset => self.dirty = false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
