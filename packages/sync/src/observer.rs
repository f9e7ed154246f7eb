//! # Change-Diff Observer
//!
//! Computes added/deleted/updated sets between two successive collection
//! states by identity and hands them to batched side-effect handlers.
//!
//! ## Guarantees
//!
//! - Each handler is called **at most once per transition**, with the whole
//!   batch — the rendering collaborator does a single DOM write pass per
//!   batch, never one per item.
//! - Every entry lands in exactly one bucket: added, updated, or carried
//!   over unchanged (and deleted/updated/carried on the `prev` side).
//! - Handler errors are not caught here; they surface at the dispatch call
//!   site with state already committed.
//!
//! ## Lifecycle
//!
//! An observer starts unprimed: the first notification it processes treats
//! the previous collection as absent, so everything in `next` is added and
//! no deletes or updates are computed. After that it diffs every
//! transition. While the [`Gate`] is stopped, notifications are dropped
//! entirely and the observer stays unprimed, which is what makes the
//! bulk-load flow come out as one full add pass once the gate reopens.

use std::collections::HashSet;
use std::marker::PhantomData;

use siteweaver_store::{EntityId, HandlerError, Tagged};
use tracing::trace;

use crate::gate::Gate;

/// Batched side-effect handlers for one observed collection.
///
/// Default bodies are no-ops so implementors override only what they need.
pub trait CrudHandlers<T> {
    fn on_add(&mut self, _added: &[&Tagged<T>]) -> Result<(), HandlerError> {
        Ok(())
    }

    fn on_delete(&mut self, _deleted: &[&Tagged<T>]) -> Result<(), HandlerError> {
        Ok(())
    }

    /// `(from, to)` pairs: same identity, different revision.
    fn on_update(&mut self, _updated: &[(&Tagged<T>, &Tagged<T>)]) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Identity diff between two successive collection states.
#[derive(Debug)]
pub struct CollectionDiff<'a, T> {
    pub added: Vec<&'a Tagged<T>>,
    pub deleted: Vec<&'a Tagged<T>>,
    pub updated: Vec<(&'a Tagged<T>, &'a Tagged<T>)>,
}

impl<T> CollectionDiff<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.updated.is_empty()
    }
}

/// Diff `next` against `prev` by identity. With `prev` absent (first
/// population) everything is added and no deletes or updates exist.
pub fn diff_collection<'a, T>(
    prev: Option<&'a [Tagged<T>]>,
    next: &'a [Tagged<T>],
) -> CollectionDiff<'a, T> {
    let prev = match prev {
        Some(prev) => prev,
        None => {
            return CollectionDiff {
                added: next.iter().collect(),
                deleted: Vec::new(),
                updated: Vec::new(),
            }
        }
    };

    let prev_ids: HashSet<EntityId> = prev.iter().map(|entry| entry.id()).collect();
    let next_ids: HashSet<EntityId> = next.iter().map(|entry| entry.id()).collect();

    let added = next
        .iter()
        .filter(|entry| !prev_ids.contains(&entry.id()))
        .collect();
    let deleted = prev
        .iter()
        .filter(|entry| !next_ids.contains(&entry.id()))
        .collect();
    let updated = next
        .iter()
        .filter_map(|to| {
            prev.iter()
                .find(|from| from.id() == to.id())
                .filter(|from| from.revision() != to.revision())
                .map(|from| (from, to))
        })
        .collect();

    CollectionDiff {
        added,
        deleted,
        updated,
    }
}

/// Observer for one id-tagged collection slice.
pub struct CrudObserver<T, H: CrudHandlers<T>> {
    handlers: H,
    gate: Gate,
    primed: bool,
    _entity: PhantomData<fn(T)>,
}

impl<T, H: CrudHandlers<T>> CrudObserver<T, H> {
    pub fn new(handlers: H, gate: Gate) -> Self {
        Self {
            handlers,
            gate,
            primed: false,
            _entity: PhantomData,
        }
    }

    /// Feed one `(prev, next)` transition. Dropped while the gate is
    /// stopped; the first processed transition treats `prev` as absent.
    pub fn notify(&mut self, prev: &[Tagged<T>], next: &[Tagged<T>]) -> Result<(), HandlerError> {
        if self.gate.is_stopped() {
            return Ok(());
        }
        let diff = if self.primed {
            diff_collection(Some(prev), next)
        } else {
            diff_collection(None, next)
        };
        self.primed = true;
        self.invoke(diff)
    }

    /// Replay the full collection as one add batch: manual initial sync
    /// after a gated bulk load, or recovery resync after a handler
    /// failure left the external view stale.
    pub fn sync(&mut self, current: &[Tagged<T>]) -> Result<(), HandlerError> {
        if self.gate.is_stopped() {
            return Ok(());
        }
        self.primed = true;
        self.invoke(diff_collection(None, current))
    }

    fn invoke(&mut self, diff: CollectionDiff<'_, T>) -> Result<(), HandlerError> {
        trace!(
            added = diff.added.len(),
            deleted = diff.deleted.len(),
            updated = diff.updated.len(),
            "collection diff"
        );
        if !diff.added.is_empty() {
            self.handlers.on_add(&diff.added)?;
        }
        if !diff.deleted.is_empty() {
            self.handlers.on_delete(&diff.deleted)?;
        }
        if !diff.updated.is_empty() {
            self.handlers.on_update(&diff.updated)?;
        }
        Ok(())
    }
}
