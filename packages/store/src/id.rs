//! # Entity Identity
//!
//! Every entity entering a store collection is wrapped in [`Tagged`], which
//! carries a process-unique [`EntityId`] and a revision counter. Two entities
//! are "the same logical item" iff their ids are equal; an entry changed iff
//! the id is equal and the revision differs. Nothing else — in particular not
//! the content — participates in identity.
//!
//! Tagging is deliberately not idempotent: re-tagging already-tagged data
//! produces new, unrelated identities. Callers tag exactly once at ingestion
//! (load from storage) and propagate ids through every update via
//! [`Tagged::with_value`].

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token. Never derived from content, never reused, never
/// equal across two ingestions of structurally identical data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        EntityId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entity plus its store-assigned identity and revision.
///
/// The revision is bumped by the collection on every wholesale replace, so
/// "same id, different revision" detects change without deep comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<T> {
    id: EntityId,
    revision: u64,
    value: T,
}

impl<T> Tagged<T> {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Replacement payload for an update: same identity, new content.
    /// The collection bumps the revision when the replacement lands.
    pub fn with_value(&self, value: T) -> Tagged<T> {
        Tagged {
            id: self.id,
            revision: self.revision,
            value,
        }
    }

    /// Wholesale replace performed by the collection itself.
    pub(crate) fn replaced(&self, value: T) -> Tagged<T> {
        Tagged {
            id: self.id,
            revision: self.revision + 1,
            value,
        }
    }
}

impl<T> Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

/// Attach a fresh unique id to each item, preserving order.
pub fn tag<T>(items: Vec<T>) -> Vec<Tagged<T>> {
    items.into_iter().map(tag_one).collect()
}

/// Attach a fresh unique id to a single item.
pub fn tag_one<T>(value: T) -> Tagged<T> {
    Tagged {
        id: EntityId::next(),
        revision: 0,
        value,
    }
}

/// Strip identity, producing plain data suitable for persistence.
pub fn untag<T: Clone>(items: &[Tagged<T>]) -> Vec<T> {
    items.iter().map(|item| item.value.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_order_preserved() {
        let tagged = tag(vec!["a", "b", "c"]);
        assert_eq!(tagged.len(), 3);
        assert_eq!(*tagged[0].value(), "a");
        assert_eq!(*tagged[2].value(), "c");
        assert_ne!(tagged[0].id(), tagged[1].id());
        assert_ne!(tagged[1].id(), tagged[2].id());
    }

    #[test]
    fn retagging_produces_fresh_identities() {
        let first = tag(vec!["x"]);
        let second = tag(untag(&first));
        assert_ne!(first[0].id(), second[0].id());
        assert_eq!(first[0].value(), second[0].value());
    }

    #[test]
    fn with_value_keeps_identity_and_revision() {
        let item = tag_one(1u32);
        let replacement = item.with_value(2);
        assert_eq!(item.id(), replacement.id());
        assert_eq!(item.revision(), replacement.revision());
        assert_eq!(*replacement.value(), 2);
    }

    #[test]
    fn replaced_bumps_revision() {
        let item = tag_one(1u32);
        let replaced = item.replaced(2);
        assert_eq!(item.id(), replaced.id());
        assert_eq!(replaced.revision(), item.revision() + 1);
    }
}
