//! # Identity Collections
//!
//! Generic CRUD semantics for an ordered collection of id-tagged entities.
//! Slice reducers build on this trait and layer their domain transitions
//! (page move/open) on top without special-casing them here.
//!
//! ## Semantics
//!
//! - **initialize**: the replacement collection is taken verbatim, no merge
//!   with prior state.
//! - **create**: append, preserving order.
//! - **delete**: filter out by identity.
//! - **update**: every entry whose id matches an incoming item is replaced
//!   wholesale (not merged field-by-field) with its revision bumped;
//!   untouched entries keep their exact `Tagged` entry.
//!
//! Validation is fail-fast: an unknown id on delete/update, or a duplicate
//! id on create, is a programming error in the caller and fails the whole
//! operation without touching state.

use std::collections::HashMap;

use crate::errors::StoreError;
use crate::id::{EntityId, Tagged};

pub trait IdentityCollection<T: Clone> {
    fn find_tagged(&self, id: EntityId) -> Option<&Tagged<T>>;

    fn contains_id(&self, id: EntityId) -> bool {
        self.find_tagged(id).is_some()
    }

    fn position_of(&self, id: EntityId) -> Option<usize>;

    /// Append `items`. Fails with `DuplicateIdentity` if any id is already
    /// present (or appears twice in `items`).
    fn with_created(&self, items: &[Tagged<T>]) -> Result<Vec<Tagged<T>>, StoreError>;

    /// Remove every entry matching an id in `items`. Fails with
    /// `MissingIdentity` if any id is unknown.
    fn with_deleted(&self, items: &[Tagged<T>]) -> Result<Vec<Tagged<T>>, StoreError>;

    /// Wholesale-replace every entry matching an id in `items`, bumping its
    /// revision. Fails with `MissingIdentity` if any id is unknown.
    fn with_updated(&self, items: &[Tagged<T>]) -> Result<Vec<Tagged<T>>, StoreError>;
}

impl<T: Clone> IdentityCollection<T> for [Tagged<T>] {
    fn find_tagged(&self, id: EntityId) -> Option<&Tagged<T>> {
        self.iter().find(|entry| entry.id() == id)
    }

    fn position_of(&self, id: EntityId) -> Option<usize> {
        self.iter().position(|entry| entry.id() == id)
    }

    fn with_created(&self, items: &[Tagged<T>]) -> Result<Vec<Tagged<T>>, StoreError> {
        let mut next = self.to_vec();
        for item in items {
            if next.iter().any(|entry| entry.id() == item.id()) {
                return Err(StoreError::DuplicateIdentity(item.id()));
            }
            next.push(item.clone());
        }
        Ok(next)
    }

    fn with_deleted(&self, items: &[Tagged<T>]) -> Result<Vec<Tagged<T>>, StoreError> {
        for item in items {
            if !self.contains_id(item.id()) {
                return Err(StoreError::MissingIdentity(item.id()));
            }
        }
        Ok(self
            .iter()
            .filter(|entry| !items.iter().any(|item| item.id() == entry.id()))
            .cloned()
            .collect())
    }

    fn with_updated(&self, items: &[Tagged<T>]) -> Result<Vec<Tagged<T>>, StoreError> {
        // Last wins when the payload carries the same id twice.
        let mut replacements: HashMap<EntityId, &Tagged<T>> = HashMap::new();
        for item in items {
            if !self.contains_id(item.id()) {
                return Err(StoreError::MissingIdentity(item.id()));
            }
            replacements.insert(item.id(), item);
        }
        Ok(self
            .iter()
            .map(|entry| match replacements.get(&entry.id()) {
                Some(item) => entry.replaced(item.value().clone()),
                None => entry.clone(),
            })
            .collect())
    }
}
