//! Error types for the state store

use crate::id::EntityId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// An entity passed to UPDATE/DELETE carries an identity the collection
    /// does not know. Proceeding would corrupt the at-most-once diff
    /// guarantee, so the dispatch fails and state stays unchanged.
    #[error("no entity with identity {0} in the collection")]
    MissingIdentity(EntityId),

    /// An entity passed to CREATE is already in the collection.
    #[error("entity with identity {0} is already in the collection")]
    DuplicateIdentity(EntityId),

    /// `dispatch` was called while a dispatch was already running.
    #[error("dispatch called re-entrantly from a reducer or subscriber")]
    ReentrantDispatch,

    /// A persisted element references a link key that is not in the document.
    #[error("persisted element link references unknown key \"{0}\"")]
    UnknownLink(String),

    /// A side-effect handler failed. The reducer already ran, so state is
    /// committed and the external view is possibly stale.
    #[error("side-effect handler failed: {0}")]
    Handler(#[from] HandlerError),
}

/// Failure raised by a subscriber or diff handler. Never caught by the
/// store: it surfaces from the `dispatch` call that triggered it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct HandlerError(String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
