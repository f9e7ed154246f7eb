//! # Siteweaver Store
//!
//! Application state core for a visual website builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ editor actions: dispatch(Action)            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: dirty tracker + undo/redo history    │
//! │  - CRUD slice reducers (pages, elements)    │
//! │  - singleton reducers (site, ui)            │
//! │  - ordered (prev, next) subscriber chain    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ sync crate: identity diff → side effects    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Identity is store-assigned**: entities are tagged once at ingestion;
//!    "same logical item" means same [`EntityId`], never deep equality
//! 2. **Wholesale replace**: updates swap whole entries and bump a revision
//!    counter, so change detection is `same id, different revision`
//! 3. **Synchronous dispatch**: reducers and subscribers run to completion
//!    before `dispatch` returns; re-entrancy is an error, not corruption
//! 4. **History is coarse on purpose**: undo steps coalesce by wall-clock
//!    second, and document loads clear history entirely
//!
//! ## Usage
//!
//! ```rust,ignore
//! use siteweaver_store::{tag, Action, PageAction, Store};
//!
//! let mut store = Store::new();
//! let pages = tag(vec![Page::new("Home", Link::page("home"))]);
//! store.dispatch(Action::Page(PageAction::Initialize(pages)))?;
//!
//! let page = store.state().pages[0].clone();
//! store.dispatch(Action::Page(PageAction::Open(page)))?;
//!
//! store.undo()?;
//! assert!(store.is_dirty());
//! ```

mod actions;
mod crud;
mod dirty;
mod elements;
mod errors;
mod history;
mod id;
mod model;
mod pages;
mod persist;
pub mod selectors;
mod store;

pub use actions::{
    Action, ActionKind, ElementAction, PageAction, SiteAction, SitePatch, UiAction, UiPatch,
};
pub use crud::IdentityCollection;
pub use errors::{HandlerError, StoreError};
pub use history::{Clock, History, ManualClock, SystemClock};
pub use id::{tag, tag_one, untag, EntityId, Tagged};
pub use model::{
    BreakpointStyles, Clipboard, Element, ElementContent, ElementType, Font, Link, LinkKind,
    LoadingPhase, Page, PublicationTarget, Site, UiState, Visibility,
};
pub use persist::{export_document, load_document, PersistedDocument, PersistedElement};
pub use store::{State, Store, SubscriptionId};
