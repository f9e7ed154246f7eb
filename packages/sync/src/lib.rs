//! # Siteweaver Sync
//!
//! Synchronizes external side effects (the live rendered document,
//! persistence triggers, notifications) with store transitions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ store: dispatch → (prev, next) subscribers  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ sync: identity diff per observed slice      │
//! │  - added / deleted / updated (from, to)     │
//! │  - one batched handler call per transition  │
//! │  - gate: suppress during bulk load          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ collaborators: DOM sync, save prompts, ...  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Bulk-load flow
//!
//! ```rust,ignore
//! let gate = Gate::stopped();
//! let elements = observe_elements(&mut store, DomSync::new(), &gate);
//!
//! load_document(&mut store, &document)?;   // no side effects fire
//!
//! gate.start();
//! elements.sync(&store.state().elements)?; // one full render pass
//! ```

mod gate;
mod observer;
mod watcher;

pub use gate::Gate;
pub use observer::{diff_collection, CollectionDiff, CrudHandlers, CrudObserver};
pub use watcher::{observe_elements, observe_pages, observe_site, observe_ui, WatchHandle};
