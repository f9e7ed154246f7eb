//! Wiring between the store's subscriber chain and the diff observers.
//!
//! CRUD slices (pages, elements) get a [`CrudObserver`] fed from the
//! `(prev, next)` pair of every committed transition. Singleton slices
//! (site, ui) get plain before/after watchers invoked only when the slice
//! value actually changed. All of them respect the shared [`Gate`].

use std::cell::RefCell;
use std::rc::Rc;

use siteweaver_store::{
    Element, HandlerError, Page, Site, State, Store, SubscriptionId, Tagged, UiState,
};

use crate::gate::Gate;
use crate::observer::{CrudHandlers, CrudObserver};

/// Handle to an observed CRUD slice: keeps the subscription id and access
/// to the observer for explicit syncs.
pub struct WatchHandle<T, H: CrudHandlers<T>> {
    observer: Rc<RefCell<CrudObserver<T, H>>>,
    subscription: SubscriptionId,
}

impl<T, H: CrudHandlers<T>> WatchHandle<T, H> {
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    /// Replay the given collection as one full add batch. Callers pass the
    /// current slice, e.g. `handle.sync(&store.state().pages)`.
    pub fn sync(&self, current: &[Tagged<T>]) -> Result<(), HandlerError> {
        self.observer.borrow_mut().sync(current)
    }

    /// Detach from the store. The observer is dropped with the handle.
    pub fn unsubscribe(self, store: &mut Store) {
        store.unsubscribe(self.subscription);
    }
}

fn observe_slice<T, H>(
    store: &mut Store,
    handlers: H,
    gate: &Gate,
    slice: fn(&State) -> &[Tagged<T>],
) -> WatchHandle<T, H>
where
    T: 'static,
    H: CrudHandlers<T> + 'static,
{
    let observer = Rc::new(RefCell::new(CrudObserver::new(handlers, gate.clone())));
    let shared = Rc::clone(&observer);
    let subscription =
        store.subscribe(move |prev, next| shared.borrow_mut().notify(slice(prev), slice(next)));
    WatchHandle {
        observer,
        subscription,
    }
}

/// Observe the page collection.
pub fn observe_pages<H>(store: &mut Store, handlers: H, gate: &Gate) -> WatchHandle<Page, H>
where
    H: CrudHandlers<Page> + 'static,
{
    observe_slice(store, handlers, gate, |state| &state.pages)
}

/// Observe the element collection.
pub fn observe_elements<H>(store: &mut Store, handlers: H, gate: &Gate) -> WatchHandle<Element, H>
where
    H: CrudHandlers<Element> + 'static,
{
    observe_slice(store, handlers, gate, |state| &state.elements)
}

/// Watch the site singleton. `watcher(before, after)` runs only when the
/// value changed.
pub fn observe_site<F>(store: &mut Store, gate: &Gate, mut watcher: F) -> SubscriptionId
where
    F: FnMut(&Site, &Site) -> Result<(), HandlerError> + 'static,
{
    let gate = gate.clone();
    store.subscribe(move |prev, next| {
        if gate.is_stopped() || prev.site == next.site {
            return Ok(());
        }
        watcher(&prev.site, &next.site)
    })
}

/// Watch the ui singleton. Same contract as [`observe_site`].
pub fn observe_ui<F>(store: &mut Store, gate: &Gate, mut watcher: F) -> SubscriptionId
where
    F: FnMut(&UiState, &UiState) -> Result<(), HandlerError> + 'static,
{
    let gate = gate.clone();
    store.subscribe(move |prev, next| {
        if gate.is_stopped() || prev.ui == next.ui {
            return Ok(());
        }
        watcher(&prev.ui, &next.ui)
    })
}
