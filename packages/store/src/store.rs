//! # Root Store
//!
//! Composes the slice reducers into one state tree and runs the full
//! dispatch chain synchronously: classify → reduce → dirty flag → history
//! commit → subscriber notification, all before `dispatch` returns.
//!
//! Dispatch is not re-entrant. Reducers and subscribers must communicate
//! back into the store via plain `dispatch` calls after the current one
//! returns; a re-entrant call fails with [`StoreError::ReentrantDispatch`]
//! instead of silently corrupting state.
//!
//! The store caches the `(previous, current)` state pair across exactly one
//! transition, strictly for the slice-scoped subscription helpers built on
//! top; consumers must not assume history beyond one step back.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::actions::{Action, ActionKind, SiteAction, UiAction};
use crate::dirty::DirtyTracker;
use crate::errors::{HandlerError, StoreError};
use crate::history::{Clock, History, SystemClock};
use crate::id::Tagged;
use crate::model::{Element, Page, Site, UiState};
use crate::{elements, pages};

/// The whole application state tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub pages: Vec<Tagged<Page>>,
    pub elements: Vec<Tagged<Element>>,
    pub site: Site,
    pub ui: UiState,
}

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&State, &State) -> Result<(), HandlerError>>;

pub struct Store {
    history: History<State>,
    previous: State,
    dirty: DirtyTracker,
    clock: Arc<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    dispatching: bool,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(State::default())
    }

    pub fn with_state(initial: State) -> Self {
        Self::with_clock(initial, Arc::new(SystemClock))
    }

    pub fn with_clock(initial: State, clock: Arc<dyn Clock>) -> Self {
        Self {
            previous: initial.clone(),
            history: History::new(initial),
            dirty: DirtyTracker::default(),
            clock,
            listeners: Vec::new(),
            next_subscription: 0,
            dispatching: false,
        }
    }

    pub fn state(&self) -> &State {
        self.history.present()
    }

    /// The state before the most recent transition. For slice-scoped
    /// subscription helpers only.
    pub fn previous_state(&self) -> &State {
        &self.previous
    }

    /// Run an action through the reducer chain and notify subscribers.
    ///
    /// On a reducer error nothing is committed. On a handler error the
    /// reducer already ran: state is committed, the external view is
    /// possibly stale, and the caller may need to force a resync.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        if self.dispatching {
            return Err(StoreError::ReentrantDispatch);
        }
        if action.is_noop() {
            trace!(?action, "empty-payload action skipped");
            return Ok(());
        }

        let kind = action.kind();
        let next = reduce(self.state(), &action)?;
        debug!(?kind, "action reduced");

        // The dirty flag flips before subscribers run so a subscriber
        // reacting to this dispatch observes the post-action value.
        self.dirty.note(kind);
        self.previous = self.state().clone();
        match kind {
            ActionKind::Change => {
                let second = self.clock.now_second();
                self.history.commit_change(next, second);
            }
            ActionKind::Reset => self.history.commit_reset(next),
        }

        self.notify()
    }

    /// Register a listener called with `(previous, current)` on every
    /// committed transition, in registration order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&State, &State) -> Result<(), HandlerError> + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Step back one undo entry. Returns `Ok(false)` when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> Result<bool, StoreError> {
        if self.dispatching {
            return Err(StoreError::ReentrantDispatch);
        }
        if !self.history.can_undo() {
            return Ok(false);
        }
        self.previous = self.state().clone();
        self.history.undo();
        // The restored state differs from what was last loaded/saved.
        self.dirty.mark_dirty();
        self.notify()?;
        Ok(true)
    }

    /// Mirror of [`Store::undo`].
    pub fn redo(&mut self) -> Result<bool, StoreError> {
        if self.dispatching {
            return Err(StoreError::ReentrantDispatch);
        }
        if !self.history.can_redo() {
            return Ok(false);
        }
        self.previous = self.state().clone();
        self.history.redo();
        self.dirty.mark_dirty();
        self.notify()?;
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Clear the dirty flag after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty.mark_clean();
    }

    fn notify(&mut self) -> Result<(), StoreError> {
        self.dispatching = true;
        let mut result = Ok(());
        let current = self.history.present();
        for (_, listener) in self.listeners.iter_mut() {
            if let Err(error) = listener(&self.previous, current) {
                // Not caught: the first failing handler aborts the chain
                // and surfaces at the dispatch call site. State stays
                // committed either way.
                result = Err(StoreError::Handler(error));
                break;
            }
        }
        self.dispatching = false;
        result
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Root reducer: route the action to its slice, leave the rest untouched.
fn reduce(state: &State, action: &Action) -> Result<State, StoreError> {
    let mut next = state.clone();
    match action {
        Action::Page(action) => next.pages = pages::reduce(&state.pages, action)?,
        Action::Element(action) => next.elements = elements::reduce(&state.elements, action)?,
        Action::Site(SiteAction::Initialize(site)) => next.site = site.clone(),
        Action::Site(SiteAction::Update(patch)) => next.site = patch.apply_to(&state.site),
        Action::Ui(UiAction::Initialize(ui)) => next.ui = ui.clone(),
        Action::Ui(UiAction::Update(patch)) => next.ui = patch.apply_to(&state.ui),
    }
    Ok(next)
}
