//! # Actions
//!
//! Closed sum types for every state transition, one enum per slice,
//! exhaustively matched by the reducers. The CRUD-backed slices (pages,
//! elements) share the `Initialize / Create / Delete / Update` shape; the
//! page slice layers its domain transitions (`Move`, `Open`) on top. The
//! singleton slices (site, ui) take `Initialize` (wholesale replace) and
//! `Update` (shallow merge via a patch of `Option` fields).
//!
//! Every action classifies as either RESET (the `Initialize` of any slice)
//! or CHANGE (everything else). The history manager and the dirty tracker
//! both key off this classification.

use std::collections::BTreeSet;

use crate::id::{EntityId, Tagged};
use crate::model::{
    Clipboard, Element, Font, LoadingPhase, Page, PublicationTarget, Site, UiState,
};

/// RESET clears history and the dirty flag; CHANGE contributes to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Change,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    /// Replace the collection wholesale. No merge with prior state.
    Initialize(Vec<Tagged<Page>>),
    Create(Vec<Tagged<Page>>),
    Delete(Vec<Tagged<Page>>),
    Update(Vec<Tagged<Page>>),
    /// Remove `item` from its position and reinsert at `to` (clamped);
    /// order of the untouched remainder is preserved.
    Move { item: Tagged<Page>, to: usize },
    /// Set `opened` on the match, clear it on whichever page had it.
    Open(Tagged<Page>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementAction {
    Initialize(Vec<Tagged<Element>>),
    Create(Vec<Tagged<Element>>),
    Delete(Vec<Tagged<Element>>),
    Update(Vec<Tagged<Element>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SiteAction {
    Initialize(Site),
    Update(SitePatch),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Initialize(UiState),
    Update(UiPatch),
}

/// Shallow-merge patch for the site singleton. `None` leaves a field alone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SitePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lang: Option<String>,
    pub enable_mobile: Option<bool>,
    pub head: Option<String>,
    pub fonts: Option<Vec<Font>>,
    pub styles: Option<std::collections::BTreeMap<String, String>>,
    pub publication: Option<PublicationTarget>,
}

impl SitePatch {
    pub fn apply_to(&self, site: &Site) -> Site {
        let mut next = site.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(lang) = &self.lang {
            next.lang = lang.clone();
        }
        if let Some(enable_mobile) = self.enable_mobile {
            next.enable_mobile = enable_mobile;
        }
        if let Some(head) = &self.head {
            next.head = head.clone();
        }
        if let Some(fonts) = &self.fonts {
            next.fonts = fonts.clone();
        }
        if let Some(styles) = &self.styles {
            next.styles = styles.clone();
        }
        if let Some(publication) = &self.publication {
            next.publication = publication.clone();
        }
        next
    }
}

/// Shallow-merge patch for the ui singleton. The double `Option` on
/// `current_page` and `clipboard` distinguishes "leave alone" from
/// "set to none".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiPatch {
    pub loading: Option<LoadingPhase>,
    pub current_page: Option<Option<EntityId>>,
    pub mobile_editor: Option<bool>,
    pub clipboard: Option<Option<Clipboard>>,
    pub dialogs: Option<BTreeSet<String>>,
}

impl UiPatch {
    pub fn apply_to(&self, ui: &UiState) -> UiState {
        let mut next = ui.clone();
        if let Some(loading) = self.loading {
            next.loading = loading;
        }
        if let Some(current_page) = self.current_page {
            next.current_page = current_page;
        }
        if let Some(mobile_editor) = self.mobile_editor {
            next.mobile_editor = mobile_editor;
        }
        if let Some(clipboard) = &self.clipboard {
            next.clipboard = clipboard.clone();
        }
        if let Some(dialogs) = &self.dialogs {
            next.dialogs = dialogs.clone();
        }
        next
    }
}

/// A state transition on any slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Page(PageAction),
    Element(ElementAction),
    Site(SiteAction),
    Ui(UiAction),
}

impl Action {
    /// RESET for every slice `Initialize`, CHANGE for everything else.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Page(PageAction::Initialize(_))
            | Action::Element(ElementAction::Initialize(_))
            | Action::Site(SiteAction::Initialize(_))
            | Action::Ui(UiAction::Initialize(_)) => ActionKind::Reset,
            _ => ActionKind::Change,
        }
    }

    /// Empty-payload CRUD actions are successful no-ops: no reducer run,
    /// no history step, no dirty flip, no notification.
    pub fn is_noop(&self) -> bool {
        match self {
            Action::Page(PageAction::Create(items))
            | Action::Page(PageAction::Delete(items))
            | Action::Page(PageAction::Update(items)) => items.is_empty(),
            Action::Element(ElementAction::Create(items))
            | Action::Element(ElementAction::Delete(items))
            | Action::Element(ElementAction::Update(items)) => items.is_empty(),
            _ => false,
        }
    }
}
