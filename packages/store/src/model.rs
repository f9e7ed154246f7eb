//! # Entity Model
//!
//! The four state slices of a website-builder document: pages and elements
//! (id-tagged collections) plus site and ui (singletons).
//!
//! `Page` and `Site` serialize directly into the persisted document shape.
//! `Element` and `UiState` carry [`EntityId`] links and therefore never
//! serialize as-is; the persistence layer rewrites element links into
//! durable keys instead (see `persist`).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::id::{EntityId, Tagged};

/// A page of the edited website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    pub link: Link,
    /// Exactly one page is opened once pages are initialized. Enforced by
    /// the page reducer's `Open` transition.
    pub opened: bool,
    pub can_delete: bool,
    pub can_move: bool,
    pub can_rename: bool,
    pub can_properties: bool,
}

impl Page {
    pub fn new(name: impl Into<String>, link: Link) -> Self {
        Self {
            name: name.into(),
            link,
            opened: false,
            can_delete: true,
            can_move: true,
            can_rename: true,
            can_properties: true,
        }
    }
}

/// Navigational link descriptor for a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub kind: LinkKind,
    pub value: String,
}

impl Link {
    pub fn page(value: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::Page,
            value: value.into(),
        }
    }

    pub fn url(value: impl Into<String>) -> Self {
        Self {
            kind: LinkKind::Url,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    Page,
    Url,
}

/// Element type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    Text,
    Image,
    Html,
    Container,
    Section,
    SectionContent,
}

/// Per-breakpoint style maps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BreakpointStyles {
    pub desktop: BTreeMap<String, String>,
    pub mobile: BTreeMap<String, String>,
}

/// Per-breakpoint visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub desktop: bool,
    pub mobile: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            desktop: true,
            mobile: true,
        }
    }
}

/// Content payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementContent {
    /// Inner HTML / text content.
    Inner(String),
    /// Reference to an asset (image source etc).
    Asset(String),
}

/// An element of the edited document tree.
///
/// Parent/child links are by identity and must stay consistent: a child id
/// appears in at most one parent's child list, and dropping a child link
/// does not delete the child.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub element_type: ElementType,
    /// `None` = root of a tree.
    pub parent: Option<EntityId>,
    /// Ordered child identities.
    pub children: Vec<EntityId>,
    pub styles: BreakpointStyles,
    pub visibility: Visibility,
    pub content: Option<ElementContent>,
    /// Page names this element is visible on; empty = all pages.
    pub pages: BTreeSet<String>,
}

impl Element {
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            parent: None,
            children: Vec::new(),
            styles: BreakpointStyles::default(),
            visibility: Visibility::default(),
            content: None,
            pages: BTreeSet::new(),
        }
    }
}

/// Font loaded by the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub href: String,
}

/// Where the site gets published. Descriptor only — the publication
/// transport lives outside the state core.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PublicationTarget {
    pub name: String,
    pub url: String,
}

/// Singleton site record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Site {
    pub title: String,
    pub description: String,
    pub lang: String,
    pub enable_mobile: bool,
    /// Raw markup injected into the published `<head>`.
    pub head: String,
    pub fonts: Vec<Font>,
    /// Named style rules, name → css text.
    pub styles: BTreeMap<String, String>,
    pub publication: PublicationTarget,
}

/// Loading phase of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingPhase {
    #[default]
    None,
    Website,
    App,
}

/// Clipboard snapshot: everything selected plus the roots of the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    pub all: Vec<Tagged<Element>>,
    pub roots: Vec<Tagged<Element>>,
}

/// Singleton editor-ui record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    pub loading: LoadingPhase,
    pub current_page: Option<EntityId>,
    pub mobile_editor: bool,
    pub clipboard: Option<Clipboard>,
    /// Names of currently visible dialogs.
    pub dialogs: BTreeSet<String>,
}
