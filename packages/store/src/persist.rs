//! # Persisted Document Shape
//!
//! The wire/disk shape is a plain `{site, pages, elements}` object with
//! identity tokens stripped; re-import always re-tags. Because element
//! parent/child links are by identity in the store, export rewrites them to
//! ordinal string keys and import remaps those keys onto freshly tagged
//! entities.
//!
//! Loading bulk-initializes every slice. Callers bulk-loading under a live
//! renderer are expected to close the sync gate first (see the sync crate)
//! so the external document is not mutated element-by-element during
//! population.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ElementAction, PageAction, SiteAction, UiAction};
use crate::errors::StoreError;
use crate::id::{tag, untag, EntityId, Tagged};
use crate::model::{
    BreakpointStyles, Element, ElementContent, ElementType, Page, Site, UiState, Visibility,
};
use crate::store::{State, Store};

/// `Element` with identity links rewritten to durable string keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedElement {
    pub key: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub styles: BreakpointStyles,
    pub visibility: Visibility,
    pub content: Option<ElementContent>,
    pub pages: BTreeSet<String>,
}

/// The full persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub site: Site,
    pub pages: Vec<Page>,
    pub elements: Vec<PersistedElement>,
}

/// Snapshot the current state into the persisted shape. Never mutates the
/// store; identity tokens do not survive the trip.
pub fn export_document(state: &State) -> PersistedDocument {
    let keys: HashMap<EntityId, String> = state
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| (element.id(), format!("e{index}")))
        .collect();

    let elements = state
        .elements
        .iter()
        .map(|element| PersistedElement {
            key: keys[&element.id()].clone(),
            element_type: element.element_type,
            parent: element
                .parent
                .and_then(|parent_id| keys.get(&parent_id).cloned()),
            children: element
                .children
                .iter()
                .filter_map(|child_id| keys.get(child_id).cloned())
                .collect(),
            styles: element.styles.clone(),
            visibility: element.visibility,
            content: element.content.clone(),
            pages: element.pages.clone(),
        })
        .collect();

    PersistedDocument {
        site: state.site.clone(),
        pages: untag(&state.pages),
        elements,
    }
}

/// Tag a persisted document and initialize every slice of the store with
/// it: site, pages, elements, then a ui reset pointing at the opened page.
///
/// Exactly one page ends up opened: the first flagged one wins, or the
/// first page when none is flagged.
pub fn load_document(store: &mut Store, document: &PersistedDocument) -> Result<(), StoreError> {
    let mut pages = document.pages.clone();
    let first_opened = pages.iter().position(|page| page.opened).unwrap_or(0);
    for (index, page) in pages.iter_mut().enumerate() {
        page.opened = index == first_opened;
    }
    let pages = tag(pages);

    let elements = tag_elements(&document.elements)?;

    store.dispatch(Action::Site(SiteAction::Initialize(document.site.clone())))?;
    store.dispatch(Action::Page(PageAction::Initialize(pages.clone())))?;
    store.dispatch(Action::Element(ElementAction::Initialize(elements)))?;
    store.dispatch(Action::Ui(UiAction::Initialize(UiState {
        current_page: pages.get(first_opened).map(|page| page.id()),
        ..UiState::default()
    })))?;
    Ok(())
}

/// Tag persisted elements and remap their string links onto the fresh ids.
fn tag_elements(persisted: &[PersistedElement]) -> Result<Vec<Tagged<Element>>, StoreError> {
    // Two passes: ids first so links can point forward.
    let tagged = tag(
        persisted
            .iter()
            .map(|element| Element {
                element_type: element.element_type,
                parent: None,
                children: Vec::new(),
                styles: element.styles.clone(),
                visibility: element.visibility,
                content: element.content.clone(),
                pages: element.pages.clone(),
            })
            .collect(),
    );

    let by_key: HashMap<&str, EntityId> = persisted
        .iter()
        .zip(&tagged)
        .map(|(element, entry)| (element.key.as_str(), entry.id()))
        .collect();
    let resolve = |key: &String| -> Result<EntityId, StoreError> {
        by_key
            .get(key.as_str())
            .copied()
            .ok_or_else(|| StoreError::UnknownLink(key.clone()))
    };

    persisted
        .iter()
        .zip(&tagged)
        .map(|(element, entry)| {
            let mut value = entry.value().clone();
            value.parent = element.parent.as_ref().map(resolve).transpose()?;
            value.children = element.children.iter().map(resolve).collect::<Result<_, _>>()?;
            Ok(entry.with_value(value))
        })
        .collect()
}
