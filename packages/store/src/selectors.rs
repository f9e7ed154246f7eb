//! Pure lookup helpers over the current state tree.

use crate::crud::IdentityCollection;
use crate::id::{EntityId, Tagged};
use crate::model::{Element, Page};
use crate::store::State;

pub fn page_by_id(state: &State, id: EntityId) -> Option<&Tagged<Page>> {
    state.pages.find_tagged(id)
}

pub fn element_by_id(state: &State, id: EntityId) -> Option<&Tagged<Element>> {
    state.elements.find_tagged(id)
}

/// The page with `opened == true`, if pages are initialized.
pub fn opened_page(state: &State) -> Option<&Tagged<Page>> {
    state.pages.iter().find(|page| page.opened)
}

/// The page the ui points at, falling back to the opened page.
pub fn current_page(state: &State) -> Option<&Tagged<Page>> {
    state
        .ui
        .current_page
        .and_then(|id| page_by_id(state, id))
        .or_else(|| opened_page(state))
}

/// Children of an element, in child-list order. Dangling child ids are
/// skipped.
pub fn children_of(state: &State, id: EntityId) -> Vec<&Tagged<Element>> {
    match element_by_id(state, id) {
        Some(parent) => parent
            .children
            .iter()
            .filter_map(|child_id| element_by_id(state, *child_id))
            .collect(),
        None => Vec::new(),
    }
}

pub fn parent_of(state: &State, id: EntityId) -> Option<&Tagged<Element>> {
    element_by_id(state, id)
        .and_then(|element| element.parent)
        .and_then(|parent_id| element_by_id(state, parent_id))
}

/// Elements visible on a page: membership set contains the page name, or
/// is empty (= visible everywhere).
pub fn elements_on_page<'a>(state: &'a State, page_name: &str) -> Vec<&'a Tagged<Element>> {
    state
        .elements
        .iter()
        .filter(|element| element.pages.is_empty() || element.pages.contains(page_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::tag;
    use crate::model::{ElementType, Link};

    fn state_with_tree() -> State {
        let mut elements = tag(vec![
            Element::new(ElementType::Container),
            Element::new(ElementType::Text),
            Element::new(ElementType::Image),
        ]);
        let (container, text, image) = (elements[0].id(), elements[1].id(), elements[2].id());

        let mut root = elements[0].value().clone();
        root.children = vec![text, image];
        elements[0] = elements[0].with_value(root);
        for child in &mut elements[1..] {
            let mut value = child.value().clone();
            value.parent = Some(container);
            *child = child.with_value(value);
        }

        let mut page_one = Page::new("Page 1", Link::page("page-1"));
        page_one.opened = true;
        State {
            pages: tag(vec![page_one, Page::new("Page 2", Link::page("page-2"))]),
            elements,
            ..State::default()
        }
    }

    #[test]
    fn children_follow_child_list_order() {
        let state = state_with_tree();
        let container = state.elements[0].id();
        let children = children_of(&state, container);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].element_type, ElementType::Text);
        assert_eq!(children[1].element_type, ElementType::Image);
    }

    #[test]
    fn parent_lookup_follows_identity() {
        let state = state_with_tree();
        let text = state.elements[1].id();
        assert_eq!(
            parent_of(&state, text).map(|p| p.id()),
            Some(state.elements[0].id())
        );
    }

    #[test]
    fn current_page_falls_back_to_opened() {
        let state = state_with_tree();
        assert_eq!(current_page(&state).map(|p| p.name.as_str()), Some("Page 1"));
    }

    #[test]
    fn empty_membership_means_every_page() {
        let mut state = state_with_tree();
        let mut value = state.elements[1].value().clone();
        value.pages.insert("page-2".into());
        state.elements[1] = state.elements[1].with_value(value);

        let on_page_one = elements_on_page(&state, "page-1");
        assert_eq!(on_page_one.len(), 2); // container + image, text excluded
        let on_page_two = elements_on_page(&state, "page-2");
        assert_eq!(on_page_two.len(), 3);
    }
}
