//! End-to-end observer flows against a live store.
//!
//! This tests:
//! - At-most-once batched handler calls per transition
//! - Gated bulk load followed by an explicit full sync
//! - Handler failure surfacing from dispatch with state committed
//! - Singleton watchers firing only on change

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use siteweaver_store::{
    load_document, tag, Action, Element, ElementAction, ElementType, HandlerError, Link,
    ManualClock, Page, PageAction, PersistedDocument, PersistedElement, SiteAction, SitePatch,
    State, Store, StoreError, Tagged, UiAction, UiPatch,
};
use siteweaver_sync::{observe_elements, observe_pages, observe_site, observe_ui, CrudHandlers, Gate};

/// Records one entry per handler call: (bucket, batch size).
#[derive(Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<(&'static str, usize)>>>,
    fail_on_add: bool,
}

impl Recorder {
    fn new() -> (Self, Rc<RefCell<Vec<(&'static str, usize)>>>) {
        let recorder = Self::default();
        let calls = Rc::clone(&recorder.calls);
        (recorder, calls)
    }
}

impl<T> CrudHandlers<T> for Recorder {
    fn on_add(&mut self, added: &[&Tagged<T>]) -> Result<(), HandlerError> {
        if self.fail_on_add {
            return Err(HandlerError::new("renderer rejected batch"));
        }
        self.calls.borrow_mut().push(("add", added.len()));
        Ok(())
    }

    fn on_delete(&mut self, deleted: &[&Tagged<T>]) -> Result<(), HandlerError> {
        self.calls.borrow_mut().push(("delete", deleted.len()));
        Ok(())
    }

    fn on_update(&mut self, updated: &[(&Tagged<T>, &Tagged<T>)]) -> Result<(), HandlerError> {
        self.calls.borrow_mut().push(("update", updated.len()));
        Ok(())
    }
}

fn test_store() -> Store {
    Store::with_clock(State::default(), Arc::new(ManualClock::new(0)))
}

fn page(name: &str) -> Page {
    Page::new(name, Link::page(name.to_lowercase().replace(' ', "-")))
}

fn sample_document() -> PersistedDocument {
    let mut home = page("Home");
    home.opened = true;
    PersistedDocument {
        site: Default::default(),
        pages: vec![home, page("About")],
        elements: vec![
            PersistedElement {
                key: "e0".into(),
                element_type: ElementType::Section,
                parent: None,
                children: vec!["e1".into()],
                styles: Default::default(),
                visibility: Default::default(),
                content: None,
                pages: Default::default(),
            },
            PersistedElement {
                key: "e1".into(),
                element_type: ElementType::Text,
                parent: Some("e0".into()),
                children: vec![],
                styles: Default::default(),
                visibility: Default::default(),
                content: None,
                pages: Default::default(),
            },
        ],
    }
}

#[test]
fn one_create_with_three_items_is_one_add_call() {
    let mut store = test_store();
    let gate = Gate::new();
    let (recorder, calls) = Recorder::new();
    let _pages = observe_pages(&mut store, recorder, &gate);

    store
        .dispatch(Action::Page(PageAction::Create(tag(vec![
            page("Page 1"),
            page("Page 2"),
            page("Page 3"),
        ]))))
        .unwrap();

    assert_eq!(*calls.borrow(), [("add", 3)]);
}

#[test]
fn steady_state_transition_batches_each_bucket_once() {
    let mut store = test_store();
    let gate = Gate::new();
    let (recorder, calls) = Recorder::new();
    let _pages = observe_pages(&mut store, recorder, &gate);

    store
        .dispatch(Action::Page(PageAction::Create(tag(vec![
            page("Page 1"),
            page("Page 2"),
        ]))))
        .unwrap();
    calls.borrow_mut().clear();

    // One dispatch deleting one page and one updating the other.
    let first = store.state().pages[0].clone();
    store
        .dispatch(Action::Page(PageAction::Delete(vec![first])))
        .unwrap();
    let second = store.state().pages[0].clone();
    let mut renamed = second.value().clone();
    renamed.name = "Renamed".into();
    store
        .dispatch(Action::Page(PageAction::Update(vec![
            second.with_value(renamed),
        ])))
        .unwrap();

    assert_eq!(*calls.borrow(), [("delete", 1), ("update", 1)]);
}

#[test]
fn update_pairs_carry_from_and_to() {
    struct PairCheck {
        seen: Rc<RefCell<Vec<(String, String)>>>,
    }
    impl CrudHandlers<Page> for PairCheck {
        fn on_update(
            &mut self,
            updated: &[(&Tagged<Page>, &Tagged<Page>)],
        ) -> Result<(), HandlerError> {
            for (from, to) in updated {
                assert_eq!(from.id(), to.id());
                assert!(to.revision() > from.revision());
                self.seen
                    .borrow_mut()
                    .push((from.name.clone(), to.name.clone()));
            }
            Ok(())
        }
    }

    let mut store = test_store();
    let gate = Gate::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _pages = observe_pages(
        &mut store,
        PairCheck {
            seen: Rc::clone(&seen),
        },
        &gate,
    );

    store
        .dispatch(Action::Page(PageAction::Create(tag(vec![page("Old")]))))
        .unwrap();
    let current = store.state().pages[0].clone();
    let mut renamed = current.value().clone();
    renamed.name = "New".into();
    store
        .dispatch(Action::Page(PageAction::Update(vec![
            current.with_value(renamed),
        ])))
        .unwrap();

    assert_eq!(*seen.borrow(), [("Old".to_string(), "New".to_string())]);
}

#[test]
fn gated_bulk_load_fires_nothing_until_explicit_sync() -> anyhow::Result<()> {
    let mut store = test_store();
    let gate = Gate::stopped();
    let (page_recorder, page_calls) = Recorder::new();
    let (element_recorder, element_calls) = Recorder::new();
    let pages = observe_pages(&mut store, page_recorder, &gate);
    let elements = observe_elements(&mut store, element_recorder, &gate);

    load_document(&mut store, &sample_document())?;
    assert!(page_calls.borrow().is_empty());
    assert!(element_calls.borrow().is_empty());

    gate.start();
    pages.sync(&store.state().pages)?;
    elements.sync(&store.state().elements)?;

    assert_eq!(*page_calls.borrow(), [("add", 2)]);
    assert_eq!(*element_calls.borrow(), [("add", 2)]);
    Ok(())
}

#[test]
fn reopened_gate_makes_next_transition_a_full_pass() {
    let mut store = test_store();
    let gate = Gate::stopped();
    let (recorder, calls) = Recorder::new();
    let _pages = observe_pages(&mut store, recorder, &gate);

    load_document(&mut store, &sample_document()).unwrap();
    gate.start();

    // The observer never saw the bulk load, so the next natural transition
    // replays the whole collection as added.
    store
        .dispatch(Action::Page(PageAction::Create(tag(vec![page("Extra")]))))
        .unwrap();

    assert_eq!(*calls.borrow(), [("add", 3)]);
}

#[test]
fn handler_failure_surfaces_with_state_committed() {
    let mut store = test_store();
    let gate = Gate::new();
    let (mut recorder, _calls) = Recorder::new();
    recorder.fail_on_add = true;
    let pages = observe_pages(&mut store, recorder, &gate);

    let err = store
        .dispatch(Action::Page(PageAction::Create(tag(vec![page("Page 1")]))))
        .unwrap_err();
    assert!(matches!(err, StoreError::Handler(_)));
    // Reducer already ran: state updated, external view stale.
    assert_eq!(store.state().pages.len(), 1);

    // Recovery: resync replays the committed state.
    let (recorder, calls) = Recorder::new();
    pages.unsubscribe(&mut store);
    let pages = observe_pages(&mut store, recorder, &gate);
    pages.sync(&store.state().pages).unwrap();
    assert_eq!(*calls.borrow(), [("add", 1)]);
}

#[test]
fn site_watcher_fires_only_on_change() {
    let mut store = test_store();
    let gate = Gate::new();
    let titles = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&titles);
    observe_site(&mut store, &gate, move |before, after| {
        sink.borrow_mut()
            .push((before.title.clone(), after.title.clone()));
        Ok(())
    });

    // A page-slice change leaves the site untouched: no call.
    store
        .dispatch(Action::Page(PageAction::Create(tag(vec![page("Page 1")]))))
        .unwrap();
    assert!(titles.borrow().is_empty());

    store
        .dispatch(Action::Site(SiteAction::Update(SitePatch {
            title: Some("My Site".into()),
            ..SitePatch::default()
        })))
        .unwrap();
    assert_eq!(
        *titles.borrow(),
        [(String::new(), "My Site".to_string())]
    );
}

#[test]
fn ui_watcher_sees_dialog_changes() {
    let mut store = test_store();
    let gate = Gate::new();
    let calls = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&calls);
    observe_ui(&mut store, &gate, move |before, after| {
        assert_ne!(before, after);
        *sink.borrow_mut() += 1;
        Ok(())
    });

    let mut dialogs = std::collections::BTreeSet::new();
    dialogs.insert("publish".to_string());
    store
        .dispatch(Action::Ui(UiAction::Update(UiPatch {
            dialogs: Some(dialogs),
            ..UiPatch::default()
        })))
        .unwrap();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn undo_notifies_observers_with_reverse_diff() {
    let mut store = test_store();
    let gate = Gate::new();
    let (recorder, calls) = Recorder::new();
    let _pages = observe_pages(&mut store, recorder, &gate);

    store
        .dispatch(Action::Page(PageAction::Create(tag(vec![page("Page 1")]))))
        .unwrap();
    calls.borrow_mut().clear();

    store.undo().unwrap();
    assert_eq!(*calls.borrow(), [("delete", 1)]);

    calls.borrow_mut().clear();
    store.redo().unwrap();
    assert_eq!(*calls.borrow(), [("add", 1)]);
}

#[test]
fn element_observer_sees_created_subtree_as_one_batch() {
    let mut store = test_store();
    let gate = Gate::new();
    let (recorder, calls) = Recorder::new();
    let _elements = observe_elements(&mut store, recorder, &gate);

    let mut container = Element::new(ElementType::Container);
    let tagged_text = tag(vec![Element::new(ElementType::Text)]);
    container.children = vec![tagged_text[0].id()];
    let mut tagged = tag(vec![container]);
    let mut text_value = tagged_text[0].value().clone();
    text_value.parent = Some(tagged[0].id());
    tagged.push(tagged_text[0].with_value(text_value));

    store
        .dispatch(Action::Element(ElementAction::Create(tagged)))
        .unwrap();

    assert_eq!(*calls.borrow(), [("add", 2)]);
}
