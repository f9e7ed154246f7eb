//! Page slice reducer: CRUD plus the ordering/opening transitions.

use crate::actions::PageAction;
use crate::crud::IdentityCollection;
use crate::errors::StoreError;
use crate::id::Tagged;
use crate::model::Page;

pub fn reduce(state: &[Tagged<Page>], action: &PageAction) -> Result<Vec<Tagged<Page>>, StoreError> {
    match action {
        PageAction::Initialize(items) => Ok(items.clone()),
        PageAction::Create(items) => state.with_created(items),
        PageAction::Delete(items) => state.with_deleted(items),
        PageAction::Update(items) => state.with_updated(items),
        PageAction::Move { item, to } => {
            let from = state
                .position_of(item.id())
                .ok_or(StoreError::MissingIdentity(item.id()))?;
            let mut next = state.to_vec();
            let moved = next.remove(from);
            let to = (*to).min(next.len());
            next.insert(to, moved);
            Ok(next)
        }
        PageAction::Open(item) => {
            if !state.contains_id(item.id()) {
                return Err(StoreError::MissingIdentity(item.id()));
            }
            // Exactly one page keeps `opened` after this transition. Pages
            // whose flag already matches are left untouched so the diff
            // layer only sees the pages that actually flipped.
            Ok(state
                .iter()
                .map(|page| {
                    let opened = page.id() == item.id();
                    if page.opened == opened {
                        page.clone()
                    } else {
                        let mut value = page.value().clone();
                        value.opened = opened;
                        page.replaced(value)
                    }
                })
                .collect())
        }
    }
}
