//! Element slice reducer: plain CRUD, no domain transitions.

use crate::actions::ElementAction;
use crate::crud::IdentityCollection;
use crate::errors::StoreError;
use crate::id::Tagged;
use crate::model::Element;

pub fn reduce(
    state: &[Tagged<Element>],
    action: &ElementAction,
) -> Result<Vec<Tagged<Element>>, StoreError> {
    match action {
        ElementAction::Initialize(items) => Ok(items.clone()),
        ElementAction::Create(items) => state.with_created(items),
        ElementAction::Delete(items) => state.with_deleted(items),
        ElementAction::Update(items) => state.with_updated(items),
    }
}
