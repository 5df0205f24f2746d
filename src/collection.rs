//! Apply server results to a locally held list by id
//!
//! After an edit or delete succeeds, the caller's list is updated in place
//! instead of being refetched. Items other than the target are untouched and
//! keep their order.

use crate::models::Upload;

/// Anything addressed by a server-assigned id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Upload {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Replace the item whose id matches `updated`.
///
/// Returns `false` (and leaves the list unchanged) when no item matches.
pub fn replace_by_id<T: Identified>(items: &mut [T], updated: T) -> bool {
    match items.iter_mut().find(|item| item.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove every item with the given id and return the first one removed.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let position = items.iter().position(|item| item.id() == id)?;
    let removed = items.remove(position);
    items.retain(|item| item.id() != id);
    Some(removed)
}
