use crate::domain::models::ShelfEntryWithBook;
use uuid::Uuid;

/// Whether `viewer` may see a shelf entry owned by `owner`.
///
/// The owner always sees their own entries; everyone else, including
/// anonymous viewers, only sees entries flagged public. Fail-closed: an
/// absent viewer identity is never the owner.
pub fn entry_visible_to(viewer: Option<Uuid>, owner: Uuid, is_public: bool) -> bool {
    match viewer {
        Some(viewer_id) if viewer_id == owner => true,
        _ => is_public,
    }
}

/// Drop entries the viewer is not allowed to see.
pub fn filter_visible(
    entries: Vec<ShelfEntryWithBook>,
    viewer: Option<Uuid>,
) -> Vec<ShelfEntryWithBook> {
    entries
        .into_iter()
        .filter(|e| entry_visible_to(viewer, e.entry.user_id, e.entry.is_public))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_sees_private_entries() {
        let owner = Uuid::from_u128(1);
        assert!(entry_visible_to(Some(owner), owner, false));
        assert!(entry_visible_to(Some(owner), owner, true));
    }

    #[test]
    fn non_owner_sees_only_public_entries() {
        let owner = Uuid::from_u128(1);
        let viewer = Uuid::from_u128(2);
        assert!(!entry_visible_to(Some(viewer), owner, false));
        assert!(entry_visible_to(Some(viewer), owner, true));
    }

    #[test]
    fn anonymous_viewer_is_never_the_owner() {
        let owner = Uuid::from_u128(1);
        assert!(!entry_visible_to(None, owner, false));
        assert!(entry_visible_to(None, owner, true));
    }
}
