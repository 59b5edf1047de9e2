use parking_lot::RwLock;

use crate::lifecycle::OrderState;
use crate::types::OwnedCourse;

/// Owned-orders cache for the current account, shared across all course
/// views in a session.
///
/// This is an explicit store object rather than ambient framework state:
/// callers hold it by reference and every mutation returns the snapshot the
/// UI should re-render from. Only the lifecycle controller mutates it after
/// a settlement; `invalidate` flags the cache stale so the owner refetches
/// from the contract instead of trusting local entries.
#[derive(Default)]
pub struct OwnedOrdersStore {
    entries: RwLock<Vec<OwnedCourse>>,
    stale: RwLock<bool>,
}

impl OwnedOrdersStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<OwnedCourse> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Find the entry for a course id. Later appended entries shadow
    /// earlier ones, so an optimistic append supersedes the stale entry it
    /// duplicates.
    pub fn lookup(&self, course_id: &str) -> Option<OwnedCourse> {
        self.entries
            .read()
            .iter()
            .rfind(|e| e.id == course_id)
            .cloned()
    }

    /// Append an optimistic entry and return the new snapshot.
    pub fn append(&self, entry: OwnedCourse) -> Vec<OwnedCourse> {
        let mut entries = self.entries.write();
        entries.push(entry);
        entries.clone()
    }

    /// Rewrite the state of the entry for `course_id` in place (the
    /// shadowing entry, when duplicates exist). Returns the new snapshot, or
    /// `None` when no entry matches; the caller decides whether a miss
    /// warrants invalidation.
    pub fn set_state(&self, course_id: &str, state: OrderState) -> Option<Vec<OwnedCourse>> {
        let mut entries = self.entries.write();
        let entry = entries.iter_mut().rfind(|e| e.id == course_id)?;
        entry.state = Some(state);
        Some(entries.clone())
    }

    /// Discard local entries and flag the cache for a refetch.
    pub fn invalidate(&self) {
        self.entries.write().clear();
        *self.stale.write() = true;
    }

    /// Whether the cache must be refetched before it can be trusted.
    pub fn is_stale(&self) -> bool {
        *self.stale.read()
    }

    /// Install a freshly fetched set of entries and clear the stale flag.
    pub fn replace(&self, entries: Vec<OwnedCourse>) -> Vec<OwnedCourse> {
        let mut guard = self.entries.write();
        *guard = entries;
        *self.stale.write() = false;
        guard.clone()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::OwnedOrdersStore;
    use crate::lifecycle::OrderState;
    use crate::types::OwnedCourse;

    fn entry(course_id: &str, state: Option<OrderState>) -> OwnedCourse {
        OwnedCourse {
            id: course_id.to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            cover_image: "c".to_string(),
            image: "i".to_string(),
            slug: "s".to_string(),
            course_type: "course".to_string(),
            owned_course_id: format!("order-{course_id}"),
            proof: "0xproof".to_string(),
            owned: "0xabc".to_string(),
            price: "1".to_string(),
            state,
        }
    }

    #[test]
    fn append_returns_grown_snapshot() {
        let store = OwnedOrdersStore::new();
        let snapshot = store.append(entry("c1", Some(OrderState::Purchased)));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.lookup("c1").is_some());
        assert!(store.lookup("c2").is_none());
    }

    #[test]
    fn set_state_rewrites_in_place_without_duplicating() {
        let store = OwnedOrdersStore::new();
        store.append(entry("c1", Some(OrderState::Deactivated)));
        store.append(entry("c2", Some(OrderState::Activated)));

        let snapshot = store.set_state("c1", OrderState::Purchased).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            store.lookup("c1").and_then(|e| e.state),
            Some(OrderState::Purchased)
        );
        assert_eq!(
            store.lookup("c2").and_then(|e| e.state),
            Some(OrderState::Activated)
        );
    }

    #[test]
    fn later_appends_shadow_earlier_entries() {
        let store = OwnedOrdersStore::new();
        store.append(entry("c1", Some(OrderState::Activated)));
        store.append(entry("c1", Some(OrderState::Delivered)));

        assert_eq!(
            store.lookup("c1").and_then(|e| e.state),
            Some(OrderState::Delivered)
        );

        let snapshot = store.set_state("c1", OrderState::Completed).unwrap();
        assert_eq!(snapshot[0].state, Some(OrderState::Activated));
        assert_eq!(snapshot[1].state, Some(OrderState::Completed));
        assert_eq!(
            store.lookup("c1").and_then(|e| e.state),
            Some(OrderState::Completed)
        );
    }

    #[test]
    fn set_state_misses_return_none_and_leave_store_untouched() {
        let store = OwnedOrdersStore::new();
        store.append(entry("c1", Some(OrderState::Purchased)));
        assert!(store.set_state("c9", OrderState::Purchased).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn invalidate_clears_and_flags_until_replaced() {
        let store = OwnedOrdersStore::new();
        store.append(entry("c1", Some(OrderState::Purchased)));
        assert!(!store.is_stale());

        store.invalidate();
        assert!(store.is_stale());
        assert!(store.is_empty());

        let snapshot = store.replace(vec![entry("c1", Some(OrderState::Purchased))]);
        assert!(!store.is_stale());
        assert_eq!(snapshot.len(), 1);
    }
}
