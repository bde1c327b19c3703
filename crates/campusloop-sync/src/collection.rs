//! Ordered, id-keyed mirror of server entities.
//!
//! New entities go to the front (live feed order); updates keep their
//! position. Every operation is idempotent, so a local call's success and
//! the matching broadcast can land in either order and still converge.

use std::fmt;

use campusloop_common::{Errand, ErrandId};

/// An entity with a stable server-assigned key.
pub trait Keyed {
    type Key: PartialEq + Clone + fmt::Debug;

    fn key(&self) -> &Self::Key;
}

impl Keyed for Errand {
    type Key = ErrandId;

    fn key(&self) -> &ErrandId {
        &self.id
    }
}

/// Result of [`OptimisticCollection::upsert_from_server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticCollection<T> {
    items: Vec<T>,
}

impl<T> Default for OptimisticCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed> OptimisticCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front if the key is new, otherwise replace in place.
    pub fn upsert_from_server(&mut self, entity: T) -> Upsert {
        match self.position(entity.key()) {
            Some(idx) => {
                self.items[idx] = entity;
                Upsert::Replaced
            }
            None => {
                self.items.insert(0, entity);
                Upsert::Inserted
            }
        }
    }

    /// Remove by key. Removing an absent key is a no-op.
    pub fn remove_by_id(&mut self, key: &T::Key) -> Option<T> {
        self.position(key).map(|idx| self.items.remove(idx))
    }

    /// Remove every entity matching `predicate`; returns how many went.
    pub fn remove_if(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }

    /// Replace the contents with a server snapshot, keeping the snapshot's
    /// order. Duplicate keys keep their first occurrence.
    pub fn replace_all(&mut self, snapshot: impl IntoIterator<Item = T>) {
        let mut items: Vec<T> = Vec::new();
        for entity in snapshot {
            if !items.iter().any(|held| held.key() == entity.key()) {
                items.push(entity);
            }
        }
        self.items = items;
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.position(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn position(&self, key: &T::Key) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }
}

impl<T: Keyed + Clone> OptimisticCollection<T> {
    /// Apply a snapshot that was requested before `changes` were seen.
    ///
    /// Keys removed since the request stay removed, and entities upserted
    /// since the request are laid over the snapshot in arrival order.
    pub fn reconcile(&mut self, snapshot: impl IntoIterator<Item = T>, changes: InFlightChanges<T>) {
        let InFlightChanges { upserted, removed } = changes;
        self.replace_all(
            snapshot
                .into_iter()
                .filter(|entity| !removed.contains(entity.key())),
        );
        for entity in upserted {
            self.upsert_from_server(entity);
        }
    }
}

/// Changes applied to a collection while a snapshot request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct InFlightChanges<T: Keyed> {
    upserted: Vec<T>,
    removed: Vec<T::Key>,
}

impl<T: Keyed> Default for InFlightChanges<T> {
    fn default() -> Self {
        Self {
            upserted: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T: Keyed + Clone> InFlightChanges<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an upsert. The latest version of an entity wins.
    pub fn note_upsert(&mut self, entity: &T) {
        self.removed.retain(|key| key != entity.key());
        self.upserted.retain(|held| held.key() != entity.key());
        self.upserted.push(entity.clone());
    }

    /// Record a removal, whether or not the key was held locally.
    pub fn note_removed(&mut self, key: &T::Key) {
        self.upserted.retain(|held| held.key() != key);
        if !self.removed.contains(key) {
            self.removed.push(key.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.upserted.is_empty() && self.removed.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a OptimisticCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u8,
        rev: u8,
    }

    impl Keyed for Item {
        type Key = u8;

        fn key(&self) -> &u8 {
            &self.id
        }
    }

    fn item(id: u8, rev: u8) -> Item {
        Item { id, rev }
    }

    fn ids(c: &OptimisticCollection<Item>) -> Vec<u8> {
        c.iter().map(|i| i.id).collect()
    }

    #[test]
    fn new_entities_go_to_front() {
        let mut c = OptimisticCollection::new();
        assert_eq!(c.upsert_from_server(item(1, 0)), Upsert::Inserted);
        assert_eq!(c.upsert_from_server(item(2, 0)), Upsert::Inserted);
        assert_eq!(ids(&c), vec![2, 1]);
    }

    #[test]
    fn update_keeps_position() {
        let mut c = OptimisticCollection::new();
        c.upsert_from_server(item(1, 0));
        c.upsert_from_server(item(2, 0));
        c.upsert_from_server(item(3, 0));
        assert_eq!(c.upsert_from_server(item(2, 9)), Upsert::Replaced);
        assert_eq!(ids(&c), vec![3, 2, 1]);
        assert_eq!(c.get(&2).map(|i| i.rev), Some(9));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut c = OptimisticCollection::new();
        c.upsert_from_server(item(1, 0));
        assert!(c.remove_by_id(&5).is_none());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn remove_if_counts() {
        let mut c = OptimisticCollection::new();
        for id in 0..6 {
            c.upsert_from_server(item(id, 0));
        }
        assert_eq!(c.remove_if(|i| i.id % 2 == 0), 3);
        assert_eq!(ids(&c), vec![5, 3, 1]);
        assert_eq!(c.remove_if(|i| i.id % 2 == 0), 0);
    }

    #[test]
    fn replace_all_dedups_and_keeps_order() {
        let mut c = OptimisticCollection::new();
        c.upsert_from_server(item(9, 0));
        c.replace_all(vec![item(3, 0), item(1, 0), item(3, 1), item(2, 0)]);
        assert_eq!(ids(&c), vec![3, 1, 2]);
        assert_eq!(c.get(&3).map(|i| i.rev), Some(0));
        assert!(!c.contains(&9));
    }

    #[test]
    fn reconcile_keeps_changes_made_during_request() {
        let mut c = OptimisticCollection::new();
        c.upsert_from_server(item(1, 0));
        c.upsert_from_server(item(2, 0));

        let mut changes = InFlightChanges::new();
        c.upsert_from_server(item(7, 0));
        changes.note_upsert(&item(7, 0));
        c.remove_by_id(&1);
        changes.note_removed(&1);
        c.upsert_from_server(item(2, 5));
        changes.note_upsert(&item(2, 5));

        // Snapshot taken before any of the above.
        c.reconcile(vec![item(1, 0), item(2, 0), item(3, 0)], changes);
        assert_eq!(ids(&c), vec![7, 2, 3]);
        assert_eq!(c.get(&2).map(|i| i.rev), Some(5));
    }

    #[test]
    fn removal_after_upsert_wins() {
        let mut changes = InFlightChanges::new();
        changes.note_upsert(&item(4, 0));
        changes.note_removed(&4);
        let mut c = OptimisticCollection::new();
        c.reconcile(vec![item(4, 0), item(5, 0)], changes);
        assert_eq!(ids(&c), vec![5]);

        let mut changes = InFlightChanges::new();
        changes.note_removed(&4);
        changes.note_upsert(&item(4, 1));
        c.reconcile(vec![item(5, 0)], changes);
        assert_eq!(ids(&c), vec![4, 5]);
    }

    #[test]
    fn reconcile_without_changes_is_replace_all() {
        let mut c = OptimisticCollection::new();
        c.upsert_from_server(item(9, 0));
        let changes = InFlightChanges::new();
        assert!(changes.is_empty());
        c.reconcile(vec![item(1, 0), item(2, 0)], changes);
        assert_eq!(ids(&c), vec![1, 2]);
    }

    fn seeded(ops: &[(u8, u8)]) -> OptimisticCollection<Item> {
        let mut c = OptimisticCollection::new();
        for &(id, rev) in ops {
            c.upsert_from_server(item(id, rev));
        }
        c
    }

    proptest! {
        #[test]
        fn upsert_is_idempotent(
            seed in prop::collection::vec((0u8..8, any::<u8>()), 0..24),
            id in 0u8..8,
            rev in any::<u8>(),
        ) {
            let mut once = seeded(&seed);
            once.upsert_from_server(item(id, rev));
            let mut twice = once.clone();
            twice.upsert_from_server(item(id, rev));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn remove_is_idempotent(
            seed in prop::collection::vec((0u8..8, any::<u8>()), 0..24),
            id in 0u8..12,
        ) {
            let mut once = seeded(&seed);
            once.remove_by_id(&id);
            let mut twice = once.clone();
            twice.remove_by_id(&id);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn keys_stay_unique(ops in prop::collection::vec((0u8..6, any::<u8>(), any::<bool>()), 0..48)) {
            let mut c = OptimisticCollection::new();
            for (id, rev, remove) in ops {
                if remove {
                    c.remove_by_id(&id);
                } else {
                    c.upsert_from_server(item(id, rev));
                }
            }
            let mut seen = ids(&c);
            let len = seen.len();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), len);
        }

        /// A local status-update success and the matching broadcast both
        /// remove the id; either arrival order ends in the same collection.
        #[test]
        fn local_and_broadcast_removal_converge(
            seed in prop::collection::vec((0u8..8, any::<u8>()), 1..24),
            pick in any::<prop::sample::Index>(),
        ) {
            let base = seeded(&seed);
            let target = ids(&base)[pick.index(base.len())];

            let mut local_first = base.clone();
            local_first.remove_by_id(&target);
            local_first.remove_if(|i| i.id == target);

            let mut broadcast_first = base.clone();
            broadcast_first.remove_if(|i| i.id == target);
            broadcast_first.remove_by_id(&target);

            prop_assert_eq!(&local_first, &broadcast_first);
            prop_assert!(!local_first.contains(&target));
            prop_assert_eq!(local_first.len(), base.len() - 1);
        }
    }
}
