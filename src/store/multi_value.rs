/// Multi-value store
///
/// Maps each key to a set of unique members. A key exists only while it owns
/// at least one member; removing the last member removes the key.

use crate::error::{CommandError, CommandResult};
use crate::store::models::{Item, StoreStats};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// In-memory key → member-set mapping
///
/// Enumeration order is lexicographic by key, then by member.
#[derive(Debug, Clone, Default)]
pub struct MultiValueStore {
    data: BTreeMap<String, BTreeSet<String>>,
}

impl MultiValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member to the key's set, creating the key if needed
    ///
    /// # Returns
    /// * `Ok(())` - Member added
    /// * `Err(CommandError::AlreadyExists)` - Member was already in the set
    pub fn add_member(&mut self, key: &str, member: &str) -> CommandResult<()> {
        if self.member_exists(key, member) {
            return Err(CommandError::AlreadyExists);
        }

        self.data
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());

        debug!(key, member, "member added");
        Ok(())
    }

    /// Remove one member, dropping the key if its set becomes empty
    ///
    /// # Returns
    /// * `Ok(())` - Member removed
    /// * `Err(CommandError::KeyNotFound)` - Key absent
    /// * `Err(CommandError::MemberNotFound)` - Key present, member absent
    pub fn remove_member(&mut self, key: &str, member: &str) -> CommandResult<()> {
        let members = self
            .data
            .get_mut(key)
            .ok_or(CommandError::KeyNotFound)?;

        if !members.remove(member) {
            return Err(CommandError::MemberNotFound);
        }

        if members.is_empty() {
            self.data.remove(key);
            debug!(key, "last member removed, key dropped");
        }

        debug!(key, member, "member removed");
        Ok(())
    }

    /// Remove a key and every member it owns
    pub fn remove_all_for_key(&mut self, key: &str) -> CommandResult<()> {
        let removed = self
            .data
            .remove(key)
            .ok_or(CommandError::KeyNotFound)?;

        debug!(key, members = removed.len(), "key removed");
        Ok(())
    }

    /// Empty the store. Always succeeds.
    pub fn clear(&mut self) {
        let keys = self.data.len();
        self.data.clear();
        debug!(keys, "store cleared");
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// False when the key is absent
    pub fn member_exists(&self, key: &str, member: &str) -> bool {
        self.data
            .get(key)
            .is_some_and(|members| members.contains(member))
    }

    /// All keys; empty when the store is empty
    pub fn list_keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Members of one key
    pub fn list_members(&self, key: &str) -> CommandResult<Vec<String>> {
        self.data
            .get(key)
            .map(|members| members.iter().cloned().collect())
            .ok_or(CommandError::KeyNotFound)
    }

    /// Every member of every key, flattened
    ///
    /// A member held by several keys appears once per key.
    pub fn list_all_members(&self) -> Vec<String> {
        self.data.values().flatten().cloned().collect()
    }

    /// One (key, member) pair per membership
    pub fn list_items(&self) -> Vec<Item> {
        self.data
            .iter()
            .flat_map(|(key, members)| members.iter().map(move |member| Item::new(key, member)))
            .collect()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of (key, member) memberships
    pub fn member_count(&self) -> usize {
        self.data.values().map(BTreeSet::len).sum()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.len(),
            members: self.member_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_store() -> MultiValueStore {
        let mut store = MultiValueStore::new();
        store.add_member("fruit", "apple").unwrap();
        store.add_member("fruit", "banana").unwrap();
        store.add_member("color", "red").unwrap();
        store.add_member("color", "apple").unwrap();
        store
    }

    #[test]
    fn test_add_then_member_exists() {
        let mut store = MultiValueStore::new();

        store.add_member("key1", "value1").unwrap();

        assert!(store.member_exists("key1", "value1"));
        assert!(store.key_exists("key1"));
    }

    #[test]
    fn test_add_duplicate_member() {
        let mut store = MultiValueStore::new();
        store.add_member("key1", "value1").unwrap();

        let result = store.add_member("key1", "value1");

        match result {
            Err(CommandError::AlreadyExists) => {}
            _ => panic!("Expected AlreadyExists error"),
        }
        assert_eq!(store.list_members("key1").unwrap(), vec!["value1"]);
    }

    #[test]
    fn test_same_member_under_different_keys() {
        let mut store = MultiValueStore::new();

        store.add_member("a", "shared").unwrap();
        store.add_member("b", "shared").unwrap();

        assert!(store.member_exists("a", "shared"));
        assert!(store.member_exists("b", "shared"));
    }

    #[test]
    fn test_remove_last_member_drops_key() {
        let mut store = MultiValueStore::new();
        store.add_member("key1", "value1").unwrap();

        store.remove_member("key1", "value1").unwrap();

        assert!(!store.key_exists("key1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_keeps_key_with_remaining_members() {
        let mut store = populated_store();

        store.remove_member("fruit", "apple").unwrap();

        assert!(store.key_exists("fruit"));
        assert_eq!(store.list_members("fruit").unwrap(), vec!["banana"]);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut store = MultiValueStore::new();

        match store.remove_member("key1", "value1") {
            Err(CommandError::KeyNotFound) => {}
            _ => panic!("Expected KeyNotFound error"),
        }
    }

    #[test]
    fn test_remove_missing_member() {
        let mut store = MultiValueStore::new();
        store.add_member("key1", "value1").unwrap();

        match store.remove_member("key1", "value2") {
            Err(CommandError::MemberNotFound) => {}
            _ => panic!("Expected MemberNotFound error"),
        }
        assert!(store.member_exists("key1", "value1"));
    }

    #[test]
    fn test_remove_all_for_key() {
        let mut store = populated_store();

        store.remove_all_for_key("fruit").unwrap();

        assert!(!store.key_exists("fruit"));
        assert!(store.key_exists("color"));
        assert!(matches!(
            store.remove_all_for_key("fruit"),
            Err(CommandError::KeyNotFound)
        ));
    }

    #[test]
    fn test_clear() {
        let mut store = populated_store();

        store.clear();

        assert!(store.list_keys().is_empty());
        assert!(store.list_items().is_empty());

        // clearing an empty store is fine too
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_member_exists_missing_key() {
        let store = MultiValueStore::new();
        assert!(!store.member_exists("nope", "value"));
    }

    #[test]
    fn test_list_keys() {
        let store = populated_store();
        assert_eq!(store.list_keys(), vec!["color", "fruit"]);
    }

    #[test]
    fn test_list_members_missing_key() {
        let store = MultiValueStore::new();
        assert!(matches!(
            store.list_members("missing"),
            Err(CommandError::KeyNotFound)
        ));
    }

    #[test]
    fn test_all_members_keeps_duplicates_across_keys() {
        let store = populated_store();

        let all = store.list_all_members();

        assert_eq!(all.len(), store.member_count());
        assert_eq!(all.iter().filter(|m| *m == "apple").count(), 2);
    }

    #[test]
    fn test_all_members_count_matches_sets() {
        let store = populated_store();

        let expected: usize = store
            .list_keys()
            .iter()
            .map(|k| store.list_members(k).unwrap().len())
            .sum();

        assert_eq!(store.list_all_members().len(), expected);
    }

    #[test]
    fn test_items_one_per_membership() {
        let store = populated_store();

        let items = store.list_items();

        assert_eq!(items.len(), 4);
        assert!(items.contains(&Item::new("fruit", "apple")));
        assert!(items.contains(&Item::new("fruit", "banana")));
        assert!(items.contains(&Item::new("color", "red")));
        assert!(items.contains(&Item::new("color", "apple")));
    }

    #[test]
    fn test_stats() {
        let store = populated_store();
        assert_eq!(store.stats(), StoreStats { keys: 2, members: 4 });
        assert_eq!(MultiValueStore::new().stats(), StoreStats::default());
    }
}
