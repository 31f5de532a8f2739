/// Read models handed out by the store
///
/// Enumerations are snapshots: they own their strings and do not borrow the store.

/// One (key, member) membership
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Item {
    pub key: String,
    pub member: String,
}

impl Item {
    pub fn new(key: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            member: member.into(),
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.member)
    }
}

/// Store-wide counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of keys (every key owns at least one member)
    pub keys: usize,
    /// Number of (key, member) memberships
    pub members: usize,
}
