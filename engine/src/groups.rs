//! Session-scoped group membership and placeholder expansion.

use std::collections::{HashMap, HashSet};

use dockorder_types::{Entry, GroupKey, PersistedOrder, Token};

use crate::live::LiveSet;

/// Maps each aggregator to the members observed this session, in the order
/// they were first associated. Never persisted; rebuilt at session start.
#[derive(Debug, Default, Clone)]
pub struct GroupResolver {
    members: HashMap<GroupKey, Vec<Token>>,
}

impl GroupResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The host's grouping metadata for a live entry.
    pub fn resolve_group_key<L: LiveSet + ?Sized>(live: &L, token: &Token) -> Option<GroupKey> {
        live.group_key(token)
    }

    /// Append `token` to `key`'s members unless it is already there.
    /// Returns whether the member list changed.
    pub fn associate(&mut self, token: &Token, key: &GroupKey) -> bool {
        let members = self.members.entry(key.clone()).or_default();
        if members.contains(token) {
            return false;
        }
        members.push(token.clone());
        true
    }

    #[must_use]
    pub fn placeholder_for(key: &GroupKey) -> Entry {
        Entry::GroupPlaceholder(key.clone())
    }

    /// Expand placeholders in place. Unknown groups expand to nothing, and a
    /// token reachable twice (listed directly and through a group) is kept at
    /// its first position only.
    #[must_use]
    pub fn resolve(&self, order: &PersistedOrder) -> Vec<Token> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(order.len());
        for entry in order {
            match entry {
                Entry::Plain(token) => {
                    if seen.insert(token) {
                        resolved.push(token.clone());
                    }
                }
                Entry::GroupPlaceholder(key) => {
                    for token in self.members(key) {
                        if seen.insert(token) {
                            resolved.push(token.clone());
                        }
                    }
                }
            }
        }
        resolved
    }

    #[must_use]
    pub fn members(&self, key: &GroupKey) -> &[Token] {
        self.members.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn group_of(&self, token: &Token) -> Option<&GroupKey> {
        self.members
            .iter()
            .find_map(|(key, members)| members.contains(token).then_some(key))
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Number of groups seen this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
