//! Reconciliation of persisted orders against the live set.
//!
//! Every order handled here reads left to right in every region: index 0 is
//! the visually leftmost entry. The only asymmetry between regions is the
//! merge end. Left and Center grow at the tail, Right grows at the head
//! (the side facing the center of the bar, where the host docks new entries).
//!
//! ```text
//! PersistedOrder --resolve--> resolved --live anywhere--> valid
//!                                      \--live in region--> restricted-valid --apply--> host
//! ```

use std::collections::{HashMap, VecDeque};

use dockorder_config::{OrderStore, StoreChange};
use dockorder_types::{Entry, MergeEnd, PersistedOrder, Region, Token};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::groups::GroupResolver;
use crate::live::LiveSet;

pub struct ReconciliationEngine<S> {
    store: S,
    groups: GroupResolver,
    /// Values this engine wrote per region whose notifications have not been
    /// seen yet, oldest first.
    own_writes: HashMap<Region, VecDeque<Vec<String>>>,
}

impl<S: OrderStore> ReconciliationEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            groups: GroupResolver::new(),
            own_writes: HashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn groups(&self) -> &GroupResolver {
        &self.groups
    }

    pub fn persisted_order(&self, region: Region) -> PersistedOrder {
        PersistedOrder::from_persisted(self.store.get(region))
    }

    /// Persist `order` if it differs from the stored value.
    pub fn write_order(
        &mut self,
        region: Region,
        order: &PersistedOrder,
    ) -> Result<bool, EngineError> {
        let values = order.to_persisted();
        if self.store.get(region) == values {
            return Ok(false);
        }
        self.store.set(region, values.clone())?;
        info!(%region, entries = values.len(), "Persisted updated order");
        self.own_writes.entry(region).or_default().push_back(values);
        Ok(true)
    }

    /// Whether `change` is the echo of one of this engine's writes. A match
    /// is consumed, so each write silences exactly one notification. Writes
    /// queued before the match were coalesced by the store and are dropped.
    pub fn consume_own_write(&mut self, change: &StoreChange) -> bool {
        let Some(pending) = self.own_writes.get_mut(&change.region) else {
            return false;
        };
        let Some(index) = pending.iter().position(|v| *v == change.values) else {
            return false;
        };
        pending.drain(..=index);
        true
    }

    /// Feed every grouped live entry into the resolver, left to right, so
    /// member order matches what is on screen.
    pub fn replay_groups<L: LiveSet + ?Sized>(&mut self, live: &L) {
        for region in Region::ALL {
            let order = self.persisted_order(region);
            for token in live.children(region) {
                self.subject_for(&order, &token, live);
            }
        }
        debug!(groups = self.groups.len(), "Replayed live group members");
    }

    /// The persisted entry that stands for `token` in `order`.
    ///
    /// A token the user pinned individually keeps its own entry. Otherwise a
    /// grouped token is associated with its group and represented by the
    /// group's placeholder.
    pub fn subject_for<L: LiveSet + ?Sized>(
        &mut self,
        order: &PersistedOrder,
        token: &Token,
        live: &L,
    ) -> Entry {
        let plain = Entry::Plain(token.clone());
        if order.contains(&plain) {
            return plain;
        }
        match GroupResolver::resolve_group_key(live, token) {
            Some(key) => {
                if self.groups.associate(token, &key) {
                    debug!(%token, group = %key, "Associated entry with group");
                }
                GroupResolver::placeholder_for(&key)
            }
            None => plain,
        }
    }

    /// Merge every live entry of `region` that the persisted order does not
    /// represent yet. Existing entries keep their positions; new ones land at
    /// the region's merge end in their live relative order.
    pub fn compute_updated_order<L: LiveSet + ?Sized>(
        &mut self,
        region: Region,
        live: &L,
    ) -> PersistedOrder {
        let mut order = self.persisted_order(region);
        let mut fresh: Vec<Entry> = Vec::new();
        for token in live.children(region) {
            let subject = self.subject_for(&order, &token, live);
            if !order.contains(&subject) && !fresh.contains(&subject) {
                debug!(%region, entry = %subject, "Discovered new entry");
                fresh.push(subject);
            }
        }

        match region.merge_end() {
            MergeEnd::Tail => {
                for entry in fresh {
                    order.push(MergeEnd::Tail, entry);
                }
            }
            MergeEnd::Head => {
                for entry in fresh.into_iter().rev() {
                    order.push(MergeEnd::Head, entry);
                }
            }
        }
        order
    }

    /// [`compute_updated_order`](Self::compute_updated_order), persisted.
    /// Returns whether the stored order changed.
    pub fn merge_new_entries<L: LiveSet + ?Sized>(
        &mut self,
        region: Region,
        live: &L,
    ) -> Result<bool, EngineError> {
        let order = self.compute_updated_order(region, live);
        self.write_order(region, &order)
    }

    pub fn compute_resolved_order(&self, region: Region) -> Vec<Token> {
        self.groups.resolve(&self.persisted_order(region))
    }

    /// Resolved order restricted to entries live in any region.
    pub fn compute_valid_order<L: LiveSet + ?Sized>(
        &self,
        region: Region,
        live: &L,
    ) -> Vec<Token> {
        let mut order = self.compute_resolved_order(region);
        order.retain(|token| live.region_of(token).is_some());
        order
    }

    /// Resolved order restricted to entries live in `region`.
    pub fn compute_restricted_valid_order<L: LiveSet + ?Sized>(
        &self,
        region: Region,
        live: &L,
    ) -> Vec<Token> {
        let mut order = self.compute_resolved_order(region);
        order.retain(|token| live.region_of(token) == Some(region));
        order
    }

    /// Where the host should dock `token` in `region`, left to right.
    ///
    /// `subject` is the persisted entry standing for `token` (its group's
    /// placeholder for grouped tokens). An unknown subject is merged at the
    /// region's merge end and the entry goes to the matching end of the
    /// region. A known one is anchored right after its nearest configured
    /// predecessor that is currently visible in `region`.
    pub fn compute_insertion_index<L: LiveSet + ?Sized>(
        &mut self,
        subject: &Entry,
        token: &Token,
        region: Region,
        live: &L,
    ) -> Result<usize, EngineError> {
        let mut order = self.persisted_order(region);
        let mut restricted = self.compute_restricted_valid_order(region, live);
        restricted.retain(|t| t != token);

        let merge_end_index = match region.merge_end() {
            MergeEnd::Tail => restricted.len(),
            MergeEnd::Head => 0,
        };

        if !order.contains(subject) {
            order.push(region.merge_end(), subject.clone());
            self.write_order(region, &order)?;
            debug!(
                %region,
                entry = %subject,
                index = merge_end_index,
                "Docking unknown entry at merge end"
            );
            return Ok(merge_end_index);
        }

        let resolved = self.groups.resolve(&order);
        let Some(position) = resolved.iter().position(|t| t == token) else {
            return Ok(merge_end_index);
        };

        let visible: HashMap<&Token, usize> = restricted
            .iter()
            .enumerate()
            .map(|(index, t)| (t, index))
            .collect();
        let index = resolved[..position]
            .iter()
            .rev()
            .find_map(|t| visible.get(t))
            .map_or(0, |k| k + 1);
        debug!(%region, %token, index, "Anchored entry after visible predecessor");
        Ok(index)
    }

    /// Reorder the children of `region` to match its restricted-valid order.
    /// Returns the number of moves made; zero when already in order.
    pub fn apply_order<L: LiveSet + ?Sized>(&self, region: Region, live: &mut L) -> usize {
        let target = self.compute_restricted_valid_order(region, &*live);
        let mut current = live.children(region);
        let mut moves = 0;

        for (index, token) in target.iter().enumerate() {
            if current.get(index) == Some(token) {
                continue;
            }
            live.move_child(region, token, index);
            if let Some(from) = current.iter().position(|t| t == token) {
                let moved = current.remove(from);
                current.insert(index.min(current.len()), moved);
            }
            moves += 1;
        }

        if moves > 0 {
            debug!(%region, moves, "Applied order");
        }
        moves
    }

    /// Move live entries that the user reassigned to `region` (present in its
    /// resolved order, absent from their current region's) into `region`.
    /// Positions are left to a following [`apply_order`](Self::apply_order).
    pub fn relocate_into<L: LiveSet + ?Sized>(&self, region: Region, live: &mut L) -> usize {
        let mut relocated = 0;
        for token in self.compute_valid_order(region, &*live) {
            let Some(current) = live.region_of(&token) else {
                continue;
            };
            if current == region || self.compute_resolved_order(current).contains(&token) {
                continue;
            }
            let tail = live.children(region).len();
            live.relocate(&token, region, tail);
            info!(%token, from = %current, to = %region, "Relocated entry");
            relocated += 1;
        }
        relocated
    }
}
