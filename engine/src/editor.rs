//! Direct edits to the persisted orders, as a settings editor makes them.
//!
//! Edits only touch the store. A running [`Session`](crate::Session) picks
//! them up through its change notifications.

use dockorder_config::OrderStore;
use dockorder_types::{Entry, PersistedOrder, Region};
use tracing::info;

use crate::error::EngineError;

pub struct OrderEditor<S> {
    store: S,
}

impl<S: OrderStore> OrderEditor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn entries(&self, region: Region) -> Vec<Entry> {
        self.order(region).entries().to_vec()
    }

    /// Find which region's order lists `entry`.
    pub fn region_of(&self, entry: &Entry) -> Option<Region> {
        Region::ALL
            .into_iter()
            .find(|&region| self.order(region).contains(entry))
    }

    /// Drop `entry` from `region`'s order. Returns whether it was there.
    pub fn forget(&mut self, region: Region, entry: &Entry) -> Result<bool, EngineError> {
        let mut order = self.order(region);
        if order.remove(entry).is_none() {
            return Ok(false);
        }
        self.store.set(region, order.to_persisted())?;
        info!(%region, %entry, "Forgot entry");
        Ok(true)
    }

    /// Take `entry` out of `from` and insert it into `to` at `index`
    /// (clamped). Within one region this is a plain reorder.
    pub fn move_entry(
        &mut self,
        entry: &Entry,
        from: Region,
        to: Region,
        index: usize,
    ) -> Result<(), EngineError> {
        let mut source = self.order(from);
        if source.remove(entry).is_none() {
            return Err(EngineError::EntryNotFound {
                entry: entry.to_persisted(),
                region: from,
            });
        }

        if from == to {
            source.insert(index, entry.clone());
            self.store.set(from, source.to_persisted())?;
        } else {
            let mut target = self.order(to);
            target.insert(index, entry.clone());
            self.store.set(to, target.to_persisted())?;
            self.store.set(from, source.to_persisted())?;
        }
        info!(%entry, %from, %to, index, "Moved entry");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn order(&self, region: Region) -> PersistedOrder {
        PersistedOrder::from_persisted(self.store.get(region))
    }
}
