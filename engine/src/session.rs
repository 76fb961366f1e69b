//! Session lifecycle: start-up reconciliation and event handling.

use dockorder_config::OrderStore;
use dockorder_types::{Region, Token};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::intercept::InsertionInterceptor;
use crate::live::LiveSet;
use crate::reconcile::ReconciliationEngine;

/// One enabled session of the engine against a host.
///
/// All handlers run synchronously on the host's event thread; each one
/// finishes before the next event is processed.
pub struct Session<S> {
    engine: ReconciliationEngine<S>,
}

impl<S: OrderStore> Session<S> {
    /// Replay live grouped entries, merge everything new into the persisted
    /// orders and bring every region into its configured order.
    pub fn start<L: LiveSet + ?Sized>(store: S, live: &mut L) -> Result<Self, EngineError> {
        let mut engine = ReconciliationEngine::new(store);
        engine.replay_groups(&*live);

        for region in Region::ALL {
            engine.merge_new_entries(region, &*live)?;
        }
        let mut moves = 0;
        for region in Region::ALL {
            moves += engine.apply_order(region, live);
        }

        info!(groups = engine.groups().len(), moves, "Session started");
        Ok(Self { engine })
    }

    /// The hook the host must call for every entry it is about to dock.
    pub fn interceptor(&mut self) -> InsertionInterceptor<'_, S> {
        InsertionInterceptor::new(&mut self.engine)
    }

    /// The persisted order keeps undocked tokens so they return to their
    /// slot when they reappear.
    pub fn entry_undocked(&mut self, token: &Token, region: Region) {
        debug!(%token, %region, "Entry undocked");
    }

    /// Drain store notifications and react to the ones this engine did not
    /// cause: move reassigned entries across regions, re-merge live entries
    /// an edit dropped, then reorder. Returns the regions that were handled.
    pub fn settings_changed<L: LiveSet + ?Sized>(
        &mut self,
        live: &mut L,
    ) -> Result<Vec<Region>, EngineError> {
        let mut changed: Vec<Region> = Vec::new();
        for change in self.engine.store_mut().drain_changes() {
            if self.engine.consume_own_write(&change) {
                debug!(region = %change.region, "Skipping change caused by own write");
                continue;
            }
            if !changed.contains(&change.region) {
                changed.push(change.region);
            }
        }
        if changed.is_empty() {
            return Ok(changed);
        }

        for &region in &changed {
            self.engine.relocate_into(region, live);
        }
        // Relocation also empties source regions, so every region is redone.
        for region in Region::ALL {
            self.engine.merge_new_entries(region, &*live)?;
        }
        for region in Region::ALL {
            self.engine.apply_order(region, live);
        }
        info!(?changed, "Applied external settings change");
        Ok(changed)
    }

    pub fn engine(&self) -> &ReconciliationEngine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ReconciliationEngine<S> {
        &mut self.engine
    }

    /// End the session, handing back the store. Group state is discarded.
    pub fn end(self) -> S {
        info!("Session ended");
        self.engine.into_store()
    }
}
