//! The hook a host calls in place of its default append-on-dock.

use dockorder_config::OrderStore;
use dockorder_types::{Region, Token};
use tracing::debug;

use crate::error::EngineError;
use crate::live::LiveSet;
use crate::reconcile::ReconciliationEngine;

/// Decides where a newly docked entry goes.
///
/// Hosts must route every dock through an implementation of this trait
/// instead of appending at their built-in default position.
pub trait InsertionStrategy {
    /// Left-to-right index in `region` at which to dock `token`. `live` is
    /// the host state just before the dock.
    fn insertion_index(
        &mut self,
        token: &Token,
        region: Region,
        live: &dyn LiveSet,
    ) -> Result<usize, EngineError>;
}

/// Adapts a [`ReconciliationEngine`] to [`InsertionStrategy`], routing
/// grouped entries through their group placeholder.
pub struct InsertionInterceptor<'a, S> {
    engine: &'a mut ReconciliationEngine<S>,
}

impl<'a, S: OrderStore> InsertionInterceptor<'a, S> {
    pub fn new(engine: &'a mut ReconciliationEngine<S>) -> Self {
        Self { engine }
    }
}

impl<S: OrderStore> InsertionStrategy for InsertionInterceptor<'_, S> {
    fn insertion_index(
        &mut self,
        token: &Token,
        region: Region,
        live: &dyn LiveSet,
    ) -> Result<usize, EngineError> {
        let order = self.engine.persisted_order(region);
        let subject = self.engine.subject_for(&order, token, live);
        let index = self
            .engine
            .compute_insertion_index(&subject, token, region, live)?;
        debug!(%token, %region, index, entry = %subject, "Intercepted dock");
        Ok(index)
    }
}
