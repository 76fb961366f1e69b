//! Ordered-placement reconciliation engine for dockorder.
//!
//! A host docks entries into three regions and would append each new one at
//! a fixed spot. This crate makes the visible order follow the user's
//! persisted order instead:
//!
//! - [`ReconciliationEngine`] merges newly seen entries into the persisted
//!   orders, expands group placeholders, filters to what is live, computes
//!   insertion indices and reorders the host's children.
//! - [`GroupResolver`] tracks which live entries belong to which aggregator
//!   this session.
//! - [`InsertionInterceptor`] is the [`InsertionStrategy`] the host calls
//!   instead of its default append.
//! - [`Session`] wires the above to host events; [`OrderEditor`] edits the
//!   persisted orders directly.
//!
//! Everything is synchronous and single-threaded. The host is reached only
//! through the [`LiveSet`] trait and storage only through
//! [`dockorder_config::OrderStore`].

mod editor;
mod error;
mod groups;
mod intercept;
mod live;
mod reconcile;
mod session;

pub use editor::OrderEditor;
pub use error::EngineError;
pub use groups::GroupResolver;
pub use intercept::{InsertionInterceptor, InsertionStrategy};
pub use live::{LiveSet, MemoryLiveSet};
pub use reconcile::ReconciliationEngine;
pub use session::Session;

pub use dockorder_types::{Entry, GroupKey, MergeEnd, PersistedOrder, Region, Token};
