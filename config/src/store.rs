//! The persistence contract for per-region orders.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use dockorder_types::Region;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read order store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse order store {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml_edit::TomlError,
    },
    #[error("'{key}' in {} is not a list of strings", path.display())]
    InvalidValue { path: PathBuf, key: &'static str },
    #[error("failed to write order store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("order store rejected write for {region}: {reason}")]
    Rejected { region: Region, reason: String },
}

/// One queued change notification: the region and the value it changed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub region: Region,
    pub values: Vec<String>,
}

impl StoreChange {
    pub fn new(region: Region, values: Vec<String>) -> Self {
        Self { region, values }
    }
}

/// Durable ordered-string-list storage, one list per region.
///
/// Change notifications are queued rather than delivered through callbacks:
/// every write that alters a stored value (including the engine's own)
/// queues a [`StoreChange`], and the host drains the queue on its event loop.
pub trait OrderStore {
    fn get(&self, region: Region) -> Vec<String>;

    fn set(&mut self, region: Region, values: Vec<String>) -> Result<(), StoreError>;

    /// Changes since the last drain, oldest first.
    fn drain_changes(&mut self) -> Vec<StoreChange>;
}

/// In-process store. Loses its contents with the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<Region, Vec<String>>,
    pending: Vec<StoreChange>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a region without queuing a notification.
    #[must_use]
    pub fn with_order<S: Into<String>>(
        mut self,
        region: Region,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.values
            .insert(region, values.into_iter().map(Into::into).collect());
        self
    }
}

impl OrderStore for MemoryStore {
    fn get(&self, region: Region) -> Vec<String> {
        self.values.get(&region).cloned().unwrap_or_default()
    }

    fn set(&mut self, region: Region, values: Vec<String>) -> Result<(), StoreError> {
        if self.get(region) == values {
            return Ok(());
        }
        self.pending.push(StoreChange::new(region, values.clone()));
        self.values.insert(region, values);
        Ok(())
    }

    fn drain_changes(&mut self) -> Vec<StoreChange> {
        std::mem::take(&mut self.pending)
    }
}

impl<T: OrderStore + ?Sized> OrderStore for &mut T {
    fn get(&self, region: Region) -> Vec<String> {
        (**self).get(region)
    }

    fn set(&mut self, region: Region, values: Vec<String>) -> Result<(), StoreError> {
        (**self).set(region, values)
    }

    fn drain_changes(&mut self) -> Vec<StoreChange> {
        (**self).drain_changes()
    }
}
