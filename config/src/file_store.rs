//! TOML-backed order store.
//!
//! ```toml
//! left-box-order = ["activities", "appMenu"]
//! center-box-order = ["dateMenu"]
//! right-box-order = ["appindicator-kstatusnotifieritem-Nextcloud", "quickSettings"]
//! ```
//!
//! Writes go through `toml_edit` so comments and unrelated keys survive.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dockorder_types::Region;
use toml_edit::{Array, DocumentMut};
use tracing::{debug, info};

use crate::atomic_write::atomic_write;
use crate::store::{OrderStore, StoreChange, StoreError};

#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    doc: DocumentMut,
    values: HashMap<Region, Vec<String>>,
    pending: Vec<StoreChange>,
}

impl TomlFileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = read_document(&path)?;
        let values = extract_orders(&path, &doc)?;
        debug!(path = %path.display(), "Opened order store");
        Ok(Self {
            path,
            doc,
            values,
            pending: Vec::new(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file and queue a change for every region whose value
    /// differs from what this store last saw. Returns the changed regions.
    pub fn reload(&mut self) -> Result<Vec<Region>, StoreError> {
        let doc = read_document(&self.path)?;
        let values = extract_orders(&self.path, &doc)?;

        let changed: Vec<Region> = Region::ALL
            .into_iter()
            .filter(|region| self.values.get(region) != values.get(region))
            .collect();
        if !changed.is_empty() {
            info!(path = %self.path.display(), ?changed, "Order store changed on disk");
        }

        for &region in &changed {
            let current = values.get(&region).cloned().unwrap_or_default();
            self.pending.push(StoreChange::new(region, current));
        }
        self.doc = doc;
        self.values = values;
        Ok(changed)
    }
}

impl OrderStore for TomlFileStore {
    fn get(&self, region: Region) -> Vec<String> {
        self.values.get(&region).cloned().unwrap_or_default()
    }

    fn set(&mut self, region: Region, values: Vec<String>) -> Result<(), StoreError> {
        if self.values.get(&region) == Some(&values) {
            return Ok(());
        }

        let mut doc = self.doc.clone();
        let array: Array = values.iter().map(String::as_str).collect();
        doc[region.settings_key()] = toml_edit::value(array);
        atomic_write(&self.path, doc.to_string().as_bytes()).map_err(|source| {
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!(%region, count = values.len(), "Persisted region order");
        self.doc = doc;
        self.pending.push(StoreChange::new(region, values.clone()));
        self.values.insert(region, values);
        Ok(())
    }

    fn drain_changes(&mut self) -> Vec<StoreChange> {
        std::mem::take(&mut self.pending)
    }
}

fn read_document(path: &Path) -> Result<DocumentMut, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    content
        .parse::<DocumentMut>()
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn extract_orders(
    path: &Path,
    doc: &DocumentMut,
) -> Result<HashMap<Region, Vec<String>>, StoreError> {
    let mut values = HashMap::new();
    for region in Region::ALL {
        let key = region.settings_key();
        let Some(item) = doc.get(key) else {
            continue;
        };
        let invalid = || StoreError::InvalidValue {
            path: path.to_path_buf(),
            key,
        };
        let array = item.as_array().ok_or_else(invalid)?;
        let list = array
            .iter()
            .map(|value| value.as_str().map(ToString::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        values.insert(region, list);
    }
    Ok(values)
}
