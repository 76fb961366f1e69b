use dockorder_config::StoreError;
use dockorder_types::Region;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("'{entry}' is not in the {region} order")]
    EntryNotFound { entry: String, region: Region },
}
