//! Configuration loading and persisted order storage for dockorder.
//!
//! - **`store`**: the persistence contract ([`OrderStore`]) and the in-process
//!   [`MemoryStore`]
//! - **`file_store`**: [`TomlFileStore`], the durable implementation
//! - **`config`**: the `~/.dockorder/config.toml` loader
//! - **`atomic_write`**: crash-safe file replacement (temp + rename)

pub mod atomic_write;
mod config;
mod file_store;
mod store;

pub use atomic_write::atomic_write;
pub use config::{
    AppConfig, ConfigError, DockOrderConfig, config_dir, config_path, default_orders_path,
    expand_env_vars,
};
pub use file_store::TomlFileStore;
pub use store::{MemoryStore, OrderStore, StoreChange, StoreError};
