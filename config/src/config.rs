use serde::Deserialize;
use std::{env, fs, io, path::PathBuf};
use thiserror::Error;

/// Contents of `~/.dockorder/config.toml`.
///
/// ```toml
/// [app]
/// orders_file = "${XDG_CONFIG_HOME}/dockorder/orders.toml"
/// log_filter = "dockorder_engine=debug"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct DockOrderConfig {
    pub app: Option<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Where the three region orders live. Supports `${VAR}` and a leading `~`.
    pub orders_file: Option<String>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl DockOrderConfig {
    /// Load the user config. `Ok(None)` when there is no home directory or
    /// no config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Option<Self>, ConfigError> {
        let path = path.into();
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// The configured orders file, falling back to the default location.
    pub fn orders_path(&self) -> Option<PathBuf> {
        self.app
            .as_ref()
            .and_then(|app| app.orders_file.as_deref())
            .map(|raw| expand_path(&expand_env_vars(raw)))
            .or_else(default_orders_path)
    }

    pub fn log_filter(&self) -> Option<&str> {
        self.app.as_ref().and_then(|app| app.log_filter.as_deref())
    }
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".dockorder"))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

pub fn default_orders_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("orders.toml"))
}

/// Replace every `${VAR}` with the variable's value. Unset variables become
/// empty; an unterminated `${` is kept literally.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                if !name.is_empty() {
                    out.push_str(&env::var(name).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn expand_path(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(raw), |home| home.join(rest)),
        None => PathBuf::from(raw),
    }
}
