//! Configuration file.
//!
//! ```yaml
//! bookmarks:
//!   d: /tmp/dir/
//! dispatch:
//!   always_reload: true
//! menus:
//!   todo: |
//!     - .add/
//!     - .list/
//! ```
//!
//! The file is found through `--config`, else `$TREELINE_CONFIG`. With
//! neither, every section is empty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use treeline_dispatch::{DispatchConfig, HandlerRegistry, MenuHandler};
use treeline_path::BookmarkMap;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "TREELINE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreelineConfig {
    /// `$name` bookmarks used by `expand`.
    pub bookmarks: BookmarkMap,
    /// Dispatcher policy.
    pub dispatch: DispatchConfig,
    /// Menu text by handler name, served by `menu`.
    pub menus: BTreeMap<String, String>,
}

impl TreelineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config file to use: `explicit`, else `$TREELINE_CONFIG`.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit.map(Path::to_path_buf).or_else(|| {
            std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }

    /// Loads the located config file, or the defaults when there is none.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::locate(explicit) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// A registry serving each configured menu as a menu-only handler.
    pub fn registry(&self) -> HandlerRegistry {
        self.menus
            .iter()
            .fold(HandlerRegistry::new(), |registry, (name, text)| {
                registry.register_handler(MenuHandler::new(name.as_str()).menu(text.as_str()))
            })
    }
}
