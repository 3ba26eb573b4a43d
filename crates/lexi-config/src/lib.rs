use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::article::ArticleConfig;
use self::capability::CapabilityConfig;
use self::highlight::HighlightConfig;
use self::limits::LimitsConfig;
use self::overlay::OverlayConfig;
use self::selection::SelectionConfig;

pub mod article;
pub mod capability;
pub mod highlight;
pub mod limits;
pub mod overlay;
pub mod selection;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub highlight: HighlightConfig,
    pub overlay: OverlayConfig,
    pub selection: SelectionConfig,
    pub capability: CapabilityConfig,
    pub limits: LimitsConfig,
    pub article: ArticleConfig,

    /// Directory of the JSON store, platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Self::default().with_env_overrides(|key| env::var(key).ok())
    }

    /// Read a JSON config file; missing sections and fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup("LEXI_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(delay) = lookup("LEXI_SETTLE_DELAY_MS").and_then(|v| v.parse().ok()) {
            self.selection.settle_delay_ms = delay;
        }

        if let Some(key) = lookup("LEXI_TRANSLATOR_API_KEY") {
            tracing::debug!("Remote translator key taken from environment");
            self.capability.remote_translator.enabled = !key.is_empty();
            self.capability.remote_translator.api_key = key;
        }

        if let Some(url) = lookup("LEXI_TRANSLATOR_API_URL") {
            self.capability.remote_translator.api_url = url;
        }

        self
    }
}
