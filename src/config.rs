use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

const APP_DIR: &str = "lightnote";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: PathBuf,

    #[serde(default = "default_pages_dir")]
    pub pages_dir: PathBuf,

    #[serde(default = "default_open_in_browser")]
    pub open_in_browser: bool,
}

fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LIGHTNOTE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_storage_path() -> PathBuf {
    data_dir().join("storage.json")
}

fn default_downloads_dir() -> PathBuf {
    // An explicit data dir keeps downloads alongside it, so a relocated
    // profile never writes into the user's real downloads folder.
    if std::env::var("LIGHTNOTE_DATA_DIR").is_ok() {
        return data_dir().join("downloads");
    }
    dirs::download_dir().unwrap_or_else(|| data_dir().join("downloads"))
}

fn default_pages_dir() -> PathBuf {
    data_dir().join("pages")
}

fn default_open_in_browser() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            downloads_dir: default_downloads_dir(),
            pages_dir: default_pages_dir(),
            open_in_browser: default_open_in_browser(),
        }
    }
}

impl Config {
    /// Load `config.toml`, writing one with defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Config::default();
                config.save_to(path)?;
                tracing::debug!("wrote default config to {}", path.display());
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `$LIGHTNOTE_CONFIG_DIR/config.toml` if set, otherwise under the
    /// platform config dir.
    pub fn config_path() -> PathBuf {
        let dir = std::env::var_os("LIGHTNOTE_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(APP_DIR)
            });
        dir.join("config.toml")
    }
}
