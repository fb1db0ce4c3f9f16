use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{TodoError, TodoResult};

const DEFAULT_SCROLL_THRESHOLD: i32 = 100;
const DEFAULT_SCROLL_STEP: i32 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON document store used when no `--file` is given
    #[serde(default)]
    pub store_file: Option<PathBuf>,

    #[serde(default)]
    pub user: Option<UserConfig>,

    #[serde(default)]
    pub drag: DragConfig,
}

/// Identity used by the local identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub id: String,
    pub email: String,
}

/// Auto-scroll tuning while a task is being dragged
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragConfig {
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: i32,
    #[serde(default = "default_scroll_step")]
    pub scroll_step: i32,
}

fn default_scroll_threshold() -> i32 {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_scroll_step() -> i32 {
    DEFAULT_SCROLL_STEP
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            scroll_step: DEFAULT_SCROLL_STEP,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/todo/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("todo/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("todo\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config path, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load() -> Self {
        Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> TodoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TodoError::Config(e.to_string()))
    }
}
