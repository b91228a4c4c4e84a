use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "stree";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Largest input (bytes) the CLI indexes without `--force`
    /// Construction is not linear, so big inputs get slow quickly
    #[serde(default = "default_max_text_size")]
    pub max_text_size: u64,

    /// Use colors when printing search hits
    #[serde(default = "default_color")]
    pub color: bool,

    /// Inputs at least this large (bytes) show a progress bar while building
    #[serde(default = "default_progress_threshold")]
    pub progress_threshold: u64,
}

fn default_max_text_size() -> u64 {
    4 * 1024 * 1024 // 4MB
}

fn default_color() -> bool {
    true
}

fn default_progress_threshold() -> u64 {
    64 * 1024 // 64KB
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_text_size: default_max_text_size(),
            color: default_color(),
            progress_threshold: default_progress_threshold(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load config from an explicit path, or return default if not found
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .context("Failed to read config file")?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the app data directory, returning the file written
    pub fn save(&self) -> Result<PathBuf> {
        let path = get_config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to an explicit path, creating its directory if needed
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Whether an input of `len` bytes is within the size limit
    pub fn allows(&self, len: usize) -> bool {
        len as u64 <= self.max_text_size
    }

    /// Whether building over `len` bytes should show progress
    pub fn shows_progress(&self, len: usize) -> bool {
        len as u64 >= self.progress_threshold
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
///
/// The directory is not created here; only saving the config does that.
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    Ok(base.join(APP_NAME))
}
