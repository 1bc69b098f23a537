use crate::persistence::{atomic_write, config_file, read_file};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_USER_ID: u64 = 1245;

/// Client settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Task store root; requests go to `{base_url}/todos`
    pub base_url: String,
    /// Owner of every task this client reads or creates
    pub user_id: u64,
    pub request_timeout_secs: u64,
    /// How long an error stays on screen
    pub notification_timeout_secs: u64,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID,
            request_timeout_secs: 10,
            notification_timeout_secs: 3,
            log_level: None,
        }
    }
}

impl Config {
    /// Load from an explicit path, or the default location when `None`.
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_file()?,
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match read_file(path)? {
            Some(content) => serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file: {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        atomic_write(path, &json)
    }

    /// Command-line flags win over the file
    pub fn with_overrides(mut self, base_url: Option<String>, user_id: Option<u64>, log_level: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(id) = user_id {
            self.user_id = id;
        }
        if log_level.is_some() {
            self.log_level = log_level;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }
}

/// Write a default config file, refusing to clobber an existing one unless forced
pub fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_file()?,
    };

    if path.exists() && !force {
        anyhow::bail!("Config file already exists: {} (use --force to overwrite)", path.display());
    }

    Config::default().save(&path)?;
    Ok(path)
}
