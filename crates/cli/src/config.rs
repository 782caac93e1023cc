use proto::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

fn home_dir() -> String {
    std::env::var("HOME").unwrap_or_else(|_| ".".to_string())
}

/// Top-level config (`config.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Persistent store config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// SQLite file path.
    #[serde(default = "default_storage_url")]
    pub url: String,
}

fn default_storage_url() -> String {
    format!("{}/.termfolio/termfolio.db", home_dir())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: default_storage_url(),
        }
    }
}

/// Where `export-data` writes backups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: String,
}

fn default_export_dir() -> String {
    format!("{}/Downloads", home_dir())
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

/// npm endpoints and the package list shown by `packages`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsConfig {
    #[serde(default = "default_downloads_url")]
    pub downloads_url: String,
    #[serde(default = "default_registry_url")]
    pub registry_url: String,
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_downloads_url() -> String {
    stats::DEFAULT_DOWNLOADS_URL.to_string()
}

fn default_registry_url() -> String {
    stats::DEFAULT_REGISTRY_URL.to_string()
}

fn default_packages() -> Vec<String> {
    stats::MY_PACKAGES.iter().map(|p| p.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            downloads_url: default_downloads_url(),
            registry_url: default_registry_url(),
            packages: default_packages(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl StatsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

/// Session behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// A new command on a tab aborts that tab's still-running command.
    #[serde(default = "default_cancel_pending")]
    pub cancel_pending_on_new_command: bool,
    /// Delay between a confirmed `clear-data` and the session reload.
    #[serde(default = "default_reload_delay_ms")]
    pub reload_delay_ms: u64,
}

fn default_cancel_pending() -> bool {
    true
}

fn default_reload_delay_ms() -> u64 {
    2000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cancel_pending_on_new_command: default_cancel_pending(),
            reload_delay_ms: default_reload_delay_ms(),
        }
    }
}

impl SessionConfig {
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}

impl Config {
    /// Loads configuration from explicit path, fallback locations, and env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = path.map(|p| p.to_path_buf()).or_else(|| {
            // Look in current dir, then home dir
            let cwd = std::env::current_dir().ok()?.join("config.toml");
            if cwd.exists() {
                return Some(cwd);
            }
            let home_config = PathBuf::from(std::env::var("HOME").ok()?)
                .join(".termfolio")
                .join("config.toml");
            if home_config.exists() {
                return Some(home_config);
            }
            None
        });
        debug!(path = ?config_path, "Config file resolved");

        let mut config = if let Some(path) = config_path {
            let content = std::fs::read_to_string(&path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(|e| ConfigError::Toml(e.to_string()))?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var("TERMFOLIO_DB") {
            config.storage.url = url;
        }
        if let Ok(dir) = std::env::var("TERMFOLIO_EXPORT_DIR") {
            config.export.dir = dir;
        }
        if let Ok(url) = std::env::var("TERMFOLIO_DOWNLOADS_URL") {
            config.stats.downloads_url = url;
        }
        if let Ok(packages) = std::env::var("TERMFOLIO_PACKAGES") {
            config.stats.packages = packages
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }

        config.validate()?;
        debug!(
            db = %config.storage.url,
            packages = config.stats.packages.len(),
            "Config loaded"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "stats.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.storage.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
