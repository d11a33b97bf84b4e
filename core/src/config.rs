//! Configuration management for scan defaults.
//!
//! Stores configuration in JSON format at `~/.die/config.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::{ResultFormat, ScanFlags};
use crate::error::{Error, Result};

/// Environment variable consulted when no database is configured.
pub const DATABASE_ENV: &str = "DIE_DB_PATH";

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Signature database used when a request names none.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Request a deep scan.
    #[serde(default = "default_true")]
    pub deep_scan: bool,

    /// Enable heuristic signatures.
    #[serde(default)]
    pub heuristic_scan: bool,

    /// Descend into overlays, resources and archive members.
    #[serde(default)]
    pub recursive_scan: bool,

    /// Scan every file type.
    #[serde(default)]
    pub all_types: bool,

    /// Report layout.
    #[serde(default)]
    pub format: ResultFormat,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            deep_scan: true,
            heuristic_scan: false,
            recursive_scan: false,
            all_types: false,
            format: ResultFormat::default(),
        }
    }
}

impl Config {
    /// Fold the scan options into a flag bitmask.
    pub fn scan_flags(&self) -> ScanFlags {
        let mut flags = ScanFlags::empty();
        flags.set(ScanFlags::DEEP_SCAN, self.deep_scan);
        flags.set(ScanFlags::HEURISTIC_SCAN, self.heuristic_scan);
        flags.set(ScanFlags::RECURSIVE_SCAN, self.recursive_scan);
        flags.set(ScanFlags::ALLTYPES_SCAN, self.all_types);
        flags.with_format(self.format)
    }

    /// The configured database, falling back to `DIE_DB_PATH`.
    pub fn resolve_database(&self) -> Option<PathBuf> {
        self.database_path.clone().or_else(|| {
            std::env::var_os(DATABASE_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }
}

/// Configuration store for scan defaults.
///
/// Handles reading and writing configuration to `~/.die/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.die/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            config_path: home.join(".die").join("config.json"),
        })
    }

    /// Create a config store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path to the configuration file.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let config_dir = self.config_dir();
        fs::create_dir_all(&config_dir)
            .await
            .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;

        let content = serde_json::to_string_pretty(config)?;

        // Write to a temp file then rename so readers never see a torn file
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }

    /// Set (or clear) the default signature database.
    pub async fn set_database_path(&self, path: Option<PathBuf>) -> Result<()> {
        let mut config = self.load().await?;
        config.database_path = path;
        self.save(&config).await
    }

    /// Set the default report format.
    pub async fn set_format(&self, format: ResultFormat) -> Result<()> {
        let mut config = self.load().await?;
        config.format = format;
        self.save(&config).await
    }
}
