//! # Configuration Management Module
//!
//! TOML-backed configuration for the TaskQuest plugin and its CLI. Every
//! section has sensible defaults, so a missing file or a partial file both
//! work; `validate` catches values that would break the game balance (a
//! hard task paying less than an easy one, a drop rate outside `[0, 1]`).
//!
//! ```toml
//! [plugin]
//! current_user = "Hero"
//! default_enabled = false
//!
//! [progression]
//! base_reward = 5
//! hard_reward = 25
//! easy_reward = 2
//! level_threshold = 100
//! loot_drop_rate = 0.10
//!
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::gamify::resolver::{
    ProgressionRules, BASE_REWARD, EASY_MARKER, EASY_REWARD, HARD_MARKER, HARD_REWARD,
    LEVEL_THRESHOLD, LOOT_DROP_RATE,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub plugin: PluginConfig,
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// User the plugin attributes completions to.
    pub current_user: String,
    /// Whether the host should enable the plugin on first install.
    #[serde(default)]
    pub default_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    pub base_reward: u64,
    pub hard_reward: u64,
    pub easy_reward: u64,
    /// Marker token selecting the hard reward tier. Hard beats easy.
    #[serde(default = "default_hard_marker")]
    pub hard_marker: String,
    /// Marker token selecting the easy reward tier.
    #[serde(default = "default_easy_marker")]
    pub easy_marker: String,
    /// Rank N is reached at N × this much gold.
    pub level_threshold: u64,
    /// Loot drop chance per completion, in `[0, 1]`.
    pub loot_drop_rate: f64,
}

fn default_hard_marker() -> String {
    HARD_MARKER.to_string()
}

fn default_easy_marker() -> String {
    EASY_MARKER.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Optional override for the local sled backup path; defaults to
    /// `<data_dir>/taskquest`.
    #[serde(default)]
    pub local_db_path: Option<String>,
    /// Optional override for the standalone shared-config file; defaults to
    /// `<data_dir>/plugin-config.json`.
    #[serde(default)]
    pub shared_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            current_user: "Hero".to_string(),
            default_enabled: false,
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_reward: BASE_REWARD,
            hard_reward: HARD_REWARD,
            easy_reward: EASY_REWARD,
            hard_marker: default_hard_marker(),
            easy_marker: default_easy_marker(),
            level_threshold: LEVEL_THRESHOLD,
            loot_drop_rate: LOOT_DROP_RATE,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            local_db_path: None,
            shared_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugin: PluginConfig::default(),
            progression: ProgressionConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ProgressionConfig {
    /// Resolver-facing view of this section.
    pub fn rules(&self) -> ProgressionRules {
        ProgressionRules {
            base_reward: self.base_reward,
            hard_reward: self.hard_reward,
            easy_reward: self.easy_reward,
            hard_marker: self.hard_marker.clone(),
            easy_marker: self.easy_marker.clone(),
            level_threshold: self.level_threshold,
            loot_drop_rate: self.loot_drop_rate,
        }
    }
}

impl StorageConfig {
    pub fn local_db_path(&self) -> PathBuf {
        match &self.local_db_path {
            Some(path) => PathBuf::from(path),
            None => Path::new(&self.data_dir).join("taskquest"),
        }
    }

    pub fn shared_file_path(&self) -> PathBuf {
        match &self.shared_file {
            Some(path) => PathBuf::from(path),
            None => Path::new(&self.data_dir).join("plugin-config.json"),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("cannot read config file {path}: {e}"))?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write a starter configuration file. Refuses to clobber an existing one.
    pub fn create_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            return Err(anyhow!("config file {path} already exists"));
        }
        let config = Config::default();
        std::fs::write(path, toml::to_string_pretty(&config)?)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.plugin.current_user.trim().is_empty() {
            return Err(anyhow!("plugin.current_user must not be empty"));
        }
        let p = &self.progression;
        if p.easy_reward >= p.base_reward || p.base_reward >= p.hard_reward {
            return Err(anyhow!(
                "progression rewards must satisfy easy < base < hard (got {} / {} / {})",
                p.easy_reward,
                p.base_reward,
                p.hard_reward
            ));
        }
        if p.hard_marker.trim().is_empty() || p.easy_marker.trim().is_empty() {
            return Err(anyhow!("difficulty markers must not be empty"));
        }
        if p.level_threshold == 0 {
            return Err(anyhow!("progression.level_threshold must be at least 1"));
        }
        if !(0.0..=1.0).contains(&p.loot_drop_rate) {
            return Err(anyhow!(
                "progression.loot_drop_rate must be within [0, 1], got {}",
                p.loot_drop_rate
            ));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        Ok(())
    }
}
