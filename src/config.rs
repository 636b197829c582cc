//! Configuration for recfile
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a record store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Base directory for all backing files.
    /// Internal structure:
    ///   {base_dir}/
    ///     ├── Product.jsonl
    ///     └── <TypeName>.jsonl   (one file per record type)
    pub base_dir: PathBuf,

    /// File extension for backing files (without the dot)
    pub extension: String,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Sync policy: when to fsync after a write
    pub sync_policy: SyncPolicy,
}

/// Write sync policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPolicy {
    /// fsync after every mutation (safest, slowest)
    EveryWrite,

    /// Leave flushing to the OS (fast, may lose the tail on power loss)
    Never,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./data"),
            extension: "jsonl".to_string(),
            sync_policy: SyncPolicy::EveryWrite,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the base directory (root for all backing files)
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.base_dir = path.into();
        self
    }

    /// Set the backing file extension (without the dot)
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.config.extension = ext.into();
        self
    }

    /// Set the write sync policy
    pub fn sync_policy(mut self, policy: SyncPolicy) -> Self {
        self.config.sync_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
