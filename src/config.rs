use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::{Matcher, SkillNormalizer, SynonymTable, DEFAULT_TOP_N};
use crate::services::SkillSetCache;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub directory: DirectorySettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Skill aliases, `alias = "canonical"`
    #[serde(default)]
    pub synonyms: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorySettings {
    /// JSON snapshot of users, projects and reviews
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub drop_empty_tokens: bool,
    #[serde(default = "default_max_peer_matches")]
    pub max_peer_matches: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            drop_empty_tokens: false,
            max_peer_matches: default_max_peer_matches(),
        }
    }
}

fn default_top_n() -> usize { DEFAULT_TOP_N }
fn default_max_peer_matches() -> usize { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    #[serde(default)]
    pub enabled: bool,
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLBRIDGE_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLBRIDGE__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Build the skill normalizer described by these settings
    pub fn normalizer(&self) -> SkillNormalizer {
        let normalizer = SkillNormalizer::new().drop_empty_tokens(self.matching.drop_empty_tokens);
        let table = SynonymTable::new(&self.synonyms);
        if table.is_empty() {
            return normalizer;
        }
        tracing::debug!("Canonicalizing skills through {} synonyms", table.len());
        normalizer.with_canonicalizer(Arc::new(table))
    }

    /// Build the matcher described by these settings
    pub fn matcher(&self) -> Matcher {
        let mut matcher = Matcher::new(self.normalizer()).with_top_n(self.matching.top_n);
        if self.cache.enabled {
            let capacity = self.cache.capacity.unwrap_or(10_000);
            matcher = matcher.with_cache(Arc::new(SkillSetCache::new(capacity)));
        }
        matcher
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("SKILLBRIDGE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
