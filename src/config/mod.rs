//! # Configuration Management Module
//!
//! Loads, validates and writes the `rollcall` TOML configuration.
//!
//! ## Configuration Structure
//!
//! - [`AliasLimits`] - prefix length cap and candidate budget
//! - [`PoliciesConfig`] - per participant kind alias policy
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Configuration File Format
//!
//! ```toml
//! [aliases]
//! max_prefix_length = 10
//! candidate_budget = 16
//!
//! [policies.swarm]
//! prefix_length = 3
//! always_number = true
//!
//! [logging]
//! level = "info"
//! file = "rollcall.log"
//! ```
//!
//! Every section is optional; absent values take their defaults.

use std::io::ErrorKind;

use anyhow::{anyhow, Result};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::alias::AliasLimits;
use crate::roster::{JoinPolicy, ParticipantKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub aliases: AliasLimits,
    #[serde(default)]
    pub policies: PoliciesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Alias policy for each kind of participant joining an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliciesConfig {
    #[serde(default = "JoinPolicy::character")]
    pub character: JoinPolicy,
    #[serde(default = "JoinPolicy::monster")]
    pub monster: JoinPolicy,
    /// Swarm members are anonymous, so they always show a number.
    #[serde(default = "JoinPolicy::swarm")]
    pub swarm: JoinPolicy,
}

impl Default for PoliciesConfig {
    fn default() -> Self {
        PoliciesConfig {
            character: JoinPolicy::character(),
            monster: JoinPolicy::monster(),
            swarm: JoinPolicy::swarm(),
        }
    }
}

impl PoliciesConfig {
    pub fn for_kind(&self, kind: ParticipantKind) -> JoinPolicy {
        match kind {
            ParticipantKind::Character => self.character,
            ParticipantKind::Monster => self.monster,
            ParticipantKind::Swarm => self.swarm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parse `level` ("error", "warn", "info", "debug", "trace", "off").
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Unknown log level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        match fs::metadata(path).await {
            Ok(_) => Self::load(path).await,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config file at {}; using defaults", path);
                Ok(Config::default())
            }
            Err(e) => Err(anyhow!("Failed to stat config file {}: {}", path, e)),
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject values the allocator cannot work with.
    pub fn validate(&self) -> Result<()> {
        let max = self.aliases.max_prefix_length;
        if max == 0 {
            return Err(anyhow!("aliases.max_prefix_length must be at least 1"));
        }
        if self.aliases.candidate_budget == 0 {
            return Err(anyhow!("aliases.candidate_budget must be at least 1"));
        }
        for kind in ParticipantKind::ALL {
            let policy = self.policies.for_kind(kind);
            if policy.prefix_length == 0 || policy.prefix_length > max {
                return Err(anyhow!(
                    "policies.{}.prefix_length must be between 1 and {} (got {})",
                    kind,
                    max,
                    policy.prefix_length
                ));
            }
        }
        self.logging.level_filter()?;
        Ok(())
    }
}
