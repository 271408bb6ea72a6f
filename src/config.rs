use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::round::RoundConfig;
use crate::tier::TierThresholds;

pub const DEFAULT_DURATION_SECS: u32 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub duration_secs: u32,
    pub tiers: TierThresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            tiers: TierThresholds::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("round duration must be at least one second")]
    ZeroDuration,
    #[error("tier thresholds must descend (long {long} >= short {short} >= two-word {two_words})")]
    UnorderedTiers {
        long: u32,
        short: u32,
        two_words: u32,
    },
}

impl Config {
    pub fn round_config(&self) -> Result<RoundConfig, ConfigError> {
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if !self.tiers.is_descending() {
            return Err(ConfigError::UnorderedTiers {
                long: self.tiers.long_sentence,
                short: self.tiers.short_sentence,
                two_words: self.tiers.two_words,
            });
        }

        if !self.tiers.reaches_long_sentences(self.duration_secs) {
            warn!(
                duration = self.duration_secs,
                long_sentence = self.tiers.long_sentence,
                short_sentence = self.tiers.short_sentence,
                "round is too short to draw from every tier"
            );
        }

        Ok(RoundConfig {
            duration_secs: self.duration_secs,
            tiers: self.tiers,
        })
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "check-typing") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("check_typing_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => {
                debug!(path = %self.path.display(), "no config file, using defaults");
                return Config::default();
            }
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring malformed config file");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
