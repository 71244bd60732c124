use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::segment::SeparatorAssignment;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub assignment: Option<SeparatorAssignment>,
    pub long_vowel_separator: Option<bool>,
    pub plain_links: Option<bool>,
    pub utc_offset_hours: Option<i32>,
    pub cache_ttl_secs: Option<u64>,
    pub youtube_api_key: Option<String>,
}

impl Config {
    /// Load config from ~/.config/stamplist/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("stamplist")
        .join("config.toml")
}
