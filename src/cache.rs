use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default lifetime of a cached lookup
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize, Serialize)]
struct Entry<T> {
    cached_at: i64,
    value: T,
}

/// File-backed key/value store whose entries expire after a fixed TTL
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
    ttl: Duration,
}

pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("stamplist")
        .join("metadata")
}

impl Cache {
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        Self { dir, ttl }
    }

    fn path(&self, key: &str) -> PathBuf {
        let key: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{key}.json"))
    }

    /// Load a value, if present and not expired.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        let data = std::fs::read_to_string(&path).ok()?;
        let entry: Entry<T> = serde_json::from_str(&data).ok()?;
        let age = chrono::Utc::now().timestamp() - entry.cached_at;
        if age < 0 || age as u64 >= self.ttl.as_secs() {
            debug!("Cache expired: {}", path.display());
            return None;
        }
        debug!("Cache hit: {}", path.display());
        Some(entry.value)
    }

    /// Save a value under `key`.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path(key);
        std::fs::create_dir_all(&self.dir)?;
        let entry = Entry {
            cached_at: chrono::Utc::now().timestamp(),
            value,
        };
        std::fs::write(&path, serde_json::to_string_pretty(&entry)?)?;
        debug!("Cached: {}", path.display());
        Ok(())
    }
}
