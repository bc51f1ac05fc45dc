use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::habits::HabitLog;

const DATA_FILE: &str = "habit-log.json";
const LOCATION_CACHE_FILE: &str = "location-cache.json";

/// Cached city labels are trusted for one hour.
pub const LOCATION_CACHE_MAX_AGE_MS: i64 = 60 * 60 * 1000;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct LocationCache {
    city: String,
    /// Epoch milliseconds at cache time.
    timestamp: i64,
}

pub struct HabitStore {
    base_dir: PathBuf,
}

impl HabitStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daily3");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Load the habit log. Never fails: a missing file is a fresh log, and a
    /// corrupt one is logged and replaced by an empty log so rendering can
    /// always proceed.
    pub fn load_habits(&self) -> HabitLog {
        let path = self.file_path(DATA_FILE);
        if !path.exists() {
            return HabitLog::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(log) => log,
                Err(e) => {
                    log::warn!("habit log at {} is unreadable: {e}", path.display());
                    HabitLog::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}", path.display());
                HabitLog::default()
            }
        }
    }

    /// Atomic save: write to a sidecar, fsync, then rename over the original.
    pub fn save_habits(&self, log: &HabitLog) -> Result<()> {
        let path = self.file_path(DATA_FILE);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(log)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Cached city if it is younger than the TTL. Unreadable or stale caches
    /// yield None; the caller falls back to a fresh lookup.
    pub fn load_cached_city(&self, now_ms: i64) -> Option<String> {
        let path = self.file_path(LOCATION_CACHE_FILE);
        let content = fs::read_to_string(&path).ok()?;
        let cache: LocationCache = match serde_json::from_str(&content) {
            Ok(cache) => cache,
            Err(e) => {
                log::warn!("location cache at {} is unreadable: {e}", path.display());
                return None;
            }
        };
        let age = now_ms - cache.timestamp;
        if (0..LOCATION_CACHE_MAX_AGE_MS).contains(&age) {
            Some(cache.city)
        } else {
            None
        }
    }

    pub fn cache_city(&self, city: &str, now_ms: i64) -> Result<()> {
        let cache = LocationCache {
            city: city.to_string(),
            timestamp: now_ms,
        };
        let json = serde_json::to_string(&cache)?;
        fs::write(self.file_path(LOCATION_CACHE_FILE), json)?;
        Ok(())
    }
}
