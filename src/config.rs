use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Device screen width driving widget breakpoint selection.
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Allow the geolocation lookup; the cached city is still used when off.
    #[serde(default = "default_location_enabled")]
    pub location_enabled: bool,
    /// Fixed header label; skips the lookup entirely when set.
    #[serde(default)]
    pub location_label: Option<String>,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_screen_width() -> u32 {
    390
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_location_enabled() -> bool {
    true
}
fn default_output_file() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("daily3")
        .join("widget.png")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            theme: default_theme(),
            location_enabled: default_location_enabled(),
            location_label: None,
            output_file: default_output_file(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daily3")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.screen_width, 390);
        assert_eq!(config.theme, "default");
        assert!(config.location_enabled);
        assert!(config.location_label.is_none());
        assert!(config.output_file.contains("widget.png"));
    }

    #[test]
    fn test_config_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("screen_width = 428\nlocation_enabled = false\n").unwrap();
        assert_eq!(config.screen_width, 428);
        assert!(!config.location_enabled);
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn test_config_toml_round_trip() {
        let mut config = Config::default();
        config.location_label = Some("Berlin".to_string());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(back.location_label.as_deref(), Some("Berlin"));
        assert_eq!(back.screen_width, config.screen_width);
    }
}
