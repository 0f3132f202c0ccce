use crate::error::{BlogError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Configuration for blogdesk, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogConfig {
    /// Number of content characters used for auto-generated excerpts
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,

    /// strftime-style format for dates in listings and previews
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_excerpt_length() -> usize {
    DEFAULT_EXCERPT_LENGTH
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            date_format: default_date_format(),
        }
    }
}

/// Keys accepted by `config <key> [value]`.
pub const CONFIG_KEYS: [&str; 2] = ["excerpt-length", "date-format"];

impl BlogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BlogError::Io)?;
        let config: BlogConfig =
            serde_json::from_str(&content).map_err(BlogError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BlogError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BlogError::Serialization)?;
        fs::write(config_path, content).map_err(BlogError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "excerpt-length" => Ok(self.excerpt_length.to_string()),
            "date-format" => Ok(self.date_format.clone()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "excerpt-length" => {
                let length: usize = value.trim().parse().map_err(|_| {
                    BlogError::Config(format!("excerpt-length must be a number, got '{}'", value))
                })?;
                if length == 0 {
                    return Err(BlogError::Config(
                        "excerpt-length must be greater than zero".to_string(),
                    ));
                }
                self.excerpt_length = length;
            }
            "date-format" => {
                if value.trim().is_empty() {
                    return Err(BlogError::Config("date-format cannot be empty".to_string()));
                }
                self.date_format = value.to_string();
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

/// Formats a timestamp with a user-supplied strftime pattern. An invalid
/// pattern falls back to the default rather than failing the render.
pub fn format_date(date: DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_ok() {
        return out;
    }
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

fn unknown_key(key: &str) -> BlogError {
    BlogError::Config(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
