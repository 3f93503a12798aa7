//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for launchdeck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini model id
    pub model: Option<String>,
    /// Generative Language API base URL
    pub base_url: Option<String>,
    /// API key (alternative to environment variables)
    pub api_key: Option<String>,
    /// "dark" or "light"
    pub theme: Option<String>,
    /// Give up on a reply after this many seconds; unset or 0 waits forever
    pub reply_timeout_secs: Option<u64>,
    /// File holding a replacement system instruction
    pub system_instruction_file: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("launchdeck")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("LAUNCHDECK_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Write the example config if no file exists yet
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, example_config())?;
        Ok(path)
    }

    /// API key from config, then `GEMINI_API_KEY`, `GOOGLE_API_KEY`, `API_KEY`
    pub fn api_key(&self) -> Option<String> {
        launchdeck_ai::providers::get_api_key(self.api_key.as_deref()).ok()
    }

    /// Reply bound; zero means none
    pub fn reply_timeout(&self) -> Option<Duration> {
        self.reply_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Contents of `system_instruction_file`, if configured
    pub fn system_instruction(&self) -> std::io::Result<Option<String>> {
        let Some(file) = &self.system_instruction_file else {
            return Ok(None);
        };
        let path = expand_home(file);
        let text = fs::read_to_string(path)?;
        Ok(Some(text.trim().to_string()).filter(|t| !t.is_empty()))
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# launchdeck configuration file
# Place at ~/.config/launchdeck/config.toml (Linux), ~/Library/Application Support/launchdeck/config.toml (macOS)
# or %APPDATA%\launchdeck\config.toml (Windows). LAUNCHDECK_CONFIG_PATH overrides the location.

# Gemini model used by the assistant
model = "gemini-2.5-flash"

# Generative Language API endpoint
# base_url = "https://generativelanguage.googleapis.com/v1beta"

# Color theme (dark, light)
theme = "dark"

# Abandon a reply after this many seconds (0 or unset waits forever)
# reply_timeout_secs = 60

# Replace the assistant's system instruction (optional)
# system_instruction_file = "~/.config/launchdeck/instruction.txt"

# API key (optional - GEMINI_API_KEY, GOOGLE_API_KEY or API_KEY also work)
# It's recommended to use environment variables instead for security
# api_key = "..."
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(example_config()).unwrap();
        assert_eq!(config.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(config.theme.as_deref(), Some("dark"));
        assert!(config.api_key.is_none());
        assert!(config.reply_timeout().is_none());
    }

    #[test]
    fn test_reply_timeout() {
        let config = Config {
            reply_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.reply_timeout().is_none());

        let config = Config {
            reply_timeout_secs: Some(45),
            ..Default::default()
        };
        assert_eq!(config.reply_timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_configured_key_wins() {
        let config = Config {
            api_key: Some("from-config".into()),
            ..Default::default()
        };
        assert_eq!(config.api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/launchdeck/config.toml"));
        assert_eq!(config, Config::default());
    }
}
