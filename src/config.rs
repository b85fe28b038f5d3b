use crate::error::{Result, YttextError};
use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred caption language code.
    pub language: String,
    pub default_format: OutputFormat,
    /// Maximum line length for the readable format.
    pub line_length: usize,
    /// `Accept-Language` sent with the watch page request.
    pub accept_language: String,
    pub user_agent: Option<String>,
    /// Per-request timeout; none by default.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            default_format: OutputFormat::default(),
            line_length: 80,
            accept_language: "en-US".to_string(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load the config file (if any), then apply `YTTEXT_*` environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };

        if let Ok(lang) = std::env::var("YTTEXT_LANG") {
            config.language = lang;
        }
        if let Ok(format) = std::env::var("YTTEXT_FORMAT") {
            if let Ok(f) = format.parse() {
                config.default_format = f;
            }
        }
        if let Ok(length) = std::env::var("YTTEXT_LINE_LENGTH") {
            if let Ok(l) = length.parse() {
                config.line_length = l;
            }
        }
        if let Ok(accept) = std::env::var("YTTEXT_ACCEPT_LANGUAGE") {
            config.accept_language = accept;
        }
        if let Ok(timeout) = std::env::var("YTTEXT_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                config.timeout_secs = Some(t);
            }
        }

        Ok(config)
    }

    /// Load a specific TOML file. Missing keys take their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            YttextError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(YttextError::Config(
                "Language code must not be empty".to_string(),
            ));
        }
        if self.accept_language.trim().is_empty() {
            return Err(YttextError::Config(
                "Accept-Language must not be empty".to_string(),
            ));
        }
        if self.line_length == 0 {
            return Err(YttextError::Config(
                "Line length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("yttext").join("config.toml"))
    }
}
