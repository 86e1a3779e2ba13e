//! Home Court Configuration
//!
//! Config file: ~/.config/home-court/config.toml (or an explicit --config path).
//! The API credential normally comes from the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables checked for the credential, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Generative API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature; moderate so the decree wording varies
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Credential fallback when no env var is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout. Unset means the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl LlmConfig {
    /// Resolve the credential from the process environment, then the config file
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as `resolve_api_key` with an injectable environment lookup
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter when COURT_LOG is unset (e.g. "info", "court_common=debug")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path; defaults to the XDG state directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourtConfig {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl CourtConfig {
    /// Default user config path: <config dir>/home-court/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("home-court").join("config.toml"))
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. User config (<config dir>/home-court/config.toml)
    /// 3. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load_from(&user_path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CourtConfig::default();
        assert_eq!(config.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.llm.timeout_secs, None);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CourtConfig::from_toml_str(
            r#"
            [llm]
            model = "gemini-2.5-pro"
            timeout_secs = 45
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.model, "gemini-2.5-pro");
        assert_eq!(config.llm.timeout_secs, Some(45));
        assert_eq!(config.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(CourtConfig::from_toml_str("[llm\nmodel = ").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\nfile = \"/tmp/court.log\"\n").unwrap();

        let config = CourtConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/court.log")));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = CourtConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_api_key_env_order() {
        let env: HashMap<&str, &str> = [("GEMINI_API_KEY", "gem"), ("API_KEY", "plain")].into();
        let config = LlmConfig {
            api_key: Some("file".to_string()),
            ..LlmConfig::default()
        };

        let key = config.resolve_api_key_with(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(key.as_deref(), Some("gem"));

        let key = config.resolve_api_key_with(|name| {
            (name == "API_KEY").then(|| "plain".to_string())
        });
        assert_eq!(key.as_deref(), Some("plain"));

        let key = config.resolve_api_key_with(|_| None);
        assert_eq!(key.as_deref(), Some("file"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = LlmConfig {
            api_key: Some("   ".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(config.resolve_api_key_with(|_| Some(String::new())), None);
    }
}
