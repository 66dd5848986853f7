//! Persistent console settings.
//!
//! Stored as JSON at `<config_dir>/tapedeck/settings.json`. The server URL can be
//! overridden with the `TAPEDECK_SERVER_URL` environment variable (a `.env` file
//! in the working directory is honored).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConsoleError;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const SERVER_URL_ENV_VAR: &str = "TAPEDECK_SERVER_URL";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Departments offered in the filter and upload forms
pub const DEFAULT_DEPARTMENTS: &[&str] = &["Sales", "Support", "Engineering", "Marketing", "HR"];

/// Language codes offered in the filter and upload forms
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "es", "fr", "de", "it", "pt"];

/// Pattern identifiers understood by `/generate-patterns`
pub const DEFAULT_PATTERNS: &[&str] = &["summary", "action_items", "key_points", "questions"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Base URL of the recordings backend
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_departments")]
    pub departments: Vec<String>,

    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_departments() -> Vec<String> {
    to_owned_list(DEFAULT_DEPARTMENTS)
}

fn default_languages() -> Vec<String> {
    to_owned_list(DEFAULT_LANGUAGES)
}

fn default_patterns() -> Vec<String> {
    to_owned_list(DEFAULT_PATTERNS)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_timeout_secs(),
            departments: default_departments(),
            languages: default_languages(),
            patterns: default_patterns(),
        }
    }
}

impl Settings {
    /// Location of the settings file
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tapedeck")
            .join("settings.json")
    }

    /// Load settings from the default location, then apply the environment override.
    /// A missing or unreadable file yields defaults.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        let mut settings = Self::load_from(&Self::path()).unwrap_or_default();
        if let Ok(url) = std::env::var(SERVER_URL_ENV_VAR)
            && !url.trim().is_empty()
        {
            crate::verbose!("Using server URL from {}", SERVER_URL_ENV_VAR);
            settings.server_url = url;
        }
        settings
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Validated, normalized server base URL
    pub fn base_url(&self) -> Result<String, ConsoleError> {
        normalize_server_url(&self.server_url)
    }
}

/// Validate a backend URL and strip trailing slashes
pub fn normalize_server_url(server_url: &str) -> Result<String, ConsoleError> {
    let trimmed = server_url.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::Config(
            "Server URL not configured.\n\
             Set with: tapedeck config --server-url http://localhost:8000"
                .to_string(),
        ));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ConsoleError::Config(format!(
            "Invalid server URL: must start with http:// or https://\n\
             Got: {}\n\
             Example: tapedeck config --server-url http://localhost:8000",
            trimmed
        )));
    }

    let after_scheme = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or("");
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        return Err(ConsoleError::Config(format!(
            "Invalid server URL: missing host\nGot: {}",
            trimmed
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
