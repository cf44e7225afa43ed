//! Configuration file management for checkgen.
//!
//! Provides a TOML-based config file at `~/.config/checkgen/config.toml`
//! and a resolution chain for the API key: CLI flag > env var > config
//! file. Credentials are resolved once here and injected into the
//! provider's constructor, never read ad hoc.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use checkgen_core::provider::{DEFAULT_MODEL, GeminiConfig};

/// Env var consulted when no CLI flag is given.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    pub provider: ProviderSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderSection {
    /// Gemini API key.
    pub api_key: String,
    /// Generation model name.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the checkgen config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/checkgen` or
/// `~/.config/checkgen`. We intentionally ignore the platform-specific
/// `dirs::config_dir()` (which returns `~/Library/Application Support`
/// on macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("checkgen");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("checkgen")
}

/// Return the path to the checkgen config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at the default path. Returns an error
/// if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix (the file holds an API key).
pub fn save_config(config: &ConfigFile) -> Result<()> {
    save_config_to(&config_path(), config)
}

pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready to construct the provider.
#[derive(Debug)]
pub struct CheckgenConfig {
    pub gemini: GeminiConfig,
}

impl CheckgenConfig {
    /// Resolve configuration using the chain: CLI flag > `GEMINI_API_KEY`
    /// env var > config file.
    ///
    /// Resolution succeeds even when no key is found anywhere; the
    /// provider constructor is the single place that rejects missing
    /// credentials.
    pub fn resolve(api_key_flag: Option<&str>) -> Result<Self> {
        let file = load_config().ok();

        let api_key = match api_key_flag {
            Some(key) => key.to_string(),
            None => match std::env::var(API_KEY_ENV) {
                Ok(key) if !key.trim().is_empty() => key,
                _ => file
                    .as_ref()
                    .map(|f| f.provider.api_key.clone())
                    .unwrap_or_default(),
            },
        };

        let mut gemini = GeminiConfig::new(api_key);
        if let Some(file) = &file {
            gemini.model = file.provider.model.clone();
        }

        Ok(Self { gemini })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
