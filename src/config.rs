//! Configuration file support for storefront-assets.
//!
//! Provides YAML-based configuration through `storefront-assets.config.yml`
//! files, including data structures, file loading, and validation. Account
//! secrets are never read from the file; they come from the environment.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shared::retry::RetryPolicy;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "storefront-assets.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub cloud_name: Option<String>,
    pub api_base: Option<String>,
    pub folder: Option<String>,
    pub store_path: Option<PathBuf>,
    pub format: Option<String>,
    pub cleanup: Option<CleanupSettings>,
    pub upload: Option<UploadSettings>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Retry settings for remote image deletion.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CleanupSettings {
    pub max_attempts: Option<u32>,
    pub attempt_timeout_secs: Option<u64>,
    pub backoff_ms: Option<u64>,
}

impl CleanupSettings {
    /// Builds the retry policy, filling unset values with the defaults
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts.unwrap_or(RetryPolicy::DEFAULT_MAX_ATTEMPTS),
            self.attempt_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(RetryPolicy::DEFAULT_ATTEMPT_TIMEOUT),
            self.backoff_ms
                .map(Duration::from_millis)
                .unwrap_or(RetryPolicy::DEFAULT_BACKOFF),
        )
    }
}

/// Settings for image uploads.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct UploadSettings {
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn cleanup_policy(&self) -> RetryPolicy {
        self.cleanup.clone().unwrap_or_default().to_policy()
    }

    pub fn upload_timeout(&self) -> Option<Duration> {
        self.upload
            .as_ref()
            .and_then(|u| u.timeout_secs)
            .map(Duration::from_secs)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref folder) = config.folder {
        if folder.trim().is_empty() {
            bail!(
                "Invalid config: folder must not be empty.\n\n\
                 💡 Hint: Remove the field to use the default folder \"c2store\"."
            );
        }
    }

    if let Some(ref cloud_name) = config.cloud_name {
        if cloud_name.trim().is_empty() {
            bail!("Invalid config: cloud_name must not be empty.");
        }
    }

    if let Some(ref cleanup) = config.cleanup {
        if cleanup.max_attempts == Some(0) {
            bail!(
                "Invalid config: cleanup.max_attempts must be at least 1.\n\n\
                 💡 Hint: 1 means a single delete attempt without retries."
            );
        }
        if cleanup.attempt_timeout_secs == Some(0) {
            bail!("Invalid config: cleanup.attempt_timeout_secs must be greater than 0.");
        }
    }

    if let Some(ref upload) = config.upload {
        if upload.timeout_secs == Some(0) {
            bail!("Invalid config: upload.timeout_secs must be greater than 0.");
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
