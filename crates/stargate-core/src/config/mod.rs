//! Configuration management for Stargate.
//!
//! ## Configuration File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/stargate/config.toml` |
//! | macOS | `~/Library/Application Support/com.stargate.Stargate/config.toml` |
//! | Windows | `%APPDATA%\stargate\Stargate\config\config.toml` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use stargate_core::config::Config;
//!
//! let config = Config::load()?;
//! println!("Status delay: {:?}", config.portal.status_clear_delay);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration struct for Stargate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Portal behaviour
    pub portal: PortalConfig,
    /// Transfer backend
    pub backend: BackendConfig,
    /// UI settings
    pub ui: UiConfig,
}

/// Portal configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// How long a finished transfer's status stays up before the reset
    #[serde(with = "humantime_serde")]
    pub status_clear_delay: Duration,
    /// Address pre-filled into the target field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            status_clear_delay: Duration::from_secs(crate::DEFAULT_STATUS_CLEAR_SECS),
            default_target: None,
        }
    }
}

/// Transfer backend configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Program that performs the actual send
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Arguments; `{file}`, `{target}` and `{name}` are substituted
    pub args: Vec<String>,
    /// Give up on the backend after this long
    #[serde(
        with = "humantime_serde::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: vec!["{file}".to_string(), "{target}".to_string()],
            timeout: None,
        }
    }
}

/// UI configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (dark, light)
    pub theme: String,
    /// Terminal poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: crate::DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// If the configuration file doesn't exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read,
    /// parsed or validated.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigError(format!("Failed to create config directory: {e}"))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| Error::ConfigError(format!("Failed to write config: {e}")))
    }

    /// Check values that parse fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if self.portal.status_clear_delay.is_zero() {
            return Err(invalid(
                "portal.status_clear_delay",
                "must be greater than zero",
            ));
        }

        if self.portal.status_clear_delay > MAX_DURATION {
            return Err(invalid("portal.status_clear_delay", "must be at most 24h"));
        }

        if self.backend.timeout.is_some_and(|t| t.is_zero() || t > MAX_DURATION) {
            return Err(invalid("backend.timeout", "must be between 1s and 24h"));
        }

        if !(10..=1000).contains(&self.ui.tick_rate_ms) {
            return Err(invalid("ui.tick_rate_ms", "must be between 10 and 1000"));
        }

        if self
            .backend
            .program
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(invalid("backend.program", "must not be blank"));
        }

        Ok(())
    }

    /// Get the default configuration directory path.
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stargate", "Stargate")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the full path to the configuration file.
    #[must_use]
    pub fn config_path() -> PathBuf {
        Self::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }
}

fn invalid(key: &str, reason: &str) -> Error {
    Error::InvalidConfig {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Longest accepted delay or timeout.
pub const MAX_DURATION: Duration = Duration::from_secs(24 * 3600);

/// Parse a duration string like `"4s"`, `"2m"` or `"1h"`.
///
/// Values that do not fit in a `u64` count of seconds are rejected.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (num, unit) = if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 3600)
    } else {
        return None;
    };

    num.parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .map(Duration::from_secs)
}

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}s", duration.as_secs()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_duration(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid duration '{s}'")))
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use std::time::Duration;

        #[allow(clippy::ref_option)]
        pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match duration {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = Option::<String>::deserialize(deserializer)?;
            s.map(|s| {
                crate::config::parse_duration(&s)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid duration '{s}'")))
            })
            .transpose()
        }
    }
}
