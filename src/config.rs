//! Configuration management
//!
//! A single TOML file holds logger settings, email metadata for export and
//! any number of named schemes:
//!
//! ```toml
//! [logger]
//! flavor = "dragonlog"
//! history_length = 100
//!
//! [logger.email]
//! recipient = "dev@example.com"
//!
//! [schemes.network_only]
//! mode = "solo"
//! tags = ["net"]
//! out = "stderr"
//! ```

use crate::constants::{DEFAULT_HISTORY_LENGTH, DRAGON_LOG_TAG, GGLOG_TAG};
use crate::error::{Result, TagLogError};
use crate::filter::FilterState;
use crate::observer::EmailConfig;
use crate::scheme::LogScheme;
use crate::sink::SinkTarget;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

// =============================================================================
// Flavour
// =============================================================================

/// Which of the two logger libraries to mimic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    GgLog,
    DragonLog,
}

impl Flavor {
    /// Default tag for both regular and error output
    pub fn default_tag(&self) -> &'static str {
        match self {
            Flavor::GgLog => GGLOG_TAG,
            Flavor::DragonLog => DRAGON_LOG_TAG,
        }
    }
}

// =============================================================================
// Logger Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub flavor: Flavor,
    /// Tag for `log_default` (None = flavour default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_log_tag: Option<String>,
    /// Tag for `log_err` (None = flavour default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_err_log_tag: Option<String>,
    /// Maximum lines kept in the recent-log history
    pub history_length: usize,
    /// Keep a history at all (overlay/export support)
    pub history_enabled: bool,
    /// Metadata for export drafts
    pub email: EmailConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            flavor: Flavor::GgLog,
            default_log_tag: None,
            default_err_log_tag: None,
            history_length: DEFAULT_HISTORY_LENGTH,
            history_enabled: true,
            email: EmailConfig::default(),
        }
    }
}

impl LoggerConfig {
    pub fn log_tag(&self) -> &str {
        self.default_log_tag
            .as_deref()
            .unwrap_or(self.flavor.default_tag())
    }

    pub fn err_log_tag(&self) -> &str {
        self.default_err_log_tag
            .as_deref()
            .unwrap_or(self.flavor.default_tag())
    }
}

// =============================================================================
// Scheme Configuration
// =============================================================================

/// Filter mode of a configured scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemeMode {
    /// `tags` are disabled, everything else passes
    #[default]
    Disabled,
    /// Only `tags` pass
    Solo,
    /// Nothing passes, `tags` ignored
    Mute,
}

/// Scheme as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    pub mode: SchemeMode,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<SinkTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<SinkTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailConfig>,
}

impl SchemeConfig {
    pub fn filter_state(&self) -> FilterState {
        match self.mode {
            SchemeMode::Disabled => FilterState::disabled(self.tags.iter().cloned()),
            SchemeMode::Solo => FilterState::solo(self.tags.iter().cloned()),
            SchemeMode::Mute => FilterState::muted(),
        }
    }

    /// Build the scheme, opening any configured sink files
    pub fn to_scheme(&self) -> Result<LogScheme> {
        let mut scheme = LogScheme::from_filter(self.filter_state());
        if let Some(out) = &self.out {
            scheme = scheme.with_out_sink(out.open()?);
        }
        if let Some(err) = &self.err {
            scheme = scheme.with_err_sink(err.open()?);
        }
        if let Some(length) = self.history_length {
            scheme = scheme.with_history_length(length);
        }
        if let Some(email) = &self.email {
            scheme = scheme.with_email(email.clone());
        }
        Ok(scheme)
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
    pub schemes: BTreeMap<String, SchemeConfig>,
}

impl Config {
    /// Reject values that would produce unusable output
    pub fn validate(&self) -> Result<()> {
        if self.logger.log_tag().is_empty() {
            return Err(TagLogError::ConfigValidation {
                field: "default_log_tag",
                reason: "must not be empty".into(),
            });
        }
        if self.logger.err_log_tag().is_empty() {
            return Err(TagLogError::ConfigValidation {
                field: "default_err_log_tag",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Look up and build a named scheme
    pub fn scheme(&self, name: &str) -> Result<LogScheme> {
        self.schemes
            .get(name)
            .ok_or_else(|| TagLogError::UnknownScheme {
                name: name.to_string(),
            })?
            .to_scheme()
    }

    /// Configured scheme names, sorted
    pub fn scheme_names(&self) -> Vec<&str> {
        self.schemes.keys().map(String::as_str).collect()
    }
}

/// Load and validate config from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| TagLogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| TagLogError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    config.validate()?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load config, falling back to defaults on any error
pub fn load_or_default(path: &Path) -> Config {
    match load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Save config to a TOML file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| TagLogError::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })?;
    fs::write(path, content).map_err(|e| TagLogError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

// ============================================================================
// Tests
// ============================================================================
