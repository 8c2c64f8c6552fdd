//! TOML Configuration File Support
//!
//! Centralized configuration loading for Clarify, supporting a TOML file at
//! `~/.config/clarify/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are loaded with the following priority (highest first):
//! 1. CLI arguments (see [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! - `$XDG_CONFIG_HOME/clarify/config.toml` (typically `~/.config/clarify/config.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! api_key = "AIza..."
//! model = "gemini-3-flash-preview"
//! base_url = "https://generativelanguage.googleapis.com"
//! request_timeout_secs = 30
//!
//! [app]
//! environment = "production"
//! max_input_length = 1000
//! default_tone = "Concise"
//!
//! [logging]
//! file = "/tmp/clarify.log"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::DEFAULT_BASE_URL;
use crate::tone::Tone;

/// Default upper bound on the input buffer, in UTF-16 code units
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1000;

/// Length of a text as the input bound counts it
///
/// UTF-16 code units: a character outside the Basic Multilingual Plane
/// (most emoji) counts as two.
#[must_use]
pub fn input_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment name that switches development behaviour off
const PRODUCTION: &str = "production";

/// Environment variables holding the API key, checked in order
const API_KEY_VARS: [&str; 3] = ["CLARIFY_API_KEY", "GEMINI_API_KEY", "API_KEY"];

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the highest-priority configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Backend section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToml {
    /// API key for the generative backend
    pub api_key: Option<String>,

    /// Model identifier
    pub model: Option<String>,

    /// Base URL of the API
    pub base_url: Option<String>,

    /// Request timeout in seconds (absent = no timeout)
    pub request_timeout_secs: Option<u64>,
}

/// Application section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppToml {
    /// Environment name ("development", "production", ...)
    pub environment: Option<String>,

    /// Maximum input length in UTF-16 code units
    pub max_input_length: Option<usize>,

    /// Tone selected at startup
    pub default_tone: Option<String>,
}

/// Logging section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingToml {
    /// Log file path
    pub file: Option<PathBuf>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClarifyToml {
    /// Backend configuration section
    pub backend: BackendToml,

    /// Application configuration section
    pub app: AppToml,

    /// Logging configuration section
    pub logging: LoggingToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Runtime configuration for Clarify
///
/// Passed explicitly to the backend and the Conductor at construction.
/// Use [`load_config`] to load it with proper priority handling.
#[derive(Clone)]
pub struct ClarifyConfig {
    /// API key for the generative backend (may be empty)
    pub api_key: String,

    /// Environment name
    pub environment: String,

    /// Whether this is a development build (`environment != "production"`)
    pub is_development: bool,

    /// Application version shown in the header
    pub version: String,

    /// Maximum input length in UTF-16 code units
    pub max_input_length: usize,

    /// Model identifier
    pub model: String,

    /// Base URL of the API
    pub base_url: String,

    /// Per-request timeout (`None` = wait indefinitely)
    pub request_timeout: Option<Duration>,

    /// Log file path (`None` = [`default_log_path`])
    pub log_file: Option<PathBuf>,

    /// Tone selected at startup
    pub default_tone: Tone,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl std::fmt::Debug for ClarifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClarifyConfig")
            .field("api_key_set", &self.has_api_key())
            .field("environment", &self.environment)
            .field("is_development", &self.is_development)
            .field("version", &self.version)
            .field("max_input_length", &self.max_input_length)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("log_file", &self.log_file)
            .field("default_tone", &self.default_tone)
            .field("config_file_path", &self.config_file_path)
            .field("source", &self.source)
            .finish()
    }
}

impl Default for ClarifyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            environment: "development".to_string(),
            is_development: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            log_file: None,
            default_tone: Tone::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ClarifyConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Set the environment name and recompute `is_development`
    pub fn set_environment(&mut self, environment: impl Into<String>) {
        self.environment = environment.into();
        self.is_development = !self.environment.eq_ignore_ascii_case(PRODUCTION);
    }

    /// Whether an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Warn when running in development without an API key
    ///
    /// Returns whether a key is present. A missing key is never fatal: the
    /// backend call fails later and the user sees the generic error.
    pub fn validate_api_key(&self) -> bool {
        let present = self.has_api_key();
        if !present && self.is_development {
            tracing::warn!(
                "No API key found. Set CLARIFY_API_KEY (or GEMINI_API_KEY) or add api_key to the [backend] section"
            );
        }
        present
    }

    /// Check invariants that the rest of the crate relies on
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the maximum input length
    /// is zero or the model name is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_length == 0 {
            return Err(ConfigError::ValidationError(
                "max_input_length must be greater than zero".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/clarify/config.toml` or
/// `~/.config/clarify/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("clarify").join("config.toml"))
}

/// Get the default log file path
///
/// Prefers the XDG state directory and falls back to the cache directory.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|p| p.join("clarify").join("clarify.log"))
}

/// Load configuration from all sources with proper priority
///
/// CLI arguments are not handled here; apply [`ConfigOverrides`] afterwards.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if a
/// value fails validation. A missing config file is not an error.
pub fn load_config() -> Result<ClarifyConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path, reading the process environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if a value fails validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClarifyConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration from a path and an arbitrary environment lookup
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<ClarifyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClarifyConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ClarifyToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config)?;
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env)?;
    config.validate()?;

    Ok(config)
}

fn parse_tone(value: &str) -> Result<Tone, ConfigError> {
    value
        .parse()
        .map_err(|e: crate::tone::ParseToneError| ConfigError::ValidationError(e.to_string()))
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ClarifyConfig, toml: &ClarifyToml) -> Result<(), ConfigError> {
    // Backend settings
    if let Some(ref key) = toml.backend.api_key {
        config.api_key.clone_from(key);
    }
    if let Some(ref model) = toml.backend.model {
        config.model.clone_from(model);
    }
    if let Some(ref url) = toml.backend.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(secs) = toml.backend.request_timeout_secs {
        config.request_timeout = Some(Duration::from_secs(secs));
    }

    // App settings
    if let Some(ref environment) = toml.app.environment {
        config.set_environment(environment.clone());
    }
    if let Some(length) = toml.app.max_input_length {
        config.max_input_length = length;
    }
    if let Some(ref tone) = toml.app.default_tone {
        config.default_tone = parse_tone(tone)?;
    }

    // Logging settings
    if toml.logging.file.is_some() {
        config.log_file.clone_from(&toml.logging.file);
    }

    Ok(())
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut ClarifyConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = API_KEY_VARS
        .iter()
        .find_map(|name| env(name).filter(|v| !v.trim().is_empty()))
    {
        config.api_key = key;
        config.source = ConfigSource::Env;
    }
    if let Some(environment) = env("CLARIFY_ENV") {
        config.set_environment(environment);
        config.source = ConfigSource::Env;
    }
    if let Some(model) = env("CLARIFY_MODEL") {
        config.model = model;
        config.source = ConfigSource::Env;
    }
    if let Some(url) = env("CLARIFY_BASE_URL") {
        config.base_url = url;
        config.source = ConfigSource::Env;
    }
    if let Some(length) = env("CLARIFY_MAX_INPUT_LENGTH") {
        match length.parse::<usize>() {
            Ok(l) => {
                config.max_input_length = l;
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %length, "Ignoring unparsable CLARIFY_MAX_INPUT_LENGTH"),
        }
    }
    if let Some(timeout) = env("CLARIFY_TIMEOUT_SECS") {
        match timeout.parse::<u64>() {
            Ok(secs) => {
                config.request_timeout = Some(Duration::from_secs(secs));
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %timeout, "Ignoring unparsable CLARIFY_TIMEOUT_SECS"),
        }
    }
    if let Some(tone) = env("CLARIFY_TONE") {
        config.default_tone = parse_tone(&tone)?;
        config.source = ConfigSource::Env;
    }
    if let Some(file) = env("CLARIFY_LOG_FILE") {
        config.log_file = Some(PathBuf::from(file));
        config.source = ConfigSource::Env;
    }

    Ok(())
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Model override
    pub model: Option<String>,

    /// Environment override
    pub environment: Option<String>,

    /// Startup tone override
    pub default_tone: Option<Tone>,

    /// Max input length override
    pub max_input_length: Option<usize>,

    /// Log file override
    pub log_file: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set model override
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    /// Set environment override
    #[must_use]
    pub fn with_environment(mut self, environment: String) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Set startup tone override
    #[must_use]
    pub fn with_default_tone(mut self, tone: Tone) -> Self {
        self.default_tone = Some(tone);
        self
    }

    /// Set max input length override
    #[must_use]
    pub fn with_max_input_length(mut self, length: usize) -> Self {
        self.max_input_length = Some(length);
        self
    }

    /// Set log file override
    #[must_use]
    pub fn with_log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.environment.is_none()
            && self.default_tone.is_none()
            && self.max_input_length.is_none()
            && self.log_file.is_none()
    }

    /// Apply overrides to a configuration
    ///
    /// # Errors
    ///
    /// Returns a validation error if the overridden configuration is invalid.
    pub fn apply(&self, config: &mut ClarifyConfig) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Ok(());
        }
        config.source = ConfigSource::Cli;

        if let Some(ref model) = self.model {
            config.model.clone_from(model);
        }
        if let Some(ref environment) = self.environment {
            config.set_environment(environment.clone());
        }
        if let Some(tone) = self.default_tone {
            config.default_tone = tone;
        }
        if let Some(length) = self.max_input_length {
            config.max_input_length = length;
        }
        if self.log_file.is_some() {
            config.log_file.clone_from(&self.log_file);
        }

        config.validate()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_toml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // Default Configuration Tests
    // =========================================================================

    #[test]
    fn test_default_config() {
        let config = ClarifyConfig::default();

        assert_eq!(config.api_key, "");
        assert_eq!(config.environment, "development");
        assert!(config.is_development);
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.max_input_length, 1000);
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.default_tone, Tone::Professional);
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_path() {
        if let Some(p) = default_config_path() {
            assert!(p.to_string_lossy().contains("clarify"));
            assert!(p.to_string_lossy().ends_with("config.toml"));
        }
    }

    #[test]
    fn test_set_environment_recomputes_development() {
        let mut config = ClarifyConfig::default();
        config.set_environment("production");
        assert!(!config.is_development);
        config.set_environment("staging");
        assert!(config.is_development);
    }

    // =========================================================================
    // TOML Parsing Tests
    // =========================================================================

    #[test]
    fn test_parse_valid_toml() {
        let file = write_toml(
            r#"
[backend]
api_key = "file-key"
model = "gemini-file"
base_url = "http://localhost:8080"
request_timeout_secs = 20

[app]
environment = "production"
max_input_length = 500
default_tone = "casual"

[logging]
file = "/tmp/clarify-test.log"
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.model, "gemini-file");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(20)));
        assert_eq!(config.environment, "production");
        assert!(!config.is_development);
        assert_eq!(config.max_input_length, 500);
        assert_eq!(config.default_tone, Tone::Casual);
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("/tmp/clarify-test.log"))
        );
        assert_eq!(config.config_file_path.as_deref(), Some(file.path()));
        assert_eq!(config.source(), ConfigSource::File);
    }

    #[test]
    fn test_parse_partial_toml() {
        let file = write_toml(
            r#"
[app]
max_input_length = 250
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.max_input_length, 250);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.default_tone, Tone::Professional);
        assert!(config.is_development);
    }

    #[test]
    fn test_parse_empty_toml() {
        let file = write_toml("");
        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();
        assert_eq!(config.max_input_length, DEFAULT_MAX_INPUT_LENGTH);
        assert_eq!(config.source(), ConfigSource::File);
    }

    // =========================================================================
    // Missing File Handling Tests
    // =========================================================================

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/path/clarify/config.toml");
        let config = load_config_with_env(Some(path), no_env).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert_eq!(config.config_file_path, None);
    }

    #[test]
    fn test_no_path_uses_defaults() {
        let config = load_config_with_env(None, no_env).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert_eq!(config.max_input_length, DEFAULT_MAX_INPUT_LENGTH);
    }

    // =========================================================================
    // Malformed / Invalid TOML Tests
    // =========================================================================

    #[test]
    fn test_malformed_toml_error() {
        let file = write_toml(
            r#"
[backend
model = 42
"#,
        );

        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let file = write_toml("[app]\nmax_input_length = 0\n");
        let result = load_config_with_env(Some(file.path().to_path_buf()), no_env);
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_unknown_tone_rejected() {
        let file = write_toml("[app]\ndefault_tone = \"sarcastic\"\n");
        let err = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("sarcastic"));
    }

    // =========================================================================
    // Priority Ordering Tests
    // =========================================================================

    #[test]
    fn test_env_overrides_file() {
        let file = write_toml(
            r#"
[backend]
api_key = "file-key"
model = "file-model"

[app]
default_tone = "Casual"
"#,
        );

        let env = env_from(&[
            ("CLARIFY_MODEL", "env-model"),
            ("CLARIFY_TONE", "friendly"),
            ("CLARIFY_TIMEOUT_SECS", "7"),
        ]);
        let config = load_config_with_env(Some(file.path().to_path_buf()), env).unwrap();

        assert_eq!(config.model, "env-model");
        assert_eq!(config.default_tone, Tone::Friendly);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(7)));
        // Not overridden by env
        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_api_key_fallback_order() {
        let env = env_from(&[("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")]);
        let config = load_config_with_env(None, env).unwrap();
        assert_eq!(config.api_key, "gemini");

        let env = env_from(&[
            ("CLARIFY_API_KEY", "clarify"),
            ("GEMINI_API_KEY", "gemini"),
        ]);
        let config = load_config_with_env(None, env).unwrap();
        assert_eq!(config.api_key, "clarify");

        let env = env_from(&[("CLARIFY_API_KEY", "  "), ("API_KEY", "generic")]);
        let config = load_config_with_env(None, env).unwrap();
        assert_eq!(config.api_key, "generic");
    }

    #[test]
    fn test_env_production_disables_development() {
        let config =
            load_config_with_env(None, env_from(&[("CLARIFY_ENV", "production")])).unwrap();
        assert!(!config.is_development);
    }

    #[test]
    fn test_unparsable_env_number_ignored() {
        let env = env_from(&[("CLARIFY_MAX_INPUT_LENGTH", "lots")]);
        let config = load_config_with_env(None, env).unwrap();
        assert_eq!(config.max_input_length, DEFAULT_MAX_INPUT_LENGTH);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = env_from(&[("CLARIFY_MODEL", "env-model")]);
        let mut config = load_config_with_env(None, env).unwrap();
        assert_eq!(config.source(), ConfigSource::Env);

        ConfigOverrides::new()
            .with_model("cli-model".to_string())
            .apply(&mut config)
            .unwrap();

        assert_eq!(config.model, "cli-model");
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    // =========================================================================
    // ConfigOverrides Tests
    // =========================================================================

    #[test]
    fn test_config_overrides_apply() {
        let mut config = ClarifyConfig::default();

        ConfigOverrides::new()
            .with_environment("production".to_string())
            .with_default_tone(Tone::Concise)
            .with_max_input_length(42)
            .with_log_file(PathBuf::from("/tmp/cli.log"))
            .apply(&mut config)
            .unwrap();

        assert!(!config.is_development);
        assert_eq!(config.default_tone, Tone::Concise);
        assert_eq!(config.max_input_length, 42);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/cli.log")));
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_config_overrides_empty_no_change() {
        let mut config = ClarifyConfig::default();
        let overrides = ConfigOverrides::new();
        assert!(overrides.is_empty());
        overrides.apply(&mut config).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_config_overrides_validate() {
        let mut config = ClarifyConfig::default();
        let result = ConfigOverrides::new()
            .with_max_input_length(0)
            .apply(&mut config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    // =========================================================================
    // API Key Checks
    // =========================================================================

    #[test]
    fn test_validate_api_key() {
        let mut config = ClarifyConfig::default();
        assert!(!config.validate_api_key());
        config.api_key = "key".to_string();
        assert!(config.validate_api_key());
    }

    // =========================================================================
    // Display / Serialization Tests
    // =========================================================================

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::Cli), "CLI");
        assert_eq!(format!("{}", ConfigSource::Env), "environment");
        assert_eq!(format!("{}", ConfigSource::File), "config file");
        assert_eq!(format!("{}", ConfigSource::Default), "default");
    }

    #[test]
    fn test_config_error_display() {
        let read_err = ConfigError::ReadError {
            path: PathBuf::from("/test/path"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = format!("{read_err}");
        assert!(msg.contains("/test/path"));
        assert!(msg.contains("Failed to read"));

        let validation_err = ConfigError::ValidationError("invalid value".to_string());
        assert!(format!("{validation_err}").contains("invalid value"));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let mut config = ClarifyConfig::default();
        config.api_key = "super-secret-key".to_string();

        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("api_key_set: true"));
        assert!(debug.contains("gemini-3-flash-preview"));
    }
}
