use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

use crate::error::ConfigError;

/// Environment variables that override credentials and endpoint after the file is read.
pub const ENV_BASE_URL: &str = "XWEATHER_BASE_URL";
pub const ENV_CLIENT_ID: &str = "XWEATHER_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "XWEATHER_CLIENT_SECRET";

const PLACEHOLDER_PREFIX: &str = "YOUR_";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Unit system requested by the caller.
///
/// Decides which provider key is authoritative for unit-dependent fields
/// (`tempC` vs `tempF`, `windSpeedKPH` vs `windSpeedMPH`, ...). One policy
/// governs a whole aggregation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPolicy {
    #[default]
    Metric,
    Imperial,
}

impl UnitPolicy {
    /// Value of the provider's `units` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Metric => "m",
            Self::Imperial => "e",
        }
    }
}

impl std::fmt::Display for UnitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Metric => f.write_str("metric"),
            Self::Imperial => f.write_str("imperial"),
        }
    }
}

impl FromStr for UnitPolicy {
    type Err = ConfigError;

    /// Accepts the long names as well as the provider's single-letter codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "m" => Ok(Self::Metric),
            "imperial" | "e" => Ok(Self::Imperial),
            other => Err(ConfigError::Invalid(format!(
                "unknown unit policy '{other}', expected metric or imperial"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Weather provider endpoint and credentials
    pub provider: ProviderConfig,

    /// Outbound HTTP settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Weather defaults
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// Weather provider endpoint and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL every facet path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Provider client identifier
    pub client_id: String,
    /// Provider client secret
    pub client_secret: String,
}

impl ProviderConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.client_id.starts_with(PLACEHOLDER_PREFIX)
            && !self.client_secret.starts_with(PLACEHOLDER_PREFIX)
    }
}

fn default_base_url() -> String {
    "https://data.api.xweather.com".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: "YOUR_XWEATHER_CLIENT_ID".to_string(),
            client_secret: "YOUR_XWEATHER_CLIENT_SECRET".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Upper bound for a single facet request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User-Agent header sent to the provider
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("skycast/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Unit policy used when the caller does not pick one
    #[serde(default)]
    pub units: UnitPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            fetch: FetchConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let mut config = Self::default();
            config.save_to(&config_path)?;
            config.apply_env_overrides();
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Replace provider settings with any `XWEATHER_*` variables that are set
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = non_empty(ENV_BASE_URL) {
            self.provider.base_url = base_url;
        }
        if let Some(client_id) = non_empty(ENV_CLIENT_ID) {
            self.provider.client_id = client_id;
        }
        if let Some(client_secret) = non_empty(ENV_CLIENT_SECRET) {
            self.provider.client_secret = client_secret;
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.provider.base_url, "provider.base_url", &mut result);

        if !self.provider.is_configured() {
            result.add_warning(
                "provider",
                "Provider credentials not configured - every facet will come back empty",
            );
        }

        if self.fetch.timeout_secs == 0 {
            result.add_error("fetch.timeout_secs", "Timeout must be greater than 0");
        } else if self.fetch.timeout_secs > 120 {
            result.add_warning(
                "fetch.timeout_secs",
                "Timeout is unusually long (>120s); one slow facet delays the whole snapshot",
            );
        }

        if self.fetch.user_agent.trim().is_empty() {
            result.add_warning("fetch.user_agent", "Empty User-Agent header");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.query().is_some() {
                    result.add_error(field_name, "Base URL must not carry a query string");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the default configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skycast");

        Ok(config_dir.join("config.toml"))
    }
}
