use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

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
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Wodify scheduling service settings
    #[serde(default)]
    pub wodify: WodifyConfig,

    /// Google Calendar settings
    #[serde(default)]
    pub google: GoogleConfig,

    /// Reconciliation settings
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Wodify API access and coach identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WodifyConfig {
    /// API key sent in the `x-api-key` header
    pub api_key: String,

    /// Coach name as it appears in Wodify class listings
    pub coach: String,
}

impl Default for WodifyConfig {
    fn default() -> Self {
        Self {
            api_key: "YOUR_WODIFY_API_KEY".to_string(),
            coach: String::new(),
        }
    }
}

impl WodifyConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_key.starts_with("YOUR_")
    }
}

/// Google OAuth app credentials and target calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// OAuth client ID from the Google Cloud console
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Target calendar (default: the account's primary calendar)
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: "YOUR_GOOGLE_CLIENT_ID".to_string(),
            client_secret: "YOUR_GOOGLE_CLIENT_SECRET".to_string(),
            calendar_id: default_calendar_id(),
        }
    }
}

impl GoogleConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.client_id.starts_with("YOUR_")
            && !self.client_secret.starts_with("YOUR_")
    }
}

/// Reconciliation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// IANA timezone used for created calendar entries (e.g. "America/New_York")
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Summary prefix marking events this tool owns
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Log intended actions without touching the calendar
    #[serde(default)]
    pub print_only: bool,

    /// Maximum number of upcoming calendar events to consider
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Delay between mutating calendar calls, in milliseconds
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_prefix() -> String {
    "[Wodify] ".to_string()
}

fn default_max_results() -> u32 {
    200
}

fn default_throttle_ms() -> u64 {
    500
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            prefix: default_prefix(),
            print_only: false,
            max_results: default_max_results(),
            throttle_ms: default_throttle_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wodify: WodifyConfig::default(),
            google: GoogleConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating a default file if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if chrono_tz::Tz::from_str(&self.sync.timezone).is_err() {
            result.add_error(
                "sync.timezone",
                format!("not a recognized IANA zone: {}", self.sync.timezone),
            );
        }

        if self.sync.prefix.is_empty() {
            result.add_warning(
                "sync.prefix",
                "empty prefix means every calendar event looks managed",
            );
        }

        if self.sync.max_results == 0 {
            result.add_error("sync.max_results", "must be greater than 0");
        }

        if self.google.calendar_id.is_empty() {
            result.add_error("google.calendar_id", "must not be empty");
        }

        if self.wodify.coach.is_empty() {
            result.add_warning(
                "wodify.coach",
                "no coach configured - the class filter will match nothing",
            );
        }

        if !self.wodify.is_configured() {
            result.add_warning("wodify", "Wodify API key not configured");
        }

        if !self.google.is_configured() {
            result.add_warning("google", "Google OAuth credentials not configured");
        }

        result
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: config_path.clone(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;

        std::fs::write(&config_path, contents).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("wodsync");

        Ok(config_dir.join("config.toml"))
    }
}
