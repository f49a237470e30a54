//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub sessions: SessionConfig,
    pub paraphrase: ParaphraseConfig,
    pub flow: FlowConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Database configuration
///
/// Without a URL, submissions are kept in process memory only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// Where per-user sessions live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    Memory,
    Redis,
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    pub redis_url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Paraphrase (language model) service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParaphraseConfig {
    pub enabled: bool,
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_seconds: u64,
}

/// Flow profile selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlowConfig {
    /// Path to a profile TOML file; the built-in profile is used when unset
    pub profile_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling JSON log files; stdout only when unset
    pub directory: Option<String>,
}

impl Settings {
    /// Load settings from defaults, `config.toml` and environment variables.
    ///
    /// `INTAKE__SECTION__KEY` variables override file values; the legacy
    /// `TOKEN`, `OPENAI_API_KEY` and `DATABASE_URL` variables win over both.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("INTAKE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("bot.token", std::env::var("TOKEN").ok())?
            .set_override_option("paraphrase.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::IntakeError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                min_connections: 1,
                acquire_timeout_seconds: 30,
            },
            sessions: SessionConfig {
                backend: SessionBackend::Memory,
                redis_url: "redis://localhost:6379".to_string(),
                prefix: "intake:".to_string(),
                ttl_seconds: 86400,
            },
            paraphrase: ParaphraseConfig {
                enabled: false,
                api_url: "https://api.openai.com".to_string(),
                api_key: None,
                model: "gpt-3.5-turbo".to_string(),
                timeout_seconds: 20,
            },
            flow: FlowConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.sessions.backend, SessionBackend::Memory);
        assert!(settings.database.url.is_none());
        assert!(!settings.paraphrase.enabled);
        assert!(settings.flow.profile_path.is_none());
    }

    #[test]
    fn test_defaults_round_trip_through_config_source() {
        let source = config::Config::try_from(&Settings::default()).unwrap();
        let settings: Settings = source.try_deserialize().unwrap();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.sessions.prefix, "intake:");
    }

    #[test]
    fn test_session_backend_names() {
        let backend: SessionBackend = serde_json::from_str("\"redis\"").unwrap();
        assert_eq!(backend, SessionBackend::Redis);
    }
}
