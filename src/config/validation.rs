//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::settings::SessionBackend;
use super::Settings;
use crate::utils::errors::{IntakeError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_session_config(&settings.sessions)?;
    validate_paraphrase_config(&settings.paraphrase)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.trim().is_empty() {
        return Err(IntakeError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if let Some(url) = &config.url {
        if url.is_empty() {
            return Err(IntakeError::Config(
                "Database URL must not be empty when set".to_string()
            ));
        }
    }

    if config.max_connections == 0 {
        return Err(IntakeError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(IntakeError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate session store configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.backend == SessionBackend::Redis {
        if config.redis_url.is_empty() {
            return Err(IntakeError::Config(
                "Redis URL is required for the redis session backend".to_string()
            ));
        }

        if config.ttl_seconds == 0 {
            return Err(IntakeError::Config(
                "Session TTL must be greater than 0".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate paraphrase service configuration
fn validate_paraphrase_config(config: &super::ParaphraseConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    if config.api_key.as_deref().map_or(true, str::is_empty) {
        return Err(IntakeError::Config(
            "Paraphrase API key is required when paraphrasing is enabled".to_string()
        ));
    }

    url::Url::parse(&config.api_url)?;

    if config.model.is_empty() {
        return Err(IntakeError::Config(
            "Paraphrase model is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(IntakeError::Config(
            "Paraphrase timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(IntakeError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(IntakeError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:test_token".to_string();
        settings
    }

    #[test]
    fn test_valid_settings() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_token() {
        let settings = Settings::default();
        assert_matches!(validate_settings(&settings), Err(IntakeError::Config(_)));
    }

    #[test]
    fn test_connection_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 10;
        settings.database.max_connections = 2;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let mut settings = valid_settings();
        settings.sessions.backend = SessionBackend::Redis;
        settings.sessions.redis_url = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_enabled_paraphrase_requires_key() {
        let mut settings = valid_settings();
        settings.paraphrase.enabled = true;
        assert!(validate_settings(&settings).is_err());

        settings.paraphrase.api_key = Some("sk-test".to_string());
        assert!(validate_settings(&settings).is_ok());

        settings.paraphrase.api_url = "not a url".to_string();
        assert_matches!(validate_settings(&settings), Err(IntakeError::UrlParse(_)));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
