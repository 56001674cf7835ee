//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_tracker(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.template.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.template".to_string(),
            message: "template cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_tracker(config: &Config) -> Result<()> {
    if config.tracker.host.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "tracker.host".to_string(),
            message: "host cannot be empty".to_string(),
        }
        .into());
    }

    if let Some(repository) = &config.tracker.repository {
        let parts: Vec<&str> = repository.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "tracker.repository".to_string(),
                message: format!("expected owner/name, got {:?}", repository),
            }
            .into());
        }
    }

    Ok(())
}
