//! Sanity checks applied to a built [`Config`].

use super::Config;
use crate::core::error::{AppError, Result};

pub(crate) fn validate(config: &Config) -> Result<()> {
    if config.api_key.trim().is_empty() {
        return Err(AppError::Config(format!(
            "An API key is required. Set it in the config file or via {}.",
            super::API_KEY_ENV_VAR
        )));
    }

    let endpoint = config.endpoint.trim();
    if endpoint.is_empty() {
        return Err(AppError::Config("Endpoint cannot be empty.".to_string()));
    }
    if endpoint.contains("://") {
        return Err(AppError::Config(format!(
            "Endpoint '{}' must not include a scheme; use use_https instead.",
            endpoint
        )));
    }

    if config.request_timeout.is_zero() {
        return Err(AppError::Config(
            "Request timeout must be greater than zero.".to_string(),
        ));
    }

    Ok(())
}
