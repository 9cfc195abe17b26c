//! Layers defaults, the config file, the environment and explicit overrides
//! into a validated [`Config`].

use super::file::ConfigFile;
use super::loading::{api_key_from_env, load_config_file};
use super::validation::validate;
use super::Config;
use crate::core::error::Result;
use std::path::Path;
use std::time::Duration;

/// Builder for [`Config`]. Later layers win over earlier ones:
/// defaults, then file, then environment, then explicit setter calls.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    /// Starts from the defaults with no API key.
    pub fn new() -> Self {
        Self {
            config: Config::new(String::new()),
        }
    }

    /// Loads the config file (explicit path or default locations) and the
    /// `MAILBOX_LAYER_API_KEY` environment variable.
    pub fn from_sources(path: Option<&Path>) -> Result<Self> {
        let (file, loaded_from) = load_config_file(path)?;
        let mut builder = Self::new().with_file(&file);
        builder.config.loaded_config_path = loaded_from;
        Ok(builder.with_env_api_key(api_key_from_env()))
    }

    /// Applies every value present in `file`.
    pub fn with_file(mut self, file: &ConfigFile) -> Self {
        let c = &mut self.config;
        if let Some(key) = &file.api.api_key {
            c.api_key = key.clone();
        }
        if let Some(https) = file.api.use_https {
            c.use_https = https;
        }
        if let Some(endpoint) = &file.api.endpoint {
            c.endpoint = endpoint.clone();
        }
        if let Some(secs) = file.network.request_timeout {
            c.request_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = &file.network.user_agent {
            c.user_agent = agent.clone();
        }
        if let Some(smtp) = file.validation.smtp_check {
            c.smtp_check = smtp;
        }
        if let Some(cache) = file.validation.should_cache {
            c.should_cache = cache;
        }
        if let Some(fresh) = file.validation.fresh {
            c.fresh = fresh;
        }
        self
    }

    fn with_env_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key {
            tracing::debug!(target: "mailbox_layer::config", "Using API key from environment");
            self.config.api_key = key;
        }
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn use_https(mut self, https: bool) -> Self {
        self.config.use_https = https;
        self
    }

    pub fn smtp_check(mut self, smtp_check: bool) -> Self {
        self.config.smtp_check = smtp_check;
        self
    }

    pub fn should_cache(mut self, should_cache: bool) -> Self {
        self.config.should_cache = should_cache;
        self
    }

    pub fn fresh(mut self, fresh: bool) -> Self {
        self.config.fresh = fresh;
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<Config> {
        validate(&self.config)?;
        tracing::debug!(target: "mailbox_layer::config", "Built configuration: {:?}", self.config);
        Ok(self.config)
    }
}
