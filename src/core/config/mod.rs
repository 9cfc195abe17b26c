//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;
pub use loading::{load_config_file, API_KEY_ENV_VAR};

use std::time::Duration;

/// Host and path of the validation endpoint, without a scheme.
pub const DEFAULT_ENDPOINT: &str = "apilayer.net/api/check";

/// Runtime configuration owned by a single [`crate::MailboxLayer`] client.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub use_https: bool,
    /// Ask the API to run an SMTP check. Disabling it makes responses faster.
    pub smtp_check: bool,
    /// Store fresh API results in the cache with no expiry.
    pub should_cache: bool,
    /// Ignore and evict any cached result before calling the API.
    pub fresh: bool,

    pub endpoint: String,
    pub request_timeout: Duration,
    pub user_agent: String,

    pub loaded_config_path: Option<String>,
}

impl Config {
    /// Creates a configuration with the documented defaults for `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            use_https: true,
            smtp_check: true,
            should_cache: false,
            fresh: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(10),
            user_agent: format!("mailbox-layer/{}", env!("CARGO_PKG_VERSION")),
            loaded_config_path: None,
        }
    }

    /// URL scheme prefix for the configured transport security.
    pub fn scheme(&self) -> &'static str {
        if self.use_https {
            "https://"
        } else {
            "http://"
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &redact(&self.api_key))
            .field("use_https", &self.use_https)
            .field("smtp_check", &self.smtp_check)
            .field("should_cache", &self.should_cache)
            .field("fresh", &self.fresh)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("loaded_config_path", &self.loaded_config_path)
            .finish()
    }
}

/// Masks a secret for logs and debug output, keeping only its length visible.
pub(crate) fn redact(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "*".repeat(secret.chars().count())
    }
}
