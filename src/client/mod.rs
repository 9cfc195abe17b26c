//! The validation client: cache lookup, API fallback and cache write-back.

use crate::cache::{MemoryCache, ResultCache};
use crate::core::config::validation::validate;
use crate::core::config::Config;
use crate::core::error::{AppError, Result, ValidationError};
use crate::core::mapper::map_from_payload;
use crate::core::models::ValidationResult;
use crate::transport::{HttpTransport, ReqwestTransport};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use url::form_urlencoded;
use url::Url;

const CACHE_KEY_PREFIX: &str = "mailboxlayer_result_";

/// Client for the mailboxlayer email validation API.
///
/// Results can be cached so that repeated checks of the same address skip
/// the network. Settings are changed through chained calls that modify the
/// client in place:
///
/// ```no_run
/// # async fn run() -> mailbox_layer::Result<()> {
/// let mut client = mailbox_layer::MailboxLayer::new("api-key")?;
/// let result = client
///     .should_cache(true)
///     .with_smtp_check(false)
///     .check("mail@example.com")
///     .await?;
/// println!("{} scored {}", result.email(), result.score());
/// # Ok(())
/// # }
/// ```
pub struct MailboxLayer {
    config: Config,
    transport: Arc<dyn HttpTransport>,
    cache: Arc<dyn ResultCache>,
}

impl MailboxLayer {
    /// Creates a client with default settings, the reqwest transport and an
    /// in-memory cache.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(Config::new(api_key))
    }

    /// Creates a client from a prepared configuration, typically the output
    /// of [`crate::ConfigBuilder::build`]. Fails if the configuration is
    /// invalid, e.g. the API key is blank.
    pub fn from_config(config: Config) -> Result<Self> {
        validate(&config)?;
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::with_parts(
            config,
            Arc::new(transport),
            Arc::new(MemoryCache::new()),
        ))
    }

    /// Creates a client with explicit transport and cache implementations.
    ///
    /// The configuration is not validated here; a blank API key makes every
    /// API call fail with [`AppError::Config`] before any request is sent.
    pub fn with_parts(
        config: Config,
        transport: Arc<dyn HttpTransport>,
        cache: Arc<dyn ResultCache>,
    ) -> Self {
        Self {
            config,
            transport,
            cache,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether results fetched from the API are stored in the cache.
    pub fn should_cache(&mut self, should_cache: bool) -> &mut Self {
        self.config.should_cache = should_cache;
        self
    }

    /// Whether to bypass the cache and call the API. Also evicts any
    /// previously cached result for the address.
    pub fn fresh(&mut self, fresh: bool) -> &mut Self {
        self.config.fresh = fresh;
        self
    }

    pub fn with_https(&mut self, https: bool) -> &mut Self {
        self.config.use_https = https;
        self
    }

    /// Whether the API runs an SMTP check. Skipping it speeds up responses.
    pub fn with_smtp_check(&mut self, smtp_check: bool) -> &mut Self {
        self.config.smtp_check = smtp_check;
        self
    }

    /// Validates a single address.
    ///
    /// Unless `fresh` is set, a cached result is returned as is. Otherwise
    /// the API is called, and the result is cached when `should_cache` is
    /// set. Cache failures are logged and treated as misses.
    ///
    /// # Errors
    /// * [`AppError::Validation`] when the API reports a failure.
    /// * Transport and decoding errors from the HTTP call.
    pub async fn check(&self, email: &str) -> Result<ValidationResult> {
        let task_label = format!("[Check: {}]", email);
        let start_time = Instant::now();
        let cache_key = cache_key(email);

        if self.config.fresh {
            tracing::debug!(target: "mailbox_layer", "{} Fresh result requested, evicting cached entry", task_label);
            if let Err(e) = self.cache.forget(&cache_key).await {
                tracing::warn!(target: "mailbox_layer", "{} Failed to evict cached result: {}", task_label, e);
            }
        } else if let Some(result) = self.cached_result(&cache_key, &task_label).await {
            tracing::info!(target: "mailbox_layer", "{} Served from cache in {:.2?}", task_label, start_time.elapsed());
            return Ok(result);
        }

        let result = match self.fetch_from_api(email, &task_label).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(target: "mailbox_layer", "{} Check failed in {:.2?}: {}", task_label, start_time.elapsed(), e);
                return Err(e);
            }
        };

        if self.config.should_cache {
            self.store_result(&cache_key, &result, &task_label).await;
        }

        tracing::info!(target: "mailbox_layer", "{} Fetched from API in {:.2?}. Score: {}", task_label, start_time.elapsed(), result.score());
        Ok(result)
    }

    /// Validates several addresses one after another.
    ///
    /// Results keep the input order. The first failing address aborts the
    /// batch and its error is returned; later addresses are not checked.
    pub async fn check_many<I, S>(&self, emails: I) -> Result<Vec<ValidationResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails.into_iter();
        let mut results = Vec::with_capacity(emails.size_hint().0);
        for email in emails {
            results.push(self.check(email.as_ref()).await?);
        }
        tracing::debug!(target: "mailbox_layer", "Checked {} addresses", results.len());
        Ok(results)
    }

    /// Builds the request URL for `email`.
    ///
    /// Query parameters are always sent in the order `access_key`, `email`,
    /// `smtp`.
    pub fn build_url(&self, email: &str) -> Result<Url> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("access_key", &self.config.api_key)
            .append_pair("email", email)
            .append_pair("smtp", if self.config.smtp_check { "1" } else { "0" })
            .finish();
        let raw = format!("{}{}?{}", self.config.scheme(), self.config.endpoint, query);
        Ok(Url::parse(&raw)?)
    }

    async fn cached_result(&self, cache_key: &str, task_label: &str) -> Option<ValidationResult> {
        match self.cache.get(cache_key).await {
            Ok(Some(payload)) if !payload.is_empty() => {
                tracing::debug!(target: "mailbox_layer", "{} Cache hit", task_label);
                Some(map_from_payload(&payload))
            }
            Ok(_) => {
                tracing::debug!(target: "mailbox_layer", "{} Cache miss", task_label);
                None
            }
            Err(e) => {
                tracing::warn!(target: "mailbox_layer", "{} Cache read failed, treating as miss: {}", task_label, e);
                None
            }
        }
    }

    async fn store_result(&self, cache_key: &str, result: &ValidationResult, task_label: &str) {
        let payload = match result.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(target: "mailbox_layer", "{} Could not serialize result for caching: {}", task_label, e);
                return;
            }
        };
        match self.cache.forever(cache_key, payload).await {
            Ok(()) => tracing::debug!(target: "mailbox_layer", "{} Result cached", task_label),
            Err(e) => {
                tracing::warn!(target: "mailbox_layer", "{} Failed to cache result: {}", task_label, e)
            }
        }
    }

    async fn fetch_from_api(&self, email: &str, task_label: &str) -> Result<ValidationResult> {
        if self.config.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "An API key is required before calling the API.".to_string(),
            ));
        }
        let url = self.build_url(email)?;
        tracing::debug!(target: "mailbox_layer",
            "{} Requesting {}{} (smtp={})",
            task_label, self.config.scheme(), self.config.endpoint, self.config.smtp_check);

        let body = match self.transport.get_json(&url).await? {
            Value::Object(map) => map,
            other => {
                return Err(AppError::InvalidResponse(format!(
                    "expected a JSON object, got: {}",
                    other
                )))
            }
        };

        if is_failure_envelope(&body) {
            let error = ValidationError::from_envelope(body.get("error"));
            return Err(error.into());
        }

        Ok(map_from_payload(&body))
    }
}

impl std::fmt::Debug for MailboxLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailboxLayer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Cache key under which the result for `email` is stored.
pub fn cache_key(email: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, email)
}

/// True when the body carries a present, non-null and falsy `success` flag.
fn is_failure_envelope(body: &Map<String, Value>) -> bool {
    match body.get("success") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(ok)) => !ok,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty() || s == "0",
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
    }
}
