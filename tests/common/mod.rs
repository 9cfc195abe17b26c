//! Shared fakes for the client integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use mailbox_layer::{AppError, HttpTransport, MemoryCache, Result, ResultCache};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use url::Url;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Transport that answers from canned bodies and records every URL it gets.
#[derive(Default)]
pub struct FakeTransport {
    by_email: Mutex<HashMap<String, Value>>,
    fallback: Mutex<Option<Value>>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every request with `body`.
    pub fn always(body: Value) -> Self {
        let transport = Self::new();
        *transport.fallback.lock() = Some(body);
        transport
    }

    /// Answers requests for `email` with `body`.
    pub fn respond_for(self, email: &str, body: Value) -> Self {
        self.by_email.lock().insert(email.to_string(), body);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        self.requests.lock().push(url.to_string());
        let email = url
            .query_pairs()
            .find(|(k, _)| k == "email")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();

        if let Some(body) = self.by_email.lock().get(&email) {
            return Ok(body.clone());
        }
        self.fallback
            .lock()
            .clone()
            .ok_or_else(|| AppError::InvalidResponse(format!("no canned body for {}", email)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheOp {
    Get(String),
    Forever(String, Map<String, Value>),
    Forget(String),
}

/// In-memory cache that records the operations performed on it.
#[derive(Default)]
pub struct RecordingCache {
    inner: MemoryCache,
    ops: Mutex<Vec<CacheOp>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry without recording it.
    pub async fn seed(&self, key: &str, payload: Map<String, Value>) {
        self.inner.forever(key, payload).await.unwrap();
    }

    pub fn ops(&self) -> Vec<CacheOp> {
        self.ops.lock().clone()
    }

    pub fn writes(&self) -> Vec<(String, Map<String, Value>)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                CacheOp::Forever(key, payload) => Some((key, payload)),
                _ => None,
            })
            .collect()
    }

    pub async fn stored(&self, key: &str) -> Option<Map<String, Value>> {
        self.inner.get(key).await.unwrap()
    }
}

#[async_trait]
impl ResultCache for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<Map<String, Value>>> {
        self.ops.lock().push(CacheOp::Get(key.to_string()));
        self.inner.get(key).await
    }

    async fn forever(&self, key: &str, payload: Map<String, Value>) -> Result<()> {
        self.ops
            .lock()
            .push(CacheOp::Forever(key.to_string(), payload.clone()));
        self.inner.forever(key, payload).await
    }

    async fn forget(&self, key: &str) -> Result<()> {
        self.ops.lock().push(CacheOp::Forget(key.to_string()));
        self.inner.forget(key).await
    }
}

/// Cache whose every operation fails.
pub struct BrokenCache;

#[async_trait]
impl ResultCache for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<Map<String, Value>>> {
        Err(anyhow::anyhow!("cache offline").into())
    }

    async fn forever(&self, _key: &str, _payload: Map<String, Value>) -> Result<()> {
        Err(AppError::Cache("cache offline".to_string()))
    }

    async fn forget(&self, _key: &str) -> Result<()> {
        Err(AppError::Cache("cache offline".to_string()))
    }
}

pub const EMAIL: &str = "mail@ashallendesign.co.uk";
pub const CACHE_KEY: &str = "mailboxlayer_result_mail@ashallendesign.co.uk";
pub const DEFAULT_URL: &str =
    "https://apilayer.net/api/check?access_key=123&email=mail%40ashallendesign.co.uk&smtp=1";

/// Success body as the live API sends it.
pub fn api_response() -> Value {
    json!({
        "email": EMAIL,
        "did_you_mean": "",
        "user": "mail",
        "domain": "ashallendesign.co.uk",
        "format_valid": true,
        "mx_found": true,
        "smtp_check": true,
        "catch_all": false,
        "role": true,
        "disposable": false,
        "free": false,
        "score": 0.8
    })
}

pub fn second_api_response() -> Value {
    json!({
        "email": "support1@ashallendesign.co.uk",
        "did_you_mean": "support@ashallendesign.co.uk",
        "user": "support1",
        "domain": "ashallendesign.co.uk",
        "format_valid": false,
        "mx_found": false,
        "smtp_check": false,
        "catch_all": true,
        "role": false,
        "disposable": true,
        "free": true,
        "score": 0.7
    })
}

pub fn error_response() -> Value {
    json!({
        "success": false,
        "error": {
            "code": "101",
            "type": "invalid_access_key",
            "info": "You have not supplied a valid API Access Key. [Technical Support: support@apilayer.com]"
        }
    })
}

pub fn assert_first_result(result: &mailbox_layer::ValidationResult) {
    assert_eq!(result.email(), EMAIL);
    assert_eq!(result.did_you_mean(), "");
    assert_eq!(result.user(), "mail");
    assert_eq!(result.domain(), "ashallendesign.co.uk");
    assert!(result.format_valid());
    assert!(result.mx_found());
    assert!(result.smtp_check());
    assert!(!result.catch_all());
    assert!(result.role());
    assert!(!result.disposable());
    assert!(!result.free());
    assert_eq!(result.score(), 0.8);
}

pub fn assert_second_result(result: &mailbox_layer::ValidationResult) {
    assert_eq!(result.email(), "support1@ashallendesign.co.uk");
    assert_eq!(result.did_you_mean(), "support@ashallendesign.co.uk");
    assert_eq!(result.user(), "support1");
    assert!(!result.format_valid());
    assert!(!result.smtp_check());
    assert!(result.catch_all());
    assert!(!result.role());
    assert!(result.disposable());
    assert!(result.free());
    assert_eq!(result.score(), 0.7);
}
