//! HTTP port used to reach the validation API.

pub mod http;

pub use http::ReqwestTransport;

use crate::core::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Minimal HTTP client: a GET whose body is decoded as JSON.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value>;
}
