//! [`HttpTransport`] implementation on top of `reqwest`.

use super::HttpTransport;
use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;
use url::Url;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a client using the timeout and user agent from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                tracing::error!(target: "mailbox_layer::transport", "Failed to build HTTP client: {}", e);
                AppError::from(e)
            })?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        let start_time = Instant::now();
        // reqwest errors render the request URL, which carries the access key.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)?;

        tracing::debug!(target: "mailbox_layer::transport",
            "GET {}{} -> {} ({} bytes) in {:.2?}",
            url.host_str().unwrap_or_default(), url.path(), status, body.len(), start_time.elapsed());

        if !status.is_success() {
            tracing::warn!(target: "mailbox_layer::transport", "API answered with HTTP status {}", status);
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
