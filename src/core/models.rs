//! Defines the validation result returned by the client.

use crate::core::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The outcome of validating a single email address.
///
/// Built once per check, either from an API response or from a cached
/// payload, and never modified afterwards. See [`crate::core::mapper`] for
/// how payloads become results.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// The address the validation was carried out on.
    pub(crate) email: String,
    /// A suggested address in case a typo was detected, empty otherwise.
    pub(crate) did_you_mean: String,
    /// The local part of the address ("mail" in "mail@example.com").
    pub(crate) user: String,
    /// The domain part of the address ("example.com" in "mail@example.com").
    pub(crate) domain: String,
    pub(crate) format_valid: bool,
    pub(crate) mx_found: bool,
    /// False when the SMTP check failed or was skipped.
    pub(crate) smtp_check: bool,
    pub(crate) catch_all: bool,
    pub(crate) role: bool,
    pub(crate) disposable: bool,
    pub(crate) free: bool,
    /// Quality and deliverability score between 0 and 1.
    pub(crate) score: f64,
    /// When the check was performed against the API.
    pub(crate) validated_at: DateTime<Utc>,
    /// Fields the API returned that this type does not model, keyed by
    /// their camelCase name.
    #[serde(flatten)]
    pub(crate) extra: BTreeMap<String, Value>,
}

impl ValidationResult {
    pub(crate) fn blank(validated_at: DateTime<Utc>) -> Self {
        Self {
            email: String::new(),
            did_you_mean: String::new(),
            user: String::new(),
            domain: String::new(),
            format_valid: false,
            mx_found: false,
            smtp_check: false,
            catch_all: false,
            role: false,
            disposable: false,
            free: false,
            score: 0.0,
            validated_at,
            extra: BTreeMap::new(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn did_you_mean(&self) -> &str {
        &self.did_you_mean
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn format_valid(&self) -> bool {
        self.format_valid
    }

    pub fn mx_found(&self) -> bool {
        self.mx_found
    }

    pub fn smtp_check(&self) -> bool {
        self.smtp_check
    }

    pub fn catch_all(&self) -> bool {
        self.catch_all
    }

    pub fn role(&self) -> bool {
        self.role
    }

    pub fn disposable(&self) -> bool {
        self.disposable
    }

    pub fn free(&self) -> bool {
        self.free
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn validated_at(&self) -> DateTime<Utc> {
        self.validated_at
    }

    /// Undocumented field by its camelCase name, if the API sent one.
    pub fn extra(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn extra_fields(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Serializes every field into the camelCase mapping stored in the cache.
    ///
    /// Feeding the mapping back through the mapper yields an equal result,
    /// timestamp included.
    pub fn to_payload(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(AppError::InvalidResponse(format!(
                "validation result serialized to non-object JSON: {}",
                other
            ))),
        }
    }
}
