//! Maps raw API (or cached) payloads onto [`ValidationResult`].
//!
//! Mapping never fails. Keys are renamed to camelCase and routed to the
//! matching field; values of the wrong JSON type leave the field at its zero
//! value, and keys the result does not model are kept in its extra fields.
//! The timestamp is the only default: a payload without `validated_at` /
//! `validatedAt` is stamped with the current time.

use crate::core::models::ValidationResult;
use crate::utils::case::to_camel_case;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// Builds a [`ValidationResult`] from a flat key/value payload.
pub fn map_from_payload(payload: &Map<String, Value>) -> ValidationResult {
    let mut result = ValidationResult::blank(DateTime::<Utc>::UNIX_EPOCH);
    let mut validated_at = None;

    for (key, value) in payload {
        let field = to_camel_case(key);
        match field.as_str() {
            "email" => result.email = as_string(value),
            "didYouMean" => result.did_you_mean = as_string(value),
            "user" => result.user = as_string(value),
            "domain" => result.domain = as_string(value),
            "formatValid" => result.format_valid = as_bool(value),
            "mxFound" => result.mx_found = as_bool(value),
            "smtpCheck" => result.smtp_check = as_bool(value),
            "catchAll" => result.catch_all = as_bool(value),
            "role" => result.role = as_bool(value),
            "disposable" => result.disposable = as_bool(value),
            "free" => result.free = as_bool(value),
            "score" => result.score = as_f64(value),
            "validatedAt" => validated_at = Some(as_timestamp(value)),
            _ => {
                result.extra.insert(field, value.clone());
            }
        }
    }

    result.validated_at = validated_at.unwrap_or_else(Utc::now);
    result
}

fn as_string(value: &Value) -> String {
    value.as_str().map(str::to_string).unwrap_or_default()
}

fn as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}

/// RFC 3339 strings, `YYYY-MM-DD HH:MM:SS` strings (UTC) and integer UNIX
/// seconds are understood. Anything else maps to the UNIX epoch.
fn as_timestamp(value: &Value) -> DateTime<Utc> {
    let parsed = match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|naive| naive.and_utc())
            }),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    };
    parsed.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn snake_case_payload_sets_the_matching_fields() {
        let payload = object(json!({
            "email": "mai1l@ashallendesign.co.uk",
            "did_you_mean": "mail@ashallendesign.co.uk",
            "user": "mai1l",
            "domain": "ashallendesign.co.uk",
            "format_valid": true,
            "mx_found": true,
            "smtp_check": true,
            "catch_all": false,
            "role": true,
            "disposable": false,
            "free": false,
            "score": 0.8
        }));

        let result = map_from_payload(&payload);

        assert_eq!(result.email(), "mai1l@ashallendesign.co.uk");
        assert_eq!(result.did_you_mean(), "mail@ashallendesign.co.uk");
        assert_eq!(result.user(), "mai1l");
        assert_eq!(result.domain(), "ashallendesign.co.uk");
        assert!(result.format_valid());
        assert!(result.mx_found());
        assert!(result.smtp_check());
        assert!(!result.catch_all());
        assert!(result.role());
        assert!(!result.disposable());
        assert!(!result.free());
        assert_eq!(result.score(), 0.8);
        assert!(result.extra_fields().is_empty());
    }

    #[test]
    fn missing_timestamp_is_stamped_with_now() {
        let before = Utc::now();
        let result = map_from_payload(&object(json!({"email": "a@b.co"})));
        let after = Utc::now();

        assert!(result.validated_at() >= before);
        assert!(result.validated_at() <= after);
    }

    #[test]
    fn explicit_timestamp_is_preserved() {
        let at = Utc::now() - Duration::days(5);
        let camel = object(json!({"validatedAt": at.to_rfc3339()}));
        let snake = object(json!({"validated_at": at.to_rfc3339()}));

        assert_eq!(map_from_payload(&camel).validated_at(), at);
        assert_eq!(map_from_payload(&snake).validated_at(), at);
    }

    #[test]
    fn other_timestamp_encodings() {
        let from_secs = map_from_payload(&object(json!({"validatedAt": 1_700_000_000})));
        assert_eq!(from_secs.validated_at().timestamp(), 1_700_000_000);

        let from_naive = map_from_payload(&object(json!({"validatedAt": "2024-01-02 03:04:05"})));
        assert_eq!(from_naive.validated_at().to_rfc3339(), "2024-01-02T03:04:05+00:00");

        let garbage = map_from_payload(&object(json!({"validatedAt": "yesterday"})));
        assert_eq!(garbage.validated_at(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn wrong_types_fall_back_to_zero_values() {
        let payload = object(json!({
            "email": 42,
            "format_valid": "yes",
            "mx_found": 1,
            "score": "0.35",
            "role": null
        }));

        let result = map_from_payload(&payload);

        assert_eq!(result.email(), "");
        assert!(!result.format_valid());
        assert!(result.mx_found());
        assert_eq!(result.score(), 0.35);
        assert!(!result.role());
    }

    #[test]
    fn unknown_keys_are_kept_under_their_camel_case_name() {
        let payload = object(json!({"email": "a@b.co", "spam_trap": true}));

        let result = map_from_payload(&payload);

        assert_eq!(result.extra("spamTrap"), Some(&Value::Bool(true)));
        assert_eq!(result.extra("spam_trap"), None);
    }

    #[test]
    fn payload_round_trips_through_the_mapper() {
        let original = map_from_payload(&object(json!({
            "email": "mail@example.com",
            "did_you_mean": "",
            "score": 0.48,
            "catch_all": true,
            "sub_status": "role_based"
        })));

        let replayed = map_from_payload(&original.to_payload().unwrap());

        assert_eq!(replayed, original);
    }
}
