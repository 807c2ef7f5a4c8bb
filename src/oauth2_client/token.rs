// ABOUTME: Token endpoint response decoding for the authorization-code exchange
// ABOUTME: Handles JSON and form-encoded bodies and builds the AccessGrant from their fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use crate::http_client::HttpResponse;
use crate::normalize::first_text;
use crate::providers::spi::TokenResponseFormat;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use socialgate_core::constants::oauth;
use socialgate_core::models::AccessGrant;
use url::form_urlencoded;

/// Fields that become first-class grant properties instead of attributes
const GRANT_FIELDS: &[&str] = &[
    oauth::ACCESS_TOKEN,
    oauth::REFRESH_TOKEN,
    oauth::EXPIRES_IN,
    oauth::EXPIRES,
    oauth::SCOPE,
];

/// Decode a token endpoint body into a field map
///
/// Undecodable bodies yield an empty map, which the caller reports as a
/// missing access token together with the status.
#[must_use]
pub fn parse_token_fields(response: &HttpResponse, format: TokenResponseFormat) -> Map<String, Value> {
    let as_json = match format {
        TokenResponseFormat::Json => true,
        TokenResponseFormat::FormEncoded => false,
        TokenResponseFormat::Auto => {
            response
                .header("content-type")
                .is_some_and(|ct| ct.contains("json"))
                || response.text().trim_start().starts_with('{')
        }
    };

    if as_json {
        serde_json::from_slice::<Value>(&response.body)
            .ok()
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default()
    } else {
        form_urlencoded::parse(&response.body)
            .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
            .collect()
    }
}

/// Seconds value that may arrive as a number or a numeric string
fn seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Build a grant from decoded token fields
///
/// Returns `None` when there is no non-empty `access_token`. `expires_in` (or
/// the legacy `expires`) is turned into an absolute instant relative to `now`;
/// every field that is not a grant property is kept as an attribute.
#[must_use]
pub fn grant_from_fields(
    provider: &str,
    fields: &Map<String, Value>,
    now: DateTime<Utc>,
) -> Option<AccessGrant> {
    let token = fields.get(oauth::ACCESS_TOKEN)?.as_str()?;
    let mut grant = AccessGrant::new(provider, token)?;

    if let Some(refresh) = fields.get(oauth::REFRESH_TOKEN).and_then(Value::as_str) {
        grant = grant.with_refresh_token(refresh);
    }
    let expires_at = fields
        .get(oauth::EXPIRES_IN)
        .or_else(|| fields.get(oauth::EXPIRES))
        .and_then(seconds)
        .and_then(Duration::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime));
    if let Some(expires_at) = expires_at {
        grant = grant.with_expires_at(expires_at);
    }
    if let Some(scope) = fields.get(oauth::SCOPE).and_then(Value::as_str) {
        grant = grant.with_scope(scope);
    }

    Some(
        fields
            .iter()
            .filter(|(key, _)| !GRANT_FIELDS.contains(&key.as_str()))
            .fold(grant, |grant, (key, value)| {
                grant.with_attribute(key.clone(), value.clone())
            }),
    )
}

/// Provider-supplied explanation of a failed exchange
#[must_use]
pub fn error_detail(fields: &Map<String, Value>) -> Option<String> {
    first_text(
        &Value::Object(fields.clone()),
        &[oauth::ERROR_DESCRIPTION, "error.message", oauth::ERROR],
    )
}
