// ABOUTME: Access grant value object produced by the authorization-code exchange
// ABOUTME: Holds token, refresh token, expiry, granted scope, and provider-specific attributes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Token and metadata returned by a successful code exchange
///
/// A grant always carries a non-empty access token: [`AccessGrant::new`] returns
/// `None` for an empty one and deserialization rejects it. The caller owns
/// persistence; serialize it, store it, and hand it back later through
/// `set_access_grant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccessGrantRecord")]
pub struct AccessGrant {
    provider_id: String,
    access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, Value>,
}

/// Unvalidated wire form used while deserializing
#[derive(Deserialize)]
struct AccessGrantRecord {
    provider_id: String,
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    scope: Option<String>,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

impl TryFrom<AccessGrantRecord> for AccessGrant {
    type Error = String;

    fn try_from(record: AccessGrantRecord) -> Result<Self, Self::Error> {
        let mut grant = Self::new(record.provider_id, record.access_token)
            .ok_or_else(|| "access_token must not be empty".to_owned())?;
        grant.refresh_token = record.refresh_token;
        grant.expires_at = record.expires_at;
        grant.scope = record.scope;
        grant.attributes = record.attributes;
        Ok(grant)
    }
}

impl AccessGrant {
    /// Create a grant, or `None` when the token is empty or whitespace
    #[must_use]
    pub fn new(provider_id: impl Into<String>, access_token: impl Into<String>) -> Option<Self> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return None;
        }
        Some(Self {
            provider_id: provider_id.into(),
            access_token,
            refresh_token: None,
            expires_at: None,
            scope: None,
            attributes: BTreeMap::new(),
        })
    }

    /// Attach the refresh token issued alongside the access token
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Set the absolute expiry instant
    #[must_use]
    pub const fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Record the scope string the provider granted
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Attach a provider-specific extra from the token response
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Name of the provider that issued this grant
    #[must_use]
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Bearer credential attached to authenticated calls
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Refresh token, if the provider issued one
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Absolute expiry instant, if known
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Scope string the provider reported as granted
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Provider-specific extras from the token response
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Look up a single provider-specific extra
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Whether the grant's expiry time is at or before `now`
    ///
    /// Grants without an expiry never expire locally; the provider is still free
    /// to reject them.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    /// Whether the grant has expired as of now
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
