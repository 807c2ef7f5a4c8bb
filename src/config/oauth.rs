// ABOUTME: Per-provider OAuth client configuration
// ABOUTME: Loads credentials, endpoint overrides, custom scopes and plugin ids from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use crate::providers::spi::ProviderDescriptor;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use socialgate_core::constants::ENV_PREFIX;
use socialgate_core::errors::{ProviderError, ProviderResult};
use std::env;
use std::fmt;
use url::Url;

/// OAuth client configuration for one provider
///
/// # Environment variables
///
/// For provider `facebook`:
///
/// - `SOCIALGATE_FACEBOOK_CLIENT_ID`, `SOCIALGATE_FACEBOOK_CLIENT_SECRET` (required)
/// - `SOCIALGATE_FACEBOOK_REDIRECT_URI`
/// - `SOCIALGATE_FACEBOOK_AUTH_URL`, `SOCIALGATE_FACEBOOK_TOKEN_URL` (default to the descriptor's)
/// - `SOCIALGATE_FACEBOOK_SCOPES`: custom comma-separated scope string
/// - `SOCIALGATE_FACEBOOK_PLUGINS`: extra comma-separated plugin ids
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name; must match a registered descriptor
    pub name: String,
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Authorization endpoint
    pub auth_url: String,
    /// Token endpoint
    pub token_url: String,
    /// Registered callback URL
    pub redirect_uri: String,
    /// Scope string used when the permission is `Custom`
    #[serde(default)]
    pub custom_scopes: Option<String>,
    /// Plugin ids loaded in addition to the descriptor's defaults
    #[serde(default)]
    pub plugins: Vec<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.secret_fingerprint())
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("custom_scopes", &self.custom_scopes)
            .field("plugins", &self.plugins)
            .finish()
    }
}

impl ProviderConfig {
    /// Configuration using the descriptor's default endpoints
    #[must_use]
    pub fn from_descriptor(
        descriptor: &dyn ProviderDescriptor,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        let endpoints = descriptor.oauth_endpoints();
        Self {
            name: descriptor.name().to_owned(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: endpoints.auth_url.to_owned(),
            token_url: endpoints.token_url.to_owned(),
            redirect_uri: redirect_uri.into(),
            custom_scopes: None,
            plugins: Vec::new(),
        }
    }

    /// Load configuration from `SOCIALGATE_<PROVIDER>_*` variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` when credentials are missing or an endpoint
    /// does not parse
    pub fn from_env(descriptor: &dyn ProviderDescriptor) -> ProviderResult<Self> {
        let name = descriptor.name();
        let var = |suffix: &str| {
            env::var(format!("{ENV_PREFIX}_{}_{suffix}", name.to_uppercase()))
                .ok()
                .filter(|value| !value.trim().is_empty())
        };

        let endpoints = descriptor.oauth_endpoints();
        let config = Self {
            name: name.to_owned(),
            client_id: var("CLIENT_ID").unwrap_or_default(),
            client_secret: var("CLIENT_SECRET").unwrap_or_default(),
            auth_url: var("AUTH_URL").unwrap_or_else(|| endpoints.auth_url.to_owned()),
            token_url: var("TOKEN_URL").unwrap_or_else(|| endpoints.token_url.to_owned()),
            redirect_uri: var("REDIRECT_URI").unwrap_or_default(),
            custom_scopes: var("SCOPES"),
            plugins: var("PLUGINS")
                .map(|plugins| parse_scopes(&plugins))
                .unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the custom scope string
    #[must_use]
    pub fn with_custom_scopes(mut self, scopes: impl Into<String>) -> Self {
        self.custom_scopes = Some(scopes.into());
        self
    }

    /// Add a plugin id
    #[must_use]
    pub fn with_plugin(mut self, plugin_id: impl Into<String>) -> Self {
        self.plugins.push(plugin_id.into());
        self
    }

    /// Check that credentials are present and endpoints parse
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` naming the first problem found
    pub fn validate(&self) -> ProviderResult<()> {
        let fail = |reason: String| {
            Err(ProviderError::ConfigurationError {
                provider: self.name.clone(),
                reason,
            })
        };

        if self.client_id.trim().is_empty() {
            return fail("client_id is missing".to_owned());
        }
        if self.client_secret.trim().is_empty() {
            return fail("client_secret is missing".to_owned());
        }
        for (label, value) in [("auth_url", &self.auth_url), ("token_url", &self.token_url)] {
            if let Err(e) = Url::parse(value) {
                return fail(format!("{label} '{value}' is not a valid URL: {e}"));
            }
        }
        if !self.redirect_uri.is_empty() {
            if let Err(e) = Url::parse(&self.redirect_uri) {
                return fail(format!(
                    "redirect_uri '{}' is not a valid URL: {e}",
                    self.redirect_uri
                ));
            }
        }
        Ok(())
    }

    /// First 8 hex chars of the client secret's SHA-256, safe to log
    #[must_use]
    pub fn secret_fingerprint(&self) -> String {
        let digest = Sha256::digest(self.client_secret.as_bytes());
        hex::encode(digest).chars().take(8).collect()
    }
}

/// Parse a comma-separated list, trimming entries and dropping empties
#[must_use]
pub fn parse_scopes(scopes_str: &str) -> Vec<String> {
    scopes_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scopes() {
        assert_eq!(parse_scopes("read,write,admin"), vec!["read", "write", "admin"]);
        assert_eq!(parse_scopes("read, write , admin "), vec!["read", "write", "admin"]);
        assert_eq!(parse_scopes(" , "), Vec::<String>::new());
    }
}
