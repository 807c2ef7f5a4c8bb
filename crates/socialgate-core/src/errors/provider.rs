// ABOUTME: Structured error types for identity provider operations
// ABOUTME: Distinguishes denied consent, expired grants, upstream failures, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! # Provider Errors
//!
//! Every failure a caller can observe from a provider, its OAuth strategy, or one of
//! its plugins is a [`ProviderError`]. None of these are recovered inside the
//! library: each is surfaced with the provider name and, where one exists, the
//! offending URL and upstream HTTP status.
//!
//! The variants split along what the caller should do next:
//!
//! - [`ProviderError::UserDeniedConsent`]: show the user a message, do not retry
//! - [`ProviderError::AccessGrantExpired`]: send the user through authorization again
//! - [`ProviderError::UpstreamRequestFailed`]: transport or non-2xx failure, caller decides on retry
//! - [`ProviderError::ResponseParseFailed`]: the provider changed its response contract

use thiserror::Error;

/// Result alias used across provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by identity provider operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The authorization callback carried the provider's denial signal
    #[error("{provider}: user denied permission ({reason})")]
    UserDeniedConsent {
        /// Provider name
        provider: String,
        /// Denial value reported by the provider (e.g. `access_denied`)
        reason: String,
    },

    /// An authenticated call was rejected because the access grant expired or was revoked
    #[error("{provider}: access grant expired or invalid while requesting {url}")]
    AccessGrantExpired {
        /// Provider name
        provider: String,
        /// URL of the rejected request
        url: String,
        /// Upstream status, absent when expiry was detected locally
        status_code: Option<u16>,
    },

    /// Transport failure or non-2xx upstream status
    #[error("{provider}: request to {url} failed{}: {message}", status_suffix(.status_code))]
    UpstreamRequestFailed {
        /// Provider name
        provider: String,
        /// URL of the failed request
        url: String,
        /// Upstream status, absent for transport errors
        status_code: Option<u16>,
        /// Human-readable cause
        message: String,
    },

    /// The response body did not have the shape the provider contract requires
    #[error("{provider}: unable to parse response from {url}: {reason}")]
    ResponseParseFailed {
        /// Provider name
        provider: String,
        /// URL whose response failed to parse
        url: String,
        /// What was missing or malformed
        reason: String,
    },

    /// The token endpoint answered without an access token
    #[error("{provider}: access token not found in response from {url} (status {status_code}){}", detail_suffix(.detail))]
    AccessTokenNotFound {
        /// Provider name
        provider: String,
        /// Token endpoint URL
        url: String,
        /// Status returned by the token endpoint
        status_code: u16,
        /// Provider-supplied error or description, when present
        detail: Option<String>,
    },

    /// The authorization callback was missing required parameters
    #[error("{provider}: invalid authorization callback: {reason}")]
    InvalidCallback {
        /// Provider name
        provider: String,
        /// What was missing
        reason: String,
    },

    /// The operation needs an access grant (or cached profile) that does not exist yet
    #[error("{provider}: not authenticated")]
    NotAuthenticated {
        /// Provider name
        provider: String,
    },

    /// Provider configuration is missing or malformed
    #[error("{provider}: configuration error: {reason}")]
    ConfigurationError {
        /// Provider name
        provider: String,
        /// What is wrong with the configuration
        reason: String,
    },

    /// The provider does not offer the requested capability
    #[error("{provider} does not support {feature}")]
    UnsupportedFeature {
        /// Provider name
        provider: String,
        /// Capability that was requested
        feature: String,
    },

    /// No descriptor is registered under this name
    #[error("unknown provider: {name}")]
    UnknownProvider {
        /// Requested provider name
        name: String,
    },

    /// A plugin id could not be resolved by the plugin registry
    #[error("{provider}: unknown plugin '{plugin_id}'")]
    UnknownPlugin {
        /// Provider name
        provider: String,
        /// Unresolved plugin identifier
        plugin_id: String,
    },
}

#[allow(clippy::ref_option)] // thiserror hands format arguments over by reference
fn status_suffix(status_code: &Option<u16>) -> String {
    status_code.map_or_else(String::new, |code| format!(" with status {code}"))
}

#[allow(clippy::ref_option)]
fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map_or_else(String::new, |d| format!(": {d}"))
}

impl ProviderError {
    /// Provider name carried by this error, if any
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::UserDeniedConsent { provider, .. }
            | Self::AccessGrantExpired { provider, .. }
            | Self::UpstreamRequestFailed { provider, .. }
            | Self::ResponseParseFailed { provider, .. }
            | Self::AccessTokenNotFound { provider, .. }
            | Self::InvalidCallback { provider, .. }
            | Self::NotAuthenticated { provider }
            | Self::ConfigurationError { provider, .. }
            | Self::UnsupportedFeature { provider, .. }
            | Self::UnknownPlugin { provider, .. } => Some(provider),
            Self::UnknownProvider { .. } => None,
        }
    }

    /// Offending request URL for diagnostics
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::AccessGrantExpired { url, .. }
            | Self::UpstreamRequestFailed { url, .. }
            | Self::ResponseParseFailed { url, .. }
            | Self::AccessTokenNotFound { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Upstream HTTP status for diagnostics
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::AccessGrantExpired { status_code, .. }
            | Self::UpstreamRequestFailed { status_code, .. } => *status_code,
            Self::AccessTokenNotFound { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether the caller must send the user through authorization again
    ///
    /// This is "re-authorize", as opposed to "retry".
    #[must_use]
    pub const fn requires_reauthorization(&self) -> bool {
        matches!(
            self,
            Self::AccessGrantExpired { .. } | Self::NotAuthenticated { .. }
        )
    }
}
