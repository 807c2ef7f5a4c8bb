// ABOUTME: Shared constants for provider names and OAuth 2.0 parameter names
// ABOUTME: Keeps wire-level string literals in one place across crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! Constants module
//!
//! Prefer `ProviderRegistry::supported_providers()` for discovery; it includes
//! descriptors registered at runtime, which [`providers::ALL`] does not.

/// Built-in provider identifiers
pub mod providers {
    /// Facebook Graph API provider identifier
    pub const FACEBOOK: &str = "facebook";
    /// Instagram API provider identifier
    pub const INSTAGRAM: &str = "instagram";
    /// Google+ provider identifier
    pub const GOOGLE_PLUS: &str = "googleplus";
    /// Twitter provider identifier
    pub const TWITTER: &str = "twitter";

    /// Every built-in provider, in registration order
    pub const ALL: &[&str] = &[FACEBOOK, INSTAGRAM, GOOGLE_PLUS, TWITTER];
}

/// OAuth 2.0 request and response parameter names (RFC 6749)
#[allow(missing_docs)]
pub mod oauth {
    pub const CLIENT_ID: &str = "client_id";
    pub const CLIENT_SECRET: &str = "client_secret";
    pub const REDIRECT_URI: &str = "redirect_uri";
    pub const RESPONSE_TYPE: &str = "response_type";
    pub const RESPONSE_TYPE_CODE: &str = "code";
    pub const SCOPE: &str = "scope";
    pub const STATE: &str = "state";
    pub const CODE: &str = "code";
    pub const GRANT_TYPE: &str = "grant_type";
    pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";

    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const EXPIRES_IN: &str = "expires_in";
    /// Legacy spelling used by older Graph API token responses
    pub const EXPIRES: &str = "expires";

    pub const ERROR: &str = "error";
    pub const ERROR_DESCRIPTION: &str = "error_description";
    /// Error value a provider sends back when the user declines consent
    pub const ACCESS_DENIED: &str = "access_denied";
}

/// Environment variable prefix for provider configuration
pub const ENV_PREFIX: &str = "SOCIALGATE";
