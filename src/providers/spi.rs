// ABOUTME: Service Provider Interface describing an identity provider as data
// ABOUTME: Endpoints, scope vocabulary, token conventions, error signals and field mappings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! # Provider Service Provider Interface (SPI)
//!
//! Identity providers differ in endpoints, scope names, token placement and JSON
//! shapes, but not in control flow. A provider is therefore a
//! [`ProviderDescriptor`]: a data-only description that the single generic
//! engine in [`super::core`] executes.
//!
//! ## Example: describing a custom provider
//!
//! ```rust,no_run
//! use socialgate::normalize::ProfileMapping;
//! use socialgate::providers::spi::{
//!     OAuthEndpoints, ProviderCapabilities, ProviderDescriptor, ScopeTable,
//! };
//!
//! pub struct ExampleDescriptor;
//!
//! impl ProviderDescriptor for ExampleDescriptor {
//!     fn name(&self) -> &'static str {
//!         "example"
//!     }
//!
//!     fn display_name(&self) -> &'static str {
//!         "Example"
//!     }
//!
//!     fn capabilities(&self) -> ProviderCapabilities {
//!         ProviderCapabilities::PROFILE
//!     }
//!
//!     fn oauth_endpoints(&self) -> OAuthEndpoints {
//!         OAuthEndpoints {
//!             auth_url: "https://example.com/oauth/authorize",
//!             token_url: "https://example.com/oauth/token",
//!         }
//!     }
//!
//!     fn profile_url(&self) -> &'static str {
//!         "https://api.example.com/me"
//!     }
//!
//!     fn scopes(&self) -> ScopeTable {
//!         ScopeTable {
//!             authenticate_only: &["profile"],
//!             all: &["profile", "email"],
//!         }
//!     }
//!
//!     fn profile_mapping(&self) -> ProfileMapping {
//!         ProfileMapping {
//!             validated_id: &["id"],
//!             display_name: &["name"],
//!             ..ProfileMapping::default()
//!         }
//!     }
//! }
//! ```

use crate::http_client::HttpMethod;
use crate::normalize::{lookup, scalar_text, ContactMapping, ProfileMapping};
use serde_json::Value;
use socialgate_core::constants::oauth;
use socialgate_core::models::Permission;
use std::collections::HashSet;

/// OAuth 2.0 endpoints of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OAuthEndpoints {
    /// Authorization endpoint the user is redirected to
    pub auth_url: &'static str,
    /// Token endpoint for the code exchange
    pub token_url: &'static str,
}

bitflags::bitflags! {
    /// What a provider can fetch once authenticated
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ProviderCapabilities: u8 {
        /// User profile
        const PROFILE = 0b0000_0001;
        /// Contact list
        const CONTACTS = 0b0000_0010;
        /// Activity feed, served through a feed plugin
        const FEED = 0b0000_0100;
    }
}

impl ProviderCapabilities {
    /// Profile, contacts and feed
    #[must_use]
    pub const fn social() -> Self {
        Self::PROFILE.union(Self::CONTACTS).union(Self::FEED)
    }

    /// Check if contacts are supported
    #[must_use]
    pub const fn supports_contacts(&self) -> bool {
        self.contains(Self::CONTACTS)
    }

    /// Check if a feed is supported
    #[must_use]
    pub const fn supports_feed(&self) -> bool {
        self.contains(Self::FEED)
    }
}

/// A provider's scope vocabulary, in request order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeTable {
    /// Scopes for [`Permission::AuthenticateOnly`]
    pub authenticate_only: &'static [&'static str],
    /// Scopes for [`Permission::All`], and for a custom permission without a usable scope string
    pub all: &'static [&'static str],
}

impl ScopeTable {
    /// Both permissions name at least one scope and no scope is blank
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [self.authenticate_only, self.all]
            .iter()
            .all(|scopes| !scopes.is_empty() && scopes.iter().all(|s| !s.trim().is_empty()))
    }
}

/// How the access token travels on authenticated calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPlacement {
    /// As a query parameter with this name
    QueryParameter(&'static str),
    /// As `Authorization: Bearer <token>`
    BearerHeader,
}

/// Encoding of the token endpoint's response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenResponseFormat {
    /// A JSON object
    Json,
    /// `application/x-www-form-urlencoded` pairs
    FormEncoded,
    /// Decide from the content type, then from the body
    Auto,
}

/// Where the post-login redirect target goes in the authorization URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectConvention {
    /// The success URL is the `redirect_uri`
    RedirectUri,
    /// The configured `redirect_uri` is sent and the success URL rides in `state`
    State,
}

/// Callback parameter value meaning the user declined consent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenialSignal {
    /// Callback parameter name
    pub param: &'static str,
    /// Value that signals denial
    pub value: &'static str,
}

/// Default denial signal: `error=access_denied`
pub const ACCESS_DENIED: DenialSignal = DenialSignal {
    param: oauth::ERROR,
    value: oauth::ACCESS_DENIED,
};

/// Upstream answer meaning the access grant is expired or revoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirySignal {
    /// Any response with this status
    Status(u16),
    /// A JSON error body whose field at `path` renders as `value`
    BodyField {
        /// Dotted path into the error body
        path: &'static str,
        /// Expected scalar text
        value: &'static str,
    },
}

impl ExpirySignal {
    /// Whether a failed response matches this signal
    #[must_use]
    pub fn matches(&self, status: u16, body: Option<&Value>) -> bool {
        match self {
            Self::Status(code) => *code == status,
            Self::BodyField { path, value } => body
                .and_then(|body| lookup(body, path))
                .and_then(scalar_text)
                .is_some_and(|found| found == *value),
        }
    }
}

/// Describes a provider's identity, endpoints and response shapes
///
/// Every method returns static data. The defaults cover the common OAuth 2.0
/// conventions; providers override only where they differ.
pub trait ProviderDescriptor: Send + Sync {
    /// Unique lowercase identifier (e.g. "facebook")
    fn name(&self) -> &'static str;

    /// Human-readable name
    fn display_name(&self) -> &'static str;

    /// What the provider can fetch
    fn capabilities(&self) -> ProviderCapabilities;

    /// Default OAuth endpoints; configuration may override them
    fn oauth_endpoints(&self) -> OAuthEndpoints;

    /// Endpoint returning the authenticated user's profile
    fn profile_url(&self) -> &'static str;

    /// Endpoint returning the user's contacts
    fn contacts_url(&self) -> Option<&'static str> {
        None
    }

    /// Scope vocabulary per permission
    fn scopes(&self) -> ScopeTable;

    /// Where the token goes on authenticated calls
    fn token_placement(&self) -> TokenPlacement {
        TokenPlacement::BearerHeader
    }

    /// Token endpoint body encoding
    fn token_response_format(&self) -> TokenResponseFormat {
        TokenResponseFormat::Json
    }

    /// Verb used for the code exchange
    fn token_method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    /// Where the success URL goes in the authorization URL
    fn redirect_convention(&self) -> RedirectConvention {
        RedirectConvention::RedirectUri
    }

    /// Callback values that mean the user declined consent
    fn denial_signals(&self) -> &'static [DenialSignal] {
        &[ACCESS_DENIED]
    }

    /// Failed-response shapes that mean the grant is no longer valid
    fn expiry_signals(&self) -> &'static [ExpirySignal] {
        &[ExpirySignal::Status(401)]
    }

    /// Field paths for the profile response
    fn profile_mapping(&self) -> ProfileMapping;

    /// Field paths for the contacts response
    fn contact_mapping(&self) -> Option<ContactMapping> {
        None
    }

    /// Plugin ids loaded for every instance of this provider
    fn default_plugins(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Resolve a permission to the comma-joined scope string to request
///
/// Pure and deterministic. A custom permission uses the comma-separated
/// `custom` string; without one (or with only blanks) it falls back to the full
/// table. Scopes required by loaded plugins are appended, and repeats are
/// dropped keeping the first occurrence.
#[must_use]
pub fn resolve_scope(
    descriptor: &dyn ProviderDescriptor,
    permission: Permission,
    custom: Option<&str>,
    plugin_scopes: &[&str],
) -> String {
    let table = descriptor.scopes();
    let custom_scopes: Vec<&str> = custom
        .map(|s| s.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let base: Vec<&str> = match permission {
        Permission::AuthenticateOnly => table.authenticate_only.to_vec(),
        Permission::Custom if !custom_scopes.is_empty() => custom_scopes,
        Permission::All | Permission::Custom => table.all.to_vec(),
    };

    let mut seen = HashSet::new();
    base.into_iter()
        .chain(plugin_scopes.iter().copied())
        .filter(|scope| seen.insert(*scope))
        .collect::<Vec<_>>()
        .join(",")
}
