// ABOUTME: Canonical user profile and contact records
// ABOUTME: Every identity attribute is optional except the provider id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use serde::{Deserialize, Serialize};

/// Normalized user profile
///
/// Built once per successful profile fetch and cached on the provider for the
/// lifetime of the session. When a provider only reports a display name, the
/// first and last names are derived from it by whitespace splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Provider-scoped user identifier
    pub validated_id: Option<String>,
    /// Full name as the provider displays it
    pub display_name: Option<String>,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Email address, only when the granted scope allows it
    pub email: Option<String>,
    /// Gender as reported by the provider, unvalidated
    pub gender: Option<String>,
    /// Free-form location text
    pub location: Option<String>,
    /// Locale or language tag
    pub language: Option<String>,
    /// Avatar URL
    pub profile_image_url: Option<String>,
    /// Public profile page
    pub profile_url: Option<String>,
    /// Name of the provider that produced this profile
    pub provider_id: String,
}

impl Profile {
    /// Empty profile attributed to `provider_id`
    #[must_use]
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            ..Self::default()
        }
    }
}

/// One entry of a user's contact list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Provider-scoped contact identifier
    pub id: Option<String>,
    /// Full name as the provider displays it
    pub display_name: Option<String>,
    /// First whitespace token of the display name, unless supplied directly
    pub first_name: Option<String>,
    /// Second whitespace token of the display name, unless supplied directly
    pub last_name: Option<String>,
    /// Public profile page
    pub profile_url: Option<String>,
    /// Avatar URL
    pub profile_image_url: Option<String>,
}
