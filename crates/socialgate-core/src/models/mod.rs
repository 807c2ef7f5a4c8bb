// ABOUTME: Canonical domain models shared by every provider and plugin
// ABOUTME: AccessGrant, Permission, Profile, Contact, Feed, and the DomainObject wrapper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! Domain models
//!
//! Providers return wildly different JSON; these are the shapes callers receive
//! after normalization. Every identity attribute except the provider id is
//! optional, because no provider guarantees any of them.

/// Access grant issued by a successful authorization-code exchange
pub mod grant;
/// Canonical scope intents
pub mod permission;
/// User profile and contact records
pub mod profile;
/// Activity feed entries
pub mod feed;

pub use feed::Feed;
pub use grant::AccessGrant;
pub use permission::Permission;
pub use profile::{Contact, Profile};

use serde::{Deserialize, Serialize};

/// A normalized record returned by a plugin fetch
///
/// Plugins are resolved by name at runtime, so their output is carried in this
/// closed set of canonical shapes rather than a per-plugin type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainObject {
    /// A user profile
    Profile(Profile),
    /// A contact entry
    Contact(Contact),
    /// An activity feed entry
    Feed(Feed),
}

impl DomainObject {
    /// Returns the feed entry if this object is one
    #[must_use]
    pub fn into_feed(self) -> Option<Feed> {
        match self {
            Self::Feed(feed) => Some(feed),
            Self::Profile(_) | Self::Contact(_) => None,
        }
    }
}
