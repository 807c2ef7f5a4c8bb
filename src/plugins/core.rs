// ABOUTME: Core plugin types: capabilities, the injected API handle, and the Plugin enum
// ABOUTME: Plugins see only an authenticated-call handle, never the grant or the strategy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use super::feed::FeedPlugin;
use crate::http_client::{HttpRequest, HttpResponse};
use crate::oauth2_client::AuthenticatedClient;
use serde::{Deserialize, Serialize};
use socialgate_core::errors::ProviderResult;
use socialgate_core::models::DomainObject;
use std::fmt;
use std::sync::Arc;

/// Request type accepted by [`ApiHandle::api`]
pub type ApiRequest = HttpRequest;

/// Capability a plugin adds to a provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PluginCapability {
    /// Activity feed
    Feed,
}

impl PluginCapability {
    /// Get capability display name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Feed => "Activity Feed",
        }
    }
}

impl fmt::Display for PluginCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Authenticated-call capability handed to plugins
#[derive(Clone)]
pub struct ApiHandle {
    client: Arc<AuthenticatedClient>,
}

impl ApiHandle {
    /// Wrap a provider's authenticated client
    #[must_use]
    pub const fn new(client: Arc<AuthenticatedClient>) -> Self {
        Self { client }
    }

    /// Provider the handle calls on behalf of
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.client.provider()
    }

    /// Perform an authenticated call
    ///
    /// # Errors
    ///
    /// Same as the provider's own authenticated calls; an expired grant also
    /// logs the provider out
    pub async fn api(&self, request: ApiRequest) -> ProviderResult<HttpResponse> {
        self.client.execute(request).await
    }
}

impl fmt::Debug for ApiHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiHandle")
            .field("provider", &self.provider())
            .finish_non_exhaustive()
    }
}

/// A loaded plugin instance
pub enum Plugin {
    /// Activity feed plugin
    Feed(Box<dyn FeedPlugin>),
}

impl Plugin {
    /// Registered plugin id
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Feed(feed) => feed.id(),
        }
    }

    /// Capability this plugin provides
    #[must_use]
    pub const fn capability(&self) -> PluginCapability {
        match self {
            Self::Feed(_) => PluginCapability::Feed,
        }
    }

    /// The feed view of this plugin, if it is one
    #[must_use]
    pub fn as_feed(&self) -> Option<&dyn FeedPlugin> {
        match self {
            Self::Feed(feed) => Some(feed.as_ref()),
        }
    }

    /// Fetch the plugin's domain objects with one authenticated call
    ///
    /// # Errors
    ///
    /// Returns the plugin's fetch error; no partial list is returned
    pub async fn fetch(&self) -> ProviderResult<Vec<DomainObject>> {
        match self {
            Self::Feed(feed) => Ok(feed
                .get_feeds()
                .await?
                .into_iter()
                .map(DomainObject::Feed)
                .collect()),
        }
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("id", &self.id())
            .field("capability", &self.capability())
            .finish()
    }
}
