// ABOUTME: Feed plugin contract and the mapping-driven feed plugin every built-in provider uses
// ABOUTME: One authenticated GET to a fixed endpoint, then declarative normalization of each entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use super::core::ApiHandle;
use crate::http_client::HttpRequest;
use crate::normalize::{map_feeds, parse_body, FeedMapping};
use async_trait::async_trait;
use socialgate_core::errors::ProviderResult;
use socialgate_core::models::Feed;
use tracing::{debug, info};

/// A plugin that reads the user's activity feed
#[async_trait]
pub trait FeedPlugin: Send + Sync {
    /// Registered plugin id (e.g. "facebook.feed")
    fn id(&self) -> &'static str;

    /// Fetch the feed with exactly one authenticated call
    ///
    /// # Errors
    ///
    /// - `UpstreamRequestFailed` / `AccessGrantExpired` from the call itself
    /// - `ResponseParseFailed` when the container is missing or any entry has
    ///   an unparseable date
    async fn get_feeds(&self) -> ProviderResult<Vec<Feed>>;
}

/// Feed plugin described entirely by an endpoint and a [`FeedMapping`]
#[derive(Debug)]
pub struct MappedFeedPlugin {
    id: &'static str,
    url: &'static str,
    mapping: FeedMapping,
    api: ApiHandle,
}

impl MappedFeedPlugin {
    /// Plugin `id` reading `url` through `api`
    #[must_use]
    pub const fn new(
        id: &'static str,
        url: &'static str,
        mapping: FeedMapping,
        api: ApiHandle,
    ) -> Self {
        Self {
            id,
            url,
            mapping,
            api,
        }
    }
}

#[async_trait]
impl FeedPlugin for MappedFeedPlugin {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn get_feeds(&self) -> ProviderResult<Vec<Feed>> {
        let provider = self.api.provider();
        debug!(provider, plugin = self.id, url = self.url, "Fetching feed");

        let response = self.api.api(HttpRequest::get(self.url)).await?;
        let feeds = parse_body(&response.body)
            .and_then(|body| map_feeds(&body, &self.mapping))
            .map_err(|e| e.into_provider_error(provider, self.url))?;

        info!(provider, plugin = self.id, count = feeds.len(), "Feed fetched");
        Ok(feeds)
    }
}
