// ABOUTME: Twitter API descriptor and home-timeline feed plugin
// ABOUTME: OAuth 2.0 bearer tokens, bare-array timeline, error code 89 means an invalid token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use super::spi::{
    ExpirySignal, OAuthEndpoints, ProviderCapabilities, ProviderDescriptor, ScopeTable,
};
use crate::normalize::{Container, ContactMapping, DateFormat, FeedMapping, ProfileMapping};
use crate::plugins::{ApiHandle, MappedFeedPlugin, Plugin, PluginCapability, PluginRegistration};
use socialgate_core::constants::providers;

/// Feed plugin id
pub const FEED_PLUGIN_ID: &str = "twitter.feed";

const FEED_URL: &str = "https://api.twitter.com/1.1/statuses/home_timeline.json";

/// Twitter API
pub struct TwitterDescriptor;

impl ProviderDescriptor for TwitterDescriptor {
    fn name(&self) -> &'static str {
        providers::TWITTER
    }

    fn display_name(&self) -> &'static str {
        "Twitter"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::social()
    }

    fn oauth_endpoints(&self) -> OAuthEndpoints {
        OAuthEndpoints {
            auth_url: "https://twitter.com/i/oauth2/authorize",
            token_url: "https://api.twitter.com/2/oauth2/token",
        }
    }

    fn profile_url(&self) -> &'static str {
        "https://api.twitter.com/1.1/account/verify_credentials.json"
    }

    fn contacts_url(&self) -> Option<&'static str> {
        Some("https://api.twitter.com/1.1/friends/list.json")
    }

    fn scopes(&self) -> ScopeTable {
        ScopeTable {
            authenticate_only: &["users.read", "tweet.read"],
            all: &["users.read", "tweet.read", "follows.read", "offline.access"],
        }
    }

    fn expiry_signals(&self) -> &'static [ExpirySignal] {
        &[
            ExpirySignal::Status(401),
            ExpirySignal::BodyField {
                path: "errors.0.code",
                value: "89",
            },
        ]
    }

    fn profile_mapping(&self) -> ProfileMapping {
        ProfileMapping {
            root: None,
            validated_id: &["id_str", "id"],
            display_name: &["name"],
            location: &["location"],
            language: &["lang"],
            profile_image_url: &["profile_image_url_https", "profile_image_url"],
            profile_url: &["screen_name"],
            profile_url_prefix: Some("https://twitter.com/"),
            ..ProfileMapping::default()
        }
    }

    fn contact_mapping(&self) -> Option<ContactMapping> {
        Some(ContactMapping {
            container: Container::Field("users"),
            id: &["id_str", "id"],
            display_name: &["name"],
            first_name: &[],
            last_name: &[],
            profile_url: &["screen_name"],
            profile_url_prefix: Some("https://twitter.com/"),
            profile_image_url: &["profile_image_url_https", "profile_image_url"],
        })
    }

    fn default_plugins(&self) -> &'static [&'static str] {
        &[FEED_PLUGIN_ID]
    }
}

/// Field paths of a home-timeline status
pub const FEED_MAPPING: FeedMapping = FeedMapping {
    container: Container::BareArray,
    id: &["user.id_str"],
    from: &["user.name"],
    screen_name: &["user.screen_name"],
    message: &["text"],
    created_at: &["created_at"],
    date_format: DateFormat::Pattern {
        format: "%a %b %d %H:%M:%S %z %Y",
        assume_utc: false,
    },
};

fn build_feed(api: ApiHandle) -> Plugin {
    Plugin::Feed(Box::new(MappedFeedPlugin::new(
        FEED_PLUGIN_ID,
        FEED_URL,
        FEED_MAPPING,
        api,
    )))
}

/// Registration of the Twitter feed plugin
pub const FEED_PLUGIN: PluginRegistration = PluginRegistration {
    id: FEED_PLUGIN_ID,
    capability: PluginCapability::Feed,
    required_scopes: &["tweet.read"],
    build: build_feed,
};
