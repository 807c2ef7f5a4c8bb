// ABOUTME: Instagram API descriptor and feed plugin
// ABOUTME: Profile under a `data` root, contact profile URLs built from usernames, epoch-second dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use super::spi::{
    ExpirySignal, OAuthEndpoints, ProviderCapabilities, ProviderDescriptor, ScopeTable,
    TokenPlacement,
};
use crate::normalize::{Container, ContactMapping, DateFormat, FeedMapping, ProfileMapping};
use crate::plugins::{ApiHandle, MappedFeedPlugin, Plugin, PluginCapability, PluginRegistration};
use socialgate_core::constants::{oauth, providers};

/// Feed plugin id
pub const FEED_PLUGIN_ID: &str = "instagram.feed";

const FEED_URL: &str = "https://api.instagram.com/v1/users/self/feed";
const VIEW_PROFILE_URL: &str = "http://instagram.com/";

/// Instagram API
pub struct InstagramDescriptor;

impl ProviderDescriptor for InstagramDescriptor {
    fn name(&self) -> &'static str {
        providers::INSTAGRAM
    }

    fn display_name(&self) -> &'static str {
        "Instagram"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::social()
    }

    fn oauth_endpoints(&self) -> OAuthEndpoints {
        OAuthEndpoints {
            auth_url: "https://api.instagram.com/oauth/authorize",
            token_url: "https://api.instagram.com/oauth/access_token",
        }
    }

    fn profile_url(&self) -> &'static str {
        "https://api.instagram.com/v1/users/self"
    }

    fn contacts_url(&self) -> Option<&'static str> {
        Some("https://api.instagram.com/v1/users/self/follows")
    }

    fn scopes(&self) -> ScopeTable {
        ScopeTable {
            authenticate_only: &["basic"],
            all: &["basic", "comments", "relationships", "likes"],
        }
    }

    fn token_placement(&self) -> TokenPlacement {
        TokenPlacement::QueryParameter(oauth::ACCESS_TOKEN)
    }

    fn expiry_signals(&self) -> &'static [ExpirySignal] {
        &[
            ExpirySignal::Status(401),
            ExpirySignal::BodyField {
                path: "meta.error_type",
                value: "OAuthAccessTokenException",
            },
        ]
    }

    fn profile_mapping(&self) -> ProfileMapping {
        ProfileMapping {
            root: Some("data"),
            validated_id: &["id"],
            display_name: &["full_name"],
            profile_image_url: &["profile_picture"],
            profile_url: &["username"],
            profile_url_prefix: Some(VIEW_PROFILE_URL),
            ..ProfileMapping::default()
        }
    }

    fn contact_mapping(&self) -> Option<ContactMapping> {
        Some(ContactMapping {
            container: Container::Field("data"),
            id: &["id"],
            display_name: &["full_name"],
            first_name: &[],
            last_name: &[],
            profile_url: &["username"],
            profile_url_prefix: Some(VIEW_PROFILE_URL),
            profile_image_url: &["profile_picture"],
        })
    }

    fn default_plugins(&self) -> &'static [&'static str] {
        &[FEED_PLUGIN_ID]
    }
}

/// Field paths of a `users/self/feed` entry
pub const FEED_MAPPING: FeedMapping = FeedMapping {
    container: Container::Field("data"),
    id: &["user.id"],
    from: &["user.full_name"],
    screen_name: &["user.username"],
    message: &["images.low_resolution.url"],
    created_at: &["created_time"],
    date_format: DateFormat::UnixSeconds,
};

fn build_feed(api: ApiHandle) -> Plugin {
    Plugin::Feed(Box::new(MappedFeedPlugin::new(
        FEED_PLUGIN_ID,
        FEED_URL,
        FEED_MAPPING,
        api,
    )))
}

/// Registration of the Instagram feed plugin
pub const FEED_PLUGIN: PluginRegistration = PluginRegistration {
    id: FEED_PLUGIN_ID,
    capability: PluginCapability::Feed,
    required_scopes: &[],
    build: build_feed,
};
