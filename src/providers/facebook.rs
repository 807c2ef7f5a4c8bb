// ABOUTME: Facebook Graph API descriptor and feed plugin
// ABOUTME: Form-or-JSON token responses, token as a query parameter, error code 190 means expired
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use super::spi::{
    DenialSignal, ExpirySignal, OAuthEndpoints, ProviderCapabilities, ProviderDescriptor,
    ScopeTable, TokenPlacement, TokenResponseFormat, ACCESS_DENIED,
};
use crate::normalize::{Container, ContactMapping, DateFormat, FeedMapping, ProfileMapping};
use crate::plugins::{ApiHandle, MappedFeedPlugin, Plugin, PluginCapability, PluginRegistration};
use socialgate_core::constants::{oauth, providers};

/// Feed plugin id
pub const FEED_PLUGIN_ID: &str = "facebook.feed";

const FEED_URL: &str = "https://graph.facebook.com/me/feed";

/// Facebook Graph API
pub struct FacebookDescriptor;

impl ProviderDescriptor for FacebookDescriptor {
    fn name(&self) -> &'static str {
        providers::FACEBOOK
    }

    fn display_name(&self) -> &'static str {
        "Facebook"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::social()
    }

    fn oauth_endpoints(&self) -> OAuthEndpoints {
        OAuthEndpoints {
            auth_url: "https://graph.facebook.com/oauth/authorize",
            token_url: "https://graph.facebook.com/oauth/access_token",
        }
    }

    fn profile_url(&self) -> &'static str {
        "https://graph.facebook.com/me"
    }

    fn contacts_url(&self) -> Option<&'static str> {
        Some("https://graph.facebook.com/me/friends")
    }

    fn scopes(&self) -> ScopeTable {
        ScopeTable {
            authenticate_only: &["email"],
            all: &[
                "email",
                "user_birthday",
                "user_location",
                "user_posts",
                "user_friends",
                "publish_actions",
            ],
        }
    }

    fn token_placement(&self) -> TokenPlacement {
        TokenPlacement::QueryParameter(oauth::ACCESS_TOKEN)
    }

    // Older Graph API versions answer `access_token=...&expires=...`
    fn token_response_format(&self) -> TokenResponseFormat {
        TokenResponseFormat::Auto
    }

    fn denial_signals(&self) -> &'static [DenialSignal] {
        &[
            ACCESS_DENIED,
            DenialSignal {
                param: "error_reason",
                value: "user_denied",
            },
        ]
    }

    fn expiry_signals(&self) -> &'static [ExpirySignal] {
        &[
            ExpirySignal::Status(401),
            ExpirySignal::BodyField {
                path: "error.code",
                value: "190",
            },
        ]
    }

    fn profile_mapping(&self) -> ProfileMapping {
        ProfileMapping {
            root: None,
            validated_id: &["id"],
            display_name: &["name"],
            first_name: &["first_name"],
            last_name: &["last_name"],
            email: &["email"],
            gender: &["gender"],
            location: &["location.name"],
            language: &["locale"],
            profile_image_url: &["picture.data.url"],
            profile_url: &["link"],
            profile_url_prefix: None,
        }
    }

    fn contact_mapping(&self) -> Option<ContactMapping> {
        Some(ContactMapping {
            container: Container::Field("data"),
            id: &["id"],
            display_name: &["name"],
            first_name: &["first_name"],
            last_name: &["last_name"],
            profile_url: &["id"],
            profile_url_prefix: Some("http://www.facebook.com/profile.php?id="),
            profile_image_url: &["picture.data.url"],
        })
    }

    fn default_plugins(&self) -> &'static [&'static str] {
        &[FEED_PLUGIN_ID]
    }
}

/// Field paths of a `/me/feed` entry
pub const FEED_MAPPING: FeedMapping = FeedMapping {
    container: Container::Field("data"),
    id: &["from.id"],
    from: &["from.name"],
    screen_name: &[],
    message: &[
        "message",
        "story",
        "name",
        "caption",
        "description",
        "picture",
    ],
    created_at: &["created_time"],
    date_format: DateFormat::Pattern {
        format: "%Y-%m-%dT%H:%M:%S%z",
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

/// Registration of the Facebook feed plugin
pub const FEED_PLUGIN: PluginRegistration = PluginRegistration {
    id: FEED_PLUGIN_ID,
    capability: PluginCapability::Feed,
    required_scopes: &["user_posts"],
    build: build_feed,
};
