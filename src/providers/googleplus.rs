// ABOUTME: Google+ API descriptor and feed plugin
// ABOUTME: Bearer tokens, success URL carried in `state`, UTC timestamps without an offset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use super::spi::{
    OAuthEndpoints, ProviderCapabilities, ProviderDescriptor, RedirectConvention, ScopeTable,
};
use crate::normalize::{Container, ContactMapping, DateFormat, FeedMapping, ProfileMapping};
use crate::plugins::{ApiHandle, MappedFeedPlugin, Plugin, PluginCapability, PluginRegistration};
use socialgate_core::constants::providers;

/// Feed plugin id
pub const FEED_PLUGIN_ID: &str = "googleplus.feed";

const FEED_URL: &str =
    "https://www.googleapis.com/plus/v1/people/me/activities/public?maxResults=100";

const PROFILE_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.profile";
const EMAIL_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.email";
const LOGIN_SCOPE: &str = "https://www.googleapis.com/auth/plus.login";

/// Google+ API
pub struct GooglePlusDescriptor;

impl ProviderDescriptor for GooglePlusDescriptor {
    fn name(&self) -> &'static str {
        providers::GOOGLE_PLUS
    }

    fn display_name(&self) -> &'static str {
        "Google+"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::social()
    }

    fn oauth_endpoints(&self) -> OAuthEndpoints {
        OAuthEndpoints {
            auth_url: "https://accounts.google.com/o/oauth2/auth",
            token_url: "https://accounts.google.com/o/oauth2/token",
        }
    }

    fn profile_url(&self) -> &'static str {
        "https://www.googleapis.com/plus/v1/people/me"
    }

    fn contacts_url(&self) -> Option<&'static str> {
        Some("https://www.googleapis.com/plus/v1/people/me/people/visible")
    }

    fn scopes(&self) -> ScopeTable {
        ScopeTable {
            authenticate_only: &[PROFILE_SCOPE, EMAIL_SCOPE],
            all: &[PROFILE_SCOPE, EMAIL_SCOPE, LOGIN_SCOPE],
        }
    }

    // Google only accepts the registered callback, so the caller's target rides in `state`
    fn redirect_convention(&self) -> RedirectConvention {
        RedirectConvention::State
    }

    fn profile_mapping(&self) -> ProfileMapping {
        ProfileMapping {
            root: None,
            validated_id: &["id"],
            display_name: &["displayName"],
            first_name: &["name.givenName"],
            last_name: &["name.familyName"],
            email: &["emails.0.value"],
            gender: &["gender"],
            location: &["placesLived.0.value"],
            language: &["language"],
            profile_image_url: &["image.url"],
            profile_url: &["url"],
            profile_url_prefix: None,
        }
    }

    fn contact_mapping(&self) -> Option<ContactMapping> {
        Some(ContactMapping {
            container: Container::Field("items"),
            id: &["id"],
            display_name: &["displayName"],
            first_name: &[],
            last_name: &[],
            profile_url: &["url"],
            profile_url_prefix: None,
            profile_image_url: &["image.url"],
        })
    }

    fn default_plugins(&self) -> &'static [&'static str] {
        &[FEED_PLUGIN_ID]
    }
}

/// Field paths of a public activity entry
pub const FEED_MAPPING: FeedMapping = FeedMapping {
    container: Container::Field("items"),
    id: &["id"],
    from: &["actor.displayName"],
    screen_name: &[],
    message: &["title"],
    created_at: &["published"],
    date_format: DateFormat::Pattern {
        format: "%Y-%m-%dT%H:%M:%S%.3fZ",
        assume_utc: true,
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

/// Registration of the Google+ feed plugin
pub const FEED_PLUGIN: PluginRegistration = PluginRegistration {
    id: FEED_PLUGIN_ID,
    capability: PluginCapability::Feed,
    required_scopes: &[LOGIN_SCOPE],
    build: build_feed,
};
