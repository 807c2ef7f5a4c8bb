// ABOUTME: Tests for environment-driven provider configuration
// ABOUTME: Required credentials, endpoint overrides, custom scopes, plugin ids and secret redaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use serial_test::serial;
use socialgate::errors::ProviderError;
use socialgate::providers::ProviderRegistry;
use std::env;

const VARS: [&str; 7] = [
    "SOCIALGATE_FACEBOOK_CLIENT_ID",
    "SOCIALGATE_FACEBOOK_CLIENT_SECRET",
    "SOCIALGATE_FACEBOOK_REDIRECT_URI",
    "SOCIALGATE_FACEBOOK_AUTH_URL",
    "SOCIALGATE_FACEBOOK_TOKEN_URL",
    "SOCIALGATE_FACEBOOK_SCOPES",
    "SOCIALGATE_FACEBOOK_PLUGINS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

fn set_credentials() {
    env::set_var("SOCIALGATE_FACEBOOK_CLIENT_ID", "env-client");
    env::set_var("SOCIALGATE_FACEBOOK_CLIENT_SECRET", "env-secret");
    env::set_var("SOCIALGATE_FACEBOOK_REDIRECT_URI", common::REDIRECT_URI);
}

// ============================================================================
// Loading
// ============================================================================

#[test]
#[serial]
fn test_defaults_come_from_descriptor() {
    clear_env();
    set_credentials();

    let config = ProviderRegistry::with_builtin_providers()
        .config_from_env("facebook")
        .unwrap();

    assert_eq!(config.name, "facebook");
    assert_eq!(config.client_id, "env-client");
    assert_eq!(config.client_secret, "env-secret");
    assert_eq!(config.redirect_uri, common::REDIRECT_URI);
    assert_eq!(config.auth_url, "https://graph.facebook.com/oauth/authorize");
    assert_eq!(
        config.token_url,
        "https://graph.facebook.com/oauth/access_token"
    );
    assert_eq!(config.custom_scopes, None);
    assert!(config.plugins.is_empty());

    clear_env();
}

#[test]
#[serial]
fn test_overrides_scopes_and_plugins() {
    clear_env();
    set_credentials();
    env::set_var("SOCIALGATE_FACEBOOK_TOKEN_URL", "https://auth.example.com/token");
    env::set_var("SOCIALGATE_FACEBOOK_SCOPES", "email,user_posts");
    env::set_var("SOCIALGATE_FACEBOOK_PLUGINS", " facebook.feed , ");

    let config = ProviderRegistry::with_builtin_providers()
        .config_from_env("facebook")
        .unwrap();

    assert_eq!(config.token_url, "https://auth.example.com/token");
    assert_eq!(config.custom_scopes.as_deref(), Some("email,user_posts"));
    assert_eq!(config.plugins, vec!["facebook.feed"]);

    clear_env();
}

// ============================================================================
// Validation
// ============================================================================

#[test]
#[serial]
fn test_missing_secret_is_a_configuration_error() {
    clear_env();
    env::set_var("SOCIALGATE_FACEBOOK_CLIENT_ID", "env-client");
    env::set_var("SOCIALGATE_FACEBOOK_CLIENT_SECRET", "   ");

    let err = ProviderRegistry::with_builtin_providers()
        .config_from_env("facebook")
        .unwrap_err();

    match err {
        ProviderError::ConfigurationError { provider, reason } => {
            assert_eq!(provider, "facebook");
            assert!(reason.contains("client_secret"), "{reason}");
        }
        other => panic!("expected ConfigurationError, got {other:?}"),
    }

    clear_env();
}

#[test]
#[serial]
fn test_invalid_endpoint_override_is_rejected() {
    clear_env();
    set_credentials();
    env::set_var("SOCIALGATE_FACEBOOK_AUTH_URL", "not a url");

    let err = ProviderRegistry::with_builtin_providers()
        .config_from_env("facebook")
        .unwrap_err();

    assert!(matches!(err, ProviderError::ConfigurationError { .. }));
    assert!(err.to_string().contains("auth_url"));

    clear_env();
}

#[test]
#[serial]
fn test_unknown_provider_is_rejected_before_reading_env() {
    clear_env();

    let err = ProviderRegistry::with_builtin_providers()
        .config_from_env("myspace")
        .unwrap_err();

    assert!(matches!(err, ProviderError::UnknownProvider { name } if name == "myspace"));
}

// ============================================================================
// Redaction
// ============================================================================

#[test]
fn test_debug_output_hides_client_secret() {
    let config = common::test_config("twitter");

    let rendered = format!("{config:?}");

    assert!(!rendered.contains(common::CLIENT_SECRET));
    assert!(rendered.contains(&config.secret_fingerprint()));
    assert_eq!(config.secret_fingerprint().len(), 8);
}
