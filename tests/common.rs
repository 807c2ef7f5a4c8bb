// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Quiet logging, provider configs with test credentials, and providers wired to a transport spy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `socialgate`

use socialgate::config::ProviderConfig;
use socialgate::logging::parse_level;
use socialgate::oauth2_client::CallbackParams;
use socialgate::providers::{IdentityProvider, ProviderRegistry};
use socialgate::test_utils::RecordingTransport;
use std::env;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const REDIRECT_URI: &str = "https://app.example.com/oauth/callback";
pub const SUCCESS_URL: &str = "https://app.example.com/welcome";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG=debug to see library events
        let level = env::var("TEST_LOG").map_or(tracing::Level::WARN, |l| parse_level(&l));
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .try_init();
    });
}

/// Config for a built-in provider with test credentials and default endpoints
pub fn test_config(provider: &str) -> ProviderConfig {
    let registry = ProviderRegistry::with_builtin_providers();
    let descriptor = registry
        .descriptor(provider)
        .expect("built-in provider is registered");
    ProviderConfig::from_descriptor(descriptor.as_ref(), CLIENT_ID, CLIENT_SECRET, REDIRECT_URI)
}

/// Built-in provider wired to `transport`
pub fn provider_with(
    config: ProviderConfig,
    transport: &Arc<RecordingTransport>,
) -> Box<dyn IdentityProvider> {
    init_test_logging();
    ProviderRegistry::with_builtin_providers()
        .create_provider(config, transport.clone())
        .expect("test provider builds")
}

/// Callback parameters from literal pairs
pub fn callback(pairs: &[(&str, &str)]) -> CallbackParams {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}
