// ABOUTME: Social identity provider integrations behind one descriptor-driven engine
// ABOUTME: Facebook, Instagram, Google+ and Twitter, each compiled in behind a feature flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

/// Identity provider contract and the generic engine
pub mod core;
/// Startup-time provider registry
pub mod registry;
/// Provider descriptor SPI
pub mod spi;

/// Facebook Graph API descriptor and feed plugin
#[cfg(feature = "provider-facebook")]
pub mod facebook;
/// Google+ descriptor and activity feed plugin
#[cfg(feature = "provider-googleplus")]
pub mod googleplus;
/// Instagram descriptor and media feed plugin
#[cfg(feature = "provider-instagram")]
pub mod instagram;
/// Twitter descriptor and home timeline plugin
#[cfg(feature = "provider-twitter")]
pub mod twitter;

pub use core::{IdentityProvider, OAuthProvider};
pub use registry::ProviderRegistry;
pub use spi::{resolve_scope, ProviderCapabilities, ProviderDescriptor};

use crate::plugins::PluginRegistration;
use std::sync::Arc;

/// Descriptors of every provider compiled into this build
#[must_use]
pub fn builtin_descriptors() -> Vec<Arc<dyn ProviderDescriptor>> {
    let mut descriptors: Vec<Arc<dyn ProviderDescriptor>> = Vec::new();
    #[cfg(feature = "provider-facebook")]
    descriptors.push(Arc::new(facebook::FacebookDescriptor));
    #[cfg(feature = "provider-instagram")]
    descriptors.push(Arc::new(instagram::InstagramDescriptor));
    #[cfg(feature = "provider-googleplus")]
    descriptors.push(Arc::new(googleplus::GooglePlusDescriptor));
    #[cfg(feature = "provider-twitter")]
    descriptors.push(Arc::new(twitter::TwitterDescriptor));
    descriptors
}

/// Plugin registrations shipped with the compiled-in providers
#[must_use]
pub fn builtin_plugins() -> Vec<PluginRegistration> {
    let mut plugins = Vec::new();
    #[cfg(feature = "provider-facebook")]
    plugins.push(facebook::FEED_PLUGIN);
    #[cfg(feature = "provider-instagram")]
    plugins.push(instagram::FEED_PLUGIN);
    #[cfg(feature = "provider-googleplus")]
    plugins.push(googleplus::FEED_PLUGIN);
    #[cfg(feature = "provider-twitter")]
    plugins.push(twitter::FEED_PLUGIN);
    plugins
}
