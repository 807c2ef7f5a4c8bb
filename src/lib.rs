// ABOUTME: Main library entry point for the socialgate social login client
// ABOUTME: OAuth2 strategy, provider descriptors, plugin registry and response normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

#![deny(unsafe_code)]

//! # Socialgate
//!
//! A multi-provider OAuth 2.0 client core. It walks a user through the
//! authorization-code flow with one of several social identity providers and
//! returns provider-agnostic profiles, contacts and feed entries.
//!
//! ## Features
//!
//! - **Multi-provider support**: Facebook, Instagram, Google+ and Twitter
//! - **Descriptor-driven**: each provider is data; one engine runs them all
//! - **Plugins**: optional capabilities such as activity feeds, resolved by id
//! - **Pluggable transport**: bring your own [`http_client::HttpTransport`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use socialgate::config::ProviderConfig;
//! use socialgate::http_client::ReqwestTransport;
//! use socialgate::providers::ProviderRegistry;
//! use socialgate_core::errors::ProviderResult;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! async fn login() -> ProviderResult<()> {
//!     let registry = ProviderRegistry::with_builtin_providers();
//!     let config = registry.config_from_env("facebook")?;
//!     let provider = registry.create_provider(config, Arc::new(ReqwestTransport::new()))?;
//!
//!     let url = provider.login_redirect_url("https://app.example.com/callback").await?;
//!     println!("Send the user to {url}");
//!
//!     // Later, with the callback's query parameters:
//!     let params: HashMap<String, String> = HashMap::new();
//!     let profile = provider.verify_response(&params).await?;
//!     println!("Hello, {:?}", profile.display_name);
//!     Ok(())
//! }
//! ```

/// Provider configuration loading and validation
pub mod config;

/// Error types surfaced by the library
pub mod errors;

/// `HTTP` transport abstraction and the reqwest implementation
pub mod http_client;

/// Tracing subscriber setup
pub mod logging;

/// Declarative normalization of provider `JSON`
pub mod normalize;

/// `OAuth2` authorization-code strategy
pub mod oauth2_client;

/// Plugin registry and feed plugins
pub mod plugins;

/// Identity provider descriptors, engine and registry
pub mod providers;

/// Transport test double shared by unit and integration tests
pub mod test_utils;

pub use socialgate_core::constants;
pub use socialgate_core::models;
