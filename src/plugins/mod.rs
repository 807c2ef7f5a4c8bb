// ABOUTME: Plugin system layering optional capabilities on top of a provider
// ABOUTME: Startup-time registry of constructors, injected with the provider's authenticated-call handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! # Plugin System
//!
//! Providers declare plugin ids; the [`PluginRegistry`] maps each id to a
//! constructor and binds the instance to the provider's [`ApiHandle`]. That
//! handle is all a plugin gets: it can make authenticated calls but never sees
//! the access grant or the OAuth strategy.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use socialgate::plugins::{ApiHandle, FeedPlugin, Plugin, PluginCapability, PluginRegistration};
//! use socialgate_core::errors::ProviderResult;
//! use socialgate_core::models::Feed;
//!
//! struct PinnedPostPlugin {
//!     api: ApiHandle,
//! }
//!
//! #[async_trait]
//! impl FeedPlugin for PinnedPostPlugin {
//!     fn id(&self) -> &'static str {
//!         "example.pinned"
//!     }
//!
//!     async fn get_feeds(&self) -> ProviderResult<Vec<Feed>> {
//!         // One call through self.api, then normalize
//! #       Ok(vec![])
//!     }
//! }
//!
//! const PINNED: PluginRegistration = PluginRegistration {
//!     id: "example.pinned",
//!     capability: PluginCapability::Feed,
//!     required_scopes: &[],
//!     build: |api| Plugin::Feed(Box::new(PinnedPostPlugin { api })),
//! };
//! ```

pub mod core;
pub mod feed;
pub mod registry;

pub use core::{ApiHandle, ApiRequest, Plugin, PluginCapability};
pub use feed::{FeedPlugin, MappedFeedPlugin};
pub use registry::{PluginRegistration, PluginRegistry};
