// ABOUTME: Configuration module for provider credentials and endpoints
// ABOUTME: Environment-driven loading with validation before any strategy is built
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors
//! Configuration module
//!
//! Configuration is environment-only: each provider reads its own
//! `SOCIALGATE_<PROVIDER>_*` variables. Logging configuration lives in
//! [`crate::logging`].

/// Per-provider OAuth client configuration
pub mod oauth;

pub use oauth::{parse_scopes, ProviderConfig};
