// ABOUTME: OAuth 2.0 client side of the social login flow
// ABOUTME: Authorization-code strategy, shared session, and token response decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! # OAuth 2.0 Client Module
//!
//! Socialgate acts as an OAuth 2.0 client towards social identity providers on
//! behalf of the host application. This module handles:
//! - Authorization URL construction with provider-specific redirect conventions
//! - Consent-denial detection on the callback
//! - Code-for-token exchange, JSON or form-encoded
//! - Signing authenticated calls and reacting to expired grants

/// Authorization-code strategy and the shared authenticated client
pub mod strategy;
/// Token endpoint response decoding
pub mod token;

pub use strategy::{AuthState, AuthenticatedClient, CallbackParams, OAuthStrategy};
