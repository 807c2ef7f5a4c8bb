// ABOUTME: Core types and constants for the socialgate multi-provider OAuth client
// ABOUTME: Foundation crate with the provider error taxonomy, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

#![deny(unsafe_code)]

//! # Socialgate Core
//!
//! Foundation crate providing the shared types of the socialgate workspace. It is
//! designed to change infrequently so that provider and strategy code in the main
//! crate can evolve without touching the canonical shapes callers depend on.
//!
//! ## Modules
//!
//! - **errors**: `ProviderError` taxonomy surfaced by every provider operation
//! - **models**: `AccessGrant`, `Permission`, `Profile`, `Contact`, `Feed`
//! - **constants**: provider identifiers and OAuth parameter names

/// Provider error taxonomy
pub mod errors;

/// Canonical domain models produced by normalization
pub mod models;

/// Provider identifiers and OAuth protocol constants
pub mod constants;
