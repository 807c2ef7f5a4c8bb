// ABOUTME: Error module root for socialgate-core
// ABOUTME: Re-exports the provider error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

/// Errors raised by provider, strategy, and plugin operations
pub mod provider;

pub use provider::{ProviderError, ProviderResult};
