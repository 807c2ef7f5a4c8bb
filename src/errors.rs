// ABOUTME: Error types surfaced by the library, re-exported in one place
// ABOUTME: Provider taxonomy from the core crate plus transport and normalization errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! # Error Handling
//!
//! Callers only ever receive [`ProviderError`]. [`TransportError`] and
//! [`NormalizeError`] are internal causes, folded into
//! `UpstreamRequestFailed` and `ResponseParseFailed` respectively, and exported
//! for code implementing its own transport or plugins.

pub use crate::http_client::TransportError;
pub use crate::normalize::NormalizeError;
pub use socialgate_core::errors::{ProviderError, ProviderResult};
