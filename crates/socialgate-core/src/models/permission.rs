// ABOUTME: Canonical permission intents requested during authorization
// ABOUTME: Each provider resolves these to its own ordered scope vocabulary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbolic scope intent
///
/// Providers map each intent to their own scope strings; see the provider
/// descriptor's scope table for the per-provider vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Only what is needed to identify the user
    AuthenticateOnly,
    /// Everything the provider integration can use
    #[default]
    All,
    /// The scope string supplied in provider configuration
    Custom,
}

impl Permission {
    /// Stable lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticateOnly => "authenticate_only",
            Self::All => "all",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "authenticate_only" | "authenticate-only" => Ok(Self::AuthenticateOnly),
            "all" => Ok(Self::All),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown permission: {other}")),
        }
    }
}
