// ABOUTME: Canonical activity feed entry
// ABOUTME: Message and timestamp are derived per provider during normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post or activity from a provider feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    /// Provider-scoped post identifier
    pub id: Option<String>,
    /// Author display name
    pub from: Option<String>,
    /// Author handle
    pub screen_name: Option<String>,
    /// First present candidate from the provider's message priority list
    pub message: Option<String>,
    /// Absent when the source field is missing
    pub created_at: Option<DateTime<Utc>>,
}
