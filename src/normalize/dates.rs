// ABOUTME: Provider date formats and the per-call parser for feed timestamps
// ABOUTME: RFC 3339, chrono patterns with or without an embedded offset, and epoch seconds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// How a provider encodes timestamps
///
/// Formats are plain data; nothing is cached between calls, so parsing is safe
/// from any number of tasks at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// RFC 3339 / ISO 8601 with offset
    Rfc3339,
    /// A chrono format string
    Pattern {
        /// chrono `strftime`-style pattern
        format: &'static str,
        /// The pattern has no offset; read the value as UTC
        assume_utc: bool,
    },
    /// Seconds since the Unix epoch, as a string or a number
    UnixSeconds,
}

/// Parse a timestamp value with the provider's format
///
/// # Errors
///
/// Returns a description of the mismatch when the value does not parse
pub fn parse_date(raw: &Value, format: DateFormat) -> Result<DateTime<Utc>, String> {
    if let DateFormat::UnixSeconds = format {
        let seconds = match raw {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
        .ok_or_else(|| format!("expected epoch seconds, got {raw}"))?;
        return DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| format!("epoch seconds out of range: {seconds}"));
    }

    let text = raw
        .as_str()
        .ok_or_else(|| format!("expected a date string, got {raw}"))?;

    match format {
        DateFormat::Rfc3339 => DateTime::parse_from_rfc3339(text)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| e.to_string()),
        DateFormat::Pattern {
            format,
            assume_utc: true,
        } => NaiveDateTime::parse_from_str(text, format)
            .map(|naive| naive.and_utc())
            .map_err(|e| e.to_string()),
        DateFormat::Pattern {
            format,
            assume_utc: false,
        } => DateTime::parse_from_str(text, format)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| e.to_string()),
        DateFormat::UnixSeconds => Err(format!("expected epoch seconds, got {raw}")),
    }
}
