// ABOUTME: Logging configuration and tracing subscriber setup for binaries and tests embedding the library
// ABOUTME: Reads level and format from the environment and installs an EnvFilter plus a fmt layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! Structured logging setup
//!
//! The library itself only emits `tracing` events; it never installs a
//! subscriber. Applications call [`LoggingConfig::init`] (or [`init_from_env`])
//! once at startup.

use anyhow::{anyhow, Result};
use serde_json::json;
use std::env;
use std::fmt as std_fmt;
use std::io;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_SERVICE_NAME: &str = "socialgate";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    #[default]
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl std_fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            service_name: DEFAULT_SERVICE_NAME.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Boolean flag: set and not "false"/"0"
fn flag(name: &str) -> bool {
    env::var(name).is_ok_and(|v| v != "false" && v != "0")
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    ///
    /// `RUST_LOG`, `LOG_FORMAT` (json, pretty, compact), `LOG_INCLUDE_LOCATION`,
    /// `LOG_INCLUDE_THREAD`, `SERVICE_NAME`, `SERVICE_VERSION`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.format),
            include_location: flag("LOG_INCLUDE_LOCATION"),
            include_thread: flag("LOG_INCLUDE_THREAD"),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: env::var("SERVICE_VERSION").unwrap_or(defaults.service_version),
        }
    }

    /// Filter for this configuration with HTTP client noise reduced
    ///
    /// # Errors
    ///
    /// Returns an error if `level` is not a valid filter directive
    pub fn env_filter(&self) -> Result<EnvFilter> {
        let filter = EnvFilter::try_new(&self.level)
            .map_err(|e| anyhow!("invalid log filter '{}': {e}", self.level))?;
        Ok(["hyper=warn", "hyper_util=warn", "reqwest=warn", "rustls=warn"]
            .into_iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(filter, EnvFilter::add_directive))
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if the filter is invalid or a global subscriber is already set
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter()?);

        let installed = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_thread_names(self.include_thread)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .json(),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_thread_names(self.include_thread)
                        .with_target(true)
                        .with_writer(io::stdout),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stdout),
                )
                .try_init(),
        };
        installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
            },
            "logging": {
                "level": self.level,
                "format": self.format.to_string(),
                "location": self.include_location,
                "thread": self.include_thread,
            }
        });
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            log.level = %self.level,
            log.format = %self.format,
            "Logging initialized: {summary}"
        );
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Parse a level name, defaulting to `INFO`
#[must_use]
pub fn parse_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::INFO)
}
