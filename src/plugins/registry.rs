// ABOUTME: Startup-time registry mapping plugin ids to constructors
// ABOUTME: Resolves the ids a provider declares into plugin instances bound to its API handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use super::core::{ApiHandle, Plugin, PluginCapability};
use crate::providers::builtin_plugins;
use socialgate_core::errors::{ProviderError, ProviderResult};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Constructor for one plugin implementation
#[derive(Debug, Clone, Copy)]
pub struct PluginRegistration {
    /// Unique id, conventionally `<provider>.<capability>`
    pub id: &'static str,
    /// What the plugin provides
    pub capability: PluginCapability,
    /// Scopes appended to the provider's scope string when the plugin is loaded
    pub required_scopes: &'static [&'static str],
    /// Builds an instance bound to a provider's API handle
    pub build: fn(ApiHandle) -> Plugin,
}

/// Plugin registry that maps ids to registrations
#[derive(Debug, Default)]
pub struct PluginRegistry {
    registrations: HashMap<&'static str, PluginRegistration>,
}

impl PluginRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the feed plugins of every built-in provider
    #[must_use]
    pub fn with_builtin_plugins() -> Self {
        let mut registry = Self::new();
        for registration in builtin_plugins() {
            registry.register(registration);
        }
        info!("Registered {} plugins", registry.registrations.len());
        registry
    }

    /// Register a plugin; a later registration with the same id replaces the earlier one
    pub fn register(&mut self, registration: PluginRegistration) {
        if self
            .registrations
            .insert(registration.id, registration)
            .is_some()
        {
            warn!(plugin = registration.id, "Plugin registration replaced");
        } else {
            debug!(plugin = registration.id, capability = %registration.capability, "Plugin registered");
        }
    }

    /// Registration for `id`
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PluginRegistration> {
        self.registrations.get(id)
    }

    /// All registered ids, sorted
    #[must_use]
    pub fn plugin_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.registrations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve ids in order, dropping repeats
    ///
    /// # Errors
    ///
    /// Returns `UnknownPlugin` for the first id that is not registered
    pub fn resolve<'a, I>(&self, provider: &str, ids: I) -> ProviderResult<Vec<PluginRegistration>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut resolved: Vec<PluginRegistration> = Vec::new();
        for id in ids {
            let registration = self.get(id).ok_or_else(|| ProviderError::UnknownPlugin {
                provider: provider.to_owned(),
                plugin_id: id.to_owned(),
            })?;
            if !resolved.iter().any(|r| r.id == registration.id) {
                resolved.push(*registration);
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids() {
        let registry = PluginRegistry::with_builtin_plugins();
        assert_eq!(
            registry.plugin_ids(),
            vec!["facebook.feed", "googleplus.feed", "instagram.feed", "twitter.feed"]
        );
    }

    #[test]
    fn test_resolve_keeps_first_occurrence() {
        let registry = PluginRegistry::with_builtin_plugins();
        let resolved = registry
            .resolve("facebook", ["facebook.feed", "twitter.feed", "facebook.feed"])
            .map(|regs| regs.iter().map(|r| r.id).collect::<Vec<_>>());
        assert_eq!(resolved, Ok(vec!["facebook.feed", "twitter.feed"]));
    }

    #[test]
    fn test_resolve_unknown_id() {
        let registry = PluginRegistry::new();
        let err = registry.resolve("twitter", ["twitter.media"]).err();
        assert_eq!(
            err,
            Some(ProviderError::UnknownPlugin {
                provider: "twitter".to_owned(),
                plugin_id: "twitter.media".to_owned(),
            })
        );
    }
}
