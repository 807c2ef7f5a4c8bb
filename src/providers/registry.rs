// ABOUTME: Provider registry for looking up descriptors and constructing providers by name
// ABOUTME: Validates configuration and resolves plugins before any strategy is built
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use super::builtin_descriptors;
use super::core::{IdentityProvider, OAuthProvider};
use super::spi::ProviderDescriptor;
use crate::config::ProviderConfig;
use crate::http_client::HttpTransport;
use crate::plugins::{PluginRegistration, PluginRegistry};
use socialgate_core::errors::{ProviderError, ProviderResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of the providers available to the application
pub struct ProviderRegistry {
    descriptors: HashMap<&'static str, Arc<dyn ProviderDescriptor>>,
    plugins: PluginRegistry,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtin_providers()
    }
}

impl ProviderRegistry {
    /// Create an empty registry with no providers and no plugins
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
            plugins: PluginRegistry::new(),
        }
    }

    /// Create a registry with every compiled-in provider and its plugins
    #[must_use]
    pub fn with_builtin_providers() -> Self {
        let mut registry = Self {
            descriptors: HashMap::new(),
            plugins: PluginRegistry::with_builtin_plugins(),
        };
        for descriptor in builtin_descriptors() {
            registry.register(descriptor);
        }

        info!(
            "Provider registry initialized with {} provider(s): [{}]",
            registry.descriptors.len(),
            registry.supported_providers().join(", ")
        );
        registry
    }

    /// Register a provider descriptor, replacing one with the same name
    pub fn register(&mut self, descriptor: Arc<dyn ProviderDescriptor>) {
        debug!(provider = descriptor.name(), "Registering provider");
        self.descriptors.insert(descriptor.name(), descriptor);
    }

    /// Register a plugin constructor
    pub fn register_plugin(&mut self, registration: PluginRegistration) {
        self.plugins.register(registration);
    }

    /// Descriptor registered under `name`
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<Arc<dyn ProviderDescriptor>> {
        self.descriptors.get(name).cloned()
    }

    /// Check if a provider is registered
    #[must_use]
    pub fn is_supported(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Names of all registered providers, sorted
    #[must_use]
    pub fn supported_providers(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.descriptors.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Plugin registry used when constructing providers
    #[must_use]
    pub const fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Load `SOCIALGATE_<PROVIDER>_*` configuration for a registered provider
    ///
    /// # Errors
    ///
    /// `UnknownProvider`, or `ConfigurationError` from loading
    pub fn config_from_env(&self, name: &str) -> ProviderResult<ProviderConfig> {
        let descriptor = self.require(name)?;
        ProviderConfig::from_env(descriptor.as_ref())
    }

    /// Construct the provider named by `config`
    ///
    /// The configuration and the descriptor's scope table are validated before
    /// anything is built.
    ///
    /// # Errors
    ///
    /// `UnknownProvider`, `ConfigurationError` or `UnknownPlugin`
    pub fn create_provider(
        &self,
        config: ProviderConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> ProviderResult<Box<dyn IdentityProvider>> {
        let descriptor = self.require(&config.name)?;
        config.validate()?;
        if !descriptor.scopes().is_complete() {
            return Err(ProviderError::ConfigurationError {
                provider: config.name,
                reason: "descriptor scope table has an empty or blank entry".to_owned(),
            });
        }
        debug!(provider = descriptor.name(), config = ?config, "Creating provider");
        let provider = OAuthProvider::new(descriptor, config, transport, &self.plugins)?;
        Ok(Box::new(provider))
    }

    fn require(&self, name: &str) -> ProviderResult<Arc<dyn ProviderDescriptor>> {
        self.descriptor(name)
            .ok_or_else(|| ProviderError::UnknownProvider {
                name: name.to_owned(),
            })
    }
}
