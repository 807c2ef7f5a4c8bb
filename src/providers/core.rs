// ABOUTME: Caller-facing identity provider contract and the single engine implementing it
// ABOUTME: Drives the OAuth strategy, caches the profile, and resolves plugins for any descriptor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! # Identity provider contract
//!
//! [`IdentityProvider`] is the uniform surface every provider exposes: login
//! redirect, callback verification, profile, contacts, a generic authenticated
//! `api` passthrough, permission negotiation and logout.
//!
//! There is exactly one implementation, [`OAuthProvider`]. It is parameterized by
//! a [`ProviderDescriptor`] instead of being subclassed per provider: what differs
//! between Facebook and Twitter is data, not control flow.
//!
//! ## Lifecycle
//!
//! ```text
//! login_redirect_url ──► (user consents) ──► verify_response ──► profile cached
//!                                                   │
//!                     get_contact_list / api / feeds ◄─┘
//! ```
//!
//! The profile is fetched once, right after the exchange, and served from the
//! cache until `logout`. An expired grant detected by any call (including a
//! plugin's) leaves the provider unauthenticated.

use super::spi::ProviderDescriptor;
use crate::config::ProviderConfig;
use crate::http_client::{HttpRequest, HttpResponse, HttpTransport};
use crate::normalize::{map_contacts, map_profile, parse_body};
use crate::oauth2_client::{AuthState, CallbackParams, OAuthStrategy};
use crate::plugins::{ApiHandle, Plugin, PluginRegistry};
use async_trait::async_trait;
use socialgate_core::errors::{ProviderError, ProviderResult};
use socialgate_core::models::{AccessGrant, Contact, Feed, Permission, Profile};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Uniform operations of every identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider name (e.g. "facebook")
    fn name(&self) -> &'static str;

    /// Current state of the OAuth session
    async fn auth_state(&self) -> AuthState;

    /// URL to send the user to; `success_url` is where the provider returns them
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for malformed configuration
    async fn login_redirect_url(&self, success_url: &str) -> ProviderResult<String>;

    /// Complete the flow from the callback parameters and return the user's profile
    ///
    /// # Errors
    ///
    /// `UserDeniedConsent` (no network call), exchange errors, or any error of
    /// the profile fetch, in which case the new grant is discarded
    async fn verify_response(&self, params: &CallbackParams) -> ProviderResult<Profile>;

    /// The cached profile, fetched on first access when a grant is held
    ///
    /// The cache ends with the session, including one ended by an expiry signal.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a grant, or any error of the fetch
    async fn get_user_profile(&self) -> ProviderResult<Profile>;

    /// Contacts in provider order
    ///
    /// # Errors
    ///
    /// `UnsupportedFeature` when the provider has no contacts endpoint, or any
    /// error of the fetch
    async fn get_contact_list(&self) -> ProviderResult<Vec<Contact>>;

    /// Authenticated passthrough for arbitrary endpoints
    ///
    /// # Errors
    ///
    /// `NotAuthenticated`, `AccessGrantExpired` or `UpstreamRequestFailed`
    async fn api(&self, request: HttpRequest) -> ProviderResult<HttpResponse>;

    /// Change the permission for future login redirects
    async fn set_permission(&self, permission: Permission);

    /// Install a grant obtained earlier
    async fn set_access_grant(&self, grant: AccessGrant);

    /// Grant currently held
    async fn get_access_grant(&self) -> Option<AccessGrant>;

    /// Drop the grant and the cached profile; idempotent
    async fn logout(&self);

    /// Loaded plugins, in declaration order
    fn plugins(&self) -> &[Plugin];

    /// Loaded plugin by id
    fn plugin(&self, id: &str) -> Option<&Plugin> {
        self.plugins().iter().find(|plugin| plugin.id() == id)
    }

    /// Entries of the first loaded feed plugin
    ///
    /// # Errors
    ///
    /// `UnsupportedFeature` when the provider lacks the feed capability or no
    /// feed plugin is loaded, or any error of the fetch
    async fn feeds(&self) -> ProviderResult<Vec<Feed>>;
}

/// Identity provider engine for any [`ProviderDescriptor`]
pub struct OAuthProvider {
    descriptor: Arc<dyn ProviderDescriptor>,
    strategy: RwLock<OAuthStrategy>,
    profile: RwLock<Option<Profile>>,
    plugins: Vec<Plugin>,
}

impl OAuthProvider {
    /// Build the engine, resolving the descriptor's default plugins plus the configured ones
    ///
    /// # Errors
    ///
    /// Returns `UnknownPlugin` for an unregistered plugin id
    pub fn new(
        descriptor: Arc<dyn ProviderDescriptor>,
        config: ProviderConfig,
        transport: Arc<dyn HttpTransport>,
        plugin_registry: &PluginRegistry,
    ) -> ProviderResult<Self> {
        let name = descriptor.name();
        let ids = descriptor
            .default_plugins()
            .iter()
            .copied()
            .chain(config.plugins.iter().map(String::as_str));
        let registrations = plugin_registry.resolve(name, ids)?;

        let plugin_scopes: Vec<&'static str> = registrations
            .iter()
            .flat_map(|registration| registration.required_scopes.iter().copied())
            .collect();

        let strategy = OAuthStrategy::new(
            Arc::clone(&descriptor),
            config,
            transport,
            plugin_scopes,
        );
        let handle = ApiHandle::new(strategy.client());
        let plugins: Vec<Plugin> = registrations
            .iter()
            .map(|registration| (registration.build)(handle.clone()))
            .collect();

        info!(
            provider = name,
            plugins = ?plugins.iter().map(Plugin::id).collect::<Vec<_>>(),
            scope = strategy.scope(),
            "Provider initialized"
        );

        Ok(Self {
            descriptor,
            strategy: RwLock::new(strategy),
            profile: RwLock::new(None),
            plugins,
        })
    }

    /// Descriptor driving this engine
    #[must_use]
    pub fn descriptor(&self) -> &dyn ProviderDescriptor {
        self.descriptor.as_ref()
    }

    /// Scope string the next login redirect will request
    pub async fn scope(&self) -> String {
        self.strategy.read().await.scope().to_owned()
    }

    async fn fetch_profile(&self) -> ProviderResult<Profile> {
        let url = self.descriptor.profile_url();
        let response = self
            .strategy
            .read()
            .await
            .authenticated_request(HttpRequest::get(url))
            .await?;

        let profile = parse_body(&response.body)
            .and_then(|body| map_profile(&body, &self.descriptor.profile_mapping(), self.name()))
            .map_err(|e| e.into_provider_error(self.name(), url))?;

        *self.profile.write().await = Some(profile.clone());
        debug!(provider = self.name(), "Profile cached");
        Ok(profile)
    }
}

#[async_trait]
impl IdentityProvider for OAuthProvider {
    fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    async fn auth_state(&self) -> AuthState {
        self.strategy.read().await.state().await
    }

    async fn login_redirect_url(&self, success_url: &str) -> ProviderResult<String> {
        self.strategy
            .read()
            .await
            .build_authorization_url(success_url)
            .await
    }

    async fn verify_response(&self, params: &CallbackParams) -> ProviderResult<Profile> {
        let provider = self.name();
        info!(provider, "Verifying authorization callback");

        self.strategy
            .read()
            .await
            .exchange_code(params, self.descriptor.token_method())
            .await?;

        *self.profile.write().await = None;
        match self.fetch_profile().await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                warn!(provider, error = %e, "Profile fetch failed after exchange; discarding grant");
                self.strategy.read().await.discard_grant().await;
                Err(e)
            }
        }
    }

    async fn get_user_profile(&self) -> ProviderResult<Profile> {
        // An expiry signal may have ended the session since the profile was cached
        if self.get_access_grant().await.is_none() {
            *self.profile.write().await = None;
            return Err(ProviderError::NotAuthenticated {
                provider: self.name().to_owned(),
            });
        }
        if let Some(profile) = self.profile.read().await.clone() {
            return Ok(profile);
        }
        self.fetch_profile().await
    }

    async fn get_contact_list(&self) -> ProviderResult<Vec<Contact>> {
        let provider = self.name();
        let unsupported = || ProviderError::UnsupportedFeature {
            provider: provider.to_owned(),
            feature: "contacts".to_owned(),
        };
        if !self.descriptor.capabilities().supports_contacts() {
            return Err(unsupported());
        }
        let (Some(url), Some(mapping)) =
            (self.descriptor.contacts_url(), self.descriptor.contact_mapping())
        else {
            return Err(unsupported());
        };

        info!(provider, url, "Fetching contacts");
        let response = self
            .strategy
            .read()
            .await
            .authenticated_request(HttpRequest::get(url))
            .await?;
        let contacts = parse_body(&response.body)
            .and_then(|body| map_contacts(&body, &mapping))
            .map_err(|e| e.into_provider_error(provider, url))?;

        debug!(provider, count = contacts.len(), "Contacts fetched");
        Ok(contacts)
    }

    async fn api(&self, request: HttpRequest) -> ProviderResult<HttpResponse> {
        self.strategy
            .read()
            .await
            .authenticated_request(request)
            .await
    }

    async fn set_permission(&self, permission: Permission) {
        self.strategy.write().await.set_permission(permission);
    }

    async fn set_access_grant(&self, grant: AccessGrant) {
        *self.profile.write().await = None;
        self.strategy.read().await.set_access_grant(grant).await;
    }

    async fn get_access_grant(&self) -> Option<AccessGrant> {
        self.strategy.read().await.access_grant().await
    }

    async fn logout(&self) {
        *self.profile.write().await = None;
        self.strategy.read().await.logout().await;
        info!(provider = self.name(), "Logged out");
    }

    fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    async fn feeds(&self) -> ProviderResult<Vec<Feed>> {
        let unsupported = || ProviderError::UnsupportedFeature {
            provider: self.name().to_owned(),
            feature: "feed".to_owned(),
        };
        if !self.descriptor.capabilities().supports_feed() {
            return Err(unsupported());
        }
        let feed = self
            .plugins
            .iter()
            .find_map(Plugin::as_feed)
            .ok_or_else(unsupported)?;
        feed.get_feeds().await
    }
}

