// ABOUTME: OAuth 2.0 authorization-code strategy driving a provider session
// ABOUTME: Builds authorization URLs, exchanges codes for grants, and signs authenticated calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

//! # Authorization-code strategy
//!
//! Session states:
//!
//! ```text
//! Unauthenticated --build_authorization_url--> AwaitingCallback
//! AwaitingCallback --exchange_code (ok)------> Authenticated
//! Authenticated   --logout / expiry signal--> Unauthenticated
//! Authenticated   --build_authorization_url--> AwaitingCallback   (re-authentication)
//! ```
//!
//! The session lives behind an `Arc` shared with [`AuthenticatedClient`], so a
//! plugin that trips an expiry signal moves the whole provider back to
//! `Unauthenticated`.

use super::token::{error_detail, grant_from_fields, parse_token_fields};
use crate::config::ProviderConfig;
use crate::http_client::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::providers::spi::{
    resolve_scope, ProviderDescriptor, RedirectConvention, TokenPlacement,
};
use chrono::Utc;
use serde_json::Value;
use socialgate_core::constants::oauth;
use socialgate_core::errors::{ProviderError, ProviderResult};
use socialgate_core::models::{AccessGrant, Permission};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

/// Query or form parameters delivered to the OAuth callback
pub type CallbackParams = HashMap<String, String>;

/// Longest upstream body excerpt carried in an error message
const ERROR_BODY_EXCERPT: usize = 256;

/// Where a provider session stands in the authorization-code flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No grant and no authorization in progress
    #[default]
    Unauthenticated,
    /// The user was sent to the authorization URL
    AwaitingCallback,
    /// A grant is held
    Authenticated,
}

#[derive(Debug, Default)]
struct Session {
    state: AuthState,
    grant: Option<AccessGrant>,
    /// Redirect target sent with the last authorization URL
    success_url: Option<String>,
}

/// The authenticated-call capability of one provider session
///
/// Owns the session so that every holder (the strategy, plugin handles) sees
/// the same grant and state.
pub struct AuthenticatedClient {
    descriptor: Arc<dyn ProviderDescriptor>,
    transport: Arc<dyn HttpTransport>,
    session: RwLock<Session>,
}

impl AuthenticatedClient {
    fn new(descriptor: Arc<dyn ProviderDescriptor>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            descriptor,
            transport,
            session: RwLock::new(Session::default()),
        }
    }

    /// Provider name
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.descriptor.name()
    }

    /// Attach the grant's token and perform the call
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` without a grant
    /// - `AccessGrantExpired` when the grant's expiry has passed (no network
    ///   call) or the response matches one of the provider's expiry signals;
    ///   the session drops the grant in both cases
    /// - `UpstreamRequestFailed` for transport failures and other non-2xx statuses
    pub async fn execute(&self, mut request: HttpRequest) -> ProviderResult<HttpResponse> {
        let provider = self.provider();
        let grant = self
            .session
            .read()
            .await
            .grant
            .clone()
            .ok_or_else(|| ProviderError::NotAuthenticated {
                provider: provider.to_owned(),
            })?;

        if grant.is_expired() {
            warn!(provider, url = %request.url, "Access grant expired before request");
            self.expire().await;
            return Err(ProviderError::AccessGrantExpired {
                provider: provider.to_owned(),
                url: request.url,
                status_code: None,
            });
        }

        match self.descriptor.token_placement() {
            TokenPlacement::QueryParameter(name) => {
                request.query.push((name.to_owned(), grant.access_token().to_owned()));
            }
            TokenPlacement::BearerHeader => request.headers.push((
                "Authorization".to_owned(),
                format!("Bearer {}", grant.access_token()),
            )),
        }

        let url = request.url.clone();
        debug!(provider, url = %url, method = %request.method, "Calling provider API");
        let response = self.transport.perform_request(request).await.map_err(|e| {
            ProviderError::UpstreamRequestFailed {
                provider: provider.to_owned(),
                url: url.clone(),
                status_code: None,
                message: e.to_string(),
            }
        })?;

        if response.is_success() {
            return Ok(response);
        }

        let error_body: Option<Value> = response.json().ok();
        let expired = self
            .descriptor
            .expiry_signals()
            .iter()
            .any(|signal| signal.matches(response.status, error_body.as_ref()));
        if expired {
            warn!(provider, url = %url, status = response.status, "Provider rejected access grant");
            self.expire().await;
            return Err(ProviderError::AccessGrantExpired {
                provider: provider.to_owned(),
                url,
                status_code: Some(response.status),
            });
        }

        warn!(provider, url = %url, status = response.status, "Provider API call failed");
        Err(ProviderError::UpstreamRequestFailed {
            provider: provider.to_owned(),
            url,
            status_code: Some(response.status),
            message: response.text().chars().take(ERROR_BODY_EXCERPT).collect(),
        })
    }

    async fn expire(&self) {
        let mut session = self.session.write().await;
        session.grant = None;
        session.state = AuthState::Unauthenticated;
    }
}

/// OAuth 2.0 authorization-code strategy for one provider
pub struct OAuthStrategy {
    config: ProviderConfig,
    permission: Permission,
    scope: String,
    plugin_scopes: Vec<&'static str>,
    client: Arc<AuthenticatedClient>,
}

impl OAuthStrategy {
    /// Strategy for `descriptor` using `transport` for every call
    ///
    /// The initial permission is `Custom` when the configuration carries a
    /// custom scope string, `All` otherwise. `plugin_scopes` are appended to
    /// every resolved scope.
    #[must_use]
    pub fn new(
        descriptor: Arc<dyn ProviderDescriptor>,
        config: ProviderConfig,
        transport: Arc<dyn HttpTransport>,
        plugin_scopes: Vec<&'static str>,
    ) -> Self {
        let permission = if config.custom_scopes.is_some() {
            Permission::Custom
        } else {
            Permission::All
        };
        let mut strategy = Self {
            config,
            permission,
            scope: String::new(),
            plugin_scopes,
            client: Arc::new(AuthenticatedClient::new(descriptor, transport)),
        };
        strategy.set_permission(permission);
        strategy
    }

    /// Provider name
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.client.provider()
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Permission the current scope was resolved from
    #[must_use]
    pub const fn permission(&self) -> Permission {
        self.permission
    }

    /// Scope string sent with the next authorization URL
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Shared authenticated-call capability
    #[must_use]
    pub fn client(&self) -> Arc<AuthenticatedClient> {
        Arc::clone(&self.client)
    }

    /// Change the permission; affects only future authorization URLs
    pub fn set_permission(&mut self, permission: Permission) {
        self.permission = permission;
        self.scope = resolve_scope(
            self.client.descriptor.as_ref(),
            permission,
            self.config.custom_scopes.as_deref(),
            &self.plugin_scopes,
        );
        debug!(provider = self.provider(), %permission, scope = %self.scope, "Scope resolved");
    }

    /// Override the scope string verbatim
    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.scope = scope.into();
    }

    /// Current session state
    pub async fn state(&self) -> AuthState {
        self.client.session.read().await.state
    }

    /// Build the URL the user must visit to grant access
    ///
    /// Performs no network call. `success_url` becomes the `redirect_uri` or the
    /// `state` parameter according to the provider's convention.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for missing credentials, an unparseable
    /// authorization endpoint, or no redirect target at all
    pub async fn build_authorization_url(&self, success_url: &str) -> ProviderResult<String> {
        let provider = self.provider();
        self.config.validate()?;

        let mut url = Url::parse(&self.config.auth_url).map_err(|e| {
            ProviderError::ConfigurationError {
                provider: provider.to_owned(),
                reason: format!("invalid auth_url: {e}"),
            }
        })?;

        let convention = self.client.descriptor.redirect_convention();
        let redirect_uri = match convention {
            RedirectConvention::RedirectUri if !success_url.is_empty() => success_url,
            RedirectConvention::RedirectUri | RedirectConvention::State => {
                self.config.redirect_uri.as_str()
            }
        };
        if redirect_uri.is_empty() {
            return Err(ProviderError::ConfigurationError {
                provider: provider.to_owned(),
                reason: "no redirect_uri configured and no success URL given".to_owned(),
            });
        }

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair(oauth::CLIENT_ID, &self.config.client_id)
                .append_pair(oauth::RESPONSE_TYPE, oauth::RESPONSE_TYPE_CODE)
                .append_pair(oauth::REDIRECT_URI, redirect_uri);
            // Only an explicit `set_scope("")` leaves this empty
            if !self.scope.is_empty() {
                query.append_pair(oauth::SCOPE, &self.scope);
            }
            if convention == RedirectConvention::State && !success_url.is_empty() {
                query.append_pair(oauth::STATE, success_url);
            }
        }

        let mut session = self.client.session.write().await;
        session.state = AuthState::AwaitingCallback;
        session.success_url = Some(redirect_uri.to_owned());
        drop(session);

        info!(provider, scope = %self.scope, "Built authorization URL");
        Ok(url.into())
    }

    /// Fail if the callback carries one of the provider's denial signals
    ///
    /// # Errors
    ///
    /// Returns `UserDeniedConsent` with the reported value
    pub fn check_denial(&self, params: &CallbackParams) -> ProviderResult<()> {
        let denied = self
            .client
            .descriptor
            .denial_signals()
            .iter()
            .find(|signal| params.get(signal.param).is_some_and(|v| v == signal.value));
        match denied {
            Some(signal) => {
                info!(provider = self.provider(), "User denied consent");
                Err(ProviderError::UserDeniedConsent {
                    provider: self.provider().to_owned(),
                    reason: signal.value.to_owned(),
                })
            }
            None => Ok(()),
        }
    }

    /// Exchange the callback's authorization code for an access grant
    ///
    /// Denial is checked first, before any network call. On success the grant
    /// is held by the session and returned to the caller to persist.
    ///
    /// # Errors
    ///
    /// - `UserDeniedConsent` when the callback carries a denial signal
    /// - `InvalidCallback` when there is no `code`
    /// - `UpstreamRequestFailed` when the token endpoint cannot be reached
    /// - `AccessTokenNotFound` when the response has no access token, whatever its status
    pub async fn exchange_code(
        &self,
        params: &CallbackParams,
        method: HttpMethod,
    ) -> ProviderResult<AccessGrant> {
        let provider = self.provider();
        self.check_denial(params)?;

        let code = params
            .get(oauth::CODE)
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| ProviderError::InvalidCallback {
                provider: provider.to_owned(),
                reason: "missing authorization code".to_owned(),
            })?;

        let redirect_uri = self.exchange_redirect_uri().await;
        let fields = [
            (oauth::CLIENT_ID, self.config.client_id.as_str()),
            (oauth::CLIENT_SECRET, self.config.client_secret.as_str()),
            (oauth::REDIRECT_URI, redirect_uri.as_str()),
            (oauth::CODE, code.as_str()),
            (oauth::GRANT_TYPE, oauth::GRANT_TYPE_AUTHORIZATION_CODE),
        ];

        let token_url = self.config.token_url.clone();
        let request = match method {
            HttpMethod::Get => fields
                .iter()
                .fold(HttpRequest::get(&token_url), |request, (name, value)| {
                    request.query(*name, *value)
                }),
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete => {
                let body = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(fields)
                    .finish();
                HttpRequest::new(method, &token_url)
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .header("Accept", "application/json")
                    .body(body)
            }
        };

        info!(
            provider,
            url = %token_url,
            client_secret_fingerprint = %self.config.secret_fingerprint(),
            "Exchanging authorization code"
        );
        let response = self
            .client
            .transport
            .perform_request(request)
            .await
            .map_err(|e| ProviderError::UpstreamRequestFailed {
                provider: provider.to_owned(),
                url: token_url.clone(),
                status_code: None,
                message: e.to_string(),
            })?;

        let fields = parse_token_fields(&response, self.client.descriptor.token_response_format());
        let Some(grant) = grant_from_fields(provider, &fields, Utc::now()) else {
            warn!(provider, url = %token_url, status = response.status, "Token response has no access token");
            return Err(ProviderError::AccessTokenNotFound {
                provider: provider.to_owned(),
                url: token_url,
                status_code: response.status,
                detail: error_detail(&fields),
            });
        };
        if !response.is_success() {
            warn!(provider, status = response.status, "Token endpoint returned a token with a non-2xx status");
        }

        let mut session = self.client.session.write().await;
        session.grant = Some(grant.clone());
        session.state = AuthState::Authenticated;
        session.success_url = None;
        drop(session);

        info!(provider, expires_at = ?grant.expires_at(), "Access grant obtained");
        Ok(grant)
    }

    /// `redirect_uri` the token endpoint expects: the one sent with the authorization URL
    async fn exchange_redirect_uri(&self) -> String {
        self.client
            .session
            .read()
            .await
            .success_url
            .clone()
            .unwrap_or_else(|| self.config.redirect_uri.clone())
    }

    /// Perform an authenticated call; see [`AuthenticatedClient::execute`]
    ///
    /// # Errors
    ///
    /// Same as [`AuthenticatedClient::execute`]
    pub async fn authenticated_request(&self, request: HttpRequest) -> ProviderResult<HttpResponse> {
        self.client.execute(request).await
    }

    /// Grant currently held, if any
    pub async fn access_grant(&self) -> Option<AccessGrant> {
        self.client.session.read().await.grant.clone()
    }

    /// Install a previously obtained grant
    pub async fn set_access_grant(&self, grant: AccessGrant) {
        let mut session = self.client.session.write().await;
        session.grant = Some(grant);
        session.state = AuthState::Authenticated;
    }

    /// Drop the grant discarded after a failed post-exchange step
    pub async fn discard_grant(&self) {
        self.client.expire().await;
    }

    /// Forget the grant; calling it again is a no-op
    pub async fn logout(&self) {
        let mut session = self.client.session.write().await;
        session.grant = None;
        session.success_url = None;
        session.state = AuthState::Unauthenticated;
        drop(session);
        debug!(provider = self.provider(), "Logged out");
    }
}
