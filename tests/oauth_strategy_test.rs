// ABOUTME: Tests for the OAuth authorization-code strategy
// ABOUTME: Authorization URLs, code exchange, denial handling, token placement and state transitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{callback, test_config, CLIENT_ID, CLIENT_SECRET, REDIRECT_URI, SUCCESS_URL};
use serde_json::json;
use socialgate::errors::{ProviderError, TransportError};
use socialgate::http_client::{HttpMethod, HttpRequest, HttpResponse};
use socialgate::oauth2_client::{AuthState, OAuthStrategy};
use socialgate::providers::facebook::FacebookDescriptor;
use socialgate::providers::googleplus::GooglePlusDescriptor;
use socialgate::providers::twitter::TwitterDescriptor;
use socialgate::providers::ProviderDescriptor;
use socialgate::test_utils::RecordingTransport;
use socialgate_core::models::{AccessGrant, Permission};
use std::collections::HashMap;
use std::sync::Arc;
use url::{form_urlencoded, Url};

const FB_TOKEN_URL: &str = "https://graph.facebook.com/oauth/access_token";

fn strategy(
    descriptor: Arc<dyn ProviderDescriptor>,
    transport: &Arc<RecordingTransport>,
) -> OAuthStrategy {
    common::init_test_logging();
    let config = test_config(descriptor.name());
    OAuthStrategy::new(descriptor, config, transport.clone(), Vec::new())
}

fn facebook(transport: &Arc<RecordingTransport>) -> OAuthStrategy {
    strategy(Arc::new(FacebookDescriptor), transport)
}

fn query_map(url: &str) -> HashMap<String, String> {
    Url::parse(url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn form_map(body: &str) -> HashMap<String, String> {
    form_urlencoded::parse(body.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

// ============================================================================
// Authorization URL Tests
// ============================================================================

#[tokio::test]
async fn test_authorization_url_carries_client_scope_and_redirect() {
    let transport = Arc::new(RecordingTransport::new());
    let strategy = facebook(&transport);

    let url = strategy.build_authorization_url(SUCCESS_URL).await.unwrap();

    assert!(url.starts_with("https://graph.facebook.com/oauth/authorize?"));
    let query = query_map(&url);
    assert_eq!(query["client_id"], CLIENT_ID);
    assert_eq!(query["response_type"], "code");
    assert_eq!(query["redirect_uri"], SUCCESS_URL);
    assert_eq!(
        query["scope"],
        "email,user_birthday,user_location,user_posts,user_friends,publish_actions"
    );
    assert!(!query.contains_key("state"));
    assert_eq!(strategy.state().await, AuthState::AwaitingCallback);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_authorization_url_is_percent_encoded() {
    let transport = Arc::new(RecordingTransport::new());
    let strategy = facebook(&transport);

    let url = strategy
        .build_authorization_url("https://app.example.com/done?next=/a b&x=1")
        .await
        .unwrap();

    assert!(!url.contains(' '));
    assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fdone%3Fnext%3D%2Fa+b%26x%3D1"));
    assert_eq!(
        query_map(&url)["redirect_uri"],
        "https://app.example.com/done?next=/a b&x=1"
    );
}

#[tokio::test]
async fn test_state_convention_keeps_registered_redirect() {
    let transport = Arc::new(RecordingTransport::new());
    let strategy = strategy(Arc::new(GooglePlusDescriptor), &transport);

    let url = strategy.build_authorization_url(SUCCESS_URL).await.unwrap();
    let query = query_map(&url);

    assert_eq!(query["redirect_uri"], REDIRECT_URI);
    assert_eq!(query["state"], SUCCESS_URL);
}

#[tokio::test]
async fn test_missing_credentials_fail_before_state_change() {
    let transport = Arc::new(RecordingTransport::new());
    let mut config = test_config("facebook");
    config.client_id = "  ".to_owned();
    let strategy = OAuthStrategy::new(
        Arc::new(FacebookDescriptor),
        config,
        transport.clone(),
        Vec::new(),
    );

    let err = strategy.build_authorization_url(SUCCESS_URL).await.unwrap_err();

    assert!(matches!(err, ProviderError::ConfigurationError { .. }));
    assert_eq!(strategy.state().await, AuthState::Unauthenticated);
}

#[tokio::test]
async fn test_set_permission_changes_future_urls_only() {
    let transport = Arc::new(RecordingTransport::new());
    let mut strategy = facebook(&transport);
    let grant = AccessGrant::new("facebook", "existing").unwrap();
    strategy.set_access_grant(grant.clone()).await;

    strategy.set_permission(Permission::AuthenticateOnly);
    let url = strategy.build_authorization_url(SUCCESS_URL).await.unwrap();

    assert_eq!(query_map(&url)["scope"], "email");
    assert_eq!(strategy.access_grant().await, Some(grant));
}

#[tokio::test]
async fn test_set_scope_overrides_verbatim() {
    let transport = Arc::new(RecordingTransport::new());
    let mut strategy = facebook(&transport);

    strategy.set_scope("public_profile");
    let url = strategy.build_authorization_url(SUCCESS_URL).await.unwrap();

    assert_eq!(query_map(&url)["scope"], "public_profile");
}

// ============================================================================
// Code Exchange Tests
// ============================================================================

#[tokio::test]
async fn test_exchange_returns_grant_with_response_token() {
    let transport = Arc::new(
        RecordingTransport::new().respond_json(FB_TOKEN_URL, 200, &json!({"access_token": "T1"})),
    );
    let strategy = facebook(&transport);
    strategy.build_authorization_url(SUCCESS_URL).await.unwrap();

    let grant = strategy
        .exchange_code(&callback(&[("code", "abc")]), HttpMethod::Post)
        .await
        .unwrap();

    assert_eq!(grant.access_token(), "T1");
    assert_eq!(grant.provider_id(), "facebook");
    assert_eq!(strategy.state().await, AuthState::Authenticated);

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, FB_TOKEN_URL);
    let form = form_map(request.body.as_deref().unwrap());
    assert_eq!(form["code"], "abc");
    assert_eq!(form["client_id"], CLIENT_ID);
    assert_eq!(form["client_secret"], CLIENT_SECRET);
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["redirect_uri"], SUCCESS_URL);
}

#[tokio::test]
async fn test_exchange_with_get_sends_query_parameters() {
    let transport = Arc::new(
        RecordingTransport::new().respond_json(FB_TOKEN_URL, 200, &json!({"access_token": "T1"})),
    );
    let strategy = facebook(&transport);

    strategy
        .exchange_code(&callback(&[("code", "abc")]), HttpMethod::Get)
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.query_param("code"), Some("abc"));
    assert_eq!(request.query_param("redirect_uri"), Some(REDIRECT_URI));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_form_encoded_token_response() {
    let transport = Arc::new(RecordingTransport::new().respond_to(
        FB_TOKEN_URL,
        HttpResponse::new(200, "access_token=T2&expires=3600")
            .with_header("Content-Type", "text/plain"),
    ));
    let strategy = facebook(&transport);

    let grant = strategy
        .exchange_code(&callback(&[("code", "abc")]), HttpMethod::Post)
        .await
        .unwrap();

    assert_eq!(grant.access_token(), "T2");
    assert!(grant.expires_at().is_some());
    assert!(!grant.is_expired());
}

#[tokio::test]
async fn test_token_extras_become_attributes() {
    let transport = Arc::new(RecordingTransport::new().respond_json(
        FB_TOKEN_URL,
        200,
        &json!({"access_token": "T3", "token_type": "bearer", "refresh_token": "R3"}),
    ));
    let strategy = facebook(&transport);

    let grant = strategy
        .exchange_code(&callback(&[("code", "abc")]), HttpMethod::Post)
        .await
        .unwrap();

    assert_eq!(grant.refresh_token(), Some("R3"));
    assert_eq!(grant.attribute("token_type"), Some(&json!("bearer")));
}

#[tokio::test]
async fn test_missing_token_fails_regardless_of_status() {
    for (status, body) in [
        (200, json!({"token_type": "bearer"})),
        (400, json!({"error": "invalid_grant", "error_description": "code expired"})),
    ] {
        let transport =
            Arc::new(RecordingTransport::new().respond_json(FB_TOKEN_URL, status, &body));
        let strategy = facebook(&transport);

        let err = strategy
            .exchange_code(&callback(&[("code", "abc")]), HttpMethod::Post)
            .await
            .unwrap_err();

        match err {
            ProviderError::AccessTokenNotFound {
                status_code, url, ..
            } => {
                assert_eq!(status_code, status);
                assert_eq!(url, FB_TOKEN_URL);
            }
            other => panic!("expected AccessTokenNotFound, got {other:?}"),
        }
        assert_eq!(strategy.access_grant().await, None);
    }
}

#[tokio::test]
async fn test_token_error_detail_is_reported() {
    let transport = Arc::new(RecordingTransport::new().respond_json(
        FB_TOKEN_URL,
        400,
        &json!({"error": {"message": "Invalid verification code format.", "code": 100}}),
    ));
    let strategy = facebook(&transport);

    let err = strategy
        .exchange_code(&callback(&[("code", "abc")]), HttpMethod::Post)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid verification code format."));
}

#[tokio::test]
async fn test_denial_fails_before_any_network_call() {
    let transport = Arc::new(RecordingTransport::new());
    let strategy = facebook(&transport);

    for params in [
        callback(&[("error", "access_denied")]),
        callback(&[("error_reason", "user_denied"), ("code", "abc")]),
    ] {
        let err = strategy
            .exchange_code(&params, HttpMethod::Post)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UserDeniedConsent { .. }));
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_other_errors_are_not_denials() {
    let transport = Arc::new(RecordingTransport::new());
    let strategy = facebook(&transport);

    let err = strategy
        .exchange_code(&callback(&[("error", "server_error")]), HttpMethod::Post)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidCallback { .. }));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_transport_failure_has_no_status() {
    let transport = Arc::new(
        RecordingTransport::new().fail_with(FB_TOKEN_URL, TransportError::Timeout),
    );
    let strategy = facebook(&transport);

    let err = strategy
        .exchange_code(&callback(&[("code", "abc")]), HttpMethod::Post)
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::UpstreamRequestFailed { .. }));
    assert_eq!(err.status_code(), None);
    assert_eq!(err.url(), Some(FB_TOKEN_URL));
}

// ============================================================================
// Authenticated Request Tests
// ============================================================================

#[tokio::test]
async fn test_query_parameter_token_placement() {
    let transport = Arc::new(RecordingTransport::new().respond_json(
        "https://graph.facebook.com/me",
        200,
        &json!({"id": "1"}),
    ));
    let strategy = facebook(&transport);
    strategy
        .set_access_grant(AccessGrant::new("facebook", "T1").unwrap())
        .await;

    strategy
        .authenticated_request(HttpRequest::get("https://graph.facebook.com/me"))
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.query_param("access_token"), Some("T1"));
    assert_eq!(request.header_value("authorization"), None);
}

#[tokio::test]
async fn test_bearer_token_placement() {
    let url = "https://api.twitter.com/1.1/account/verify_credentials.json";
    let transport = Arc::new(RecordingTransport::new().respond_json(url, 200, &json!({})));
    let strategy = strategy(Arc::new(TwitterDescriptor), &transport);
    strategy
        .set_access_grant(AccessGrant::new("twitter", "T9").unwrap())
        .await;

    strategy
        .authenticated_request(HttpRequest::get(url))
        .await
        .unwrap();

    let request = transport.last_request().unwrap();
    assert_eq!(request.header_value("Authorization"), Some("Bearer T9"));
    assert!(request.query.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_surfaced_with_url() {
    let url = "https://graph.facebook.com/me/albums";
    let transport = Arc::new(RecordingTransport::new().respond_json(
        url,
        500,
        &json!({"error": {"message": "boom"}}),
    ));
    let strategy = facebook(&transport);
    strategy
        .set_access_grant(AccessGrant::new("facebook", "T1").unwrap())
        .await;

    let err = strategy
        .authenticated_request(HttpRequest::get(url))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::UpstreamRequestFailed { .. }));
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.url(), Some(url));
    assert!(!err.to_string().contains("T1"));
    assert_eq!(strategy.state().await, AuthState::Authenticated);
}

#[tokio::test]
async fn test_request_without_grant_is_not_authenticated() {
    let transport = Arc::new(RecordingTransport::new());
    let strategy = facebook(&transport);

    let err = strategy
        .authenticated_request(HttpRequest::get("https://graph.facebook.com/me"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::NotAuthenticated { .. }));
    assert!(err.requires_reauthorization());
    assert_eq!(transport.call_count(), 0);
}

// ============================================================================
// State Machine Tests
// ============================================================================

#[tokio::test]
async fn test_reauthentication_and_logout() {
    let transport = Arc::new(
        RecordingTransport::new().respond_json(FB_TOKEN_URL, 200, &json!({"access_token": "T1"})),
    );
    let strategy = facebook(&transport);
    assert_eq!(strategy.state().await, AuthState::Unauthenticated);

    strategy.build_authorization_url(SUCCESS_URL).await.unwrap();
    strategy
        .exchange_code(&callback(&[("code", "abc")]), HttpMethod::Post)
        .await
        .unwrap();
    assert_eq!(strategy.state().await, AuthState::Authenticated);

    strategy.build_authorization_url(SUCCESS_URL).await.unwrap();
    assert_eq!(strategy.state().await, AuthState::AwaitingCallback);

    strategy.logout().await;
    strategy.logout().await;
    assert_eq!(strategy.state().await, AuthState::Unauthenticated);
    assert_eq!(strategy.access_grant().await, None);
}
