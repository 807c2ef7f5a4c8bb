// ABOUTME: Test doubles for the transport seam
// ABOUTME: RecordingTransport replays scripted responses and records every request it receives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Socialgate Contributors

use crate::http_client::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Scripted outcome for requests whose URL starts with `prefix`
#[derive(Debug, Clone)]
struct Route {
    prefix: String,
    outcome: Result<HttpResponse, TransportError>,
}

#[derive(Debug, Default)]
struct Recorder {
    routes: Vec<Route>,
    fallback: Option<HttpResponse>,
    requests: Vec<HttpRequest>,
}

/// Transport spy that answers from a script
///
/// Routes are matched by URL prefix, most recently added first, so a test can
/// override a broad route with a narrower one. Unmatched requests get the
/// fallback response, or a 404 when none is set.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    inner: Mutex<Recorder>,
}

impl RecordingTransport {
    /// Transport with no routes; every request gets a 404
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recorder> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer requests to `prefix` with `response`
    #[must_use]
    pub fn respond_to(self, prefix: &str, response: HttpResponse) -> Self {
        self.lock().routes.push(Route {
            prefix: prefix.to_owned(),
            outcome: Ok(response),
        });
        self
    }

    /// Answer requests to `prefix` with a JSON body
    #[must_use]
    pub fn respond_json(self, prefix: &str, status: u16, body: &Value) -> Self {
        self.respond_to(prefix, HttpResponse::json_body(status, body))
    }

    /// Fail requests to `prefix` at the transport level
    #[must_use]
    pub fn fail_with(self, prefix: &str, error: TransportError) -> Self {
        self.lock().routes.push(Route {
            prefix: prefix.to_owned(),
            outcome: Err(error),
        });
        self
    }

    /// Response for requests no route matches
    #[must_use]
    pub fn with_fallback(self, response: HttpResponse) -> Self {
        self.lock().fallback = Some(response);
        self
    }

    /// Every request received so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Most recent request, if any
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.lock().requests.last().cloned()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn perform_request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut recorder = self.lock();
        let outcome = recorder
            .routes
            .iter()
            .rev()
            .find(|route| request.url.starts_with(&route.prefix))
            .map(|route| route.outcome.clone());
        let fallback = recorder.fallback.clone();
        recorder.requests.push(request);
        drop(recorder);

        outcome.unwrap_or_else(|| Ok(fallback.unwrap_or_else(|| HttpResponse::new(404, ""))))
    }
}
