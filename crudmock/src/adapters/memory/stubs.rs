//! In-memory request interception
//!
//! Code under test (or a test-side HTTP shim) hands each outgoing request to
//! `StubRegistry::intercept`; matching stubs answer it, nothing reaches the
//! network. Every intercepted request is logged for assertions.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::domain::entities::{HttpMethod, MockEndpoint};
use crate::domain::ports::RequestInterceptor;
use crate::error::InterceptError;

/// What an intercepted request receives
#[derive(Debug, Clone, PartialEq)]
pub struct StubbedResponse {
    pub status: u16,
    pub body: Value,
}

impl StubbedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request seen by the registry
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptedCall {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
    pub matched: bool,
}

#[derive(Default)]
pub struct StubRegistry {
    stubs: RwLock<Vec<MockEndpoint>>,
    calls: RwLock<Vec<InterceptedCall>>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active stubs in registration order
    pub fn stubs(&self) -> Vec<MockEndpoint> {
        self.stubs.read().clone()
    }

    pub fn stub_count(&self) -> usize {
        self.stubs.read().len()
    }

    /// The active stub for a route, if any
    pub fn find(&self, method: HttpMethod, url: &str) -> Option<MockEndpoint> {
        self.stubs
            .read()
            .iter()
            .find(|stub| stub.http_method == method && stub.url == url)
            .cloned()
    }

    /// Answer a request from the active stubs
    pub fn intercept(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&Value>,
    ) -> Option<StubbedResponse> {
        let response = self
            .stubs
            .read()
            .iter()
            .rev()
            .find(|stub| stub.matches(method, url, body))
            .map(|stub| StubbedResponse {
                status: stub.status,
                body: stub.response_body.clone(),
            });

        match &response {
            Some(resp) => {
                tracing::debug!(method = %method, url = %url, status = resp.status, "intercepted request")
            }
            None => tracing::warn!(method = %method, url = %url, "no stub matches request"),
        }

        self.calls.write().push(InterceptedCall {
            method,
            url: url.to_string(),
            body: body.cloned(),
            matched: response.is_some(),
        });

        response
    }

    /// Requests intercepted since the last clear
    pub fn calls(&self) -> Vec<InterceptedCall> {
        self.calls.read().clone()
    }

    pub fn unmatched_calls(&self) -> Vec<InterceptedCall> {
        self.calls
            .read()
            .iter()
            .filter(|call| !call.matched)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RequestInterceptor for StubRegistry {
    async fn register_stub(&self, endpoint: MockEndpoint) -> Result<(), InterceptError> {
        if endpoint.url.is_empty() {
            return Err(InterceptError::Rejected(format!(
                "{} stub has an empty url",
                endpoint.http_method
            )));
        }

        let mut stubs = self.stubs.write();
        // Last registration wins for a route
        stubs.retain(|stub| !stub.same_route(&endpoint));
        tracing::debug!(
            method = %endpoint.http_method,
            url = %endpoint.url,
            status = endpoint.status,
            "registered stub"
        );
        stubs.push(endpoint);
        Ok(())
    }

    async fn clear_all_stubs(&self) -> Result<(), InterceptError> {
        self.stubs.write().clear();
        self.calls.write().clear();
        Ok(())
    }
}
