//! Stub registration
//!
//! Forwards one canned response to the interception layer. Validation is the
//! caller's job.

use serde_json::Value;

use crate::domain::entities::{MockEndpoint, StubOptions};
use crate::domain::ports::RequestInterceptor;
use crate::error::InterceptError;

pub async fn register_stub<I>(
    interceptor: &I,
    url: &str,
    response_body: Value,
    options: StubOptions,
) -> Result<MockEndpoint, InterceptError>
where
    I: RequestInterceptor + ?Sized,
{
    let endpoint = MockEndpoint::new(url, response_body, options);
    interceptor.register_stub(endpoint.clone()).await?;
    Ok(endpoint)
}
