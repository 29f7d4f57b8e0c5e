//! Request interception port

use async_trait::async_trait;

use crate::domain::entities::MockEndpoint;
use crate::error::InterceptError;

/// Short-circuits outgoing requests with canned responses
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Install a stub; a stub on the same (url, method) is replaced
    async fn register_stub(&self, endpoint: MockEndpoint) -> Result<(), InterceptError>;

    /// Remove every stub
    async fn clear_all_stubs(&self) -> Result<(), InterceptError>;
}
