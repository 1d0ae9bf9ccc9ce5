use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Transport to the provisioning server.
///
/// Implementations send `body` as the named remote method and return the
/// response document in xml2js shape (`Envelope.Body.Response...`). They
/// should map connection-level failures to
/// [`ProvisioningError::Transport`](crate::ProvisioningError::Transport) and
/// leave return-code handling to the caller.
#[async_trait]
pub trait ProvisioningTransport: Send + Sync {
    async fn call(&self, method: &str, body: Value) -> Result<Value>;
}

#[async_trait]
impl<T> ProvisioningTransport for Arc<T>
where
    T: ProvisioningTransport + ?Sized,
{
    async fn call(&self, method: &str, body: Value) -> Result<Value> {
        (**self).call(method, body).await
    }
}
