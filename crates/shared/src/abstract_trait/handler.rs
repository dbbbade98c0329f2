use crate::errors::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynEventHandler = Arc<dyn EventHandler>;

/// Per-message callback invoked by the consumer loop. The routing key is the
/// topic the message arrived on; the payload is the raw JSON body.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, routing_key: &str, payload: &[u8]) -> Result<(), ServiceError>;
}
