use crate::errors::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynEventBus = Arc<dyn EventBusTrait>;

#[async_trait]
pub trait EventBusTrait: Send + Sync {
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), ServiceError>;
}
