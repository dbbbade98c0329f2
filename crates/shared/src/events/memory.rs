use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::abstract_trait::EventBusTrait;
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

/// In-memory event bus for tests. Records everything published and can be
/// switched into a failing mode to exercise broker-outage paths.
#[derive(Clone, Default)]
pub struct MemoryEventBus {
    published: Arc<RwLock<Vec<PublishedMessage>>>,
    fail_publish: Arc<AtomicBool>,
}

impl MemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_publish(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::SeqCst);
    }

    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.published.read().await.clone()
    }

    pub async fn count_for(&self, topic: &str) -> usize {
        self.published
            .read()
            .await
            .iter()
            .filter(|m| m.topic == topic)
            .count()
    }

    pub async fn clear(&self) {
        self.published.write().await.clear();
    }
}

#[async_trait]
impl EventBusTrait for MemoryEventBus {
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), ServiceError> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(ServiceError::Kafka("broker unavailable".into()));
        }

        self.published.write().await.push(PublishedMessage {
            topic: topic.to_string(),
            key: key.to_string(),
            payload: payload.to_vec(),
        });

        Ok(())
    }
}
