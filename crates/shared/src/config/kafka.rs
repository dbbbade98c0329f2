use async_trait::async_trait;
use rdkafka::Message;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::error::KafkaResult;
use rdkafka::message::BorrowedMessage;
use rdkafka::producer::{BaseProducer, BaseRecord, Producer};
use rdkafka::topic_partition_list::Offset;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

use crate::abstract_trait::{DynEventBus, DynEventHandler, EventBusTrait};
use crate::errors::ServiceError;
use crate::events::dead_letter_topic;

pub struct Kafka {
    producer: BaseProducer,
}

impl Kafka {
    pub fn new(brokers: &str) -> Result<Self, ServiceError> {
        let producer: BaseProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "6000")
            .set("allow.auto.create.topics", "true")
            .create()
            .map_err(ServiceError::from)?;

        info!("Kafka producer connected successfully");
        Ok(Kafka { producer })
    }

    pub fn send_message(&self, topic: &str, key: &str, value: &[u8]) -> KafkaResult<()> {
        if let Err((kafka_error, _record)) = self
            .producer
            .send(BaseRecord::to(topic).key(key).payload(value))
        {
            return Err(kafka_error);
        }

        let _ = self.producer.flush(Duration::from_secs(1));
        info!(topic, "Message sent successfully");
        Ok(())
    }
}

#[async_trait]
impl EventBusTrait for Kafka {
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), ServiceError> {
        self.send_message(topic, key, payload)
            .map_err(ServiceError::from)
    }
}

/// Poison-message policy: a message whose handler keeps failing is retried
/// `max_attempts` times (offset seek-back), then parked on `<topic>.dlq` and
/// acknowledged. Malformed payloads skip the retries and go straight to the
/// dead-letter topic.
#[derive(Debug, Clone)]
pub struct DeadLetterPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for DeadLetterPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            retry_delay: Duration::from_secs(1),
        }
    }
}

pub struct ConsumerOptions<'a> {
    pub brokers: &'a str,
    pub group_id: &'a str,
    pub topics: &'a [&'a str],
}

type MessageKey = (String, i32, i64);

/// Single-flight consumer loop: one message is received, handled and
/// acknowledged (offset committed) before the next is taken, so handlers
/// never run concurrently within one service instance.
pub struct EventConsumer {
    consumer: StreamConsumer,
    handler: DynEventHandler,
    bus: DynEventBus,
    policy: DeadLetterPolicy,
    attempts: Mutex<HashMap<MessageKey, u32>>,
}

impl EventConsumer {
    pub fn new(
        options: ConsumerOptions<'_>,
        handler: DynEventHandler,
        bus: DynEventBus,
        policy: DeadLetterPolicy,
    ) -> Result<Self, ServiceError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", options.brokers)
            .set("group.id", options.group_id)
            .set("enable.partition.eof", "false")
            .set("session.timeout.ms", "6000")
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .set("allow.auto.create.topics", "true")
            .create()
            .map_err(ServiceError::from)?;

        consumer
            .subscribe(options.topics)
            .map_err(ServiceError::from)?;

        info!(
            "Kafka consumer subscribed: group={} topics={:?}",
            options.group_id, options.topics
        );

        Ok(Self {
            consumer,
            handler,
            bus,
            policy,
            attempts: Mutex::new(HashMap::new()),
        })
    }

    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        info!("🚀 Starting Kafka consumer loop...");

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("🛑 Consumer received shutdown signal, draining.");
                    break;
                }
                received = self.consumer.recv() => match received {
                    Err(e) => {
                        error!("⚠️ Kafka not connected or error: {e:?}");
                        sleep(Duration::from_secs(5)).await;
                    }
                    Ok(message) => self.dispatch(&message).await,
                }
            }
        }
    }

    async fn dispatch(&self, message: &BorrowedMessage<'_>) {
        let key: MessageKey = (
            message.topic().to_string(),
            message.partition(),
            message.offset(),
        );
        let payload = message.payload().unwrap_or_default();

        match self.handler.handle(&key.0, payload).await {
            Ok(()) => {
                self.clear_attempts(&key);
                self.ack(message);
            }

            Err(ServiceError::MalformedEvent(msg)) => {
                warn!("Malformed message on {}: {msg} — dead-lettering", key.0);
                if self.dead_letter(message).await {
                    self.clear_attempts(&key);
                    self.ack(message);
                } else {
                    self.redeliver(message).await;
                }
            }

            Err(e) => {
                let seen = self.note_failure(&key);

                if seen >= self.policy.max_attempts {
                    error!(
                        "❌ Handler failed {seen} times on {}@{}/{}: {e:?} — dead-lettering",
                        key.0, key.1, key.2
                    );
                    if self.dead_letter(message).await {
                        self.clear_attempts(&key);
                        self.ack(message);
                    } else {
                        self.redeliver(message).await;
                    }
                } else {
                    warn!(
                        "Handler failed on {}@{}/{} (attempt {seen}): {e:?} — requeueing",
                        key.0, key.1, key.2
                    );
                    self.redeliver(message).await;
                }
            }
        }
    }

    fn note_failure(&self, key: &MessageKey) -> u32 {
        let mut attempts = self.attempts.lock().unwrap();
        let seen = attempts.entry(key.clone()).or_insert(0);
        *seen += 1;
        *seen
    }

    fn clear_attempts(&self, key: &MessageKey) {
        self.attempts.lock().unwrap().remove(key);
    }

    fn ack(&self, message: &BorrowedMessage<'_>) {
        if let Err(e) = self.consumer.commit_message(message, CommitMode::Async) {
            error!("Failed to commit message: {e:?}");
        }
    }

    // Negative acknowledgment: rewind the partition so the broker offers the
    // same message again on the next recv.
    async fn redeliver(&self, message: &BorrowedMessage<'_>) {
        sleep(self.policy.retry_delay).await;

        if let Err(e) = self.consumer.seek(
            message.topic(),
            message.partition(),
            Offset::Offset(message.offset()),
            Duration::from_secs(5),
        ) {
            error!("Failed to seek back for redelivery: {e:?}");
        }
    }

    async fn dead_letter(&self, message: &BorrowedMessage<'_>) -> bool {
        let dlq = dead_letter_topic(message.topic());
        let key = message
            .key()
            .map(|k| String::from_utf8_lossy(k).into_owned())
            .unwrap_or_default();
        let payload = message.payload().unwrap_or_default();

        match self.bus.publish(&dlq, &key, payload).await {
            Ok(()) => {
                info!("📤 Dead-lettered message to {dlq}");
                true
            }
            Err(e) => {
                error!("Failed to publish to {dlq}: {e:?}");
                false
            }
        }
    }
}
