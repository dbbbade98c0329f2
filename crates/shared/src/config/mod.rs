mod database;
mod kafka;
mod retry;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::kafka::{ConsumerOptions, DeadLetterPolicy, EventConsumer, Kafka};
pub use self::retry::RetryPolicy;
