use anyhow::{Context, Result};
use order::{
    config::Config, handler::AppRouter, kafka::PaymentEventHandler, state::AppState,
};
use shared::{
    abstract_trait::{DynEventBus, DynEventHandler},
    config::{ConnectionManager, ConsumerOptions, DeadLetterPolicy, EventConsumer, Kafka, RetryPolicy},
    events::topics,
    utils::init_logger,
};
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, state) = setup().await.context("Failed to setup application")?;

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let consumer_handle = run_consumer(&config, &state, shutdown_tx.clone())
        .await
        .context("Failed to start payment-results consumer")?;

    AppRouter::serve(config.port, state.clone())
        .await
        .context("Failed to start HTTP server")?;

    shutdown(&config, state, shutdown_tx, consumer_handle).await;

    Ok(())
}

async fn setup() -> Result<(Config, Arc<AppState>)> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    init_logger("order-service");

    let retry = RetryPolicy::default();

    let db_pool = retry
        .retry("postgres", || {
            ConnectionManager::new_pool(&config.database_url, config.db_min_conn, config.db_max_conn)
        })
        .await
        .context("Failed to initialize database pool")?;

    run_migrations(&db_pool)
        .await
        .context("failed to migrate database")?;

    let bus = retry
        .retry("kafka", || async { Kafka::new(&config.kafka_broker) })
        .await
        .map(|kafka| Arc::new(kafka) as DynEventBus)
        .context("Failed to connect Kafka producer")?;

    let state = Arc::new(AppState::new(db_pool, bus));

    info!("✅ Application setup completed successfully.");
    Ok((config, state))
}

async fn run_consumer(
    config: &Config,
    state: &Arc<AppState>,
    shutdown_tx: broadcast::Sender<()>,
) -> Result<tokio::task::JoinHandle<()>> {
    let handler =
        Arc::new(PaymentEventHandler::new(Arc::new(state.di_container.order_command.clone())))
            as DynEventHandler;

    let consumer = EventConsumer::new(
        ConsumerOptions {
            brokers: &config.kafka_broker,
            group_id: &config.consumer_group,
            topics: &[topics::PAYMENT_COMPLETED, topics::PAYMENT_FAILED],
        },
        handler,
        state.bus.clone(),
        DeadLetterPolicy {
            max_attempts: config.dead_letter_max_attempts,
            ..Default::default()
        },
    )?;

    Ok(tokio::spawn(consumer.run(shutdown_tx.subscribe())))
}

async fn shutdown(
    config: &Config,
    state: Arc<AppState>,
    shutdown_tx: broadcast::Sender<()>,
    consumer_handle: tokio::task::JoinHandle<()>,
) {
    info!("🛑 Draining consumer before exit...");
    let _ = shutdown_tx.send(());

    let hard_timeout = tokio::time::Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(hard_timeout, consumer_handle).await {
        Ok(Ok(())) => info!("✅ Consumer drained gracefully."),
        Ok(Err(e)) => error!("Consumer task panicked: {e}"),
        Err(_) => warn!("⚠️ Shutdown timeout reached, forcing exit."),
    }

    state.pool.close().await;
    info!("✅ Order service shutdown complete.");
}

pub async fn run_migrations(pool: &Pool<Postgres>) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}
