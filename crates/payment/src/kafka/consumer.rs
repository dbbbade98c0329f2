use crate::abstract_trait::DynPaymentCommandService;
use async_trait::async_trait;
use shared::{
    abstract_trait::EventHandler,
    errors::ServiceError,
    events::{OrderCreatedEvent, decode_event},
};

/// Consumes `order.created` and triggers the idempotent payment flow. The
/// consumer loop is single-flight, so the check-then-insert inside the
/// service never races with itself within one instance.
pub struct OrderEventHandler {
    command: DynPaymentCommandService,
}

impl OrderEventHandler {
    pub fn new(command: DynPaymentCommandService) -> Self {
        Self { command }
    }
}

#[async_trait]
impl EventHandler for OrderEventHandler {
    async fn handle(&self, routing_key: &str, payload: &[u8]) -> Result<(), ServiceError> {
        let event: OrderCreatedEvent = decode_event(routing_key, payload)?;
        self.command.process_order_event(&event).await
    }
}
