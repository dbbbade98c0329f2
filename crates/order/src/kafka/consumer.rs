use crate::abstract_trait::DynOrderCommandService;
use async_trait::async_trait;
use shared::{
    abstract_trait::EventHandler,
    errors::ServiceError,
    events::{PaymentResultEvent, decode_event},
};

/// Consumes `payment.completed` / `payment.failed` and closes the saga by
/// transitioning the order. Decoding happens here, at the boundary, so the
/// service layer only ever sees well-formed events.
pub struct PaymentEventHandler {
    command: DynOrderCommandService,
}

impl PaymentEventHandler {
    pub fn new(command: DynOrderCommandService) -> Self {
        Self { command }
    }
}

#[async_trait]
impl EventHandler for PaymentEventHandler {
    async fn handle(&self, routing_key: &str, payload: &[u8]) -> Result<(), ServiceError> {
        let event: PaymentResultEvent = decode_event(routing_key, payload)?;
        self.command.handle_payment_event(&event, routing_key).await
    }
}
