use crate::{
    abstract_trait::{
        DynPaymentCommandRepository, DynPaymentQueryRepository, PaymentCommandServiceTrait,
    },
    domain::{
        requests::payment::{CreatePaymentRecordRequest, CreatePaymentRequest},
        response::payment::{CreatePaymentResult, PaymentResponse},
    },
    model::payment::{Payment, PaymentStatus},
    service::validation_errors,
};
use async_trait::async_trait;
use chrono::Utc;
use shared::{
    abstract_trait::DynEventBus,
    errors::{RepositoryError, ServiceError},
    events::{OrderCreatedEvent, PaymentResultEvent, topics},
};
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct PaymentCommandService {
    command: DynPaymentCommandRepository,
    query: DynPaymentQueryRepository,
    bus: DynEventBus,
    approval_ceiling: i64,
}

impl PaymentCommandService {
    pub fn new(
        command: DynPaymentCommandRepository,
        query: DynPaymentQueryRepository,
        bus: DynEventBus,
        approval_ceiling: i64,
    ) -> Self {
        Self {
            command,
            query,
            bus,
            approval_ceiling,
        }
    }

    // Stand-in for a real payment gateway call: deterministic on the amount.
    fn decide(&self, amount: i64) -> PaymentStatus {
        if amount < self.approval_ceiling {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Failed
        }
    }

    fn result_event(payment: &Payment, user_id: Option<i32>) -> PaymentResultEvent {
        PaymentResultEvent {
            payment_id: payment.id,
            order_id: payment.order_id,
            user_id,
            amount: payment.amount,
            status: payment.status.clone(),
            processed_at: Utc::now(),
        }
    }

    fn routing_key(status: PaymentStatus) -> &'static str {
        match status {
            PaymentStatus::Completed => topics::PAYMENT_COMPLETED,
            _ => topics::PAYMENT_FAILED,
        }
    }
}

#[async_trait]
impl PaymentCommandServiceTrait for PaymentCommandService {
    async fn process_order_event(&self, event: &OrderCreatedEvent) -> Result<(), ServiceError> {
        // Auto-triggered saga path: the order id doubles as the idempotency
        // key, so redeliveries of the same order.created collapse onto one
        // payment row.
        let idempotency_key = event.order_id.to_string();

        let existing = self
            .query
            .find_by_idempotency_key(&idempotency_key)
            .await
            .map_err(ServiceError::Repo)?;

        if let Some(payment) = existing {
            info!(
                "🔁 Duplicate order.created for {} — payment {} already recorded, skipping",
                event.order_id, payment.id
            );
            return Ok(());
        }

        let status = self.decide(event.total);

        let record = CreatePaymentRecordRequest {
            order_id: event.order_id,
            idempotency_key,
            amount: event.total,
            currency: "USD".to_string(),
            method: "credit_card".to_string(),
            status,
        };

        let payment = match self.command.insert_unique(&record).await {
            Ok(payment) => payment,
            Err(RepositoryError::AlreadyExists(_)) => {
                // Lost the insert race against a concurrent redelivery; the
                // winner already published the result.
                info!(
                    "🔁 Insert race on order {} — treating as duplicate",
                    event.order_id
                );
                return Ok(());
            }
            Err(err) => return Err(ServiceError::Repo(err)),
        };

        info!(
            "✅ payment_processed: payment_id={} order_id={} status={} amount={}",
            payment.id, payment.order_id, payment.status, payment.amount
        );

        let result = Self::result_event(&payment, Some(event.user_id));
        let payload = serde_json::to_vec(&result)
            .map_err(|e| ServiceError::Internal(format!("Failed to serialize event: {e}")))?;

        // Propagated on failure: the consumer nacks, and the redelivery hits
        // the duplicate branch above without publishing twice.
        self.bus
            .publish(
                Self::routing_key(status),
                &payment.order_id.to_string(),
                &payload,
            )
            .await?;

        Ok(())
    }

    async fn create_payment(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResult, ServiceError> {
        info!("🏗️ Creating payment for order {}", req.order_id);

        req.validate().map_err(validation_errors)?;

        let existing = self
            .query
            .find_by_idempotency_key(&req.idempotency_key)
            .await
            .map_err(ServiceError::Repo)?;

        if let Some(payment) = existing {
            info!("🔁 idempotent_hit: key={}", req.idempotency_key);
            return Ok(CreatePaymentResult {
                payment: PaymentResponse::from(payment),
                idempotent: true,
            });
        }

        let status = self.decide(req.amount);

        let record = CreatePaymentRecordRequest {
            order_id: req.order_id,
            idempotency_key: req.idempotency_key.clone(),
            amount: req.amount,
            currency: req.currency.clone().unwrap_or_else(|| "USD".to_string()),
            method: req
                .method
                .clone()
                .unwrap_or_else(|| "credit_card".to_string()),
            status,
        };

        // A racing insert surfaces as AlreadyExists and maps to a 409 for
        // the caller.
        let payment = self
            .command
            .insert_unique(&record)
            .await
            .map_err(ServiceError::Repo)?;

        let result = Self::result_event(&payment, None);
        match serde_json::to_vec(&result) {
            Ok(payload) => {
                if let Err(e) = self
                    .bus
                    .publish(
                        Self::routing_key(status),
                        &payment.order_id.to_string(),
                        &payload,
                    )
                    .await
                {
                    error!(
                        "❌ Failed to publish payment result for {}: {e:?} — event dropped",
                        payment.id
                    );
                }
            }
            Err(e) => error!("❌ Failed to serialize payment result: {e} — event dropped"),
        }

        info!(
            "✅ payment_created: payment_id={} order_id={} status={}",
            payment.id, payment.order_id, payment.status
        );

        Ok(CreatePaymentResult {
            payment: PaymentResponse::from(payment),
            idempotent: false,
        })
    }
}
