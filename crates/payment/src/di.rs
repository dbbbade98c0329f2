use crate::{
    repository::{PaymentCommandRepository, PaymentQueryRepository},
    service::{PaymentCommandService, PaymentQueryService},
};
use shared::{abstract_trait::DynEventBus, config::ConnectionPool};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub payment_command: PaymentCommandService,
    pub payment_query: PaymentQueryService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("payment_command", &"PaymentCommandService")
            .field("payment_query", &"PaymentQueryService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, bus: DynEventBus, approval_ceiling: i64) -> Self {
        let command_repo = Arc::new(PaymentCommandRepository::new(pool.clone()));
        let query_repo = Arc::new(PaymentQueryRepository::new(pool));

        let payment_command = PaymentCommandService::new(
            command_repo,
            query_repo.clone(),
            bus,
            approval_ceiling,
        );
        let payment_query = PaymentQueryService::new(query_repo);

        Self {
            payment_command,
            payment_query,
        }
    }
}
