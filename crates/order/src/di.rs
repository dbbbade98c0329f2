use crate::{
    repository::{OrderCommandRepository, OrderQueryRepository},
    service::{OrderCommandService, OrderQueryService},
};
use shared::{abstract_trait::DynEventBus, config::ConnectionPool};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub order_command: OrderCommandService,
    pub order_query: OrderQueryService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("order_command", &"OrderCommandService")
            .field("order_query", &"OrderQueryService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, bus: DynEventBus) -> Self {
        let command_repo = Arc::new(OrderCommandRepository::new(pool.clone()));
        let query_repo = Arc::new(OrderQueryRepository::new(pool));

        let order_command = OrderCommandService::new(command_repo, bus);
        let order_query = OrderQueryService::new(query_repo);

        Self {
            order_command,
            order_query,
        }
    }
}
