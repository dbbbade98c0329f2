use crate::di::DependenciesInject;
use shared::{abstract_trait::DynEventBus, config::ConnectionPool};
use std::fmt;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub pool: ConnectionPool,
    pub bus: DynEventBus,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, bus: DynEventBus, approval_ceiling: i64) -> Self {
        let di_container = DependenciesInject::new(pool.clone(), bus.clone(), approval_ceiling);

        Self {
            di_container,
            pool,
            bus,
        }
    }
}
