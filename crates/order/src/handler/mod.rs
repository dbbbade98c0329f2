mod health;
mod order;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Router,
    routing::{get, patch, post},
};
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub struct AppRouter;

impl AppRouter {
    pub async fn serve(port: u16, state: Arc<AppState>) -> Result<()> {
        let app = Router::new()
            .route("/health", get(health::health))
            .route("/health/live", get(health::health_live))
            .route("/health/ready", get(health::health_ready))
            .route("/api/orders", post(order::create_order).get(order::get_orders))
            .route("/api/orders/{id}", get(order::get_order))
            .route("/api/orders/{id}/cancel", patch(order::cancel_order))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Order service listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
