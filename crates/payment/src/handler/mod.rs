mod health;
mod payment;

use crate::state::AppState;
use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
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
            .route(
                "/api/payments",
                post(payment::create_payment).get(payment::get_payments),
            )
            .route("/api/payments/{id}", get(payment::get_payment))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!(
            "🚀 Payment service listening on http://{}",
            listener.local_addr()?
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
