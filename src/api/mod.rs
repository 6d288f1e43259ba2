//! HTTP surface over [`Inventory`].

pub mod handlers;
pub mod payloads;
pub mod responses;

use std::{future::Future, sync::Arc};

use axum::routing::get;
use axum::Router;
use stockbook_core::Inventory;
use tokio::net::TcpListener;
use tracing::info;

use crate::AppError;

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Inventory>,
}

impl AppState {
    pub fn new(inventory: Arc<Inventory>) -> Self {
        Self { inventory }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_handler))
        .route("/api/dashboard-stats", get(handlers::dashboard_stats_handler))
        .route(
            "/api/products",
            get(handlers::products_list_handler)
                .post(handlers::products_create_handler)
                .delete(handlers::products_delete_handler),
        )
        .route(
            "/api/products-with-categories",
            get(handlers::products_with_categories_handler),
        )
        .route(
            "/api/stockin",
            get(handlers::stock_in_list_handler).post(handlers::stock_in_handler),
        )
        .route(
            "/api/stockout",
            get(handlers::stock_out_list_handler).post(handlers::stock_out_handler),
        )
        .route("/api/reports", get(handlers::ledger_handler))
        .route("/api/simple-reports", get(handlers::simple_report_handler))
        .route("/api/monthly-report", get(handlers::monthly_report_handler))
        .route("/api/daily-report", get(handlers::daily_report_handler))
        .route(
            "/api/generate-report",
            axum::routing::post(handlers::generate_report_handler),
        )
        .route(
            "/api/categories",
            get(handlers::categories_handler)
                .post(handlers::categories_action_handler)
                .delete(handlers::categories_delete_handler),
        )
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "stockbook api listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("stockbook api stopped");
    Ok(())
}

/// Resolves on SIGTERM or Ctrl-C.
pub async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
