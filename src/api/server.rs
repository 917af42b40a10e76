use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use prometheus::{Encoder, TextEncoder};

use super::auth::ActorRegistry;
use super::orders;
use crate::domain::order::OrderCommandHandler;
use crate::metrics::Metrics;

// ============================================================================
// HTTP Server - Route wiring and process entrypoints
// ============================================================================

/// Shared application state injected into every handler.
pub struct AppState {
    pub orders: Arc<OrderCommandHandler>,
    pub metrics: Arc<Metrics>,
}

/// Register all routes. Shared between the real server and handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/orders", web::post().to(orders::create_order))
        .route("/api/orders/{order_id}", web::get().to(orders::get_order))
        .route(
            "/api/orders/{order_id}/status",
            web::put().to(orders::update_status),
        )
        .route(
            "/api/admin/orders/{order_id}/assign-driver",
            web::put().to(orders::assign_driver),
        )
        .route(
            "/api/driver/failure-reasons",
            web::get().to(orders::failure_reasons),
        )
        .route("/health", web::get().to(health_handler))
        .route("/metrics", web::get().to(metrics_handler));
}

/// Run the HTTP server until shutdown.
pub async fn run(
    state: AppState,
    registry: ActorRegistry,
    addr: &str,
    port: u16,
) -> std::io::Result<()> {
    tracing::info!("Starting HTTP server on http://{}:{}", addr, port);

    let state = web::Data::new(state);
    let registry = web::Data::new(registry);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(registry.clone())
            .configure(configure)
    })
    .bind((addr, port))?
    .run()
    .await
}

async fn metrics_handler(state: web::Data<AppState>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "gazman-orders"
    }))
}
