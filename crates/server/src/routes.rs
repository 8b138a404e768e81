use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::observability;
use common::provider::BoostClient;
use common::types::Health;

use crate::{admin, orders};

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: public probes, the relay API, and the
/// admin balance route.
pub fn build_router(client: Arc<BoostClient>, cors: CorsLayer) -> Router {
    // Public routes (probes + metrics)
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    // Relay API routes
    let api = Router::new()
        .route("/order", post(orders::place_order))
        .route("/order/:order_id", get(orders::order_status))
        .route("/orders", get(orders::list_orders))
        .route("/services", get(orders::list_services));

    // Admin routes
    let admin_routes = Router::new().route("/admin/balance", get(admin::balance));

    // Compose
    public
        .merge(api)
        .merge(admin_routes)
        .with_state(client)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 请求到达时打点
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
