use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::provider::{BoostClient, BoostClientConfig};
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs, with env var overrides
fn load_bind_addr(server: &configs::ServerConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| server.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(server.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    // 上游客户端在所有请求间共享，连接池复用
    let client = BoostClient::new(&BoostClientConfig {
        base_url: cfg.upstream.base_url.clone(),
        api_key: cfg.upstream.api_key.clone(),
        connect_timeout: cfg.upstream.connect_timeout(),
        request_timeout: cfg.upstream.request_timeout(),
    })?;

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(Arc::new(client), cors);

    // Bind and serve; the API key never reaches the logs
    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, upstream = %cfg.upstream.base_url, "starting boost relay");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
