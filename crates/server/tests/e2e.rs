use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use common::provider::{BoostClient, BoostClientConfig};
use server::routes;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

/// Minimal provider stand-in: echoes order payloads and serves fixed
/// balance/orders responses.
async fn spawn_upstream() -> anyhow::Result<String> {
    let app = Router::new()
        .route(
            "/balance",
            get(|| async { Json(json!({"balance": "10.00", "currency": "USD"})) }),
        )
        .route(
            "/order",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"id": 7, "status": "pending", "request": body}))
            }),
        )
        .route(
            "/orders",
            get(|| async { Json(json!({"page": "1", "orders": []})) }),
        )
        .route(
            "/order/:order_id",
            get(|Path(id): Path<String>| async move {
                Json(json!({"id": id, "status": "completed"}))
            }),
        );
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("upstream error: {}", e);
        }
    });
    Ok(base_url)
}

async fn start_relay() -> anyhow::Result<TestApp> {
    let upstream = spawn_upstream().await?;
    let client = BoostClient::new(&BoostClientConfig {
        base_url: upstream,
        api_key: "e2e-key".into(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
    })?;
    let app: Router = routes::build_router(Arc::new(client), cors());

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("relay error: {}", e);
        }
    });
    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_relay().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_order_round_trip() -> anyhow::Result<()> {
    let app = start_relay().await?;
    let c = client();

    let res = c
        .post(format!("{}/order", app.base_url))
        .json(&json!({
            "service_code": "INSTAGRAM_LIKES",
            "username_or_link": "https://instagram.com/p/xyz",
            "quantity": 200,
            "currency": "USD"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "success");
    assert_eq!(body["service_code"], "INSTAGRAM_LIKES");
    assert_eq!(body["order"]["request"]["service_id"], 205);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_order_rejected() -> anyhow::Result<()> {
    let app = start_relay().await?;
    let res = client()
        .post(format!("{}/order", app.base_url))
        .json(&json!({
            "service_code": "TWITTER_RETWEETS",
            "username_or_link": "@someone",
            "quantity": 10,
            "currency": "USD"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Invalid service_code. Use service mapping only.");
    Ok(())
}

#[tokio::test]
async fn e2e_metrics_exposed_after_traffic() -> anyhow::Result<()> {
    let app = start_relay().await?;
    let c = client();

    // Drive one request through the relay so the counters are registered
    let res = c
        .post(format!("{}/order", app.base_url))
        .json(&json!({
            "service_code": "TIKTOK_FOLLOWERS",
            "username_or_link": "@someone",
            "quantity": 5,
            "currency": "USD"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/metrics", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let text = res.text().await?;
    assert!(text.contains("boost_relay_requests_total"), "metrics: {}", text);
    assert!(text.contains("boost_relay_upstream_requests_total"), "metrics: {}", text);
    Ok(())
}
