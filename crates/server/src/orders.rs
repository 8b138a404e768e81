use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use common::catalog;
use common::observability::{ORDERS_PLACED_TOTAL, REQUESTS_TOTAL};
use common::provider::BoostClient;
use common::types::{OrderPayload, OrderReceipt};

use crate::errors::ApiError;

/// Inbound order placement body. Every field is optional on the wire so that
/// missing ones reach our own presence check instead of the extractor's.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderInput {
    #[serde(default)]
    pub service_code: Option<String>,
    #[serde(default)]
    pub username_or_link: Option<String>,
    #[serde(default)]
    pub quantity: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl PlaceOrderInput {
    /// Presence check first, then catalog translation; both happen before any
    /// outbound call. Returns the service code alongside the provider payload
    /// so the receipt can echo it.
    fn translate(self) -> Result<(String, OrderPayload), ApiError> {
        let (service_code, username_or_link, quantity, currency) = match (
            self.service_code,
            self.username_or_link,
            self.quantity,
            self.currency,
        ) {
            (Some(code), Some(target), Some(qty), Some(cur))
                if !code.trim().is_empty()
                    && !target.trim().is_empty()
                    && qty > 0
                    && !cur.trim().is_empty() =>
            {
                (code, target, qty, cur)
            }
            _ => return Err(ApiError::MissingFields),
        };

        let service_id =
            catalog::resolve(&service_code).ok_or(ApiError::UnknownServiceCode)?;

        Ok((
            service_code,
            OrderPayload {
                service_id,
                username_or_link,
                quantity,
                currency,
            },
        ))
    }
}

pub async fn place_order(
    State(client): State<Arc<BoostClient>>,
    Json(input): Json<PlaceOrderInput>,
) -> Result<Json<OrderReceipt>, ApiError> {
    REQUESTS_TOTAL.inc();
    let (service_code, payload) = input.translate()?;

    let order = client
        .create_order(&payload)
        .await
        .map_err(|e| ApiError::upstream("Order failed", e))?;

    ORDERS_PLACED_TOTAL.inc();
    info!(
        service_code = %service_code,
        service_id = payload.service_id,
        quantity = payload.quantity,
        "order forwarded to provider"
    );
    Ok(Json(OrderReceipt::success(service_code, order)))
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

pub async fn list_orders(
    State(client): State<Arc<BoostClient>>,
    Query(q): Query<OrdersQuery>,
) -> Result<Json<Value>, ApiError> {
    REQUESTS_TOTAL.inc();
    let body = client
        .orders(q.page)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch orders", e))?;
    Ok(Json(body))
}

pub async fn order_status(
    State(client): State<Arc<BoostClient>>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    REQUESTS_TOTAL.inc();
    let body = client
        .order(&order_id)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch order", e))?;
    Ok(Json(body))
}

/// Read-only view of the static service catalog so callers can discover the
/// published codes.
pub async fn list_services() -> Json<BTreeMap<&'static str, u32>> {
    REQUESTS_TOTAL.inc();
    Json(catalog::SERVICE_CATALOG.clone())
}
