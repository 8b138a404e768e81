use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use common::observability::REQUESTS_TOTAL;
use common::provider::BoostClient;
use common::types::BalanceEnvelope;

use crate::errors::ApiError;

/// Admin-only view of the provider account balance. The upstream payload is
/// relayed as-is inside the account envelope.
pub async fn balance(
    State(client): State<Arc<BoostClient>>,
) -> Result<Json<BalanceEnvelope>, ApiError> {
    REQUESTS_TOTAL.inc();
    let balance = client
        .balance()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch LazackBoost balance", e))?;
    Ok(Json(BalanceEnvelope::new(balance)))
}
