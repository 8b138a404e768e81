use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display label for the provider account in the admin balance envelope.
pub const ACCOUNT_NAME: &str = "LazackBoost";

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Payload forwarded to the provider's order-creation endpoint. Carries the
/// translated numeric `service_id`, never the user-facing service code.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderPayload {
    pub service_id: u32,
    pub username_or_link: String,
    pub quantity: u64,
    pub currency: String,
}

/// Envelope returned to the caller after a successful order placement.
#[derive(Serialize, Debug)]
pub struct OrderReceipt {
    pub status: &'static str,
    pub service_code: String,
    pub order: Value,
}

impl OrderReceipt {
    pub fn success(service_code: String, order: Value) -> Self {
        Self { status: "success", service_code, order }
    }
}

/// Envelope returned by the admin balance endpoint.
#[derive(Serialize, Debug)]
pub struct BalanceEnvelope {
    pub account: &'static str,
    pub balance: Value,
}

impl BalanceEnvelope {
    pub fn new(balance: Value) -> Self {
        Self { account: ACCOUNT_NAME, balance }
    }
}
