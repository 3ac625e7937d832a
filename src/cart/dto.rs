use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::repo_types::CartLine;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// Session cart with derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub total_items: i64,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub removed: u64,
}
