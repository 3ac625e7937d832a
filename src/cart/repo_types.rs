use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::catalog::repo_types::Product;

/// Server-side cart line, scoped to an opaque session id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub product_id: Option<String>, // weak reference to Product
    pub quantity: i32,              // always >= 1
    pub session_id: String,
}

/// Insert payload; `quantity` defaults to 1.
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub product_id: Option<String>,
    pub quantity: Option<i32>,
    pub session_id: String,
}

/// A cart line joined with the product it points at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Product,
}
