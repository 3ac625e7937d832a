use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Top-level product grouping, e.g. "Graphics Cards".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String, // unique per category
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A sellable part.
///
/// `specifications` is an opaque JSON object (e.g. `{"cores": 16, "socket":
/// "LGA1700"}`); consumers render its entries as a key/value table and must not
/// rely on any particular key being present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub image: String,
    #[serde(default)]
    pub category_id: Option<String>, // weak reference, may dangle
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "empty_specifications")]
    pub specifications: serde_json::Value,
    #[serde(default = "default_rating")]
    pub rating: Decimal,
    #[serde(default)]
    pub review_count: i32,
}

impl Product {
    /// True when the product is listed below its original price.
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some_and(|orig| orig > self.price)
    }
}

/// An IT service offering (server setup, cloud migration, repairs...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub features: Vec<String>,
    pub icon: String,
    pub category: String, // "infrastructure", "cloud", "support", ...
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    pub content: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default = "default_testimonial_rating")]
    pub rating: i32,
}

fn default_in_stock() -> bool {
    true
}

fn empty_specifications() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_rating() -> Decimal {
    Decimal::new(50, 1)
}

fn default_testimonial_rating() -> i32 {
    5
}
