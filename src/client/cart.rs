//! Local shopping cart.
//!
//! State changes go through [`reduce`], which never mutates its input. The
//! [`CartStore`] wraps it, keeps the latest [`CartSnapshot`] and publishes
//! every new one to subscribers.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use crate::catalog::repo_types::Product;

/// What the UI hands over when a product is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
}

impl From<&Product> for CartItemInput {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: String,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartLine>,
    pub is_open: bool,
}

impl CartSnapshot {
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLine::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.items.iter().find(|l| l.id == id)
    }
}

/// How a repeated add of the same product is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinePolicy {
    /// Every add creates a new line.
    #[default]
    Append,
    /// An add for a product already in the cart bumps that line's quantity.
    MergeByProduct,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// `line_id` is used only when a new line is created.
    Add { item: CartItemInput, line_id: String },
    Remove { id: String },
    UpdateQuantity { id: String, quantity: u32 },
    Clear,
    Open,
    Close,
    Toggle,
}

/// Computes the state after `action`. Unknown line ids leave the items as they were.
pub fn reduce(state: &CartSnapshot, action: CartAction, policy: LinePolicy) -> CartSnapshot {
    let mut next = state.clone();
    match action {
        CartAction::Add { item, line_id } => {
            let existing = match policy {
                LinePolicy::Append => None,
                LinePolicy::MergeByProduct => next
                    .items
                    .iter_mut()
                    .find(|l| l.product_id == item.product_id),
            };
            match existing {
                Some(line) => line.quantity = line.quantity.saturating_add(1),
                None => next.items.push(CartLine {
                    id: line_id,
                    product_id: item.product_id,
                    name: item.name,
                    price: item.price,
                    quantity: 1,
                    image: item.image,
                }),
            }
        }
        CartAction::Remove { id } => next.items.retain(|l| l.id != id),
        CartAction::UpdateQuantity { id, quantity: 0 } => next.items.retain(|l| l.id != id),
        CartAction::UpdateQuantity { id, quantity } => {
            if let Some(line) = next.items.iter_mut().find(|l| l.id == id) {
                line.quantity = quantity;
            }
        }
        CartAction::Clear => next.items.clear(),
        CartAction::Open => next.is_open = true,
        CartAction::Close => next.is_open = false,
        CartAction::Toggle => next.is_open = !next.is_open,
    }
    next
}

/// Owner of the cart state. Each mutation replaces the current snapshot.
pub struct CartStore {
    policy: LinePolicy,
    state: watch::Sender<Arc<CartSnapshot>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self::with_policy(LinePolicy::Append)
    }

    /// Store that folds repeated adds of a product into one line.
    pub fn merging() -> Self {
        Self::with_policy(LinePolicy::MergeByProduct)
    }

    pub fn with_policy(policy: LinePolicy) -> Self {
        let (state, _) = watch::channel(Arc::new(CartSnapshot::default()));
        Self { policy, state }
    }

    pub fn policy(&self) -> LinePolicy {
        self.policy
    }

    pub fn snapshot(&self) -> Arc<CartSnapshot> {
        self.state.borrow().clone()
    }

    /// Receiver that observes every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CartSnapshot>> {
        self.state.subscribe()
    }

    pub fn dispatch(&self, action: CartAction) -> Arc<CartSnapshot> {
        debug!(?action, "cart dispatch");
        let next = Arc::new(reduce(&self.snapshot(), action, self.policy));
        self.state.send_replace(next.clone());
        next
    }

    /// Returns the id of the line that now holds the product.
    pub fn add_item(&self, item: impl Into<CartItemInput>) -> String {
        let item = item.into();
        let product_id = item.product_id.clone();
        let line_id = crate::storage::new_id();
        let next = self.dispatch(CartAction::Add {
            item,
            line_id: line_id.clone(),
        });
        match self.policy {
            LinePolicy::Append => line_id,
            LinePolicy::MergeByProduct => next
                .items
                .iter()
                .find(|l| l.product_id == product_id)
                .map(|l| l.id.clone())
                .unwrap_or(line_id),
        }
    }

    pub fn remove_item(&self, id: &str) {
        self.dispatch(CartAction::Remove { id: id.to_owned() });
    }

    /// A quantity of zero removes the line.
    pub fn update_quantity(&self, id: &str, quantity: u32) {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.to_owned(),
            quantity,
        });
    }

    pub fn clear_cart(&self) {
        self.dispatch(CartAction::Clear);
    }

    pub fn open_cart(&self) {
        self.dispatch(CartAction::Open);
    }

    pub fn close_cart(&self) {
        self.dispatch(CartAction::Close);
    }

    pub fn toggle_cart(&self) {
        self.dispatch(CartAction::Toggle);
    }

    pub fn items(&self) -> Vec<CartLine> {
        self.snapshot().items.clone()
    }

    pub fn is_open(&self) -> bool {
        self.snapshot().is_open
    }

    pub fn total_items(&self) -> u64 {
        self.snapshot().total_items()
    }

    pub fn total_price(&self) -> Decimal {
        self.snapshot().total_price()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn input(product_id: &str, price: &str) -> CartItemInput {
        CartItemInput {
            product_id: product_id.into(),
            name: format!("Product {product_id}"),
            price: price.parse().unwrap(),
            image: format!("https://img.example/{product_id}.jpg"),
        }
    }

    #[test]
    fn totals_for_two_lines() {
        let cart = CartStore::new();
        let a = cart.add_item(input("prod-i7", "35999"));
        cart.update_quantity(&a, 2);
        cart.add_item(input("prod-ssd", "8999"));

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), dec("80997"));
    }

    #[test]
    fn repeated_add_appends_by_default() {
        let cart = CartStore::new();
        let first = cart.add_item(input("prod-ram", "12999.00"));
        let second = cart.add_item(input("prod-ram", "12999.00"));

        assert_ne!(first, second);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), dec("25998.00"));
    }

    #[test]
    fn merging_store_bumps_existing_line() {
        let cart = CartStore::merging();
        let first = cart.add_item(input("prod-ram", "12999.00"));
        let second = cart.add_item(input("prod-ram", "12999.00"));
        cart.add_item(input("prod-ssd", "8999.00"));

        assert_eq!(first, second);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.snapshot().line(&first).unwrap().quantity, 2);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn remove_unknown_line_is_a_noop() {
        let cart = CartStore::new();
        cart.add_item(input("prod-gpu", "62999.00"));
        let before = cart.snapshot();

        cart.remove_item("missing");

        assert_eq!(*cart.snapshot(), *before);
    }

    #[test]
    fn update_quantity_zero_removes_line() {
        let cart = CartStore::new();
        let id = cart.add_item(input("prod-gpu", "62999.00"));
        cart.update_quantity(&id, 0);
        assert!(cart.snapshot().is_empty());

        cart.update_quantity("missing", 4);
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn update_quantity_reprices_exactly() {
        let cart = CartStore::new();
        let id = cart.add_item(input("prod-x", "0.10"));
        cart.update_quantity(&id, 3);
        assert_eq!(cart.total_price(), dec("0.30"));
    }

    #[test]
    fn clear_zeroes_totals() {
        let cart = CartStore::new();
        let id = cart.add_item(input("prod-i7", "35999.00"));
        cart.update_quantity(&id, 5);
        cart.add_item(input("prod-ram", "12999.00"));

        cart.clear_cart();

        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn totals_track_adds_and_removes() {
        let cart = CartStore::new();
        let mut expected_items = 0u64;
        let mut expected_price = Decimal::ZERO;
        let mut ids = Vec::new();

        for (n, price) in ["100.50", "2500", "999.99", "45000"].iter().enumerate() {
            let id = cart.add_item(input(&format!("p{n}"), price));
            let qty = n as u32 + 1;
            cart.update_quantity(&id, qty);
            expected_items += u64::from(qty);
            expected_price += price.parse::<Decimal>().unwrap() * Decimal::from(qty);
            ids.push((id, qty, *price));
        }
        assert_eq!(cart.total_items(), expected_items);
        assert_eq!(cart.total_price(), expected_price);

        let (id, qty, price) = &ids[1];
        cart.remove_item(id);
        expected_items -= u64::from(*qty);
        expected_price -= price.parse::<Decimal>().unwrap() * Decimal::from(*qty);

        assert_eq!(cart.total_items(), expected_items);
        assert_eq!(cart.total_price(), expected_price);
    }

    #[test]
    fn visibility_flag() {
        let cart = CartStore::new();
        assert!(!cart.is_open());
        cart.open_cart();
        assert!(cart.is_open());
        cart.toggle_cart();
        assert!(!cart.is_open());
        cart.toggle_cart();
        cart.close_cart();
        assert!(!cart.is_open());
    }

    #[test]
    fn reduce_leaves_previous_snapshot_untouched() {
        let empty = CartSnapshot::default();
        let next = reduce(
            &empty,
            CartAction::Add {
                item: input("prod-i7", "35999.00"),
                line_id: "line-1".into(),
            },
            LinePolicy::Append,
        );
        assert!(empty.is_empty());
        assert_eq!(next.items[0].id, "line-1");
        assert_eq!(next.items[0].quantity, 1);
    }

    #[test]
    fn input_from_product() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "prod-ssd",
            "name": "Samsung 980 PRO 1TB",
            "slug": "samsung-980-pro-1tb",
            "description": "NVMe",
            "price": "8999.00",
            "image": "https://img.example/ssd.jpg",
        }))
        .unwrap();
        let item = CartItemInput::from(&product);
        assert_eq!(item.product_id, "prod-ssd");
        assert_eq!(item.price, dec("8999.00"));
    }

    #[tokio::test]
    async fn subscribers_see_new_snapshots() {
        let cart = CartStore::new();
        let mut rx = cart.subscribe();

        cart.add_item(input("prod-i7", "35999.00"));

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.total_items(), 1);
    }
}
