use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;

use super::{new_id, Seed, Storage, StorageError};
use crate::cart::repo_types::{CartItem, CartLine, NewCartItem};
use crate::catalog::repo_types::{Category, Product, Service, Testimonial};
use crate::contact::repo_types::{ContactInquiry, NewContactInquiry};
use crate::users::repo_types::{NewUser, User};

trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed_by_id {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed_by_id!(User, Category, Product, Service, Testimonial, CartItem, ContactInquiry);

/// Insertion-ordered rows with an id index.
struct Table<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed + Clone> Table<T> {
    /// Inserts `row` unless its id is taken. Returns whether it was inserted.
    fn insert(&mut self, row: T) -> bool {
        if self.index.contains_key(row.key()) {
            return false;
        }
        self.index.insert(row.key().to_owned(), self.rows.len());
        self.rows.push(row);
        true
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        let pos = *self.index.get(id)?;
        Some(&mut self.rows[pos])
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.iter().find(|row| pred(row)).cloned()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.iter().filter(|row| pred(row)).cloned().collect()
    }

    fn all(&self) -> Vec<T> {
        self.rows.clone()
    }

    /// Drops every row matching `pred`, returns how many went.
    fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !pred(row));
        let removed = before - self.rows.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    fn reindex(&mut self) {
        self.index = self
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| (row.key().to_owned(), pos))
            .collect();
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    categories: Table<Category>,
    products: Table<Product>,
    services: Table<Service>,
    testimonials: Table<Testimonial>,
    cart_items: Table<CartItem>,
    contact_inquiries: Table<ContactInquiry>,
}

impl Tables {
    fn load(&mut self, seed: Seed) {
        for c in seed.categories {
            self.categories.insert(c);
        }
        for p in seed.products {
            self.products.insert(p);
        }
        for s in seed.services {
            self.services.insert(s);
        }
        for t in seed.testimonials {
            self.testimonials.insert(t);
        }
    }
}

/// Process-lifetime storage. Everything is lost on restart.
///
/// A single `RwLock` guards all tables: reads run side by side, a write runs
/// alone.
#[derive(Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: Seed) -> Self {
        let mut tables = Tables::default();
        tables.load(seed);
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .find(|u| u.username == username))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut tables = self.tables.write().await;
        if tables.users.find(|u| u.username == user.username).is_some() {
            return Err(StorageError::UsernameTaken);
        }
        let user = User {
            id: new_id(),
            username: user.username,
            password_hash: user.password_hash,
        };
        tables.users.insert(user.clone());
        debug!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn get_categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.tables.read().await.categories.all())
    }

    async fn get_category(&self, id: &str) -> Result<Option<Category>, StorageError> {
        Ok(self.tables.read().await.categories.get(id).cloned())
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, StorageError> {
        Ok(self.tables.read().await.categories.find(|c| c.slug == slug))
    }

    async fn get_products(&self) -> Result<Vec<Product>, StorageError> {
        Ok(self.tables.read().await.products.all())
    }

    async fn get_featured_products(&self) -> Result<Vec<Product>, StorageError> {
        Ok(self.tables.read().await.products.filter(|p| p.featured))
    }

    async fn get_products_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Product>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .products
            .filter(|p| p.category_id.as_deref() == Some(category_id)))
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError> {
        Ok(self.tables.read().await.products.get(id).cloned())
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StorageError> {
        Ok(self.tables.read().await.products.find(|p| p.slug == slug))
    }

    async fn get_services(&self) -> Result<Vec<Service>, StorageError> {
        Ok(self.tables.read().await.services.all())
    }

    async fn get_services_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Service>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .services
            .filter(|s| s.category == category))
    }

    async fn get_service(&self, id: &str) -> Result<Option<Service>, StorageError> {
        Ok(self.tables.read().await.services.get(id).cloned())
    }

    async fn get_service_by_slug(&self, slug: &str) -> Result<Option<Service>, StorageError> {
        Ok(self.tables.read().await.services.find(|s| s.slug == slug))
    }

    async fn get_testimonials(&self) -> Result<Vec<Testimonial>, StorageError> {
        Ok(self.tables.read().await.testimonials.all())
    }

    async fn get_cart_items(&self, session_id: &str) -> Result<Vec<CartLine>, StorageError> {
        let tables = self.tables.read().await;
        let lines = tables
            .cart_items
            .filter(|item| item.session_id == session_id)
            .into_iter()
            .filter_map(|item| {
                let product = tables.products.get(item.product_id.as_deref()?)?.clone();
                Some(CartLine { item, product })
            })
            .collect();
        Ok(lines)
    }

    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, StorageError> {
        let item = CartItem {
            id: new_id(),
            product_id: item.product_id,
            quantity: item.quantity.unwrap_or(1),
            session_id: item.session_id,
        };
        self.tables.write().await.cart_items.insert(item.clone());
        debug!(cart_item_id = %item.id, session_id = %item.session_id, "cart item added");
        Ok(item)
    }

    async fn update_cart_item(
        &self,
        session_id: &str,
        id: &str,
        quantity: i32,
    ) -> Result<Option<CartItem>, StorageError> {
        let mut tables = self.tables.write().await;
        let updated = match tables.cart_items.get_mut(id) {
            Some(item) if item.session_id == session_id => {
                item.quantity = quantity;
                Some(item.clone())
            }
            _ => None,
        };
        Ok(updated)
    }

    async fn remove_from_cart(&self, session_id: &str, id: &str) -> Result<bool, StorageError> {
        let removed = self
            .tables
            .write()
            .await
            .cart_items
            .remove_where(|item| item.id == id && item.session_id == session_id);
        Ok(removed > 0)
    }

    async fn clear_cart(&self, session_id: &str) -> Result<u64, StorageError> {
        let removed = self
            .tables
            .write()
            .await
            .cart_items
            .remove_where(|item| item.session_id == session_id);
        debug!(%session_id, removed, "cart cleared");
        Ok(removed as u64)
    }

    async fn create_contact_inquiry(
        &self,
        inquiry: NewContactInquiry,
    ) -> Result<ContactInquiry, StorageError> {
        let inquiry = ContactInquiry {
            id: new_id(),
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            service: inquiry.service,
            message: inquiry.message,
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables
            .write()
            .await
            .contact_inquiries
            .insert(inquiry.clone());
        Ok(inquiry)
    }

    async fn import_seed(&self, seed: Seed) -> Result<(), StorageError> {
        self.tables.write().await.load(seed);
        Ok(())
    }
}
