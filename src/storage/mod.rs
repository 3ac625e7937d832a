//! Repository layer.
//!
//! Handlers only ever see `Arc<dyn Storage>`; the backing store is picked at
//! startup (`MemStorage` by default, `PgStorage` when `DATABASE_URL` is set).

use async_trait::async_trait;

use crate::cart::repo_types::{CartItem, CartLine, NewCartItem};
use crate::catalog::repo_types::{Category, Product, Service, Testimonial};
use crate::contact::repo_types::{ContactInquiry, NewContactInquiry};
use crate::users::repo_types::{NewUser, User};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemStorage;
pub use postgres::PgStorage;
pub use seed::Seed;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("username already taken")]
    UsernameTaken,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;
    /// Fails with `StorageError::UsernameTaken` if the username is in use.
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    // Categories
    async fn get_categories(&self) -> Result<Vec<Category>, StorageError>;
    async fn get_category(&self, id: &str) -> Result<Option<Category>, StorageError>;
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, StorageError>;

    // Products
    async fn get_products(&self) -> Result<Vec<Product>, StorageError>;
    async fn get_featured_products(&self) -> Result<Vec<Product>, StorageError>;
    async fn get_products_by_category(
        &self,
        category_id: &str,
    ) -> Result<Vec<Product>, StorageError>;
    async fn get_product(&self, id: &str) -> Result<Option<Product>, StorageError>;
    async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StorageError>;

    // Services
    async fn get_services(&self) -> Result<Vec<Service>, StorageError>;
    async fn get_services_by_category(&self, category: &str)
        -> Result<Vec<Service>, StorageError>;
    async fn get_service(&self, id: &str) -> Result<Option<Service>, StorageError>;
    async fn get_service_by_slug(&self, slug: &str) -> Result<Option<Service>, StorageError>;

    // Testimonials
    async fn get_testimonials(&self) -> Result<Vec<Testimonial>, StorageError>;

    // Cart. Lines whose product no longer exists are left out of `get_cart_items`.
    async fn get_cart_items(&self, session_id: &str) -> Result<Vec<CartLine>, StorageError>;
    async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, StorageError>;
    /// Returns `None` when no line with `id` exists in `session_id`.
    async fn update_cart_item(
        &self,
        session_id: &str,
        id: &str,
        quantity: i32,
    ) -> Result<Option<CartItem>, StorageError>;
    async fn remove_from_cart(&self, session_id: &str, id: &str) -> Result<bool, StorageError>;
    /// Returns the number of lines removed.
    async fn clear_cart(&self, session_id: &str) -> Result<u64, StorageError>;

    // Contact
    async fn create_contact_inquiry(
        &self,
        inquiry: NewContactInquiry,
    ) -> Result<ContactInquiry, StorageError>;

    /// Loads reference data. Rows whose id already exists are left untouched.
    async fn import_seed(&self, seed: Seed) -> Result<(), StorageError>;
}

/// Fresh random identifier for user-created rows.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
