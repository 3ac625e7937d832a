use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::catalog::dto::{PriceRange, ProductQuery, SortBy};
use crate::catalog::repo_types::{Product, Service};
use crate::storage::{Storage, StorageError};

impl PriceRange {
    pub fn contains(self, price: Decimal) -> bool {
        let k10 = Decimal::from(10_000);
        let k25 = Decimal::from(25_000);
        let k50 = Decimal::from(50_000);
        match self {
            PriceRange::All => true,
            PriceRange::Under10k => price < k10,
            PriceRange::From10kTo25k => price >= k10 && price <= k25,
            PriceRange::From25kTo50k => price >= k25 && price <= k50,
            PriceRange::Over50k => price > k50,
        }
    }
}

pub fn matches_search(product: &Product, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty()
        || product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

/// Stable sort; ties keep catalog order.
pub fn sort_products(products: &mut [Product], sort: SortBy) {
    match sort {
        SortBy::Name => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortBy::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Rating => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Resolves a listing query against the repository.
///
/// An unknown category slug is not an error, it just matches nothing.
pub async fn list_products(
    repo: &dyn Storage,
    query: &ProductQuery,
) -> Result<Vec<Product>, StorageError> {
    let mut products = match query.category.as_deref() {
        Some(slug) => match repo.get_category_by_slug(slug).await? {
            Some(category) => repo.get_products_by_category(&category.id).await?,
            None => Vec::new(),
        },
        None if query.featured == Some(true) => repo.get_featured_products().await?,
        None => repo.get_products().await?,
    };

    if let Some(featured) = query.featured {
        products.retain(|p| p.featured == featured);
    }
    if let Some(needle) = query.search.as_deref() {
        products.retain(|p| matches_search(p, needle));
    }
    products.retain(|p| query.price.contains(p.price));
    sort_products(&mut products, query.sort);
    Ok(products)
}

pub async fn list_services(
    repo: &dyn Storage,
    category: Option<&str>,
) -> Result<Vec<Service>, StorageError> {
    match category {
        Some(category) => repo.get_services_by_category(category).await,
        None => repo.get_services().await,
    }
}
