use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    catalog::{
        dto::{ProductQuery, ServiceQuery},
        repo_types::{Category, Product, Service, Testimonial},
        services,
    },
    errors::{internal, not_found, ApiError},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:slug", get(get_category))
        .route("/products", get(list_products))
        .route("/products/:slug", get(get_product))
        .route("/services", get(list_services))
        .route("/services/:slug", get(get_service))
        .route("/testimonials", get(list_testimonials))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = state.repo.get_categories().await.map_err(internal)?;
    Ok(Json(categories))
}

#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, ApiError> {
    match state.repo.get_category_by_slug(&slug).await.map_err(internal)? {
        Some(category) => Ok(Json(category)),
        None => {
            warn!(%slug, "category not found");
            Err(not_found("Category not found"))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = services::list_products(state.repo.as_ref(), &query)
        .await
        .map_err(internal)?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, ApiError> {
    match state.repo.get_product_by_slug(&slug).await.map_err(internal)? {
        Some(product) => Ok(Json(product)),
        None => {
            warn!(%slug, "product not found");
            Err(not_found("Product not found"))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceQuery>,
) -> Result<Json<Vec<Service>>, ApiError> {
    let services = services::list_services(state.repo.as_ref(), query.category.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(services))
}

#[instrument(skip(state))]
pub async fn get_service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Service>, ApiError> {
    match state.repo.get_service_by_slug(&slug).await.map_err(internal)? {
        Some(service) => Ok(Json(service)),
        None => {
            warn!(%slug, "service not found");
            Err(not_found("Service not found"))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let testimonials = state.repo.get_testimonials().await.map_err(internal)?;
    Ok(Json(testimonials))
}
