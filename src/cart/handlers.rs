use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    cart::{
        dto::{AddToCartRequest, CartResponse, ClearedResponse, UpdateQuantityRequest},
        extractors::SessionId,
        repo_types::{CartItem, NewCartItem},
        services::{summarize, validate_quantity},
    },
    errors::{bad_request, internal, not_found, ApiError},
    state::AppState,
};

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/cart/:id", patch(update_quantity).delete(remove_item))
}

#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<CartResponse>, ApiError> {
    let lines = state
        .repo
        .get_cart_items(&session_id)
        .await
        .map_err(internal)?;
    Ok(Json(summarize(lines)))
}

#[instrument(skip(state, payload))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(payload): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartItem>), ApiError> {
    let quantity = validate_quantity(payload.quantity).map_err(bad_request)?;

    let product = state
        .repo
        .get_product(&payload.product_id)
        .await
        .map_err(internal)?;
    if product.is_none() {
        warn!(product_id = %payload.product_id, "add to cart: unknown product");
        return Err(not_found("Product not found"));
    }

    let item = state
        .repo
        .add_to_cart(NewCartItem {
            product_id: Some(payload.product_id),
            quantity: Some(quantity),
            session_id,
        })
        .await
        .map_err(internal)?;

    info!(cart_item_id = %item.id, session_id = %item.session_id, quantity, "cart item added");
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state, payload))]
pub async fn update_quantity(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<CartItem>, ApiError> {
    let quantity = validate_quantity(payload.quantity).map_err(bad_request)?;

    match state
        .repo
        .update_cart_item(&session_id, &id, quantity)
        .await
        .map_err(internal)?
    {
        Some(item) => Ok(Json(item)),
        None => Err(not_found("Cart item not found")),
    }
}

#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .repo
        .remove_from_cart(&session_id, &id)
        .await
        .map_err(internal)?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Cart item not found"))
    }
}

#[instrument(skip(state))]
pub async fn clear_cart(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<ClearedResponse>, ApiError> {
    let removed = state.repo.clear_cart(&session_id).await.map_err(internal)?;
    info!(%session_id, removed, "cart cleared");
    Ok(Json(ClearedResponse { removed }))
}

#[cfg(test)]
mod tests {
    use crate::app::build_app;
    use crate::cart::extractors::SESSION_HEADER;
    use crate::state::AppState;
    use crate::test_support::call;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};

    fn req(method: Method, uri: &str, session: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(SESSION_HEADER, session);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn add(app: &Router, session: &str, product_id: &str, quantity: i32) -> String {
        let (status, body) = call(
            app.clone(),
            req(
                Method::POST,
                "/api/cart",
                session,
                Some(json!({ "productId": product_id, "quantity": quantity })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn cart_flow_with_totals() {
        let app = build_app(AppState::fake());
        let i7 = add(&app, "s1", "prod-i7", 2).await;
        add(&app, "s1", "prod-ssd", 1).await;

        let (status, body) = call(app.clone(), req(Method::GET, "/api/cart", "s1", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalItems"], 3);
        assert_eq!(body["totalPrice"], "80997.00");
        assert_eq!(body["items"][0]["product"]["slug"], "intel-core-i7-13700k");
        assert_eq!(body["items"][0]["sessionId"], "s1");

        let (status, body) = call(
            app.clone(),
            req(Method::PATCH, &format!("/api/cart/{i7}"), "s1", Some(json!({ "quantity": 1 }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quantity"], 1);

        let (status, _) =
            call(app.clone(), req(Method::DELETE, &format!("/api/cart/{i7}"), "s1", None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = call(app.clone(), req(Method::GET, "/api/cart", "s1", None)).await;
        assert_eq!(body["totalItems"], 1);
        assert_eq!(body["totalPrice"], "8999.00");

        let (status, body) = call(app.clone(), req(Method::DELETE, "/api/cart", "s1", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["removed"], 1);

        let (_, body) = call(app, req(Method::GET, "/api/cart", "s1", None)).await;
        assert_eq!(body["totalItems"], 0);
        assert_eq!(body["totalPrice"], "0");
    }

    #[tokio::test]
    async fn sessions_do_not_see_each_other() {
        let app = build_app(AppState::fake());
        let line = add(&app, "alice", "prod-ram", 1).await;

        let (_, body) = call(app.clone(), req(Method::GET, "/api/cart", "bob", None)).await;
        assert_eq!(body["items"], json!([]));

        let (status, _) = call(
            app.clone(),
            req(Method::PATCH, &format!("/api/cart/{line}"), "bob", Some(json!({ "quantity": 4 }))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            call(app, req(Method::DELETE, &format!("/api/cart/{line}"), "bob", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_bad_input() {
        let app = build_app(AppState::fake());

        let (status, body) = call(
            app.clone(),
            Request::get("/api/cart").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Missing X-Session-Id header");

        let (status, _) = call(
            app.clone(),
            req(
                Method::POST,
                "/api/cart",
                "s1",
                Some(json!({ "productId": "prod-i7", "quantity": 0 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            app,
            req(Method::POST, "/api/cart", "s1", Some(json!({ "productId": "ghost" }))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Product not found");
    }
}
