use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};
use serde::Serialize;

use crate::{
    response::{ApiResponse, Meta},
    routes::doc::scalar_docs,
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod cart;
pub mod doc;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod saved_products;
pub mod vendor;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/saved-products", saved_products::router())
        .nest("/vendor", vendor::router())
}

/// Every route of the service with state bound. Transport layers are added by the binary.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .nest("/notifications", notifications::router())
        .merge(scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

#[derive(Serialize)]
struct NotFoundData {
    path: String,
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<NotFoundData>>) {
    let body = ApiResponse::success(
        "Not Found",
        NotFoundData {
            path: uri.path().to_string(),
        },
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
