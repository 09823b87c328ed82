use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};

use crate::{
    dto::saved_products::{SaveProductRequest, SavedProductList, SavedProductView},
    error::AppResult,
    middleware::auth::ActingIdentity,
    response::ApiResponse,
    services::saved_product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_saved_products).post(save_product))
        .route("/{product_id}", delete(remove_saved_product))
}

#[utoipa::path(
    get,
    path = "/api/saved-products",
    responses(
        (status = 200, description = "Saved products with live product data", body = ApiResponse<SavedProductList>),
        (status = 404, description = "Nothing saved")
    ),
    security(("bearer_auth" = [])),
    tag = "Saved Products"
)]
pub async fn list_saved_products(
    State(state): State<AppState>,
    identity: ActingIdentity,
) -> AppResult<Json<ApiResponse<SavedProductList>>> {
    let resp = saved_product_service::list_saved_products(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/saved-products",
    request_body = SaveProductRequest,
    responses(
        (status = 200, description = "Product saved", body = ApiResponse<SavedProductView>),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product already saved")
    ),
    security(("bearer_auth" = [])),
    tag = "Saved Products"
)]
pub async fn save_product(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Json(payload): Json<SaveProductRequest>,
) -> AppResult<Json<ApiResponse<SavedProductView>>> {
    let resp = saved_product_service::save_product(&state, &identity, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/saved-products/{product_id}",
    params(("product_id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Removed", body = ApiResponse<i32>),
        (status = 404, description = "Not saved by caller")
    ),
    security(("bearer_auth" = [])),
    tag = "Saved Products"
)]
pub async fn remove_saved_product(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ApiResponse<i32>>> {
    let resp =
        saved_product_service::remove_saved_product(&state, &identity, product_id).await?;
    Ok(Json(resp))
}
