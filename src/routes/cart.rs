use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};

use crate::{
    dto::cart::{AddToCartRequest, CartItemView, CartView},
    error::AppResult,
    middleware::auth::ActingIdentity,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart).post(add_to_cart))
        .route("/{cart_item_id}", delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines priced at current prices", body = ApiResponse<CartView>),
        (status = 404, description = "Cart is empty")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    identity: ActingIdentity,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::view_cart(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add or merge cart item", body = ApiResponse<CartItemView>),
        (status = 400, description = "Invalid quantity or not enough units"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartItemView>>> {
    let resp = cart_service::add_to_cart(&state, &identity, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{cart_item_id}",
    params(("cart_item_id" = i32, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Removed", body = ApiResponse<CartItemView>),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(cart_item_id): Path<i32>,
) -> AppResult<Json<ApiResponse<CartItemView>>> {
    let resp = cart_service::remove_from_cart(&state, &identity, cart_item_id).await?;
    Ok(Json(resp))
}
