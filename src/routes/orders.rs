use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutRequest, OrderList, OrderView},
    error::AppResult,
    middleware::auth::ActingIdentity,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(order_history))
        .route("/checkout", post(checkout))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Caller's orders, newest first", body = ApiResponse<OrderList>),
        (status = 404, description = "No orders")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn order_history(
    State(state): State<AppState>,
    identity: ActingIdentity,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::order_history(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order created from cart", body = ApiResponse<OrderView>),
        (status = 400, description = "Empty cart, invalid delivery data or not enough units"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderView>>)> {
    let resp = order_service::checkout(&state, &identity, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
