use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::{
        orders::VendorOrderList,
        products::{AddProductRequest, UpdateProductRequest, VendorProductList, VendorProductView},
    },
    error::AppResult,
    middleware::auth::ActingIdentity,
    response::ApiResponse,
    services::vendor_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(add_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/orders", get(list_orders))
        .route("/orders/product/{id}", get(list_orders_for_product))
}

#[utoipa::path(
    get,
    path = "/api/vendor/products",
    responses(
        (status = 200, description = "Caller's products, deleted and rejected included", body = ApiResponse<VendorProductList>),
        (status = 400, description = "Vendor pending approval"),
        (status = 404, description = "No products")
    ),
    security(("bearer_auth" = [])),
    tag = "Vendor"
)]
pub async fn list_products(
    State(state): State<AppState>,
    identity: ActingIdentity,
) -> AppResult<Json<ApiResponse<VendorProductList>>> {
    let resp = vendor_service::list_products(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/vendor/products",
    request_body = AddProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<VendorProductView>),
        (status = 400, description = "Invalid product or vendor cannot sell")
    ),
    security(("bearer_auth" = [])),
    tag = "Vendor"
)]
pub async fn add_product(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Json(payload): Json<AddProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<VendorProductView>>)> {
    let resp = vendor_service::add_product(&state, &identity, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/vendor/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<VendorProductView>),
        (status = 400, description = "Invalid fields, or product deleted or rejected"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Vendor"
)]
pub async fn update_product(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<VendorProductView>>> {
    let resp = vendor_service::update_product(&state, &identity, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/vendor/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product soft-deleted", body = ApiResponse<VendorProductView>),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product already deleted")
    ),
    security(("bearer_auth" = [])),
    tag = "Vendor"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<VendorProductView>>> {
    let resp = vendor_service::delete_product(&state, &identity, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendor/orders",
    responses(
        (status = 200, description = "Orders containing the caller's products", body = ApiResponse<VendorOrderList>),
        (status = 404, description = "No orders")
    ),
    security(("bearer_auth" = [])),
    tag = "Vendor"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    identity: ActingIdentity,
) -> AppResult<Json<ApiResponse<VendorOrderList>>> {
    let resp = vendor_service::list_orders(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendor/orders/product/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Orders containing one of the caller's products", body = ApiResponse<VendorOrderList>),
        (status = 404, description = "Product or orders not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Vendor"
)]
pub async fn list_orders_for_product(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<VendorOrderList>>> {
    let resp = vendor_service::list_orders_for_product(&state, &identity, id).await?;
    Ok(Json(resp))
}
