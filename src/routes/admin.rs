use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};

use crate::{
    dto::{
        admin::{AutoApproveRequest, PendingProductList, VendorList},
        auth::VendorSummary,
        products::VendorProductView,
    },
    error::AppResult,
    middleware::auth::ActingIdentity,
    response::ApiResponse,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vendors", get(list_vendors))
        .route("/vendors/auto-approve-all", put(set_auto_approve_all))
        .route("/vendors/{phone_number}/approve", put(approve_vendor))
        .route("/vendors/{phone_number}/disapprove", put(disapprove_vendor))
        .route("/vendors/{phone_number}/enable", put(enable_vendor))
        .route("/vendors/{phone_number}/disable", put(disable_vendor))
        .route(
            "/vendors/{phone_number}/auto-approve-products",
            put(set_auto_approve_products),
        )
        .route("/products/pending", get(list_pending_products))
        .route("/products/{id}/accept", put(accept_product))
        .route("/products/{id}/reject", put(reject_product))
}

#[utoipa::path(
    get,
    path = "/api/admin/vendors",
    responses(
        (status = 200, description = "All vendors", body = ApiResponse<VendorList>),
        (status = 404, description = "No vendors")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_vendors(
    State(state): State<AppState>,
    identity: ActingIdentity,
) -> AppResult<Json<ApiResponse<VendorList>>> {
    let resp = admin_service::list_vendors(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/pending",
    responses(
        (status = 200, description = "Products awaiting review", body = ApiResponse<PendingProductList>),
        (status = 404, description = "No pending products")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_pending_products(
    State(state): State<AppState>,
    identity: ActingIdentity,
) -> AppResult<Json<ApiResponse<PendingProductList>>> {
    let resp = admin_service::list_pending_products(&state, &identity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/vendors/{phone_number}/approve",
    params(("phone_number" = String, Path, description = "Vendor phone number")),
    responses(
        (status = 200, description = "Vendor approved", body = ApiResponse<VendorSummary>),
        (status = 404, description = "Vendor not found"),
        (status = 409, description = "Vendor already approved")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn approve_vendor(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(phone_number): Path<String>,
) -> AppResult<Json<ApiResponse<VendorSummary>>> {
    let resp = admin_service::approve_vendor(&state, &identity, &phone_number).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/vendors/{phone_number}/disapprove",
    params(("phone_number" = String, Path, description = "Vendor phone number")),
    responses(
        (status = 200, description = "Vendor disapproved", body = ApiResponse<VendorSummary>),
        (status = 404, description = "Vendor not found"),
        (status = 409, description = "Vendor already disapproved")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn disapprove_vendor(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(phone_number): Path<String>,
) -> AppResult<Json<ApiResponse<VendorSummary>>> {
    let resp = admin_service::disapprove_vendor(&state, &identity, &phone_number).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/vendors/{phone_number}/enable",
    params(("phone_number" = String, Path, description = "Vendor phone number")),
    responses(
        (status = 200, description = "Vendor enabled", body = ApiResponse<VendorSummary>),
        (status = 404, description = "Vendor not found"),
        (status = 409, description = "Vendor already enabled")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn enable_vendor(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(phone_number): Path<String>,
) -> AppResult<Json<ApiResponse<VendorSummary>>> {
    let resp = admin_service::enable_vendor(&state, &identity, &phone_number).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/vendors/{phone_number}/disable",
    params(("phone_number" = String, Path, description = "Vendor phone number")),
    responses(
        (status = 200, description = "Vendor disabled", body = ApiResponse<VendorSummary>),
        (status = 404, description = "Vendor not found"),
        (status = 409, description = "Vendor already disabled")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn disable_vendor(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(phone_number): Path<String>,
) -> AppResult<Json<ApiResponse<VendorSummary>>> {
    let resp = admin_service::disable_vendor(&state, &identity, &phone_number).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/vendors/{phone_number}/auto-approve-products",
    params(("phone_number" = String, Path, description = "Vendor phone number")),
    request_body = AutoApproveRequest,
    responses(
        (status = 200, description = "Auto-approve flag updated", body = ApiResponse<VendorSummary>),
        (status = 404, description = "Vendor not found"),
        (status = 409, description = "Vendor pending or flag unchanged")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_auto_approve_products(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(phone_number): Path<String>,
    Json(payload): Json<AutoApproveRequest>,
) -> AppResult<Json<ApiResponse<VendorSummary>>> {
    let resp =
        admin_service::set_auto_approve_products(&state, &identity, &phone_number, payload)
            .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/vendors/auto-approve-all",
    request_body = AutoApproveRequest,
    responses(
        (status = 200, description = "Auto-approve flag set on every non-pending vendor", body = ApiResponse<VendorList>),
        (status = 404, description = "No eligible vendors")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn set_auto_approve_all(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Json(payload): Json<AutoApproveRequest>,
) -> AppResult<Json<ApiResponse<VendorList>>> {
    let resp = admin_service::set_auto_approve_all_vendors(&state, &identity, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}/accept",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product accepted", body = ApiResponse<VendorProductView>),
        (status = 404, description = "Product not found or deleted"),
        (status = 409, description = "Product already accepted")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn accept_product(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<VendorProductView>>> {
    let resp = admin_service::accept_product(&state, &identity, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}/reject",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product rejected", body = ApiResponse<VendorProductView>),
        (status = 404, description = "Product not found or deleted"),
        (status = 409, description = "Product already rejected")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reject_product(
    State(state): State<AppState>,
    identity: ActingIdentity,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<VendorProductView>>> {
    let resp = admin_service::reject_product(&state, &identity, id).await?;
    Ok(Json(resp))
}
