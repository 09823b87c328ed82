use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::{
        CustomerProfile, LoginRequest, LoginResponse, RegisterCustomerRequest,
        RegisterVendorRequest, VendorSummary,
    },
    error::AppResult,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/customer", post(register_customer))
        .route("/register/vendor", post(register_vendor))
        .route("/login/customer", post(login_customer))
        .route("/login/vendor", post(login_vendor))
        .route("/login/admin", post(login_admin))
}

#[utoipa::path(
    post,
    path = "/api/auth/register/customer",
    request_body = RegisterCustomerRequest,
    responses(
        (status = 201, description = "Register customer", body = ApiResponse<CustomerProfile>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email or phone already registered")
    ),
    tag = "Auth"
)]
pub async fn register_customer(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCustomerRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CustomerProfile>>)> {
    let resp = auth_service::register_customer(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/register/vendor",
    request_body = RegisterVendorRequest,
    responses(
        (status = 201, description = "Register vendor; pending admin approval", body = ApiResponse<VendorSummary>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email or phone already registered")
    ),
    tag = "Auth"
)]
pub async fn register_vendor(
    State(state): State<AppState>,
    Json(payload): Json<RegisterVendorRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<VendorSummary>>)> {
    let resp = auth_service::register_vendor(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login/customer",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login customer", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login_customer(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_customer(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/login/vendor",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login vendor", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Vendor pending or disabled"),
        (status = 401, description = "Invalid credentials or vendor not approved")
    ),
    tag = "Auth"
)]
pub async fn login_vendor(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_vendor(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/login/admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login admin", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login_admin(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_admin(&state, payload).await?;
    Ok(Json(resp))
}
