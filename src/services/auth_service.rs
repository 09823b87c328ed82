use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};

use crate::{
    dto::auth::{
        CustomerProfile, LoginRequest, LoginResponse, RegisterCustomerRequest,
        RegisterVendorRequest, VendorSummary,
    },
    entity::{
        Customers, Vendors,
        customers::{ActiveModel as CustomerActive, Column as CustomerCol},
        vendors::{ActiveModel as VendorActive, Column as VendorCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{Role, issue_token},
    notify::{Notification, notify},
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{
        normalize_email, validate_email, validate_name, validate_password, validate_phone,
    },
};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn register_customer(
    state: &AppState,
    payload: RegisterCustomerRequest,
) -> AppResult<ApiResponse<CustomerProfile>> {
    let RegisterCustomerRequest {
        full_name,
        email,
        password,
        confirm_password,
        phone_number,
    } = payload;
    let email = normalize_email(&email);
    validate_name("Full name", &full_name)?;
    validate_email(&email, &state.config.allowed_email_domain)?;
    validate_phone(&phone_number)?;
    validate_password(&password, &confirm_password)?;

    let txn = state.orm.begin().await?;

    let email_taken = Customers::find()
        .filter(CustomerCol::Email.eq(email.as_str()))
        .one(&txn)
        .await?
        .is_some();
    if email_taken {
        return Err(AppError::conflict("Email is already registered."));
    }
    if Customers::find_by_id(phone_number.clone()).one(&txn).await?.is_some() {
        return Err(AppError::conflict("Phone number is already registered."));
    }

    let customer = CustomerActive {
        phone_number: Set(phone_number),
        full_name: Set(full_name.trim().to_string()),
        email: Set(email),
        password_hash: Set(hash_password(&password)?),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(customer = %customer.phone_number, "customer registered");
    Ok(ApiResponse::success(
        "Customer registered successfully.",
        CustomerProfile::from(customer),
        Some(Meta::empty()),
    ))
}

pub async fn register_vendor(
    state: &AppState,
    payload: RegisterVendorRequest,
) -> AppResult<ApiResponse<VendorSummary>> {
    let RegisterVendorRequest {
        store_name,
        owner_name,
        business_email,
        password,
        confirm_password,
        phone_number,
    } = payload;
    let business_email = normalize_email(&business_email);
    validate_name("Store name", &store_name)?;
    validate_name("Owner name", &owner_name)?;
    validate_email(&business_email, &state.config.allowed_email_domain)?;
    validate_phone(&phone_number)?;
    validate_password(&password, &confirm_password)?;

    let txn = state.orm.begin().await?;

    let email_taken = Vendors::find()
        .filter(VendorCol::BusinessEmail.eq(business_email.as_str()))
        .one(&txn)
        .await?
        .is_some();
    if email_taken {
        return Err(AppError::conflict("Business email is already registered."));
    }
    if Vendors::find_by_id(phone_number.clone()).one(&txn).await?.is_some() {
        return Err(AppError::conflict("Phone number is already registered."));
    }

    let vendor = VendorActive {
        phone_number: Set(phone_number),
        store_name: Set(store_name.trim().to_string()),
        owner_name: Set(owner_name.trim().to_string()),
        business_email: Set(business_email),
        password_hash: Set(hash_password(&password)?),
        is_approved: Set(false),
        is_pending: Set(true),
        is_enabled: Set(true),
        auto_approve_products: Set(false),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(vendor = %vendor.phone_number, "vendor registered");
    notify(
        state,
        Notification::admins(format!("New Vendor registered: {}", vendor.store_name)),
    );

    Ok(ApiResponse::success(
        "Vendor registered successfully. Awaiting admin approval.",
        VendorSummary::from(vendor),
        Some(Meta::empty()),
    ))
}

fn login_response(
    state: &AppState,
    subject: &str,
    email: String,
    role: Role,
) -> AppResult<ApiResponse<LoginResponse>> {
    let access_token = issue_token(&state.config, subject, &email, role)?;
    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            access_token,
            role,
            email,
        },
        Some(Meta::empty()),
    ))
}

pub async fn login_customer(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = normalize_email(&email);
    validate_email(&email, &state.config.allowed_email_domain)?;

    let customer = Customers::find()
        .filter(CustomerCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    if !verify_password(&password, &customer.password_hash)? {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    tracing::info!(customer = %customer.phone_number, "customer logged in");
    login_response(state, &customer.phone_number, customer.email, Role::Customer)
}

pub async fn login_vendor(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = normalize_email(&email);
    validate_email(&email, &state.config.allowed_email_domain)?;

    let vendor = Vendors::find()
        .filter(VendorCol::BusinessEmail.eq(email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    if !verify_password(&password, &vendor.password_hash)? {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }
    if vendor.is_pending {
        return Err(AppError::bad_request("Vendor account is pending approval."));
    }
    if !vendor.is_approved {
        return Err(AppError::unauthorized("Vendor is not approved."));
    }
    if !vendor.is_enabled {
        return Err(AppError::bad_request("Vendor is disabled."));
    }

    tracing::info!(vendor = %vendor.phone_number, "vendor logged in");
    login_response(state, &vendor.phone_number, vendor.business_email, Role::Vendor)
}

pub async fn login_admin(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let config = &state.config;
    if !email.eq_ignore_ascii_case(&config.admin_email) || password != config.admin_password {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    tracing::info!("admin logged in");
    login_response(state, &config.admin_email, config.admin_email.clone(), Role::Admin)
}
