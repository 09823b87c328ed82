use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::{customers, vendors},
    middleware::auth::Role,
};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterCustomerRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterVendorRequest {
    pub store_name: String,
    pub owner_name: String,
    pub business_email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: Role,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerProfile {
    pub phone_number: String,
    pub full_name: String,
    pub email: String,
}

impl From<customers::Model> for CustomerProfile {
    fn from(model: customers::Model) -> Self {
        Self {
            phone_number: model.phone_number,
            full_name: model.full_name,
            email: model.email,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendorSummary {
    pub phone_number: String,
    pub store_name: String,
    pub owner_name: String,
    pub business_email: String,
    pub is_approved: bool,
    pub is_pending: bool,
    pub is_enabled: bool,
    pub auto_approve_products: bool,
}

impl From<vendors::Model> for VendorSummary {
    fn from(model: vendors::Model) -> Self {
        Self {
            phone_number: model.phone_number,
            store_name: model.store_name,
            owner_name: model.owner_name,
            business_email: model.business_email,
            is_approved: model.is_approved,
            is_pending: model.is_pending,
            is_enabled: model.is_enabled,
            auto_approve_products: model.auto_approve_products,
        }
    }
}
