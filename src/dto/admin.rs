use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::auth::VendorSummary;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AutoApproveRequest {
    pub auto_approve: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendorList {
    pub items: Vec<VendorSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingProduct {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub images: String,
    pub number_of_available_units: i32,
    pub vendor_phone_number: String,
    pub owner_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingProductList {
    pub items: Vec<PendingProduct>,
}
