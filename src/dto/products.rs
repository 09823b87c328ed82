use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::{products, vendors};

/// Catalog filter. Blank category and absent bounds do not narrow the result.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

/// Customer-facing product.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub images: String,
    pub number_of_available_units: i32,
    pub number_of_viewers: i32,
    pub vendor_phone_number: String,
    pub store_name: String,
}

impl ProductView {
    pub fn new(product: products::Model, vendor: Option<&vendors::Model>) -> Self {
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            category: product.category,
            images: product.images,
            number_of_available_units: product.number_of_available_units,
            number_of_viewers: product.number_of_viewers,
            vendor_phone_number: product.vendor_phone_number,
            store_name: vendor.map(|v| v.store_name.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<ProductView>,
}

/// Product as its owning vendor sees it, lifecycle flags included.
#[derive(Debug, Serialize, ToSchema)]
pub struct VendorProductView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub images: String,
    pub number_of_available_units: i32,
    pub number_of_viewers: i32,
    pub is_pending: bool,
    pub is_approved: bool,
    pub is_rejected: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<products::Model> for VendorProductView {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            category: model.category,
            images: model.images,
            number_of_available_units: model.number_of_available_units,
            number_of_viewers: model.number_of_viewers,
            is_pending: model.is_pending,
            is_approved: model.is_approved,
            is_rejected: model.is_rejected,
            is_deleted: model.is_deleted,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendorProductList {
    pub items: Vec<VendorProductView>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub images: String,
    pub number_of_available_units: i32,
}

/// Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub images: Option<String>,
    pub number_of_available_units: Option<i32>,
}
