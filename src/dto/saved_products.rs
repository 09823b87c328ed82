use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{products, saved_products};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveProductRequest {
    pub product_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedProductView {
    pub product_id: i32,
    pub title: String,
    pub price: i64,
    pub category: String,
    pub images: String,
    pub number_of_available_units: i32,
    /// False once the product is deleted or no longer approved.
    pub is_available: bool,
    pub saved_at: DateTime<Utc>,
}

impl SavedProductView {
    pub fn new(saved: saved_products::Model, product: &products::Model) -> Self {
        Self {
            product_id: saved.product_id,
            title: product.title.clone(),
            price: product.price,
            category: product.category.clone(),
            images: product.images.clone(),
            number_of_available_units: product.number_of_available_units,
            is_available: product.is_visible(),
            saved_at: saved.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SavedProductList {
    pub items: Vec<SavedProductView>,
}
