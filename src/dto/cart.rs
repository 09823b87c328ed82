use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::{cart_items, products},
    error::AppResult,
    money,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemView {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl From<cart_items::Model> for CartItemView {
    fn from(model: cart_items::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            quantity: model.quantity,
        }
    }
}

/// Cart row priced with the product's current price.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartLine {
    pub cart_item_id: i32,
    pub product_id: i32,
    pub title: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub line_total: i64,
    pub number_of_available_units: i32,
    pub is_deleted: bool,
}

impl CartLine {
    pub fn new(item: cart_items::Model, product: &products::Model) -> AppResult<Self> {
        let line_total = money::line_total(product.price, item.quantity)?;
        Ok(Self {
            cart_item_id: item.id,
            product_id: item.product_id,
            title: product.title.clone(),
            unit_price: product.price,
            quantity: item.quantity,
            line_total,
            number_of_available_units: product.number_of_available_units,
            is_deleted: product.is_deleted,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total_price: i64,
}
