use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::{order_items, orders, products},
    error::AppResult,
    money,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub address: String,
    /// Delivery contact, not necessarily the account phone.
    pub phone_number: String,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemView {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub category: String,
    pub quantity: i32,
    pub price: i64,
    pub line_total: i64,
}

impl OrderItemView {
    pub fn new(item: order_items::Model, product: Option<&products::Model>) -> AppResult<Self> {
        let line_total = money::line_total(item.price, item.quantity)?;
        Ok(Self {
            id: item.id,
            product_id: item.product_id,
            title: product.map(|p| p.title.clone()).unwrap_or_default(),
            category: product.map(|p| p.category.clone()).unwrap_or_default(),
            quantity: item.quantity,
            price: item.price,
            line_total,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderView {
    pub id: i32,
    pub address: String,
    pub phone_number: String,
    pub comment: Option<String>,
    pub order_date: DateTime<Utc>,
    pub total_price: i64,
    pub status: String,
    pub items: Vec<OrderItemView>,
}

impl OrderView {
    pub fn new(order: orders::Model, items: Vec<OrderItemView>) -> Self {
        Self {
            id: order.id,
            address: order.address,
            phone_number: order.phone_number,
            comment: order.comment,
            order_date: order.order_date.with_timezone(&Utc),
            total_price: order.total_price,
            status: order.status,
            items,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderView>,
}

/// An order restricted to the lines of one vendor.
#[derive(Debug, Serialize, ToSchema)]
pub struct VendorOrderView {
    pub order_id: i32,
    pub customer_name: String,
    pub customer_phone_number: String,
    pub address: String,
    pub phone_number: String,
    pub comment: Option<String>,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub items: Vec<OrderItemView>,
    pub vendor_total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendorOrderList {
    pub items: Vec<VendorOrderView>,
}
