//! Eager-loading queries shared by services. Every function accepts any connection so it can
//! run inside a transaction as well as on the pool.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, QueryFilter, QueryOrder,
    Condition,
};

use crate::entity::{
    CartItems, OrderItems, Products, SavedProducts, Vendors, cart_items, order_items, orders,
    products, saved_products, vendors,
};

pub type OrderWithLines = (orders::Model, Vec<(order_items::Model, Option<products::Model>)>);

/// Approved, non-deleted product by id.
pub async fn find_visible_product<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Option<products::Model>, DbErr> {
    Products::find_by_id(id)
        .filter(visible_products())
        .one(conn)
        .await
}

pub fn visible_products() -> Condition {
    Condition::all()
        .add(products::Column::IsApproved.eq(true))
        .add(products::Column::IsDeleted.eq(false))
}

pub async fn products_with_vendor<C: ConnectionTrait>(
    conn: &C,
    condition: Condition,
) -> Result<Vec<(products::Model, Option<vendors::Model>)>, DbErr> {
    Products::find()
        .filter(condition)
        .order_by_asc(products::Column::Id)
        .find_also_related(Vendors)
        .all(conn)
        .await
}

pub async fn cart_with_products<C: ConnectionTrait>(
    conn: &C,
    customer_phone_number: &str,
) -> Result<Vec<(cart_items::Model, Option<products::Model>)>, DbErr> {
    CartItems::find()
        .filter(cart_items::Column::CustomerPhoneNumber.eq(customer_phone_number))
        .order_by_asc(cart_items::Column::Id)
        .find_also_related(Products)
        .all(conn)
        .await
}

pub async fn saved_with_products<C: ConnectionTrait>(
    conn: &C,
    customer_phone_number: &str,
) -> Result<Vec<(saved_products::Model, Option<products::Model>)>, DbErr> {
    SavedProducts::find()
        .filter(saved_products::Column::CustomerPhoneNumber.eq(customer_phone_number))
        .order_by_desc(saved_products::Column::CreatedAt)
        .find_also_related(Products)
        .all(conn)
        .await
}

/// Orders with their items and each item's product (two hops).
pub async fn orders_with_lines<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<orders::Model>,
) -> Result<Vec<OrderWithLines>, DbErr> {
    let items = orders.load_many(OrderItems, conn).await?;

    let product_ids: Vec<i32> = items
        .iter()
        .flatten()
        .map(|item| item.product_id)
        .collect();
    let products: HashMap<i32, products::Model> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        Products::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    };

    Ok(orders
        .into_iter()
        .zip(items)
        .map(|(order, items)| {
            let lines = items
                .into_iter()
                .map(|item| {
                    let product = products.get(&item.product_id).cloned();
                    (item, product)
                })
                .collect();
            (order, lines)
        })
        .collect())
}
