use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

use crate::{
    dto::orders::{CheckoutRequest, OrderItemView, OrderList, OrderView},
    entity::{
        CartItems, Orders, Products,
        cart_items::Column as CartCol,
        order_items::ActiveModel as OrderItemActive,
        orders::{self, ActiveModel as OrderActive, Column as OrderCol},
        products::{self, Column as ProdCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{ActingIdentity, ensure_customer},
    money,
    response::{ApiResponse, Meta},
    services::cart_service::NOT_ENOUGH_UNITS,
    state::AppState,
    store,
    validation::{require_non_blank, validate_phone},
};

/// Turns the caller's cart into an order. Either every step lands or nothing does.
pub async fn checkout(
    state: &AppState,
    identity: &ActingIdentity,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderView>> {
    ensure_customer(identity)?;
    let CheckoutRequest {
        address,
        phone_number,
        comment,
    } = payload;
    require_non_blank("Address", &address)?;
    require_non_blank("Phone number", &phone_number)?;
    validate_phone(&phone_number)?;

    let customer = identity.phone_number();
    let txn = state.orm.begin().await?;

    let cart = CartItems::find()
        .filter(CartCol::CustomerPhoneNumber.eq(customer))
        .order_by_asc(CartCol::Id)
        .lock(LockType::Update)
        .all(&txn)
        .await?;
    if cart.is_empty() {
        return Err(AppError::bad_request("Cart is empty."));
    }

    let product_ids: Vec<i32> = cart.iter().map(|item| item.product_id).collect();
    let products: HashMap<i32, products::Model> = Products::find()
        .filter(ProdCol::Id.is_in(product_ids))
        .lock(LockType::Update)
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut total_price: i64 = 0;
    for item in &cart {
        let product = products
            .get(&item.product_id)
            .filter(|p| p.is_visible())
            .ok_or_else(|| {
                AppError::bad_request(format!(
                    "Product {} is no longer available.",
                    item.product_id
                ))
            })?;
        if product.number_of_available_units < item.quantity {
            return Err(AppError::bad_request(NOT_ENOUGH_UNITS));
        }
        let line = money::line_total(product.price, item.quantity)?;
        total_price = money::sum([total_price, line])?;
    }

    let order = OrderActive {
        customer_phone_number: Set(customer.to_string()),
        address: Set(address.trim().to_string()),
        phone_number: Set(phone_number),
        comment: Set(comment.filter(|c| !c.trim().is_empty())),
        order_date: Set(Utc::now().into()),
        total_price: Set(total_price),
        status: Set(orders::STATUS_ACTIVE.to_string()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(cart.len());
    for line in &cart {
        let product = products.get(&line.product_id);
        let unit_price = product.map(|p| p.price).unwrap_or_default();

        let item = OrderItemActive {
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price: Set(unit_price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // Guarded decrement; zero rows means a concurrent checkout took the units.
        let result = Products::update_many()
            .col_expr(
                ProdCol::NumberOfAvailableUnits,
                Expr::col(ProdCol::NumberOfAvailableUnits).sub(line.quantity),
            )
            .filter(
                Condition::all()
                    .add(ProdCol::Id.eq(line.product_id))
                    .add(ProdCol::NumberOfAvailableUnits.gte(line.quantity)),
            )
            .exec(&txn)
            .await?;
        if result.rows_affected != 1 {
            return Err(AppError::bad_request(NOT_ENOUGH_UNITS));
        }

        items.push(OrderItemView::new(item, product)?);
    }

    CartItems::delete_many()
        .filter(CartCol::Id.is_in(cart.iter().map(|item| item.id)))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        customer = %customer,
        order_id = order.id,
        total_price = order.total_price,
        lines = items.len(),
        "checkout completed"
    );
    Ok(ApiResponse::success(
        "Checkout completed successfully.",
        OrderView::new(order, items),
        Some(Meta::empty()),
    ))
}

pub async fn order_history(
    state: &AppState,
    identity: &ActingIdentity,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_customer(identity)?;
    let orders = Orders::find()
        .filter(OrderCol::CustomerPhoneNumber.eq(identity.phone_number()))
        .order_by_desc(OrderCol::OrderDate)
        .order_by_desc(OrderCol::Id)
        .all(&state.orm)
        .await?;
    if orders.is_empty() {
        return Err(AppError::not_found("No orders found."));
    }

    let items: Vec<OrderView> = store::orders_with_lines(&state.orm, orders)
        .await?
        .into_iter()
        .map(|(order, lines)| -> AppResult<OrderView> {
            let views = lines
                .into_iter()
                .map(|(item, product)| OrderItemView::new(item, product.as_ref()))
                .collect::<AppResult<_>>()?;
            Ok(OrderView::new(order, views))
        })
        .collect::<AppResult<_>>()?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}
