use chrono::Utc;
use sea_orm::sea_query::{Expr, LockType, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::cart::{AddToCartRequest, CartItemView, CartLine, CartView},
    entity::{
        CartItems, Products,
        cart_items::{ActiveModel as CartActive, Column as CartCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{ActingIdentity, ensure_customer},
    money,
    response::{ApiResponse, Meta},
    state::AppState,
    store,
};

pub const NOT_ENOUGH_UNITS: &str = "Not enough units available.";

pub async fn view_cart(
    state: &AppState,
    identity: &ActingIdentity,
) -> AppResult<ApiResponse<CartView>> {
    ensure_customer(identity)?;
    let items: Vec<CartLine> = store::cart_with_products(&state.orm, identity.phone_number())
        .await?
        .into_iter()
        .filter_map(|(item, product)| product.map(|p| CartLine::new(item, &p)))
        .collect::<AppResult<_>>()?;

    if items.is_empty() {
        return Err(AppError::not_found("Cart is empty."));
    }

    let total_price = money::sum(items.iter().map(|line| line.line_total))?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "OK",
        CartView { items, total_price },
        Some(meta),
    ))
}

/// Adds `quantity` units, merging into the existing row for the same product.
pub async fn add_to_cart(
    state: &AppState,
    identity: &ActingIdentity,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartItemView>> {
    ensure_customer(identity)?;
    let customer = identity.phone_number();
    let txn = state.orm.begin().await?;

    let product = Products::find_by_id(payload.product_id)
        .filter(store::visible_products())
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found or has been deleted."))?;

    if payload.quantity <= 0 {
        return Err(AppError::bad_request("Quantity must be greater than zero."));
    }
    if product.number_of_available_units < payload.quantity {
        return Err(AppError::bad_request(NOT_ENOUGH_UNITS));
    }

    let in_cart = Condition::all()
        .add(CartCol::CustomerPhoneNumber.eq(customer))
        .add(CartCol::ProductId.eq(product.id));
    let existing = CartItems::find()
        .filter(in_cart.clone())
        .lock(LockType::Update)
        .one(&txn)
        .await?;

    existing
        .as_ref()
        .map_or(0, |item| item.quantity)
        .checked_add(payload.quantity)
        .filter(|merged| *merged <= product.number_of_available_units)
        .ok_or_else(|| AppError::bad_request(NOT_ENOUGH_UNITS))?;

    // A concurrent first add may land between the lookup and the insert; the unique
    // (customer, product) index turns that into a merge.
    CartItems::insert(CartActive {
        customer_phone_number: Set(customer.to_string()),
        product_id: Set(product.id),
        quantity: Set(payload.quantity),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::columns([CartCol::CustomerPhoneNumber, CartCol::ProductId])
            .value(
                CartCol::Quantity,
                Expr::col((CartItems, CartCol::Quantity)).add(payload.quantity),
            )
            .to_owned(),
    )
    .exec_without_returning(&txn)
    .await?;

    let cart_item = CartItems::find()
        .filter(in_cart)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Cart item not found."))?;
    if cart_item.quantity > product.number_of_available_units {
        return Err(AppError::bad_request(NOT_ENOUGH_UNITS));
    }

    txn.commit().await?;

    tracing::info!(
        customer = %customer,
        product_id = cart_item.product_id,
        quantity = cart_item.quantity,
        "cart updated"
    );
    Ok(ApiResponse::success(
        "Product added to cart successfully.",
        CartItemView::from(cart_item),
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_cart(
    state: &AppState,
    identity: &ActingIdentity,
    cart_item_id: i32,
) -> AppResult<ApiResponse<CartItemView>> {
    ensure_customer(identity)?;
    let customer = identity.phone_number();
    let txn = state.orm.begin().await?;

    let item = CartItems::find_by_id(cart_item_id)
        .filter(CartCol::CustomerPhoneNumber.eq(customer))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Cart item not found."))?;

    CartItems::delete_by_id(item.id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(customer = %customer, cart_item_id, "cart item removed");
    Ok(ApiResponse::success(
        "Product removed from cart successfully.",
        CartItemView::from(item),
        Some(Meta::empty()),
    ))
}

