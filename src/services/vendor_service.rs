use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::{
        orders::{OrderItemView, VendorOrderList, VendorOrderView},
        products::{AddProductRequest, UpdateProductRequest, VendorProductList, VendorProductView},
    },
    entity::{
        Customers, OrderItems, Orders, Products, Vendors,
        customers::Column as CustomerCol,
        order_items::Column as OrderItemCol,
        orders::Column as OrderCol,
        products::{self, ActiveModel as ProductActive, Column as ProdCol},
        vendors,
    },
    error::{AppError, AppResult},
    middleware::auth::{ActingIdentity, ensure_vendor},
    money::{self, MAX_PRICE, MAX_UNITS},
    response::{ApiResponse, Meta},
    state::AppState,
    store,
    validation::require_non_blank,
};

async fn current_vendor<C: ConnectionTrait>(
    conn: &C,
    identity: &ActingIdentity,
) -> AppResult<vendors::Model> {
    ensure_vendor(identity)?;
    Vendors::find_by_id(identity.phone_number().to_owned())
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Vendor not found."))
}

fn ensure_not_pending(vendor: &vendors::Model) -> AppResult<()> {
    if vendor.is_pending {
        return Err(AppError::bad_request("Vendor account is pending approval."));
    }
    Ok(())
}

fn ensure_can_sell(vendor: &vendors::Model) -> AppResult<()> {
    ensure_not_pending(vendor)?;
    if !vendor.is_approved {
        return Err(AppError::bad_request("Vendor is not approved."));
    }
    if !vendor.is_enabled {
        return Err(AppError::bad_request("Vendor is disabled."));
    }
    Ok(())
}

fn validate_price(price: i64) -> AppResult<()> {
    if price <= 0 {
        return Err(AppError::bad_request("Price must be greater than zero."));
    }
    if price > MAX_PRICE {
        return Err(AppError::bad_request(format!(
            "Price cannot exceed {MAX_PRICE}."
        )));
    }
    Ok(())
}

fn validate_units(units: i32) -> AppResult<()> {
    if units < 0 {
        return Err(AppError::bad_request(
            "Number of available units cannot be negative.",
        ));
    }
    if units > MAX_UNITS {
        return Err(AppError::bad_request(format!(
            "Number of available units cannot exceed {MAX_UNITS}."
        )));
    }
    Ok(())
}

pub async fn add_product(
    state: &AppState,
    identity: &ActingIdentity,
    payload: AddProductRequest,
) -> AppResult<ApiResponse<VendorProductView>> {
    ensure_vendor(identity)?;
    require_non_blank("Title", &payload.title)?;
    validate_price(payload.price)?;
    validate_units(payload.number_of_available_units)?;

    let txn = state.orm.begin().await?;
    let vendor = current_vendor(&txn, identity).await?;
    ensure_can_sell(&vendor)?;

    let auto_approved = vendor.auto_approve_products;
    let product = ProductActive {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        price: Set(payload.price),
        category: Set(payload.category.trim().to_string()),
        images: Set(payload.images),
        number_of_available_units: Set(payload.number_of_available_units),
        number_of_viewers: Set(0),
        vendor_phone_number: Set(vendor.phone_number.clone()),
        is_pending: Set(!auto_approved),
        is_approved: Set(auto_approved),
        is_rejected: Set(false),
        is_deleted: Set(false),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(vendor = %vendor.phone_number, product_id = product.id, auto_approved, "product added");
    let message = if auto_approved {
        "Product added and approved successfully."
    } else {
        "Product added successfully and is pending approval."
    };
    Ok(ApiResponse::success(
        message,
        VendorProductView::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn list_products(
    state: &AppState,
    identity: &ActingIdentity,
) -> AppResult<ApiResponse<VendorProductList>> {
    let vendor = current_vendor(&state.orm, identity).await?;
    ensure_not_pending(&vendor)?;

    let items: Vec<VendorProductView> = Products::find()
        .filter(ProdCol::VendorPhoneNumber.eq(vendor.phone_number.as_str()))
        .order_by_asc(ProdCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(VendorProductView::from)
        .collect();

    if items.is_empty() {
        return Err(AppError::not_found("No products found."));
    }

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Products",
        VendorProductList { items },
        Some(meta),
    ))
}

async fn lock_own_product(
    txn: &DatabaseTransaction,
    vendor_phone_number: &str,
    id: i32,
) -> AppResult<products::Model> {
    Products::find_by_id(id)
        .filter(ProdCol::VendorPhoneNumber.eq(vendor_phone_number))
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found."))
}

pub async fn update_product(
    state: &AppState,
    identity: &ActingIdentity,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<VendorProductView>> {
    ensure_vendor(identity)?;
    if let Some(title) = payload.title.as_deref() {
        require_non_blank("Title", title)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    if let Some(units) = payload.number_of_available_units {
        validate_units(units)?;
    }

    let txn = state.orm.begin().await?;
    let vendor = current_vendor(&txn, identity).await?;
    ensure_not_pending(&vendor)?;
    let product = lock_own_product(&txn, &vendor.phone_number, id).await?;
    if product.is_deleted {
        return Err(AppError::bad_request("Product has been deleted."));
    }
    if product.is_rejected {
        return Err(AppError::bad_request("Product has been rejected."));
    }

    let UpdateProductRequest {
        title,
        description,
        price,
        category,
        images,
        number_of_available_units,
    } = payload;

    let mut active: ProductActive = product.into();
    if let Some(title) = title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = description {
        active.description = Set(description);
    }
    if let Some(price) = price {
        active.price = Set(price);
    }
    if let Some(category) = category {
        active.category = Set(category.trim().to_string());
    }
    if let Some(images) = images {
        active.images = Set(images);
    }
    if let Some(units) = number_of_available_units {
        active.number_of_available_units = Set(units);
    }
    let product = if active.is_changed() {
        active.update(&txn).await?
    } else {
        lock_own_product(&txn, &vendor.phone_number, id).await?
    };

    txn.commit().await?;

    tracing::info!(vendor = %identity.phone_number(), product_id = product.id, "product updated");
    Ok(ApiResponse::success(
        "Product updated successfully.",
        VendorProductView::from(product),
        Some(Meta::empty()),
    ))
}

/// Soft delete. The row stays so carts and past orders keep resolving it.
pub async fn delete_product(
    state: &AppState,
    identity: &ActingIdentity,
    id: i32,
) -> AppResult<ApiResponse<VendorProductView>> {
    let txn = state.orm.begin().await?;
    let vendor = current_vendor(&txn, identity).await?;
    ensure_not_pending(&vendor)?;

    let product = lock_own_product(&txn, &vendor.phone_number, id).await?;
    if product.is_deleted {
        return Err(AppError::conflict("Product is already deleted."));
    }

    let mut active: ProductActive = product.into();
    active.is_deleted = Set(true);
    let product = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(vendor = %identity.phone_number(), product_id = product.id, "product deleted");
    Ok(ApiResponse::success(
        "Product deleted successfully.",
        VendorProductView::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    identity: &ActingIdentity,
) -> AppResult<ApiResponse<VendorOrderList>> {
    let vendor = current_vendor(&state.orm, identity).await?;
    ensure_not_pending(&vendor)?;
    let product_ids: HashSet<i32> = Products::find()
        .filter(ProdCol::VendorPhoneNumber.eq(vendor.phone_number.as_str()))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();

    orders_containing(state, product_ids).await
}

pub async fn list_orders_for_product(
    state: &AppState,
    identity: &ActingIdentity,
    product_id: i32,
) -> AppResult<ApiResponse<VendorOrderList>> {
    let vendor = current_vendor(&state.orm, identity).await?;
    ensure_not_pending(&vendor)?;
    let product = Products::find_by_id(product_id)
        .filter(ProdCol::VendorPhoneNumber.eq(vendor.phone_number.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found."))?;

    orders_containing(state, HashSet::from([product.id])).await
}

/// Orders that include any of `product_ids`, with items narrowed to those products.
async fn orders_containing(
    state: &AppState,
    product_ids: HashSet<i32>,
) -> AppResult<ApiResponse<VendorOrderList>> {
    if product_ids.is_empty() {
        return Err(AppError::not_found("No orders found."));
    }

    let order_ids: HashSet<i32> = OrderItems::find()
        .filter(OrderItemCol::ProductId.is_in(product_ids.iter().copied()))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|item| item.order_id)
        .collect();
    if order_ids.is_empty() {
        return Err(AppError::not_found("No orders found."));
    }

    let orders = Orders::find()
        .filter(OrderCol::Id.is_in(order_ids))
        .order_by_desc(OrderCol::OrderDate)
        .order_by_desc(OrderCol::Id)
        .all(&state.orm)
        .await?;

    let phones: HashSet<String> = orders
        .iter()
        .map(|o| o.customer_phone_number.clone())
        .collect();
    let customer_names: HashMap<String, String> = Customers::find()
        .filter(CustomerCol::PhoneNumber.is_in(phones))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| (c.phone_number, c.full_name))
        .collect();

    let items: Vec<VendorOrderView> = store::orders_with_lines(&state.orm, orders)
        .await?
        .into_iter()
        .map(|(order, lines)| -> AppResult<VendorOrderView> {
            let items: Vec<OrderItemView> = lines
                .into_iter()
                .filter(|(item, _)| product_ids.contains(&item.product_id))
                .map(|(item, product)| OrderItemView::new(item, product.as_ref()))
                .collect::<AppResult<_>>()?;
            let vendor_total = money::sum(items.iter().map(|i| i.line_total))?;
            Ok(VendorOrderView {
                order_id: order.id,
                customer_name: customer_names
                    .get(&order.customer_phone_number)
                    .cloned()
                    .unwrap_or_default(),
                customer_phone_number: order.customer_phone_number,
                address: order.address,
                phone_number: order.phone_number,
                comment: order.comment,
                order_date: order.order_date.with_timezone(&Utc),
                status: order.status,
                vendor_total,
                items,
            })
        })
        .collect::<AppResult<_>>()?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Orders",
        VendorOrderList { items },
        Some(meta),
    ))
}
