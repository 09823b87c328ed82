use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set, TransactionTrait};

use crate::{
    dto::saved_products::{SaveProductRequest, SavedProductList, SavedProductView},
    entity::{SavedProducts, saved_products::ActiveModel as SavedActive},
    error::{AppError, AppResult},
    middleware::auth::{ActingIdentity, ensure_customer},
    response::{ApiResponse, Meta},
    state::AppState,
    store,
};

pub async fn list_saved_products(
    state: &AppState,
    identity: &ActingIdentity,
) -> AppResult<ApiResponse<SavedProductList>> {
    ensure_customer(identity)?;
    let items: Vec<SavedProductView> =
        store::saved_with_products(&state.orm, identity.phone_number())
            .await?
            .into_iter()
            .filter_map(|(saved, product)| product.map(|p| SavedProductView::new(saved, &p)))
            .collect();

    if items.is_empty() {
        return Err(AppError::not_found("No saved products found."));
    }

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Saved products",
        SavedProductList { items },
        Some(meta),
    ))
}

pub async fn save_product(
    state: &AppState,
    identity: &ActingIdentity,
    payload: SaveProductRequest,
) -> AppResult<ApiResponse<SavedProductView>> {
    ensure_customer(identity)?;
    let customer = identity.phone_number().to_string();
    let txn = state.orm.begin().await?;

    let product = store::find_visible_product(&txn, payload.product_id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found or has been deleted."))?;

    let already_saved = SavedProducts::find_by_id((customer.clone(), product.id))
        .one(&txn)
        .await?
        .is_some();
    if already_saved {
        return Err(AppError::conflict("Product already saved."));
    }

    let saved = SavedActive {
        customer_phone_number: Set(customer),
        product_id: Set(product.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(customer = %saved.customer_phone_number, product_id = saved.product_id, "product saved");
    Ok(ApiResponse::success(
        "Product saved successfully.",
        SavedProductView::new(saved, &product),
        Some(Meta::empty()),
    ))
}

pub async fn remove_saved_product(
    state: &AppState,
    identity: &ActingIdentity,
    product_id: i32,
) -> AppResult<ApiResponse<i32>> {
    ensure_customer(identity)?;
    let txn = state.orm.begin().await?;

    let saved = SavedProducts::find_by_id((identity.phone_number().to_string(), product_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Saved product not found."))?;
    saved.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(customer = %identity.phone_number(), product_id, "saved product removed");
    Ok(ApiResponse::success(
        "Product removed from saved products.",
        product_id,
        Some(Meta::empty()),
    ))
}
