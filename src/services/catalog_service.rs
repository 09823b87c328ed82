use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, TransactionTrait};

use crate::{
    dto::products::{ProductList, ProductQuery, ProductView},
    entity::{
        Products, Vendors,
        products::Column as ProdCol,
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
    store,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let mut condition = store::visible_products();
    if let Some(category) = query.category.as_ref().filter(|c| !c.trim().is_empty()) {
        condition = condition.add(ProdCol::Category.eq(category.trim()));
    }
    if let Some(min_price) = query.min_price {
        condition = condition.add(ProdCol::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        condition = condition.add(ProdCol::Price.lte(max_price));
    }

    let items: Vec<ProductView> = store::products_with_vendor(&state.orm, condition)
        .await?
        .into_iter()
        .map(|(product, vendor)| ProductView::new(product, vendor.as_ref()))
        .collect();

    if items.is_empty() {
        return Err(AppError::not_found("No products found."));
    }

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

/// Returns the product with its viewer counter already incremented for this call.
pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<ProductView>> {
    let txn = state.orm.begin().await?;

    if store::find_visible_product(&txn, id).await?.is_none() {
        return Err(AppError::not_found("Product not found."));
    }

    Products::update_many()
        .col_expr(
            ProdCol::NumberOfViewers,
            Expr::col(ProdCol::NumberOfViewers).add(1),
        )
        .filter(ProdCol::Id.eq(id))
        .exec(&txn)
        .await?;

    let product = Products::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found."))?;
    let vendor = product.find_related(Vendors).one(&txn).await?;

    txn.commit().await?;

    tracing::debug!(product_id = id, viewers = product.number_of_viewers, "product viewed");
    Ok(ApiResponse::success(
        "OK",
        ProductView::new(product, vendor.as_ref()),
        Some(Meta::empty()),
    ))
}
