use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::{
    dto::{
        admin::{AutoApproveRequest, PendingProduct, PendingProductList, VendorList},
        auth::VendorSummary,
        products::VendorProductView,
    },
    entity::{
        Products, Vendors,
        products::{self, ActiveModel as ProductActive, Column as ProdCol},
        vendors::{self, ActiveModel as VendorActive, Column as VendorCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{ActingIdentity, ensure_admin},
    notify::{Notification, notify},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_vendors(
    state: &AppState,
    identity: &ActingIdentity,
) -> AppResult<ApiResponse<VendorList>> {
    ensure_admin(identity)?;
    let items: Vec<VendorSummary> = Vendors::find()
        .order_by_asc(VendorCol::StoreName)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(VendorSummary::from)
        .collect();

    if items.is_empty() {
        return Err(AppError::not_found("No vendors found."));
    }

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Vendors", VendorList { items }, Some(meta)))
}

pub async fn list_pending_products(
    state: &AppState,
    identity: &ActingIdentity,
) -> AppResult<ApiResponse<PendingProductList>> {
    ensure_admin(identity)?;
    let rows = Products::find()
        .filter(
            Condition::all()
                .add(ProdCol::IsPending.eq(true))
                .add(ProdCol::IsDeleted.eq(false)),
        )
        .order_by_asc(ProdCol::CreatedAt)
        .find_also_related(Vendors)
        .all(&state.orm)
        .await?;

    if rows.is_empty() {
        return Err(AppError::not_found("No pending products found."));
    }

    let items: Vec<PendingProduct> = rows
        .into_iter()
        .map(|(product, vendor)| PendingProduct {
            id: product.id,
            title: product.title,
            description: product.description,
            price: product.price,
            category: product.category,
            images: product.images,
            number_of_available_units: product.number_of_available_units,
            vendor_phone_number: product.vendor_phone_number,
            owner_name: vendor.map(|v| v.owner_name).unwrap_or_default(),
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Pending products",
        PendingProductList { items },
        Some(meta),
    ))
}

async fn lock_vendor(txn: &DatabaseTransaction, phone_number: &str) -> AppResult<vendors::Model> {
    Vendors::find_by_id(phone_number.to_owned())
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::not_found("Vendor not found."))
}

/// Which vendor lifecycle transition to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VendorAction {
    Approve,
    Disapprove,
    Enable,
    Disable,
}

impl VendorAction {
    fn check(self, vendor: &vendors::Model) -> AppResult<()> {
        let conflict = match self {
            VendorAction::Approve if vendor.is_approved => "Vendor is already approved.",
            VendorAction::Disapprove if vendor.is_disapproved() => {
                "Vendor is already disapproved."
            }
            VendorAction::Enable if vendor.is_enabled => "Vendor is already enabled.",
            VendorAction::Disable if !vendor.is_enabled => "Vendor is already disabled.",
            _ => return Ok(()),
        };
        Err(AppError::conflict(conflict))
    }

    fn apply(self, active: &mut VendorActive) {
        match self {
            VendorAction::Approve => {
                active.is_approved = Set(true);
                active.is_pending = Set(false);
            }
            VendorAction::Disapprove => {
                active.is_approved = Set(false);
                active.is_pending = Set(false);
            }
            VendorAction::Enable => active.is_enabled = Set(true),
            VendorAction::Disable => active.is_enabled = Set(false),
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            VendorAction::Approve => "approved",
            VendorAction::Disapprove => "disapproved",
            VendorAction::Enable => "enabled",
            VendorAction::Disable => "disabled",
        }
    }
}

async fn transition_vendor(
    state: &AppState,
    identity: &ActingIdentity,
    phone_number: &str,
    action: VendorAction,
) -> AppResult<ApiResponse<VendorSummary>> {
    ensure_admin(identity)?;
    let txn = state.orm.begin().await?;

    let vendor = lock_vendor(&txn, phone_number).await?;
    action.check(&vendor)?;

    let mut active: VendorActive = vendor.into();
    action.apply(&mut active);
    let vendor = active.update(&txn).await?;

    txn.commit().await?;

    let verb = action.past_tense();
    tracing::info!(vendor = %vendor.phone_number, action = verb, "vendor state changed");
    notify(
        state,
        Notification::vendor(
            vendor.business_email.clone(),
            format!("Your account has been {verb}."),
        ),
    );

    Ok(ApiResponse::success(
        format!("Vendor {verb} successfully."),
        VendorSummary::from(vendor),
        Some(Meta::empty()),
    ))
}

pub async fn approve_vendor(
    state: &AppState,
    identity: &ActingIdentity,
    phone_number: &str,
) -> AppResult<ApiResponse<VendorSummary>> {
    transition_vendor(state, identity, phone_number, VendorAction::Approve).await
}

pub async fn disapprove_vendor(
    state: &AppState,
    identity: &ActingIdentity,
    phone_number: &str,
) -> AppResult<ApiResponse<VendorSummary>> {
    transition_vendor(state, identity, phone_number, VendorAction::Disapprove).await
}

pub async fn enable_vendor(
    state: &AppState,
    identity: &ActingIdentity,
    phone_number: &str,
) -> AppResult<ApiResponse<VendorSummary>> {
    transition_vendor(state, identity, phone_number, VendorAction::Enable).await
}

pub async fn disable_vendor(
    state: &AppState,
    identity: &ActingIdentity,
    phone_number: &str,
) -> AppResult<ApiResponse<VendorSummary>> {
    transition_vendor(state, identity, phone_number, VendorAction::Disable).await
}

pub async fn set_auto_approve_products(
    state: &AppState,
    identity: &ActingIdentity,
    phone_number: &str,
    payload: AutoApproveRequest,
) -> AppResult<ApiResponse<VendorSummary>> {
    ensure_admin(identity)?;
    let flag = payload.auto_approve;
    let txn = state.orm.begin().await?;

    let vendor = lock_vendor(&txn, phone_number).await?;
    if vendor.is_pending {
        return Err(AppError::conflict(
            "Cannot change auto-approve products for a pending vendor.",
        ));
    }
    if vendor.auto_approve_products == flag {
        return Err(AppError::conflict(format!(
            "Auto-approve products is already set to {flag}."
        )));
    }

    let mut active: VendorActive = vendor.into();
    active.auto_approve_products = Set(flag);
    let vendor = active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(vendor = %vendor.phone_number, flag, "auto-approve products changed");
    notify(
        state,
        Notification::vendor(
            vendor.business_email.clone(),
            format!("Auto-approve products has been set to {flag}."),
        ),
    );

    Ok(ApiResponse::success(
        "Auto-approve products updated successfully.",
        VendorSummary::from(vendor),
        Some(Meta::empty()),
    ))
}

/// Rewrites every non-pending vendor, including those already at `flag`, and notifies each.
pub async fn set_auto_approve_all_vendors(
    state: &AppState,
    identity: &ActingIdentity,
    payload: AutoApproveRequest,
) -> AppResult<ApiResponse<VendorList>> {
    ensure_admin(identity)?;
    let flag = payload.auto_approve;
    let txn = state.orm.begin().await?;

    let vendors = Vendors::find()
        .filter(VendorCol::IsPending.eq(false))
        .order_by_asc(VendorCol::StoreName)
        .lock(LockType::Update)
        .all(&txn)
        .await?;
    if vendors.is_empty() {
        return Err(AppError::not_found("No approved or disapproved vendors found."));
    }

    let mut updated = Vec::with_capacity(vendors.len());
    for vendor in vendors {
        let mut active: VendorActive = vendor.into();
        active.auto_approve_products = Set(flag);
        updated.push(active.update(&txn).await?);
    }

    txn.commit().await?;

    tracing::info!(count = updated.len(), flag, "auto-approve products changed for all vendors");
    for vendor in &updated {
        notify(
            state,
            Notification::vendor(
                vendor.business_email.clone(),
                format!("Auto-approve products for all vendors has been set to {flag}."),
            ),
        );
    }

    let items: Vec<VendorSummary> = updated.into_iter().map(VendorSummary::from).collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Auto-approve products updated for all vendors.",
        VendorList { items },
        Some(meta),
    ))
}

async fn review_product(
    state: &AppState,
    identity: &ActingIdentity,
    id: i32,
    accept: bool,
) -> AppResult<ApiResponse<VendorProductView>> {
    ensure_admin(identity)?;
    let txn = state.orm.begin().await?;

    let product = Products::find_by_id(id)
        .filter(ProdCol::IsDeleted.eq(false))
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found or has been deleted."))?;

    if accept && product.is_approved {
        return Err(AppError::conflict("Product is already accepted."));
    }
    if !accept && product.is_rejected {
        return Err(AppError::conflict("Product is already rejected."));
    }

    let vendor = Vendors::find_by_id(product.vendor_phone_number.clone())
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Vendor not found."))?;

    let mut active: ProductActive = product.into();
    active.is_pending = Set(false);
    active.is_approved = Set(accept);
    active.is_rejected = Set(!accept);
    let product: products::Model = active.update(&txn).await?;

    txn.commit().await?;

    let verb = if accept { "accepted" } else { "rejected" };
    tracing::info!(product_id = product.id, vendor = %vendor.phone_number, action = verb, "product reviewed");
    notify(
        state,
        Notification::vendor(
            vendor.business_email,
            format!("Your product '{}' has been {verb}.", product.title),
        ),
    );

    Ok(ApiResponse::success(
        format!("Product {verb} successfully."),
        VendorProductView::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn accept_product(
    state: &AppState,
    identity: &ActingIdentity,
    id: i32,
) -> AppResult<ApiResponse<VendorProductView>> {
    review_product(state, identity, id, true).await
}

pub async fn reject_product(
    state: &AppState,
    identity: &ActingIdentity,
    id: i32,
) -> AppResult<ApiResponse<VendorProductView>> {
    review_product(state, identity, id, false).await
}
