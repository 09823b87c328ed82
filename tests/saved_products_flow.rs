mod common;

use common::{NewProduct, VendorState, create_customer, create_product, create_vendor};
use marketplace_api::{
    dto::saved_products::SaveProductRequest,
    error::AppError,
    services::{saved_product_service, vendor_service},
};

#[tokio::test]
async fn saving_twice_conflicts() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let vendor = create_vendor(&state, "+201000000001", "Alpha", VendorState::Approved).await?;
    let product = create_product(&state, &vendor, NewProduct::default()).await?;
    let customer = create_customer(&state, "+201000000050").await?;

    let resp = saved_product_service::save_product(
        &state,
        &customer,
        SaveProductRequest {
            product_id: product.id,
        },
    )
    .await?;
    assert_eq!(resp.data.expect("saved").product_id, product.id);

    match saved_product_service::save_product(
        &state,
        &customer,
        SaveProductRequest {
            product_id: product.id,
        },
    )
    .await
    {
        Err(AppError::Conflict(message)) => assert_eq!(message, "Product already saved."),
        other => panic!("expected conflict, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn only_visible_products_can_be_saved() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let vendor = create_vendor(&state, "+201000000001", "Alpha", VendorState::Approved).await?;
    let pending = create_product(
        &state,
        &vendor,
        NewProduct {
            approved: false,
            ..Default::default()
        },
    )
    .await?;
    let customer = create_customer(&state, "+201000000050").await?;

    let result = saved_product_service::save_product(
        &state,
        &customer,
        SaveProductRequest {
            product_id: pending.id,
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn list_and_remove_saved_products() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let vendor = create_vendor(&state, "+201000000001", "Alpha", VendorState::Approved).await?;
    let product = create_product(&state, &vendor, NewProduct { title: "Kettle", ..Default::default() }).await?;
    let customer = create_customer(&state, "+201000000050").await?;
    let other = create_customer(&state, "+201000000051").await?;

    assert!(matches!(
        saved_product_service::list_saved_products(&state, &customer).await,
        Err(AppError::NotFound(_))
    ));

    saved_product_service::save_product(
        &state,
        &customer,
        SaveProductRequest {
            product_id: product.id,
        },
    )
    .await?;
    vendor_service::delete_product(&state, &common::vendor_identity(&vendor), product.id).await?;

    let items = saved_product_service::list_saved_products(&state, &customer)
        .await?
        .data
        .expect("saved")
        .items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Kettle");
    assert!(!items[0].is_available);

    assert!(matches!(
        saved_product_service::remove_saved_product(&state, &other, product.id).await,
        Err(AppError::NotFound(_))
    ));
    saved_product_service::remove_saved_product(&state, &customer, product.id).await?;
    assert!(matches!(
        saved_product_service::remove_saved_product(&state, &customer, product.id).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}
