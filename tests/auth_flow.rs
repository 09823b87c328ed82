mod common;

use marketplace_api::{
    dto::auth::{LoginRequest, RegisterCustomerRequest, RegisterVendorRequest},
    error::AppError,
    middleware::auth::{Role, decode_token},
    services::{admin_service, auth_service},
    state::AppState,
};

fn customer_request(email: &str, phone: &str) -> RegisterCustomerRequest {
    RegisterCustomerRequest {
        full_name: "Mona Adel".into(),
        email: email.into(),
        password: "Passw0rd".into(),
        confirm_password: "Passw0rd".into(),
        phone_number: phone.into(),
    }
}

fn vendor_request(email: &str, phone: &str) -> RegisterVendorRequest {
    RegisterVendorRequest {
        store_name: "Gadget Hub".into(),
        owner_name: "Omar Samir".into(),
        business_email: email.into(),
        password: "Passw0rd".into(),
        confirm_password: "Passw0rd".into(),
        phone_number: phone.into(),
    }
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

async fn vendor_login_message(state: &AppState) -> AppError {
    auth_service::login_vendor(state, login("gadgets@marketplace.com", "Passw0rd"))
        .await
        .expect_err("login should fail")
}

#[tokio::test]
async fn customer_registration_validates_email_and_phone() -> anyhow::Result<()> {
    let state = common::setup_state().await?;

    assert!(matches!(
        auth_service::register_customer(&state, customer_request("user@other.com", "+201234567890")).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        auth_service::register_customer(&state, customer_request("user@marketplace.com", "12345")).await,
        Err(AppError::BadRequest(_))
    ));

    let mut weak = customer_request("user@marketplace.com", "+201234567890");
    weak.password = "password".into();
    weak.confirm_password = "password".into();
    assert!(matches!(
        auth_service::register_customer(&state, weak).await,
        Err(AppError::BadRequest(_))
    ));

    let mut mismatch = customer_request("user@marketplace.com", "+201234567890");
    mismatch.confirm_password = "Passw0rd!".into();
    assert!(matches!(
        auth_service::register_customer(&state, mismatch).await,
        Err(AppError::BadRequest(_))
    ));

    let resp = auth_service::register_customer(
        &state,
        customer_request("user@marketplace.com", "+201234567890"),
    )
    .await?;
    let profile = resp.data.expect("profile");
    assert_eq!(profile.phone_number, "+201234567890");
    assert_eq!(profile.email, "user@marketplace.com");
    Ok(())
}

#[tokio::test]
async fn duplicate_email_or_phone_conflicts() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    auth_service::register_customer(&state, customer_request("user@marketplace.com", "+201234567890"))
        .await?;

    assert!(matches!(
        auth_service::register_customer(&state, customer_request("user@marketplace.com", "+201234567891")).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        auth_service::register_customer(&state, customer_request("other@marketplace.com", "+201234567890")).await,
        Err(AppError::Conflict(_))
    ));

    auth_service::register_vendor(&state, vendor_request("gadgets@marketplace.com", "+201234567890"))
        .await?;
    assert!(matches!(
        auth_service::register_vendor(&state, vendor_request("gadgets@marketplace.com", "+201234567899")).await,
        Err(AppError::Conflict(_))
    ));
    Ok(())
}

#[tokio::test]
async fn customer_login_issues_token() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    auth_service::register_customer(&state, customer_request("user@marketplace.com", "+201234567890"))
        .await?;

    match auth_service::login_customer(&state, login("user@marketplace.com", "Wrong1234")).await {
        Err(AppError::Unauthorized(message)) => assert_eq!(message, "Invalid email or password."),
        other => panic!("expected unauthorized, got {other:?}"),
    }
    assert!(matches!(
        auth_service::login_customer(&state, login("nobody@marketplace.com", "Passw0rd")).await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        auth_service::login_customer(&state, login("user@other.com", "Passw0rd")).await,
        Err(AppError::BadRequest(_))
    ));

    let data = auth_service::login_customer(&state, login("user@marketplace.com", "Passw0rd"))
        .await?
        .data
        .expect("token");
    assert_eq!(data.role, Role::Customer);
    let identity = decode_token(&state.config, &data.access_token)?;
    assert_eq!(identity.phone_number(), "+201234567890");
    assert_eq!(identity.email, "user@marketplace.com");
    Ok(())
}

#[tokio::test]
async fn vendor_login_gates_in_order() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let admin = common::admin();
    auth_service::register_vendor(&state, vendor_request("gadgets@marketplace.com", "+201234567890"))
        .await?;

    match vendor_login_message(&state).await {
        AppError::BadRequest(message) => assert_eq!(message, "Vendor account is pending approval."),
        other => panic!("unexpected {other:?}"),
    }

    // Pending still wins over disabled.
    admin_service::disable_vendor(&state, &admin, "+201234567890").await?;
    match vendor_login_message(&state).await {
        AppError::BadRequest(message) => assert_eq!(message, "Vendor account is pending approval."),
        other => panic!("unexpected {other:?}"),
    }

    admin_service::disapprove_vendor(&state, &admin, "+201234567890").await?;
    match vendor_login_message(&state).await {
        AppError::Unauthorized(message) => assert_eq!(message, "Vendor is not approved."),
        other => panic!("unexpected {other:?}"),
    }

    admin_service::approve_vendor(&state, &admin, "+201234567890").await?;
    match vendor_login_message(&state).await {
        AppError::BadRequest(message) => assert_eq!(message, "Vendor is disabled."),
        other => panic!("unexpected {other:?}"),
    }

    admin_service::enable_vendor(&state, &admin, "+201234567890").await?;
    let data = auth_service::login_vendor(&state, login("gadgets@marketplace.com", "Passw0rd"))
        .await?
        .data
        .expect("token");
    assert_eq!(data.role, Role::Vendor);
    Ok(())
}

#[tokio::test]
async fn admin_login_uses_configured_credentials() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    assert!(matches!(
        auth_service::login_admin(&state, login(common::ADMIN_EMAIL, "nope")).await,
        Err(AppError::Unauthorized(_))
    ));
    let data = auth_service::login_admin(&state, login(common::ADMIN_EMAIL, common::ADMIN_PASSWORD))
        .await?
        .data
        .expect("token");
    assert_eq!(data.role, Role::Admin);
    let identity = decode_token(&state.config, &data.access_token)?;
    assert_eq!(identity.role, Role::Admin);
    Ok(())
}

#[tokio::test]
async fn emails_ignore_letter_case() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let profile = auth_service::register_customer(
        &state,
        customer_request("Mona.Adel@Marketplace.com", "+201234567890"),
    )
    .await?
    .data
    .expect("profile");
    assert_eq!(profile.email, "mona.adel@marketplace.com");

    assert!(matches!(
        auth_service::register_customer(&state, customer_request("mona.adel@marketplace.com", "+201234567891")).await,
        Err(AppError::Conflict(_))
    ));
    let data = auth_service::login_customer(&state, login("MONA.ADEL@marketplace.com", "Passw0rd"))
        .await?
        .data
        .expect("token");
    assert_eq!(data.email, "mona.adel@marketplace.com");

    auth_service::register_vendor(&state, vendor_request("Gadgets@Marketplace.com", "+201234567899"))
        .await?;
    assert!(matches!(
        auth_service::register_vendor(&state, vendor_request("gadgets@marketplace.com", "+201234567898")).await,
        Err(AppError::Conflict(_))
    ));
    Ok(())
}
