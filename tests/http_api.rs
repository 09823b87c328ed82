mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use marketplace_api::routes::build_app;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

#[tokio::test]
async fn health_and_fallback() -> anyhow::Result<()> {
    let app = build_app(common::setup_state().await?);

    let (status, body) = send(&app, Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/nope", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/nope");
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_token() -> anyhow::Result<()> {
    let app = build_app(common::setup_state().await?);

    let (status, body) = send(&app, Method::GET, "/api/cart", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Missing Authorization header.");
    assert_eq!(body["data"]["error"], "Unauthorized");

    let (status, _) = send(&app, Method::GET, "/api/cart", Some("garbage"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn vendor_approval_over_http() -> anyhow::Result<()> {
    let app = build_app(common::setup_state().await?);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login/admin",
        None,
        Some(json!({ "email": common::ADMIN_EMAIL, "password": common::ADMIN_PASSWORD })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Admin");
    let admin_token = body["data"]["access_token"].as_str().unwrap_or_default().to_string();

    let (status, body) =
        send(&app, Method::GET, "/api/admin/vendors", Some(&admin_token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["error"], "Not Found");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register/vendor",
        None,
        Some(json!({
            "store_name": "Gadget Hub",
            "owner_name": "Omar Samir",
            "business_email": "gadgets@marketplace.com",
            "password": "Passw0rd",
            "confirm_password": "Passw0rd",
            "phone_number": "+201234567890"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_pending"], true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login/vendor",
        None,
        Some(json!({ "email": "gadgets@marketplace.com", "password": "Passw0rd" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Vendor account is pending approval.");

    let approve = "/api/admin/vendors/+201234567890/approve";
    let (status, body) = send(&app, Method::PUT, approve, Some(&admin_token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Vendor approved successfully.");

    let (status, body) = send(&app, Method::PUT, approve, Some(&admin_token), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Vendor is already approved.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login/vendor",
        None,
        Some(json!({ "email": "gadgets@marketplace.com", "password": "Passw0rd" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let vendor_token = body["data"]["access_token"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&app, Method::PUT, approve, Some(&vendor_token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/vendor/products",
        Some(&vendor_token),
        Some(json!({
            "title": "Headphones",
            "description": "Noise cancelling",
            "price": 4999,
            "category": "Electronics",
            "images": "",
            "number_of_available_units": 3
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_pending"], true);
    let product_id = body["data"]["id"].as_i64().unwrap_or_default();

    let (status, _) =
        send(&app, Method::GET, &format!("/api/products/{product_id}"), None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/admin/products/{product_id}/accept"),
        Some(&admin_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send(&app, Method::GET, &format!("/api/products/{product_id}"), None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["store_name"], "Gadget Hub");
    assert_eq!(body["data"]["number_of_viewers"], 1);
    Ok(())
}

#[tokio::test]
async fn customer_shopping_over_http() -> anyhow::Result<()> {
    let state = common::setup_state().await?;
    let vendor =
        common::create_vendor(&state, "+201000000001", "Alpha", common::VendorState::Approved)
            .await?;
    let product = common::create_product(&state, &vendor, common::NewProduct::default()).await?;
    let app = build_app(state);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register/customer",
        None,
        Some(json!({
            "full_name": "Mona Adel",
            "email": "mona@marketplace.com",
            "password": "Passw0rd",
            "confirm_password": "Passw0rd",
            "phone_number": "+201234567890"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/auth/login/customer",
        None,
        Some(json!({ "email": "mona@marketplace.com", "password": "Passw0rd" })),
    )
    .await?;
    let token = body["data"]["access_token"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cart",
        Some(&token),
        Some(json!({ "product_id": product.id, "quantity": 2 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product added to cart successfully.");

    let (status, body) = send(&app, Method::GET, "/api/cart", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_price"], 2000);
    assert_eq!(body["meta"]["total"], 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders/checkout",
        Some(&token),
        Some(json!({ "address": "5 Tahrir Square", "phone_number": "+201111111111" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total_price"], 2000);

    let (status, body) = send(&app, Method::GET, "/api/cart", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Cart is empty.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/saved-products",
        Some(&token),
        Some(json!({ "product_id": product.id })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/saved-products",
        Some(&token),
        Some(json!({ "product_id": product.id })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, Method::GET, "/api/orders", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["items"][0]["quantity"], 2);
    Ok(())
}
