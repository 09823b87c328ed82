use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{admin, auth as auth_dto, cart as cart_dto, orders as order_dto, products, saved_products as saved_dto},
    middleware::auth::Role,
    response::{ApiResponse, Meta},
    routes::{
        admin as admin_routes, auth, cart, health, notifications, orders,
        products as product_routes, saved_products, vendor,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register_customer,
        auth::register_vendor,
        auth::login_customer,
        auth::login_vendor,
        auth::login_admin,
        admin_routes::list_vendors,
        admin_routes::list_pending_products,
        admin_routes::approve_vendor,
        admin_routes::disapprove_vendor,
        admin_routes::enable_vendor,
        admin_routes::disable_vendor,
        admin_routes::set_auto_approve_products,
        admin_routes::set_auto_approve_all,
        admin_routes::accept_product,
        admin_routes::reject_product,
        product_routes::list_products,
        product_routes::get_product,
        cart::view_cart,
        cart::add_to_cart,
        cart::remove_from_cart,
        orders::checkout,
        orders::order_history,
        saved_products::list_saved_products,
        saved_products::save_product,
        saved_products::remove_saved_product,
        vendor::list_products,
        vendor::add_product,
        vendor::update_product,
        vendor::delete_product,
        vendor::list_orders,
        vendor::list_orders_for_product,
        notifications::ws_handler
    ),
    components(
        schemas(
            Role,
            Meta,
            auth_dto::RegisterCustomerRequest,
            auth_dto::RegisterVendorRequest,
            auth_dto::LoginRequest,
            auth_dto::LoginResponse,
            auth_dto::CustomerProfile,
            auth_dto::VendorSummary,
            admin::AutoApproveRequest,
            admin::VendorList,
            admin::PendingProduct,
            admin::PendingProductList,
            products::ProductView,
            products::ProductList,
            products::VendorProductView,
            products::VendorProductList,
            products::AddProductRequest,
            products::UpdateProductRequest,
            cart_dto::AddToCartRequest,
            cart_dto::CartItemView,
            cart_dto::CartLine,
            cart_dto::CartView,
            order_dto::CheckoutRequest,
            order_dto::OrderItemView,
            order_dto::OrderView,
            order_dto::OrderList,
            order_dto::VendorOrderView,
            order_dto::VendorOrderList,
            saved_dto::SaveProductRequest,
            saved_dto::SavedProductView,
            saved_dto::SavedProductList,
            ApiResponse<products::ProductList>,
            ApiResponse<order_dto::OrderView>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and login"),
        (name = "Admin", description = "Vendor and product moderation"),
        (name = "Products", description = "Public catalog"),
        (name = "Cart", description = "Customer cart"),
        (name = "Orders", description = "Checkout and order history"),
        (name = "Saved Products", description = "Customer saved products"),
        (name = "Vendor", description = "Vendor products and orders"),
        (name = "Notifications", description = "Real-time notifications over WebSocket"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
