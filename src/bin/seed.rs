use chrono::Utc;
use marketplace_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        Customers, Products, Vendors, customers, products, vendors,
    },
    services::auth_service::hash_password,
    validation::normalize_email,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

const VENDOR_PHONE: &str = "+201000000001";
const CUSTOMER_PHONE: &str = "+201000000002";
const DEMO_PASSWORD: &str = "Passw0rd";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let domain = &config.allowed_email_domain;
    ensure_vendor(&orm, &normalize_email(&format!("store@{domain}"))).await?;
    ensure_customer(&orm, &normalize_email(&format!("customer@{domain}"))).await?;
    seed_products(&orm).await?;

    println!("Seed completed. Vendor: {VENDOR_PHONE}, Customer: {CUSTOMER_PHONE}, password: {DEMO_PASSWORD}");
    Ok(())
}

async fn ensure_vendor(orm: &DatabaseConnection, email: &str) -> anyhow::Result<()> {
    if Vendors::find_by_id(VENDOR_PHONE.to_string()).one(orm).await?.is_some() {
        return Ok(());
    }
    vendors::ActiveModel {
        phone_number: Set(VENDOR_PHONE.to_string()),
        store_name: Set("Demo Store".into()),
        owner_name: Set("Demo Owner".into()),
        business_email: Set(email.to_string()),
        password_hash: Set(hash_password(DEMO_PASSWORD)?),
        is_approved: Set(true),
        is_pending: Set(false),
        is_enabled: Set(true),
        auto_approve_products: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;
    Ok(())
}

async fn ensure_customer(orm: &DatabaseConnection, email: &str) -> anyhow::Result<()> {
    if Customers::find_by_id(CUSTOMER_PHONE.to_string()).one(orm).await?.is_some() {
        return Ok(());
    }
    customers::ActiveModel {
        phone_number: Set(CUSTOMER_PHONE.to_string()),
        full_name: Set("Demo Customer".into()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(DEMO_PASSWORD)?),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;
    Ok(())
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let existing = Products::find()
        .filter(products::Column::VendorPhoneNumber.eq(VENDOR_PHONE))
        .count(orm)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let catalog = [
        ("Mechanical Keyboard", "Tactile switches, full size", 7_999_i64, "Electronics", 25),
        ("Wireless Mouse", "2.4 GHz, silent clicks", 2_499, "Electronics", 40),
        ("Coffee Beans", "1 kg medium roast", 1_850, "Groceries", 60),
        ("Desk Lamp", "LED, adjustable arm", 3_200, "Home", 15),
    ];

    for (title, description, price, category, units) in catalog {
        products::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            price: Set(price),
            category: Set(category.to_string()),
            images: Set(String::new()),
            number_of_available_units: Set(units),
            number_of_viewers: Set(0),
            vendor_phone_number: Set(VENDOR_PHONE.to_string()),
            is_pending: Set(false),
            is_approved: Set(true),
            is_rejected: Set(false),
            is_deleted: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(orm)
        .await?;
    }
    Ok(())
}
