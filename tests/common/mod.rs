#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::Utc;
use marketplace_api::{
    config::AppConfig,
    db::create_orm_conn,
    entity::{customers, products, vendors},
    middleware::auth::{ActingIdentity, Role},
    migration::Migrator,
    notify::{Notification, NotificationSink, NotifyError},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use sea_orm_migration::MigratorTrait;

pub const ADMIN_EMAIL: &str = "admin@marketplace.com";
pub const ADMIN_PASSWORD: &str = "Admin1234";

pub fn test_config(database_url: &str) -> AppConfig {
    AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "integration-test-secret".into(),
        jwt_ttl_hours: 1,
        admin_email: ADMIN_EMAIL.into(),
        admin_password: ADMIN_PASSWORD.into(),
        allowed_email_domain: "marketplace.com".into(),
        notification_buffer: 64,
    }
}

/// Fresh schema per call. In-memory SQLite unless `TEST_DATABASE_URL` is set, in which case the
/// tests must run with `--test-threads=1`.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let database_url =
        std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let orm = create_orm_conn(&database_url).await?;
    Migrator::fresh(&orm).await?;
    Ok(AppState::new(orm, test_config(&database_url)))
}

pub async fn setup_recording() -> anyhow::Result<(AppState, RecordingSink)> {
    let sink = RecordingSink::default();
    let state = setup_state().await?.with_notifier(Arc::new(sink.clone()));
    Ok((state, sink))
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn publish(&self, notification: Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

pub struct FailingSink;

impl NotificationSink for FailingSink {
    fn publish(&self, _notification: Notification) -> Result<(), NotifyError> {
        Err(NotifyError::Closed)
    }
}

pub fn admin() -> ActingIdentity {
    ActingIdentity {
        subject: ADMIN_EMAIL.into(),
        email: ADMIN_EMAIL.into(),
        role: Role::Admin,
    }
}

pub fn customer_identity(phone: &str) -> ActingIdentity {
    ActingIdentity {
        subject: phone.into(),
        email: format!("c{}@marketplace.com", phone.trim_start_matches('+')),
        role: Role::Customer,
    }
}

pub fn vendor_identity(vendor: &vendors::Model) -> ActingIdentity {
    ActingIdentity {
        subject: vendor.phone_number.clone(),
        email: vendor.business_email.clone(),
        role: Role::Vendor,
    }
}

#[derive(Clone, Copy)]
pub enum VendorState {
    Pending,
    Approved,
    Disapproved,
}

pub async fn create_vendor(
    state: &AppState,
    phone: &str,
    store_name: &str,
    vendor_state: VendorState,
) -> anyhow::Result<vendors::Model> {
    let (is_pending, is_approved) = match vendor_state {
        VendorState::Pending => (true, false),
        VendorState::Approved => (false, true),
        VendorState::Disapproved => (false, false),
    };
    let vendor = vendors::ActiveModel {
        phone_number: Set(phone.into()),
        store_name: Set(store_name.into()),
        owner_name: Set(format!("{store_name} Owner")),
        business_email: Set(format!("v{}@marketplace.com", phone.trim_start_matches('+'))),
        password_hash: Set("unused".into()),
        is_approved: Set(is_approved),
        is_pending: Set(is_pending),
        is_enabled: Set(true),
        auto_approve_products: Set(false),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(vendor)
}

pub async fn create_customer(state: &AppState, phone: &str) -> anyhow::Result<ActingIdentity> {
    let identity = customer_identity(phone);
    customers::ActiveModel {
        phone_number: Set(phone.into()),
        full_name: Set("Test Customer".into()),
        email: Set(identity.email.clone()),
        password_hash: Set("unused".into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(identity)
}

pub struct NewProduct<'a> {
    pub title: &'a str,
    pub price: i64,
    pub units: i32,
    pub category: &'a str,
    pub approved: bool,
}

impl Default for NewProduct<'_> {
    fn default() -> Self {
        Self {
            title: "Widget",
            price: 1000,
            units: 10,
            category: "General",
            approved: true,
        }
    }
}

pub async fn create_product(
    state: &AppState,
    vendor: &vendors::Model,
    new: NewProduct<'_>,
) -> anyhow::Result<products::Model> {
    let product = products::ActiveModel {
        title: Set(new.title.into()),
        description: Set(format!("{} description", new.title)),
        price: Set(new.price),
        category: Set(new.category.into()),
        images: Set(String::new()),
        number_of_available_units: Set(new.units),
        number_of_viewers: Set(0),
        vendor_phone_number: Set(vendor.phone_number.clone()),
        is_pending: Set(!new.approved),
        is_approved: Set(new.approved),
        is_rejected: Set(false),
        is_deleted: Set(false),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}
