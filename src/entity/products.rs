use sea_orm::entity::prelude::*;

/// Prices are minor currency units (cents).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub images: String,
    pub number_of_available_units: i32,
    pub number_of_viewers: i32,
    pub vendor_phone_number: String,
    pub is_pending: bool,
    pub is_approved: bool,
    pub is_rejected: bool,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Approved and not tombstoned; the only products customers can see or buy.
    pub fn is_visible(&self) -> bool {
        self.is_approved && !self.is_deleted
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendors::Entity",
        from = "Column::VendorPhoneNumber",
        to = "super::vendors::Column::PhoneNumber"
    )]
    Vendors,
    #[sea_orm(has_many = "super::cart_items::Entity")]
    CartItems,
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
    #[sea_orm(has_many = "super::saved_products::Entity")]
    SavedProducts,
}

impl Related<super::vendors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl Related<super::cart_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl Related<super::saved_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
