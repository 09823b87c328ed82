use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub phone_number: String,
    pub store_name: String,
    pub owner_name: String,
    #[sea_orm(unique)]
    pub business_email: String,
    pub password_hash: String,
    pub is_approved: bool,
    pub is_pending: bool,
    pub is_enabled: bool,
    pub auto_approve_products: bool,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Neither pending nor approved.
    pub fn is_disapproved(&self) -> bool {
        !self.is_pending && !self.is_approved
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
