use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vendors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vendors::PhoneNumber).string().not_null().primary_key())
                    .col(ColumnDef::new(Vendors::StoreName).string().not_null())
                    .col(ColumnDef::new(Vendors::OwnerName).string().not_null())
                    .col(ColumnDef::new(Vendors::BusinessEmail).string().not_null().unique_key())
                    .col(ColumnDef::new(Vendors::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Vendors::IsApproved).boolean().not_null().default(false))
                    .col(ColumnDef::new(Vendors::IsPending).boolean().not_null().default(true))
                    .col(ColumnDef::new(Vendors::IsEnabled).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Vendors::AutoApproveProducts)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Vendors::CreatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Customers::PhoneNumber).string().not_null().primary_key())
                    .col(ColumnDef::new(Customers::FullName).string().not_null())
                    .col(ColumnDef::new(Customers::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Customers::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Customers::CreatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Title).string().not_null())
                    .col(ColumnDef::new(Products::Description).text().not_null())
                    .col(ColumnDef::new(Products::Price).big_integer().not_null())
                    .col(ColumnDef::new(Products::Category).string().not_null())
                    .col(ColumnDef::new(Products::Images).text().not_null())
                    .col(
                        ColumnDef::new(Products::NumberOfAvailableUnits)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::NumberOfViewers)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Products::VendorPhoneNumber).string().not_null())
                    .col(ColumnDef::new(Products::IsPending).boolean().not_null().default(true))
                    .col(ColumnDef::new(Products::IsApproved).boolean().not_null().default(false))
                    .col(ColumnDef::new(Products::IsRejected).boolean().not_null().default(false))
                    .col(ColumnDef::new(Products::IsDeleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Products::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_vendor")
                            .from(Products::Table, Products::VendorPhoneNumber)
                            .to(Vendors::Table, Vendors::PhoneNumber),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CartItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CartItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CartItems::CustomerPhoneNumber).string().not_null())
                    .col(ColumnDef::new(CartItems::ProductId).integer().not_null())
                    .col(ColumnDef::new(CartItems::Quantity).integer().not_null())
                    .col(ColumnDef::new(CartItems::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_items_customer")
                            .from(CartItems::Table, CartItems::CustomerPhoneNumber)
                            .to(Customers::Table, Customers::PhoneNumber),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_items_product")
                            .from(CartItems::Table, CartItems::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One cart row per (customer, product).
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cart_items_customer_product")
                    .table(CartItems::Table)
                    .col(CartItems::CustomerPhoneNumber)
                    .col(CartItems::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::CustomerPhoneNumber).string().not_null())
                    .col(ColumnDef::new(Orders::Address).string().not_null())
                    .col(ColumnDef::new(Orders::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Orders::Comment).text().null())
                    .col(ColumnDef::new(Orders::OrderDate).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Orders::TotalPrice).big_integer().not_null())
                    .col(ColumnDef::new(Orders::Status).string().not_null().default("Active"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_customer")
                            .from(Orders::Table, Orders::CustomerPhoneNumber)
                            .to(Customers::Table, Customers::PhoneNumber),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderItems::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderItems::ProductId).integer().not_null())
                    .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                    .col(ColumnDef::new(OrderItems::Price).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_order")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_product")
                            .from(OrderItems::Table, OrderItems::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SavedProducts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SavedProducts::CustomerPhoneNumber).string().not_null())
                    .col(ColumnDef::new(SavedProducts::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(SavedProducts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SavedProducts::CustomerPhoneNumber)
                            .col(SavedProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_products_customer")
                            .from(SavedProducts::Table, SavedProducts::CustomerPhoneNumber)
                            .to(Customers::Table, Customers::PhoneNumber),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_products_product")
                            .from(SavedProducts::Table, SavedProducts::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vendors::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Vendors {
    Table,
    PhoneNumber,
    StoreName,
    OwnerName,
    BusinessEmail,
    PasswordHash,
    IsApproved,
    IsPending,
    IsEnabled,
    AutoApproveProducts,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    PhoneNumber,
    FullName,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Title,
    Description,
    Price,
    Category,
    Images,
    NumberOfAvailableUnits,
    NumberOfViewers,
    VendorPhoneNumber,
    IsPending,
    IsApproved,
    IsRejected,
    IsDeleted,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CartItems {
    Table,
    Id,
    CustomerPhoneNumber,
    ProductId,
    Quantity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CustomerPhoneNumber,
    Address,
    PhoneNumber,
    Comment,
    OrderDate,
    TotalPrice,
    Status,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    ProductId,
    Quantity,
    Price,
}

#[derive(DeriveIden)]
enum SavedProducts {
    Table,
    CustomerPhoneNumber,
    ProductId,
    CreatedAt,
}
