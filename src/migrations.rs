//! Database schema, applied with `sea-orm-migration` at startup.
//!
//! One migration per table, in dependency order: cars, suppliers and
//! customers first, then parts (references cars and suppliers), then sales
//! (references parts and customers). Deleting a supplier or customer clears
//! the references pointing at it; cars and parts that are still referenced
//! refuse deletion at the database level as a backstop for the handler
//! checks.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(CreateCarsTable),
            Box::new(CreateSuppliersTable),
            Box::new(CreateCustomersTable),
            Box::new(CreatePartsTable),
            Box::new(CreateSalesTable),
        ]
    }
}

pub struct CreateCarsTable;

#[async_trait::async_trait]
impl MigrationName for CreateCarsTable {
    fn name(&self) -> &'static str {
        "m20250114_000001_create_cars_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateCarsTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(CarEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(CarColumn::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(CarColumn::Brand).text().not_null())
            .col(ColumnDef::new(CarColumn::Model).text().not_null())
            .col(ColumnDef::new(CarColumn::Year).integer().not_null())
            .col(ColumnDef::new(CarColumn::BodyType).string().not_null())
            .col(ColumnDef::new(CarColumn::FuelType).string().not_null())
            .col(
                ColumnDef::new(CarColumn::EngineVolume)
                    .decimal_len(5, 2)
                    .null(),
            )
            .col(ColumnDef::new(CarColumn::Transmission).text().null())
            .col(ColumnDef::new(CarColumn::Mileage).integer().null())
            .col(
                ColumnDef::new(CarColumn::Vin)
                    .text()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(CarColumn::Color).text().null())
            .col(ColumnDef::new(CarColumn::Description).text().null())
            .col(ColumnDef::new(CarColumn::Images).json().not_null())
            .col(ColumnDef::new(CarColumn::Notes).text().null())
            .col(
                ColumnDef::new(CarColumn::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(CarColumn::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CarEntity).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum CarColumn {
    Id,
    Brand,
    Model,
    Year,
    BodyType,
    FuelType,
    EngineVolume,
    Transmission,
    Mileage,
    Vin,
    Color,
    Description,
    Images,
    Notes,
    CreatedAt,
    UpdatedAt,
}

impl Iden for CarColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Brand => "brand",
                Self::Model => "model",
                Self::Year => "year",
                Self::BodyType => "body_type",
                Self::FuelType => "fuel_type",
                Self::EngineVolume => "engine_volume",
                Self::Transmission => "transmission",
                Self::Mileage => "mileage",
                Self::Vin => "vin",
                Self::Color => "color",
                Self::Description => "description",
                Self::Images => "images",
                Self::Notes => "notes",
                Self::CreatedAt => "created_at",
                Self::UpdatedAt => "updated_at",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct CarEntity;

impl Iden for CarEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "cars").unwrap();
    }
}

pub struct CreateSuppliersTable;

#[async_trait::async_trait]
impl MigrationName for CreateSuppliersTable {
    fn name(&self) -> &'static str {
        "m20250114_000002_create_suppliers_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateSuppliersTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(SupplierEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(ContactColumn::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(ContactColumn::Name).text().not_null())
            .col(ColumnDef::new(ContactColumn::Phone).text().null())
            .col(ColumnDef::new(ContactColumn::Email).text().null())
            .col(ColumnDef::new(ContactColumn::Address).text().null())
            .col(ColumnDef::new(ContactColumn::Notes).text().null())
            .col(
                ColumnDef::new(ContactColumn::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ContactColumn::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupplierEntity).to_owned())
            .await?;
        Ok(())
    }
}

pub struct CreateCustomersTable;

#[async_trait::async_trait]
impl MigrationName for CreateCustomersTable {
    fn name(&self) -> &'static str {
        "m20250114_000003_create_customers_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateCustomersTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(CustomerEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(ContactColumn::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(ContactColumn::Name).text().not_null())
            .col(ColumnDef::new(ContactColumn::Phone).text().null())
            .col(ColumnDef::new(ContactColumn::Email).text().null())
            .col(ColumnDef::new(ContactColumn::Address).text().null())
            .col(ColumnDef::new(ContactColumn::Notes).text().null())
            .col(
                ColumnDef::new(ContactColumn::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ContactColumn::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerEntity).to_owned())
            .await?;
        Ok(())
    }
}

/// Suppliers and customers share a column layout.
#[derive(Debug)]
pub enum ContactColumn {
    Id,
    Name,
    Phone,
    Email,
    Address,
    Notes,
    CreatedAt,
    UpdatedAt,
}

impl Iden for ContactColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Phone => "phone",
                Self::Email => "email",
                Self::Address => "address",
                Self::Notes => "notes",
                Self::CreatedAt => "created_at",
                Self::UpdatedAt => "updated_at",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct SupplierEntity;

impl Iden for SupplierEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "suppliers").unwrap();
    }
}

#[derive(Debug)]
pub struct CustomerEntity;

impl Iden for CustomerEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "customers").unwrap();
    }
}

pub struct CreatePartsTable;

#[async_trait::async_trait]
impl MigrationName for CreatePartsTable {
    fn name(&self) -> &'static str {
        "m20250114_000004_create_parts_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreatePartsTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(PartEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(PartColumn::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(PartColumn::Name).text().not_null())
            .col(ColumnDef::new(PartColumn::Category).string().not_null())
            .col(ColumnDef::new(PartColumn::CarId).uuid().null())
            .col(
                ColumnDef::new(PartColumn::Condition)
                    .string()
                    .not_null()
                    .default("good"),
            )
            .col(
                ColumnDef::new(PartColumn::Status)
                    .string()
                    .not_null()
                    .default("available"),
            )
            .col(ColumnDef::new(PartColumn::Price).decimal_len(12, 2).null())
            .col(
                ColumnDef::new(PartColumn::PurchasePrice)
                    .decimal_len(12, 2)
                    .null(),
            )
            .col(ColumnDef::new(PartColumn::PurchaseDate).date().null())
            .col(ColumnDef::new(PartColumn::Location).text().null())
            .col(ColumnDef::new(PartColumn::SupplierId).uuid().null())
            .col(ColumnDef::new(PartColumn::Images).json().not_null())
            .col(ColumnDef::new(PartColumn::Notes).text().null())
            .col(
                ColumnDef::new(PartColumn::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(PartColumn::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_part_car")
                    .from(PartEntity, PartColumn::CarId)
                    .to(CarEntity, CarColumn::Id)
                    .on_delete(ForeignKeyAction::Restrict),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_part_supplier")
                    .from(PartEntity, PartColumn::SupplierId)
                    .to(SupplierEntity, ContactColumn::Id)
                    .on_delete(ForeignKeyAction::SetNull),
            )
            .to_owned();

        manager.create_table(table).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_parts_car_id")
                    .table(PartEntity)
                    .col(PartColumn::CarId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_parts_status")
                    .table(PartEntity)
                    .col(PartColumn::Status)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartEntity).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum PartColumn {
    Id,
    Name,
    Category,
    CarId,
    Condition,
    Status,
    Price,
    PurchasePrice,
    PurchaseDate,
    Location,
    SupplierId,
    Images,
    Notes,
    CreatedAt,
    UpdatedAt,
}

impl Iden for PartColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Category => "category",
                Self::CarId => "car_id",
                Self::Condition => "condition",
                Self::Status => "status",
                Self::Price => "price",
                Self::PurchasePrice => "purchase_price",
                Self::PurchaseDate => "purchase_date",
                Self::Location => "location",
                Self::SupplierId => "supplier_id",
                Self::Images => "images",
                Self::Notes => "notes",
                Self::CreatedAt => "created_at",
                Self::UpdatedAt => "updated_at",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct PartEntity;

impl Iden for PartEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "parts").unwrap();
    }
}

pub struct CreateSalesTable;

#[async_trait::async_trait]
impl MigrationName for CreateSalesTable {
    fn name(&self) -> &'static str {
        "m20250114_000005_create_sales_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateSalesTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(SaleEntity)
            .if_not_exists()
            .col(
                ColumnDef::new(SaleColumn::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(SaleColumn::PartId).uuid().not_null())
            .col(ColumnDef::new(SaleColumn::CustomerId).uuid().null())
            .col(
                ColumnDef::new(SaleColumn::Price)
                    .decimal_len(12, 2)
                    .not_null(),
            )
            .col(
                ColumnDef::new(SaleColumn::SoldAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(ColumnDef::new(SaleColumn::Notes).text().null())
            .col(
                ColumnDef::new(SaleColumn::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(SaleColumn::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_sale_part")
                    .from(SaleEntity, SaleColumn::PartId)
                    .to(PartEntity, PartColumn::Id)
                    .on_delete(ForeignKeyAction::Restrict),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_sale_customer")
                    .from(SaleEntity, SaleColumn::CustomerId)
                    .to(CustomerEntity, ContactColumn::Id)
                    .on_delete(ForeignKeyAction::SetNull),
            )
            .to_owned();

        manager.create_table(table).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sales_part_id")
                    .table(SaleEntity)
                    .col(SaleColumn::PartId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sales_sold_at")
                    .table(SaleEntity)
                    .col(SaleColumn::SoldAt)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SaleEntity).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum SaleColumn {
    Id,
    PartId,
    CustomerId,
    Price,
    SoldAt,
    Notes,
    CreatedAt,
    UpdatedAt,
}

impl Iden for SaleColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::PartId => "part_id",
                Self::CustomerId => "customer_id",
                Self::Price => "price",
                Self::SoldAt => "sold_at",
                Self::Notes => "notes",
                Self::CreatedAt => "created_at",
                Self::UpdatedAt => "updated_at",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct SaleEntity;

impl Iden for SaleEntity {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "sales").unwrap();
    }
}
