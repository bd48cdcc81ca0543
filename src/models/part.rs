//! Harvested part records.
//!
//! Parts are what the yard actually sells. Each one optionally references the
//! donor car it came from and the supplier it was bought from. When a part is
//! created without an explicit category, one is inferred from the free-text
//! name (see [`crate::category`]); the inferred value is stored, never
//! recomputed on rename.

use super::ImageUrls;
use crate::category::infer_category;
use crate::errors::ApiError;
use crate::traits::{CrudResource, MergeIntoActiveModel};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{IntoActiveModel, Order, PaginatorTrait, QueryFilter, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: PartCategory,
    pub car_id: Option<Uuid>,
    pub condition: PartCondition,
    pub status: PartStatus,
    pub price: Option<Decimal>,
    pub purchase_price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub supplier_id: Option<Uuid>,
    #[sea_orm(column_type = "Json")]
    pub images: ImageUrls,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id"
    )]
    Car,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    #[sea_orm(has_many = "super::sale::Entity")]
    Sale,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Coarse part grouping; nine buckets, inferred from the name when absent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
    #[sea_orm(string_value = "engine")]
    Engine,
    #[sea_orm(string_value = "transmission")]
    Transmission,
    #[sea_orm(string_value = "suspension")]
    Suspension,
    #[sea_orm(string_value = "brakes")]
    Brakes,
    #[sea_orm(string_value = "electrical")]
    Electrical,
    #[sea_orm(string_value = "body")]
    Body,
    #[sea_orm(string_value = "interior")]
    Interior,
    #[sea_orm(string_value = "exterior")]
    Exterior,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PartCondition {
    #[sea_orm(string_value = "excellent")]
    Excellent,
    #[default]
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "fair")]
    Fair,
    #[sea_orm(string_value = "poor")]
    Poor,
    #[sea_orm(string_value = "broken")]
    Broken,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PartStatus {
    #[default]
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "reserved")]
    Reserved,
    #[sea_orm(string_value = "sold")]
    Sold,
    #[sea_orm(string_value = "scrapped")]
    Scrapped,
}

/// API representation of a part.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub category: PartCategory,
    pub car_id: Option<Uuid>,
    pub condition: PartCondition,
    pub status: PartStatus,
    pub price: Option<Decimal>,
    pub purchase_price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub images: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Part {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            car_id: model.car_id,
            condition: model.condition,
            status: model.status,
            price: model.price,
            purchase_price: model.purchase_price,
            purchase_date: model.purchase_date,
            location: model.location,
            supplier_id: model.supplier_id,
            images: model.images.0,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartCreate {
    pub name: String,
    /// Omit to have the category inferred from the name.
    #[serde(default)]
    pub category: Option<PartCategory>,
    #[serde(default)]
    pub car_id: Option<Uuid>,
    #[serde(default)]
    pub condition: PartCondition,
    #[serde(default)]
    pub status: PartStatus,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<Uuid>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<PartCreate> for ActiveModel {
    fn from(payload: PartCreate) -> Self {
        let now = Utc::now();
        let category = payload
            .category
            .unwrap_or_else(|| infer_category(&payload.name));
        Self {
            id: Set(Uuid::new_v4()),
            name: Set(payload.name.trim().to_string()),
            category: Set(category),
            car_id: Set(payload.car_id),
            condition: Set(payload.condition),
            status: Set(payload.status),
            price: Set(payload.price),
            purchase_price: Set(payload.purchase_price),
            purchase_date: Set(payload.purchase_date),
            location: Set(payload.location),
            supplier_id: Set(payload.supplier_id),
            images: Set(ImageUrls(payload.images.unwrap_or_default())),
            notes: Set(payload.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Partial update payload. Absent fields keep their value; nullable fields
/// accept an explicit `null` to clear the column.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<PartCategory>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub car_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub condition: Option<PartCondition>,
    #[serde(default)]
    pub status: Option<PartStatus>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub price: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub purchase_price: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub supplier_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

impl MergeIntoActiveModel<ActiveModel> for PartUpdate {
    fn merge_into_active_model(self, mut existing: ActiveModel) -> Result<ActiveModel, ApiError> {
        if let Some(name) = self.name {
            existing.name = Set(name.trim().to_string());
        }
        if let Some(category) = self.category {
            existing.category = Set(category);
        }
        if let Some(car_id) = self.car_id {
            existing.car_id = Set(car_id);
        }
        if let Some(condition) = self.condition {
            existing.condition = Set(condition);
        }
        if let Some(status) = self.status {
            existing.status = Set(status);
        }
        if let Some(price) = self.price {
            existing.price = Set(price);
        }
        if let Some(purchase_price) = self.purchase_price {
            existing.purchase_price = Set(purchase_price);
        }
        if let Some(purchase_date) = self.purchase_date {
            existing.purchase_date = Set(purchase_date);
        }
        if let Some(location) = self.location {
            existing.location = Set(location);
        }
        if let Some(supplier_id) = self.supplier_id {
            existing.supplier_id = Set(supplier_id);
        }
        if let Some(images) = self.images {
            existing.images = Set(ImageUrls(images));
        }
        if let Some(notes) = self.notes {
            existing.notes = Set(notes);
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

async fn ensure_car_exists(db: &DatabaseConnection, id: Uuid) -> Result<(), ApiError> {
    let found = super::car::Entity::find_by_id(id).count(db).await?;
    if found == 0 {
        return Err(ApiError::bad_request(format!(
            "carId '{id}' references a car that does not exist"
        )));
    }
    Ok(())
}

async fn ensure_supplier_exists(db: &DatabaseConnection, id: Uuid) -> Result<(), ApiError> {
    let found = super::supplier::Entity::find_by_id(id).count(db).await?;
    if found == 0 {
        return Err(ApiError::bad_request(format!(
            "supplierId '{id}' references a supplier that does not exist"
        )));
    }
    Ok(())
}

#[async_trait]
impl CrudResource for Part {
    type Entity = Entity;
    type Column = Column;
    type ActiveModel = ActiveModel;
    type Create = PartCreate;
    type Update = PartUpdate;

    const RESOURCE_NAME: &'static str = "part";

    fn sortable_columns() -> &'static [(&'static str, Column)] {
        &[
            ("name", Column::Name),
            ("category", Column::Category),
            ("condition", Column::Condition),
            ("status", Column::Status),
            ("price", Column::Price),
            ("purchaseDate", Column::PurchaseDate),
            ("createdAt", Column::CreatedAt),
            ("updatedAt", Column::UpdatedAt),
        ]
    }

    fn default_sort() -> (Column, Order) {
        (Column::CreatedAt, Order::Desc)
    }

    async fn create(db: &DatabaseConnection, payload: PartCreate) -> Result<Self, ApiError> {
        if let Some(car_id) = payload.car_id {
            ensure_car_exists(db, car_id).await?;
        }
        if let Some(supplier_id) = payload.supplier_id {
            ensure_supplier_exists(db, supplier_id).await?;
        }
        let active: ActiveModel = payload.into();
        let inserted = active.insert(db).await?;
        Ok(Self::from(inserted))
    }

    async fn update(db: &DatabaseConnection, id: Uuid, payload: PartUpdate) -> Result<Self, ApiError> {
        if let Some(Some(car_id)) = payload.car_id {
            ensure_car_exists(db, car_id).await?;
        }
        if let Some(Some(supplier_id)) = payload.supplier_id {
            ensure_supplier_exists(db, supplier_id).await?;
        }
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))?;
        let active = payload.merge_into_active_model(model.into_active_model())?;
        Ok(Self::from(active.update(db).await?))
    }

    /// Refuses deletion while sales still reference the part; cancel the
    /// sale first to release it.
    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, ApiError> {
        let part = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))?;

        let recorded = super::sale::Entity::find()
            .filter(super::sale::Column::PartId.eq(id))
            .count(db)
            .await?;
        if recorded > 0 {
            return Err(ApiError::bad_request(format!(
                "cannot delete part '{}': {recorded} sale(s) reference it",
                part.name
            )));
        }

        Entity::delete_by_id(id).exec(db).await?;
        Ok(id)
    }
}
