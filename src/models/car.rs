//! Donor car records.
//!
//! Cars are the vehicles bought for disassembly. Parts reference their donor
//! car, so a car cannot be deleted while any part still points at it. The VIN
//! is normalized to uppercase and must stay unique across the yard.

use super::ImageUrls;
use crate::errors::ApiError;
use crate::traits::{CrudResource, MergeIntoActiveModel};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{IntoActiveModel, Order, PaginatorTrait, QueryFilter, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub body_type: BodyType,
    pub fuel_type: FuelType,
    pub engine_volume: Option<Decimal>,
    pub transmission: Option<String>,
    pub mileage: Option<i32>,
    #[sea_orm(unique)]
    pub vin: String,
    pub color: Option<String>,
    pub description: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub images: ImageUrls,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::part::Entity")]
    Part,
}

impl Related<super::part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Part.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    #[sea_orm(string_value = "sedan")]
    Sedan,
    #[sea_orm(string_value = "hatchback")]
    Hatchback,
    #[sea_orm(string_value = "wagon")]
    Wagon,
    #[sea_orm(string_value = "suv")]
    Suv,
    #[sea_orm(string_value = "coupe")]
    Coupe,
    #[sea_orm(string_value = "convertible")]
    Convertible,
    #[sea_orm(string_value = "pickup")]
    Pickup,
    #[sea_orm(string_value = "van")]
    Van,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[sea_orm(string_value = "gasoline")]
    Gasoline,
    #[sea_orm(string_value = "diesel")]
    Diesel,
    #[sea_orm(string_value = "hybrid")]
    Hybrid,
    #[sea_orm(string_value = "electric")]
    Electric,
    #[sea_orm(string_value = "lpg")]
    Lpg,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Uppercase a VIN and strip surrounding whitespace.
#[must_use]
pub fn normalize_vin(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// API representation of a donor car.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub body_type: BodyType,
    pub fuel_type: FuelType,
    pub engine_volume: Option<Decimal>,
    pub transmission: Option<String>,
    pub mileage: Option<i32>,
    pub vin: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Car {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            brand: model.brand,
            model: model.model,
            year: model.year,
            body_type: model.body_type,
            fuel_type: model.fuel_type,
            engine_volume: model.engine_volume,
            transmission: model.transmission,
            mileage: model.mileage,
            vin: model.vin,
            color: model.color,
            description: model.description,
            images: model.images.0,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarCreate {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub body_type: BodyType,
    pub fuel_type: FuelType,
    #[serde(default)]
    pub engine_volume: Option<Decimal>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default)]
    pub mileage: Option<i32>,
    pub vin: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CarCreate> for ActiveModel {
    fn from(payload: CarCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            brand: Set(payload.brand.trim().to_string()),
            model: Set(payload.model.trim().to_string()),
            year: Set(payload.year),
            body_type: Set(payload.body_type),
            fuel_type: Set(payload.fuel_type),
            engine_volume: Set(payload.engine_volume),
            transmission: Set(payload.transmission),
            mileage: Set(payload.mileage),
            vin: Set(normalize_vin(&payload.vin)),
            color: Set(payload.color),
            description: Set(payload.description),
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
pub struct CarUpdate {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub body_type: Option<BodyType>,
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub engine_volume: Option<Option<Decimal>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub transmission: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub mileage: Option<Option<i32>>,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

impl MergeIntoActiveModel<ActiveModel> for CarUpdate {
    fn merge_into_active_model(self, mut existing: ActiveModel) -> Result<ActiveModel, ApiError> {
        if let Some(brand) = self.brand {
            existing.brand = Set(brand.trim().to_string());
        }
        if let Some(model) = self.model {
            existing.model = Set(model.trim().to_string());
        }
        if let Some(year) = self.year {
            existing.year = Set(year);
        }
        if let Some(body_type) = self.body_type {
            existing.body_type = Set(body_type);
        }
        if let Some(fuel_type) = self.fuel_type {
            existing.fuel_type = Set(fuel_type);
        }
        if let Some(engine_volume) = self.engine_volume {
            existing.engine_volume = Set(engine_volume);
        }
        if let Some(transmission) = self.transmission {
            existing.transmission = Set(transmission);
        }
        if let Some(mileage) = self.mileage {
            existing.mileage = Set(mileage);
        }
        if let Some(vin) = self.vin {
            existing.vin = Set(normalize_vin(&vin));
        }
        if let Some(color) = self.color {
            existing.color = Set(color);
        }
        if let Some(description) = self.description {
            existing.description = Set(description);
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

/// Reject a VIN already taken by another car.
async fn ensure_vin_free(
    db: &DatabaseConnection,
    vin: &str,
    exclude: Option<Uuid>,
) -> Result<(), ApiError> {
    let mut query = Entity::find().filter(Column::Vin.eq(vin));
    if let Some(id) = exclude {
        query = query.filter(Column::Id.ne(id));
    }
    if query.count(db).await? > 0 {
        return Err(ApiError::bad_request(format!(
            "a car with VIN '{vin}' already exists"
        )));
    }
    Ok(())
}

#[async_trait]
impl CrudResource for Car {
    type Entity = Entity;
    type Column = Column;
    type ActiveModel = ActiveModel;
    type Create = CarCreate;
    type Update = CarUpdate;

    const RESOURCE_NAME: &'static str = "car";

    fn sortable_columns() -> &'static [(&'static str, Column)] {
        &[
            ("brand", Column::Brand),
            ("model", Column::Model),
            ("year", Column::Year),
            ("mileage", Column::Mileage),
            ("createdAt", Column::CreatedAt),
            ("updatedAt", Column::UpdatedAt),
        ]
    }

    fn default_sort() -> (Column, Order) {
        (Column::CreatedAt, Order::Desc)
    }

    async fn create(db: &DatabaseConnection, payload: CarCreate) -> Result<Self, ApiError> {
        ensure_vin_free(db, &normalize_vin(&payload.vin), None).await?;
        let active: ActiveModel = payload.into();
        let inserted = active.insert(db).await?;
        Ok(Self::from(inserted))
    }

    async fn update(db: &DatabaseConnection, id: Uuid, payload: CarUpdate) -> Result<Self, ApiError> {
        if let Some(raw) = payload.vin.as_deref() {
            ensure_vin_free(db, &normalize_vin(raw), Some(id)).await?;
        }
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))?;
        let active = payload.merge_into_active_model(model.into_active_model())?;
        Ok(Self::from(active.update(db).await?))
    }

    /// Refuses deletion while parts still reference the car.
    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, ApiError> {
        let car = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))?;

        let attached = super::part::Entity::find()
            .filter(super::part::Column::CarId.eq(id))
            .count(db)
            .await?;
        if attached > 0 {
            return Err(ApiError::bad_request(format!(
                "cannot delete car '{} {}': {attached} part(s) still reference it",
                car.brand, car.model
            )));
        }

        Entity::delete_by_id(id).exec(db).await?;
        Ok(id)
    }
}
