//! Sale records.
//!
//! A sale links an available part to a buyer and a price. Creating one flips
//! the part to `sold` in the same transaction; deleting one cancels the sale
//! and releases the part back to `available` (unless it was scrapped in the
//! meantime). The sold part itself cannot be swapped on an existing sale;
//! cancel and re-sell instead.

use super::part::{self, PartStatus};
use crate::errors::ApiError;
use crate::traits::{CrudResource, MergeIntoActiveModel};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    IntoActiveModel, Order, PaginatorTrait, Set, TransactionTrait, entity::prelude::*,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub part_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub price: Decimal,
    pub sold_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::part::Entity",
        from = "Column::PartId",
        to = "super::part::Column::Id"
    )]
    Part,
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
}

impl Related<super::part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Part.def()
    }
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// API representation of a sale.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub part_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub price: Decimal,
    pub sold_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Sale {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            part_id: model.part_id,
            customer_id: model.customer_id,
            price: model.price,
            sold_at: model.sold_at,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreate {
    pub part_id: Uuid,
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    pub price: Decimal,
    /// Defaults to the current time.
    #[serde(default)]
    pub sold_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<SaleCreate> for ActiveModel {
    fn from(payload: SaleCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            part_id: Set(payload.part_id),
            customer_id: Set(payload.customer_id),
            price: Set(payload.price),
            sold_at: Set(payload.sold_at.unwrap_or(now)),
            notes: Set(payload.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Partial update payload. The sold part cannot be changed here.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleUpdate {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub customer_id: Option<Option<Uuid>>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub sold_at: Option<DateTime<Utc>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

impl MergeIntoActiveModel<ActiveModel> for SaleUpdate {
    fn merge_into_active_model(self, mut existing: ActiveModel) -> Result<ActiveModel, ApiError> {
        if let Some(customer_id) = self.customer_id {
            existing.customer_id = Set(customer_id);
        }
        if let Some(price) = self.price {
            existing.price = Set(price);
        }
        if let Some(sold_at) = self.sold_at {
            existing.sold_at = Set(sold_at);
        }
        if let Some(notes) = self.notes {
            existing.notes = Set(notes);
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

async fn ensure_customer_exists(db: &DatabaseConnection, id: Uuid) -> Result<(), ApiError> {
    let found = super::customer::Entity::find_by_id(id).count(db).await?;
    if found == 0 {
        return Err(ApiError::bad_request(format!(
            "customerId '{id}' references a customer that does not exist"
        )));
    }
    Ok(())
}

#[async_trait]
impl CrudResource for Sale {
    type Entity = Entity;
    type Column = Column;
    type ActiveModel = ActiveModel;
    type Create = SaleCreate;
    type Update = SaleUpdate;

    const RESOURCE_NAME: &'static str = "sale";

    fn sortable_columns() -> &'static [(&'static str, Column)] {
        &[
            ("soldAt", Column::SoldAt),
            ("price", Column::Price),
            ("createdAt", Column::CreatedAt),
        ]
    }

    fn default_sort() -> (Column, Order) {
        (Column::SoldAt, Order::Desc)
    }

    /// Records the sale and marks the part sold in one transaction.
    async fn create(db: &DatabaseConnection, payload: SaleCreate) -> Result<Self, ApiError> {
        if let Some(customer_id) = payload.customer_id {
            ensure_customer_exists(db, customer_id).await?;
        }

        let txn = db.begin().await?;

        let sold_part = part::Entity::find_by_id(payload.part_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ApiError::bad_request(format!(
                    "partId '{}' references a part that does not exist",
                    payload.part_id
                ))
            })?;
        match sold_part.status {
            PartStatus::Available | PartStatus::Reserved => {}
            PartStatus::Sold => {
                return Err(ApiError::bad_request(format!(
                    "part '{}' is already sold",
                    sold_part.name
                )));
            }
            PartStatus::Scrapped => {
                return Err(ApiError::bad_request(format!(
                    "part '{}' is scrapped and cannot be sold",
                    sold_part.name
                )));
            }
        }

        let mut part_active = sold_part.into_active_model();
        part_active.status = Set(PartStatus::Sold);
        part_active.updated_at = Set(Utc::now());
        part_active.update(&txn).await?;

        let active: ActiveModel = payload.into();
        let inserted = active.insert(&txn).await?;

        txn.commit().await?;
        Ok(Self::from(inserted))
    }

    async fn update(db: &DatabaseConnection, id: Uuid, payload: SaleUpdate) -> Result<Self, ApiError> {
        if let Some(Some(customer_id)) = payload.customer_id {
            ensure_customer_exists(db, customer_id).await?;
        }
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))?;
        let active = payload.merge_into_active_model(model.into_active_model())?;
        Ok(Self::from(active.update(db).await?))
    }

    /// Cancels the sale and releases the part back to `available`.
    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, ApiError> {
        let txn = db.begin().await?;

        let sale = Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))?;

        if let Some(sold_part) = part::Entity::find_by_id(sale.part_id).one(&txn).await? {
            if sold_part.status == PartStatus::Sold {
                let mut part_active = sold_part.into_active_model();
                part_active.status = Set(PartStatus::Available);
                part_active.updated_at = Set(Utc::now());
                part_active.update(&txn).await?;
            }
        }

        Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(id)
    }
}
