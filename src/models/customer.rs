//! Customers that buy parts.
//!
//! Deleting a customer keeps their sales; the foreign key clears
//! `customerId` on the affected sale records.

use crate::errors::ApiError;
use crate::traits::{CrudResource, MergeIntoActiveModel};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{Order, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale::Entity")]
    Sale,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// API representation of a customer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Model> for Customer {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone,
            email: model.email,
            address: model.address,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CustomerCreate> for ActiveModel {
    fn from(payload: CustomerCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            name: Set(payload.name.trim().to_string()),
            phone: Set(payload.phone),
            email: Set(payload.email),
            address: Set(payload.address),
            notes: Set(payload.notes),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

impl MergeIntoActiveModel<ActiveModel> for CustomerUpdate {
    fn merge_into_active_model(self, mut existing: ActiveModel) -> Result<ActiveModel, ApiError> {
        if let Some(name) = self.name {
            existing.name = Set(name.trim().to_string());
        }
        if let Some(phone) = self.phone {
            existing.phone = Set(phone);
        }
        if let Some(email) = self.email {
            existing.email = Set(email);
        }
        if let Some(address) = self.address {
            existing.address = Set(address);
        }
        if let Some(notes) = self.notes {
            existing.notes = Set(notes);
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

#[async_trait]
impl CrudResource for Customer {
    type Entity = Entity;
    type Column = Column;
    type ActiveModel = ActiveModel;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;

    const RESOURCE_NAME: &'static str = "customer";

    fn sortable_columns() -> &'static [(&'static str, Column)] {
        &[
            ("name", Column::Name),
            ("createdAt", Column::CreatedAt),
            ("updatedAt", Column::UpdatedAt),
        ]
    }

    fn default_sort() -> (Column, Order) {
        (Column::Name, Order::Asc)
    }
}
