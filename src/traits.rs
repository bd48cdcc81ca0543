//! Generic CRUD plumbing shared by every inventory resource.
//!
//! Each resource (car, part, supplier, customer, sale) implements
//! [`CrudResource`] on its API model and gets list/get/create/update/delete
//! against its Sea-ORM entity for free. Resources with extra rules (donor car
//! deletion, the sale flow) override the relevant default method and keep the
//! rest.

use crate::errors::ApiError;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, IntoActiveModel, Order, PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

/// Fold a partial update payload into an existing active model.
///
/// Fields absent from the payload keep their current value; nullable fields
/// accept an explicit `null` to clear the column.
pub trait MergeIntoActiveModel<A: ActiveModelTrait> {
    fn merge_into_active_model(self, existing: A) -> Result<A, ApiError>;
}

#[async_trait]
pub trait CrudResource: Sized + Send + Sync
where
    Self::Entity: EntityTrait<Column = Self::Column>,
    Self::ActiveModel:
        ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static,
    <Self::Entity as EntityTrait>::Model: IntoActiveModel<Self::ActiveModel> + Send + Sync,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    Self: From<<Self::Entity as EntityTrait>::Model>,
{
    type Entity: EntityTrait;
    type Column: ColumnTrait + Copy;
    type ActiveModel: ActiveModelTrait;
    type Create: Into<Self::ActiveModel> + Send;
    type Update: MergeIntoActiveModel<Self::ActiveModel> + Send;

    /// Singular name used in error messages, e.g. `"car"`.
    const RESOURCE_NAME: &'static str;

    /// Query keys accepted by `?sort=`, paired with their columns.
    fn sortable_columns() -> &'static [(&'static str, Self::Column)];

    /// Applied when no `?sort=` parameter is given.
    fn default_sort() -> (Self::Column, Order);

    async fn get_all(
        db: &DatabaseConnection,
        condition: Condition,
        order_by: (Self::Column, Order),
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self>, ApiError> {
        let models = Self::Entity::find()
            .filter(condition)
            .order_by(order_by.0, order_by.1)
            .offset(offset)
            .limit(limit)
            .all(db)
            .await?;
        Ok(models.into_iter().map(Self::from).collect())
    }

    async fn get_one(db: &DatabaseConnection, id: Uuid) -> Result<Self, ApiError> {
        let model = Self::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))?;
        Ok(Self::from(model))
    }

    async fn create(db: &DatabaseConnection, payload: Self::Create) -> Result<Self, ApiError> {
        let active: Self::ActiveModel = payload.into();
        let result = Self::Entity::insert(active).exec(db).await?;
        let model = Self::Entity::find_by_id(result.last_insert_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ApiError::internal(
                    format!("created {} could not be reloaded", Self::RESOURCE_NAME),
                    None,
                )
            })?;
        Ok(Self::from(model))
    }

    async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        payload: Self::Update,
    ) -> Result<Self, ApiError> {
        let model = Self::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())))?;
        let active = payload.merge_into_active_model(model.into_active_model())?;
        let updated = active.update(db).await?;
        Ok(Self::from(updated))
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Uuid, ApiError> {
        let result = Self::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ApiError::not_found(Self::RESOURCE_NAME, Some(id.to_string())));
        }
        Ok(id)
    }

    async fn total_count(db: &DatabaseConnection, condition: Condition) -> Result<u64, ApiError> {
        Ok(Self::Entity::find().filter(condition).count(db).await?)
    }
}
